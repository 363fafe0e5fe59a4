//! CSS Syntax Module Level 3 — Parsing and tokenization.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Declarations remember the byte span of their value in the source text, so a
//! stylesheet can be written back with only the values that plugins changed.

#![forbid(unsafe_code)]

mod parser;

use core::ops::Range;
use log::debug;

pub use parser::parse_stylesheet;

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name, lowercased unless it is a custom property.
    pub name: String,
    /// Value text (without trailing !important).
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
    /// Byte range of the original value text in the stylesheet source.
    pub span: Range<usize>,
}

/// A style rule with a raw prelude, its declarations and any nested rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text (typically the selector list).
    pub prelude: String,
    /// Declarations within the rule block.
    pub declarations: Vec<Declaration>,
    /// Nested rules within the rule block.
    pub rules: Vec<Rule>,
}

/// An at-rule such as `@media` or `@font-face`.
///
/// Block-less at-rules (`@import ...;`) have empty `declarations` and `rules`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    /// Lowercased at-keyword without the `@`.
    pub name: String,
    /// Raw prelude text.
    pub prelude: String,
    pub declarations: Vec<Declaration>,
    pub rules: Vec<Rule>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    Style(StyleRule),
    At(AtRule),
}

impl Rule {
    fn parts(&self) -> (&[Declaration], &[Self]) {
        match self {
            Self::Style(style) => (style.declarations.as_slice(), style.rules.as_slice()),
            Self::At(at_rule) => (at_rule.declarations.as_slice(), at_rule.rules.as_slice()),
        }
    }

    fn parts_mut(&mut self) -> (&mut [Declaration], &mut [Self]) {
        match self {
            Self::Style(style) => (
                style.declarations.as_mut_slice(),
                style.rules.as_mut_slice(),
            ),
            Self::At(at_rule) => (
                at_rule.declarations.as_mut_slice(),
                at_rule.rules.as_mut_slice(),
            ),
        }
    }
}

/// A parsed stylesheet that keeps its source text for serialization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    source: String,
    /// Declarations written directly at the top level, outside any rule.
    pub declarations: Vec<Declaration>,
    /// Top-level rules in source order.
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    /// The text this stylesheet was parsed from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every declaration in the sheet, including nested ones, in source order.
    pub fn declarations_in_order(&self) -> Vec<&Declaration> {
        let mut out: Vec<&Declaration> = Vec::new();
        collect_declarations(&self.declarations, &self.rules, &mut out);
        out.sort_by_key(|decl| decl.span.start);
        out
    }

    /// Serialize the stylesheet back to CSS.
    ///
    /// Every byte outside a declaration value is copied from the source; each
    /// value span is replaced by the declaration's current value. A sheet whose
    /// values were not changed serializes to exactly its source.
    pub fn to_css(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for decl in self.declarations_in_order() {
            if let Some(gap) = self.source.get(cursor..decl.span.start) {
                out.push_str(gap);
            }
            out.push_str(&decl.value);
            cursor = decl.span.end;
        }
        if let Some(tail) = self.source.get(cursor..) {
            out.push_str(tail);
        }
        out
    }
}

fn collect_declarations<'sheet>(
    declarations: &'sheet [Declaration],
    rules: &'sheet [Rule],
    out: &mut Vec<&'sheet Declaration>,
) {
    out.extend(declarations);
    for rule in rules {
        let (nested_decls, nested_rules) = rule.parts();
        collect_declarations(nested_decls, nested_rules, out);
    }
}

fn visit_declarations(
    declarations: &mut [Declaration],
    rules: &mut [Rule],
    visit: &mut dyn FnMut(&mut dyn DeclarationValue),
) {
    for decl in declarations {
        visit(decl);
    }
    for rule in rules {
        let (nested_decls, nested_rules) = rule.parts_mut();
        visit_declarations(nested_decls, nested_rules, visit);
    }
}

/// Read/write access to one declaration's value, independent of the parser
/// that produced it.
pub trait DeclarationValue {
    fn property(&self) -> &str;
    fn value(&self) -> &str;
    fn set_value(&mut self, value: String);
}

/// A tree of declarations that plugins can walk.
pub trait DeclarationSource {
    /// Call `visit` once for every declaration, in no particular order.
    fn for_each_declaration(&mut self, visit: &mut dyn FnMut(&mut dyn DeclarationValue));
}

/// A stylesheet transformation.
pub trait Plugin {
    fn name(&self) -> &'static str;
    fn run(&self, source: &mut dyn DeclarationSource);
}

impl DeclarationValue for Declaration {
    #[inline]
    fn property(&self) -> &str {
        &self.name
    }

    #[inline]
    fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

impl DeclarationSource for Stylesheet {
    fn for_each_declaration(&mut self, visit: &mut dyn FnMut(&mut dyn DeclarationValue)) {
        visit_declarations(&mut self.declarations, &mut self.rules, visit);
    }
}

/// Parse `css`, run each plugin over it in order and serialize the result.
pub fn process(css: &str, plugins: &[&dyn Plugin]) -> String {
    let mut sheet = parse_stylesheet(css);
    for plugin in plugins {
        debug!("running css plugin {}", plugin.name());
        plugin.run(&mut sheet);
    }
    sheet.to_css()
}
