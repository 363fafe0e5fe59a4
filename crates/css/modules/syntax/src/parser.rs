//! Rule and declaration parsing on top of `cssparser`.
//!
//! One body grammar serves the top level, style rule blocks and at-rule blocks:
//! declarations and rules may appear in any of them, which also covers CSS
//! nesting and loose top-level declarations.
use crate::{AtRule, Declaration, Rule, StyleRule, Stylesheet};
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::Token;
use log::trace;

/// Length of the `important` keyword that may follow `!` at the end of a value.
const IMPORTANT_LEN: usize = "important".len();

/// Deepest rule nesting that is parsed; deeper blocks are skipped and kept verbatim.
const MAX_NESTING: usize = 128;

/// Anything that may appear in a rule body.
enum BodyItem {
    Declaration(Declaration),
    Rule(Rule),
}

/// Contents of one block (or the top level) in source order.
#[derive(Default)]
struct Body {
    declarations: Vec<Declaration>,
    rules: Vec<Rule>,
}

/// Split a trailing `!important` off a value, returning (`value_without_important`, `important_flag`).
///
/// The returned slice is a prefix of `value.trim()`.
fn split_important_tail(value: &str) -> (&str, bool) {
    let trimmed = value.trim();
    let Some(keyword_start) = trimmed.len().checked_sub(IMPORTANT_LEN) else {
        return (trimmed, false);
    };
    if let Some(head) = trimmed.get(..keyword_start)
        && let Some(keyword) = trimmed.get(keyword_start..)
        && keyword.eq_ignore_ascii_case("important")
        && let Some(before_bang) = head.trim_end().strip_suffix('!')
    {
        return (before_bang.trim_end(), true);
    }
    (trimmed, false)
}

/// Property names are ASCII case-insensitive except for custom properties.
fn normalize_property_name(name: &str) -> String {
    if name.starts_with("--") {
        name.to_owned()
    } else {
        name.to_ascii_lowercase()
    }
}

/// Consume the rest of the current delimited input and return its trimmed text.
fn consume_raw_prelude(input: &mut Parser) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_owned()
}

/// Parser for rule bodies that records declarations with their value spans.
struct BodyParser {
    /// Number of rule blocks enclosing the body being parsed.
    depth: usize,
}

impl BodyParser {
    /// Parse a rule block one level down, or reject it past `MAX_NESTING`.
    fn nested_body<'i>(&self, input: &mut Parser<'i, '_>) -> Result<Body, ParseError<'i, ()>> {
        if self.depth >= MAX_NESTING {
            return Err(input.new_custom_error(()));
        }
        Ok(parse_body(input, self.depth + 1))
    }
}

impl<'i> CssDeclarationParser<'i> for BodyParser {
    type Declaration = BodyItem;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        // A `{}` block means this is a nested rule such as `a:hover { ... }`.
        let mut saw_block = false;
        while let Ok(token) = input.next_including_whitespace_and_comments() {
            if matches!(token, Token::CurlyBracketBlock) {
                saw_block = true;
            }
        }
        if saw_block {
            return Err(input.new_custom_error(()));
        }
        let raw = input.slice_from(start);
        let (value, important) = split_important_tail(raw);
        let leading = raw.len() - raw.trim_start().len();
        let value_start = start.byte_index() + leading;
        Ok(BodyItem::Declaration(Declaration {
            name: normalize_property_name(&name),
            value: value.to_owned(),
            important,
            span: value_start..value_start + value.len(),
        }))
    }
}

impl<'i> CssAtRuleParser<'i> for BodyParser {
    /// (lowercased name, raw prelude)
    type Prelude = (String, String);
    type AtRule = BodyItem;
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok((name.to_ascii_lowercase(), consume_raw_prelude(input)))
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        let (at_name, at_prelude) = prelude;
        Ok(BodyItem::Rule(Rule::At(AtRule {
            name: at_name,
            prelude: at_prelude,
            declarations: Vec::new(),
            rules: Vec::new(),
        })))
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let (at_name, at_prelude) = prelude;
        let body = self.nested_body(input)?;
        Ok(BodyItem::Rule(Rule::At(AtRule {
            name: at_name,
            prelude: at_prelude,
            declarations: body.declarations,
            rules: body.rules,
        })))
    }
}

impl<'i> CssQualifiedRuleParser<'i> for BodyParser {
    type Prelude = String; // raw selector/prelude
    type QualifiedRule = BodyItem;
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(consume_raw_prelude(input))
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let body = self.nested_body(input)?;
        Ok(BodyItem::Rule(Rule::Style(StyleRule {
            prelude,
            declarations: body.declarations,
            rules: body.rules,
        })))
    }
}

impl CssRuleBodyItemParser<'_, BodyItem, ()> for BodyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

/// Parse declarations and rules from a block (or the top level, at depth 0).
fn parse_body(block: &mut Parser, depth: usize) -> Body {
    let mut body = Body::default();
    let mut item_parser = BodyParser { depth };
    for item in CssRuleBodyParser::new(block, &mut item_parser) {
        match item {
            Ok(BodyItem::Declaration(decl)) => body.declarations.push(decl),
            Ok(BodyItem::Rule(rule)) => body.rules.push(rule),
            Err((err, slice)) => trace!("skipping invalid css {slice:?}: {err:?}"),
        }
    }
    body
}

/// Parse a full stylesheet into a `Stylesheet` using cssparser.
///
/// Never fails: invalid rules and declarations are skipped and their text is
/// kept verbatim by [`Stylesheet::to_css`].
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let body = parse_body(&mut parser, 0);
    Stylesheet {
        source: css.to_owned(),
        declarations: body.declarations,
        rules: body.rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `!important` is split off regardless of case and spacing.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn splits_important_tail() {
        assert_eq!(split_important_tail(" red "), ("red", false));
        assert_eq!(split_important_tail("red !important"), ("red", true));
        assert_eq!(split_important_tail("red ! IMPORTANT "), ("red", true));
        assert_eq!(split_important_tail("important"), ("important", false));
        assert_eq!(split_important_tail(""), ("", false));
    }

    /// Custom property names keep their case.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn lowercases_standard_properties_only() {
        assert_eq!(normalize_property_name("Color"), "color");
        assert_eq!(normalize_property_name("--Accent"), "--Accent");
    }

    /// Rules nested past the limit are dropped from the tree.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn stops_descending_at_max_nesting() {
        fn depth_of(rules: &[Rule]) -> usize {
            rules
                .first()
                .map_or(0, |rule| 1 + depth_of(rule.parts().1))
        }
        let at_limit = format!("{}color: red", "a{".repeat(MAX_NESTING + 1));
        assert_eq!(depth_of(&parse_stylesheet(&at_limit).rules), MAX_NESTING);
        let within = format!("{}color: red", "a{".repeat(MAX_NESTING));
        assert_eq!(depth_of(&parse_stylesheet(&within).rules), MAX_NESTING);
    }
}
