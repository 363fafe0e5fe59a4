//! Color alpha shorthands for CSS declaration values.
//!
//! Rewrites `black(a)`, `white(a)`, `#rgb.a`, `#rrggbb.a`, `rgba(#hex, a)` and
//! `rgba(rgb(r, g, b), a)` into standard colors:
//!
//! ```text
//! div{ border-color: #0fc #000.2 white(.3) black }
//! div{ border-color: #0fc rgba(0, 0, 0, 0.2) rgba(255, 255, 255, 0.3) black }
//! ```
//!
//! The rewrite only needs read/write access to declaration values, see
//! [`css_syntax::DeclarationSource`]; [`process`] wires it to the bundled
//! stylesheet parser.

#![forbid(unsafe_code)]

pub mod alpha;
pub mod formatter;
pub mod matcher;
pub mod options;
pub mod resolver;
pub mod types;

use css_syntax::process as process_with_plugins;
use css_syntax::{DeclarationSource, DeclarationValue, Plugin};
use log::debug;

pub use alpha::Alpha;
pub use formatter::render;
pub use matcher::find_matches;
pub use options::Options;
pub use resolver::resolve;
pub use types::{ColorMatch, ColorValue, Notation};

/// Extra bytes a rendered `rgba(...)` usually needs over its notation.
const RENDER_HEADROOM: usize = 16;

/// Rewrite every alpha color notation in a declaration value.
///
/// Returns `None` when the value contains no notation and should be left as is.
/// Text between notations is kept byte for byte, and rewriting the output again
/// finds nothing.
pub fn rewrite_value(value: &str) -> Option<String> {
    let matches = find_matches(value);
    if matches.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(value.len() + matches.len() * RENDER_HEADROOM);
    let mut cursor = 0;
    for found in &matches {
        out.push_str(value.get(cursor..found.span.start)?);
        out.push_str(&render(&found.notation));
        cursor = found.span.end;
    }
    out.push_str(value.get(cursor..)?);
    Some(out)
}

/// The color alpha stylesheet plugin.
#[derive(Clone, Debug, Default)]
pub struct ColorAlpha {
    options: Options,
}

impl ColorAlpha {
    #[inline]
    pub const fn new(options: Options) -> Self {
        Self { options }
    }

    #[inline]
    pub const fn options(&self) -> &Options {
        &self.options
    }
}

impl Plugin for ColorAlpha {
    fn name(&self) -> &'static str {
        "color-alpha"
    }

    fn run(&self, source: &mut dyn DeclarationSource) {
        source.for_each_declaration(&mut |decl: &mut dyn DeclarationValue| {
            if let Some(rewritten) = rewrite_value(decl.value()) {
                debug!(
                    "[COLOR-ALPHA] {}: {:?} -> {rewritten:?}",
                    decl.property(),
                    decl.value()
                );
                decl.set_value(rewritten);
            }
        });
    }
}

/// Parse `css`, rewrite its alpha color notations and serialize it again.
///
/// Everything except rewritten values is reproduced exactly as written.
pub fn process(css: &str, options: &Options) -> String {
    let plugin = ColorAlpha::new(options.clone());
    process_with_plugins(css, &[&plugin])
}
