//! Locates alpha color notations inside a declaration value.
//!
//! The value is tokenized with `cssparser` and every function, parenthesis and
//! bracket block is scanned recursively, up to [`MAX_NESTING`] levels, so colors
//! nested in gradients are found while the surrounding text stays as written.
use crate::alpha::Alpha;
use crate::types::{ColorMatch, Notation};
use css_color::{Rgb8, is_rgb_hex_digits, parse_hex_rgb};
use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};
use log::trace;

/// Nested-block results; scanning itself never produces an error.
type ScanResult<'i, T> = Result<T, ParseError<'i, ()>>;

/// Length of a `#rgb` digit run; the only other accepted length is 6.
const SHORT_HEX_LEN: usize = 3;

/// Deepest block nesting that is scanned; deeper blocks are kept as written.
pub const MAX_NESTING: usize = 128;

/// Color functions whose arguments are not scanned when the call itself is
/// not a notation, so a color never ends up nested inside another color.
const COLOR_FUNCTIONS: [&str; 4] = ["rgb", "rgba", "hsl", "hsla"];

/// Find every alpha color notation in `value`, left to right.
///
/// Matches never overlap. A notation that is recognized replaces its whole
/// call, so colors inside an `rgba(#hex, a)` are not reported separately.
pub fn find_matches(value: &str) -> Vec<ColorMatch> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut found = Vec::new();
    scan_block(&mut parser, &mut found, 0);
    found
}

fn push_match(
    found: &mut Vec<ColorMatch>,
    start: SourcePosition,
    end: SourcePosition,
    notation: Notation,
) {
    trace!(
        "alpha color at {}..{}: {notation:?}",
        start.byte_index(),
        end.byte_index()
    );
    found.push(ColorMatch {
        span: start.byte_index()..end.byte_index(),
        notation,
    });
}

/// Scan tokens at `depth` blocks deep.
///
/// A block opened at `MAX_NESTING` is not entered; the tokenizer skips it on
/// the next call without recursing.
fn scan_block(input: &mut Parser<'_, '_>, found: &mut Vec<ColorMatch>, depth: usize) {
    loop {
        let start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Hash(digits) | Token::IDHash(digits) => {
                if let Some(notation) = hex_with_fraction(input, &digits) {
                    push_match(found, start, input.position(), notation);
                }
            }
            Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock
                if depth >= MAX_NESTING =>
            {
                trace!("not scanning block nested deeper than {MAX_NESTING}");
            }
            Token::Function(name) => scan_function(input, start, &name, found, depth),
            Token::ParenthesisBlock | Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                scan_nested(input, found, depth);
            }
            _ => {}
        }
    }
}

/// Scan the block that was just opened for nested notations.
fn scan_nested(input: &mut Parser<'_, '_>, found: &mut Vec<ColorMatch>, depth: usize) {
    let scanned: ScanResult<'_, ()> = input.parse_nested_block(|nested| {
        scan_block(nested, found, depth + 1);
        Ok(())
    });
    if let Err(err) = scanned {
        trace!("nested block scan stopped: {err:?}");
    }
}

/// Handle a function token: either the whole call is a notation, or its
/// arguments are scanned like any other block.
fn scan_function(
    input: &mut Parser<'_, '_>,
    start: SourcePosition,
    name: &str,
    found: &mut Vec<ColorMatch>,
    depth: usize,
) {
    let scanned: ScanResult<'_, Option<Notation>> = input.parse_nested_block(|args| {
        let args_start = args.state();
        if let Some(notation) = function_notation(name, args) {
            return Ok(Some(notation));
        }
        if !COLOR_FUNCTIONS.contains(&name) {
            args.reset(&args_start);
            scan_block(args, found, depth + 1);
        }
        Ok(None)
    });
    let end = input.position();
    match scanned {
        // An unterminated call at the end of the value is left alone.
        Ok(Some(notation)) if input.slice(start..end).ends_with(')') => {
            push_match(found, start, end, notation);
        }
        Ok(_) => {}
        Err(err) => trace!("{name}() scan stopped: {err:?}"),
    }
}

fn function_notation(name: &str, args: &mut Parser<'_, '_>) -> Option<Notation> {
    match name {
        "black" => lone_alpha(args, false).map(|alpha| Notation::Black { alpha }),
        "white" => lone_alpha(args, true).map(|alpha| Notation::White { alpha }),
        "rgba" => rgba_arguments(args),
        _ => None,
    }
}

/// `#rgb.a` / `#rrggbb.a`: hex digits immediately followed by `.digits`, then
/// whitespace, a comma, a closing parenthesis or the end of the block.
///
/// On failure the parser is left right after the hash token.
fn hex_with_fraction(input: &mut Parser<'_, '_>, digits: &str) -> Option<Notation> {
    if !is_rgb_hex_digits(digits) {
        return None;
    }
    let after_hash = input.state();
    let fraction = unsigned_number_literal(input)
        .filter(|literal| literal.starts_with('.'))
        .and_then(Alpha::from_literal)
        .filter(|_| at_delimiter(input));
    match (parse_hex_rgb(digits), fraction) {
        (Some(rgb), Some(alpha)) if digits.len() == SHORT_HEX_LEN => {
            Some(Notation::ShortHexAlpha { rgb, alpha })
        }
        (Some(rgb), Some(alpha)) => Some(Notation::LongHexAlpha { rgb, alpha }),
        _ => {
            input.reset(&after_hash);
            None
        }
    }
}

/// Whether the next token ends a value component. Consumes nothing.
fn at_delimiter(input: &mut Parser<'_, '_>) -> bool {
    let before = input.state();
    let delimited = matches!(
        input.next_including_whitespace_and_comments(),
        Err(_) | Ok(Token::WhiteSpace(_) | Token::Comma | Token::CloseParenthesis)
    );
    input.reset(&before);
    delimited
}

/// Consume the next token if it is an unsigned number and return its source text.
///
/// Whitespace is not skipped, so a number separated from what precedes it does
/// not count.
fn unsigned_number_literal<'i>(input: &mut Parser<'i, '_>) -> Option<&'i str> {
    let start = input.position();
    let is_number = matches!(
        input.next_including_whitespace_and_comments(),
        Ok(Token::Number {
            has_sign: false,
            ..
        })
    );
    is_number.then(|| input.slice_from(start))
}

/// An alpha argument, optionally preceded by whitespace.
fn alpha_argument(args: &mut Parser<'_, '_>) -> Option<Alpha> {
    args.skip_whitespace();
    unsigned_number_literal(args).and_then(Alpha::from_literal)
}

/// Arguments of `black()` / `white()`: a single alpha, or nothing when `optional`.
fn lone_alpha(args: &mut Parser<'_, '_>, optional: bool) -> Option<Alpha> {
    if optional && args.is_exhausted() {
        return Some(Alpha::transparent());
    }
    let alpha = alpha_argument(args)?;
    args.is_exhausted().then_some(alpha)
}

/// Arguments of `rgba()`: `#hex, a` or `rgb(r, g, b), a`.
fn rgba_arguments(args: &mut Parser<'_, '_>) -> Option<Notation> {
    let first = args.next().ok()?.clone();
    let (rgb, from_hex) = match first {
        Token::Hash(digits) | Token::IDHash(digits) => (parse_hex_rgb(&digits)?, true),
        Token::Function(name) if &*name == "rgb" => (nested_rgb(args)?, false),
        _ => return None,
    };
    args.expect_comma().ok()?;
    let alpha = alpha_argument(args)?;
    if !args.is_exhausted() {
        return None;
    }
    Some(if from_hex {
        Notation::RgbaHex { rgb, alpha }
    } else {
        Notation::RgbaRgb { rgb, alpha }
    })
}

/// Parse the block of an `rgb(` token that was just consumed.
fn nested_rgb(args: &mut Parser<'_, '_>) -> Option<Rgb8> {
    let components: ScanResult<'_, Option<Rgb8>> =
        args.parse_nested_block(|inner| Ok(rgb_components(inner)));
    components.ok().flatten()
}

/// `r, g, b` with integer channels in 0..=255.
fn rgb_components(inner: &mut Parser<'_, '_>) -> Option<Rgb8> {
    let red = channel(inner)?;
    inner.expect_comma().ok()?;
    let green = channel(inner)?;
    inner.expect_comma().ok()?;
    let blue = channel(inner)?;
    inner.is_exhausted().then_some(Rgb8::new(red, green, blue))
}

fn channel(inner: &mut Parser<'_, '_>) -> Option<u8> {
    match inner.next().ok()? {
        Token::Number {
            has_sign: false,
            int_value: Some(int_val),
            ..
        } => u8::try_from(*int_val).ok(),
        _ => None,
    }
}
