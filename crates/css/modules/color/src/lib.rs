//! CSS Color Module Level 4 — hex color notation.
//! Spec: <https://www.w3.org/TR/css-color-4/#hex-notation>
use csscolorparser::Color;
use log::trace;

/// Opaque 8-bit sRGB channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Whether `digits` is a 3- or 6-digit run of ASCII hex digits (without the `#`).
///
/// The 4- and 8-digit forms carry their own alpha and are not accepted.
#[inline]
pub fn is_rgb_hex_digits(digits: &str) -> bool {
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|byte| byte.is_ascii_hexdigit())
}

/// Decode the digits of a `#rgb` or `#rrggbb` color (without the `#`).
///
/// Short digits are expanded by duplicating each nibble (`0fc` -> `00ffcc`).
/// Returns `None` for anything that is not exactly 3 or 6 hex digits.
///
/// Spec: <https://www.w3.org/TR/css-color-4/#hex-notation>
pub fn parse_hex_rgb(digits: &str) -> Option<Rgb8> {
    if !is_rgb_hex_digits(digits) {
        return None;
    }
    let parsed: Color = match format!("#{digits}").parse() {
        Ok(color) => color,
        Err(err) => {
            trace!("hex digits {digits:?} rejected by csscolorparser: {err}");
            return None;
        }
    };
    let [red, green, blue, _alpha] = parsed.to_rgba8();
    Some(Rgb8::new(red, green, blue))
}
