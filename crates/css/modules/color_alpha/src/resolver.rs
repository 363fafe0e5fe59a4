//! Notation to color components.
use crate::types::{ColorValue, Notation};
use css_color::Rgb8;

/// Resolve a matched notation into its components.
///
/// Hex digits were decoded while matching, so every notation resolves.
pub fn resolve(notation: &Notation) -> ColorValue {
    let (rgb, alpha) = match notation {
        Notation::Black { alpha } => (Rgb8::BLACK, alpha),
        Notation::White { alpha } => (Rgb8::WHITE, alpha),
        Notation::ShortHexAlpha { rgb, alpha }
        | Notation::LongHexAlpha { rgb, alpha }
        | Notation::RgbaHex { rgb, alpha }
        | Notation::RgbaRgb { rgb, alpha } => (*rgb, alpha),
    };
    ColorValue {
        red: rgb.red,
        green: rgb.green,
        blue: rgb.blue,
        alpha: alpha.clone(),
    }
}
