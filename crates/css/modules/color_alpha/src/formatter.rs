//! Color components back to CSS text.
use crate::resolver::resolve;
use crate::types::Notation;

/// Render the replacement text for a matched notation.
///
/// `black(1)` and `white(1)` collapse to `#000` and `#FFF`; every other
/// notation, opaque or not, becomes `rgba(r, g, b, a)`.
pub fn render(notation: &Notation) -> String {
    let color = resolve(notation);
    if color.alpha.is_opaque()
        && let Some(shorthand) = opaque_shorthand(notation)
    {
        return shorthand.to_owned();
    }
    color.to_string()
}

const fn opaque_shorthand(notation: &Notation) -> Option<&'static str> {
    match notation {
        Notation::Black { .. } => Some("#000"),
        Notation::White { .. } => Some("#FFF"),
        Notation::ShortHexAlpha { .. }
        | Notation::LongHexAlpha { .. }
        | Notation::RgbaHex { .. }
        | Notation::RgbaRgb { .. } => None,
    }
}
