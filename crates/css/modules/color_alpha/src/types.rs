//! Values produced while rewriting one declaration value.
use crate::alpha::Alpha;
use core::fmt;
use core::ops::Range;
use css_color::Rgb8;

/// A recognized alpha color notation with its arguments already decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notation {
    /// `black(a)`
    Black { alpha: Alpha },
    /// `white(a)`, or `white()` with alpha 0
    White { alpha: Alpha },
    /// `#rgb.a`
    ShortHexAlpha { rgb: Rgb8, alpha: Alpha },
    /// `#rrggbb.a`
    LongHexAlpha { rgb: Rgb8, alpha: Alpha },
    /// `rgba(#rgb, a)` or `rgba(#rrggbb, a)`
    RgbaHex { rgb: Rgb8, alpha: Alpha },
    /// `rgba(rgb(r, g, b), a)`
    RgbaRgb { rgb: Rgb8, alpha: Alpha },
}

/// A notation located inside a value string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorMatch {
    /// Byte range of the whole notation within the scanned value.
    pub span: Range<usize>,
    pub notation: Notation,
}

/// Resolved color components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorValue {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: Alpha,
}

impl ColorValue {
    #[inline]
    pub const fn rgb(&self) -> Rgb8 {
        Rgb8::new(self.red, self.green, self.blue)
    }
}

/// Writes the legacy comma form, `rgba(r, g, b, a)`.
impl fmt::Display for ColorValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "rgba({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}
