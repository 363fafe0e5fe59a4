//! Alpha channel values kept in their minimal decimal spelling.
use core::fmt;

/// An opacity in `[0, 1]`, stored as the shortest decimal text for the literal
/// it was read from (`.2` is `0.2`, `.0` is `0`, `1.00` is `1`).
///
/// The text is never rounded, so every digit written in the source survives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alpha(String);

impl Alpha {
    pub fn transparent() -> Self {
        Self("0".to_owned())
    }

    pub fn opaque() -> Self {
        Self("1".to_owned())
    }

    /// Read an unsigned decimal literal such as `0`, `1`, `.3`, `0.45` or `1.0`.
    ///
    /// Signs, exponents, units, a dangling `.` and anything above 1 give `None`.
    pub fn from_literal(literal: &str) -> Option<Self> {
        let (int_digits, frac_digits) = literal.split_once('.').unwrap_or((literal, ""));
        let all_digits = |text: &str| text.bytes().all(|byte| byte.is_ascii_digit());
        if literal.is_empty()
            || literal.ends_with('.')
            || !all_digits(int_digits)
            || !all_digits(frac_digits)
        {
            return None;
        }
        match (
            int_digits.trim_start_matches('0'),
            frac_digits.trim_end_matches('0'),
        ) {
            ("", "") => Some(Self::transparent()),
            ("", fraction) => Some(Self(format!("0.{fraction}"))),
            ("1", "") => Some(Self::opaque()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.0 == "1"
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
