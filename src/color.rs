//! Hex color parsing and CSS `rgba()` rendering.
//!
//! Palette entries and the overlay color are configured as hex strings
//! (`#5227FF`, `#fff`). Everything downstream works with [`Rgba`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color '{0}': expected #rgb or #rrggbb")]
    InvalidHex(String),
}

/// An sRGB color with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_alpha(a),
        }
    }

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional, case-insensitive).
    ///
    /// ```
    /// # use glowfield::color::Rgba;
    /// let c = Rgba::from_hex("#5227FF").unwrap();
    /// assert_eq!((c.r, c.g, c.b), (0x52, 0x27, 0xff));
    /// assert_eq!(Rgba::from_hex("#fff").unwrap().r, 255);
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        let parsed = match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, ch) in out.iter_mut().zip(digits.chars()) {
                    let doubled: String = [ch, ch].iter().collect();
                    *slot = channel(&doubled).unwrap_or(0);
                }
                Some(out)
            }
            6 => match (
                channel(&digits[0..2]),
                channel(&digits[2..4]),
                channel(&digits[4..6]),
            ) {
                (Some(r), Some(g), Some(b)) => Some([r, g, b]),
                _ => None,
            },
            _ => None,
        };
        parsed
            .map(|[r, g, b]| Self::new(r, g, b, 1.0))
            .ok_or_else(|| ColorError::InvalidHex(hex.to_string()))
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Render as a CSS `rgba()` expression with the given alpha.
    pub fn to_css(self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            format_alpha(clamp_alpha(alpha))
        )
    }

    /// Render as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Convert a hex string straight to a CSS `rgba()` expression.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<String, ColorError> {
    Ok(Rgba::from_hex(hex)?.to_css(alpha))
}

fn clamp_alpha(a: f64) -> f64 {
    if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) }
}

/// Trim float noise so `0.65 - 0.12` prints as `0.53`, not `0.53000000001`.
fn format_alpha(a: f64) -> String {
    let rounded = (a * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = Rgba::from_hex("#FF9FFC").unwrap();
        assert_eq!((c.r, c.g, c.b), (255, 159, 252));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn parses_three_digit_hex() {
        let c = Rgba::from_hex("#a0f").unwrap();
        assert_eq!((c.r, c.g, c.b), (0xaa, 0x00, 0xff));
    }

    #[test]
    fn hash_is_optional() {
        assert_eq!(
            Rgba::from_hex("B19EEF").unwrap(),
            Rgba::from_hex("#b19eef").unwrap()
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#12", "#12345", "#gggggg", "#1234567", "red"] {
            assert!(
                matches!(Rgba::from_hex(bad), Err(ColorError::InvalidHex(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_ascii_without_panicking() {
        assert!(Rgba::from_hex("#ééé").is_err());
    }

    #[test]
    fn hex_to_rgba_formats_css() {
        assert_eq!(
            hex_to_rgba("#5227FF", 0.65).unwrap(),
            "rgba(82, 39, 255, 0.65)"
        );
    }

    #[test]
    fn css_alpha_is_rounded_and_clamped() {
        let c = Rgba::from_hex("#000000").unwrap();
        assert_eq!(c.to_css(0.65 - 0.12), "rgba(0, 0, 0, 0.53)");
        assert_eq!(c.to_css(1.7), "rgba(0, 0, 0, 1)");
        assert_eq!(c.to_css(-0.2), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn to_hex_round_trips_case_insensitively() {
        assert_eq!(Rgba::from_hex("#5227FF").unwrap().to_hex(), "#5227ff");
    }
}
