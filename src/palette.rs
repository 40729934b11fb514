//! Palette normalization.
//!
//! A palette drives one gradient layer per color. It is fixed for the
//! lifetime of a mounted backdrop and always holds between one and
//! [`MAX_COLORS`] entries.

use crate::color::{ColorError, Rgba};

/// Upper bound on gradient layers.
pub const MAX_COLORS: usize = 5;

/// Colors used when the caller supplies an empty palette.
pub const DEFAULT_PALETTE: [&str; 3] = ["#5227FF", "#FF9FFC", "#B19EEF"];

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Build from hex strings. More than [`MAX_COLORS`] entries are
    /// truncated; an empty list falls back to [`DEFAULT_PALETTE`].
    ///
    /// Only the entries that survive truncation are parsed.
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self, ColorError> {
        if entries.is_empty() {
            return Ok(Self::default());
        }
        if entries.len() > MAX_COLORS {
            log::warn!(
                "palette has {} colors, using the first {MAX_COLORS}",
                entries.len()
            );
        }
        let colors = entries
            .iter()
            .take(MAX_COLORS)
            .map(|e| Rgba::from_hex(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: a palette holds at least one color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = DEFAULT_PALETTE
            .iter()
            .filter_map(|hex| Rgba::from_hex(hex).ok())
            .collect();
        Self { colors }
    }
}
