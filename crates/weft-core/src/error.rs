//! Error types shared across the generation pipeline.

use std::fmt;

/// Errors from lane generation.
///
/// Generation is pure and nearly infallible; the one contract a caller
/// can break is handing a previous-row mask sized for a different strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenError {
    /// A previous-row mask does not cover the strip's active tiles.
    MaskLengthMismatch {
        /// Tiles the strip expects.
        expected: usize,
        /// Tiles the mask actually covers.
        got: usize,
    },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaskLengthMismatch { expected, got } => {
                write!(
                    f,
                    "previous-row mask covers {got} tiles, strip has {expected}"
                )
            }
        }
    }
}

impl std::error::Error for GenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_sizes() {
        let err = GenError::MaskLengthMismatch {
            expected: 9,
            got: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains('7'));
    }
}
