//! Filter variant definitions
//!
//! A `Filter` selects which per-pixel transform the kernel runs. Across the
//! WASM boundary it travels as a `(kind, threshold)` scalar pair, since the
//! two sides share no type system; `from_raw` is the host-visible decoder
//! and `kind`/`threshold` the encoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default luminance cutoff for [`Filter::Threshold`].
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Kind code for the threshold filter on the wire.
pub const FILTER_KIND_THRESHOLD: u32 = 0;

/// Kind code for the grayscale filter on the wire.
pub const FILTER_KIND_GRAYSCALE: u32 = 1;

/// Per-pixel transform applied by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Binarize by perceptual luminance: pixels at or above `threshold`
    /// become white, the rest become opaque black.
    ///
    /// `threshold` is nominally in `[0, 1]` but is applied unclamped; the
    /// comparison stays a plain inequality for out-of-range values.
    Threshold { threshold: f32 },

    /// Replace each pixel's RGB with their truncating integer average.
    /// Alpha is left untouched.
    Grayscale,
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Threshold {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Filter {
    /// Kind code sent across the boundary.
    pub fn kind(&self) -> u32 {
        match self {
            Filter::Threshold { .. } => FILTER_KIND_THRESHOLD,
            Filter::Grayscale => FILTER_KIND_GRAYSCALE,
        }
    }

    /// Threshold parameter sent across the boundary. Grayscale carries the
    /// default value; the kernel ignores it on that path.
    pub fn threshold(&self) -> f32 {
        match self {
            Filter::Threshold { threshold } => *threshold,
            Filter::Grayscale => DEFAULT_THRESHOLD,
        }
    }

    /// Decode a `(kind, threshold)` pair received across the boundary.
    pub fn from_raw(kind: u32, threshold: f32) -> Result<Self, AbiError> {
        match kind {
            FILTER_KIND_THRESHOLD => Ok(Filter::Threshold { threshold }),
            FILTER_KIND_GRAYSCALE => Ok(Filter::Grayscale),
            other => Err(AbiError::UnknownFilterKind(other)),
        }
    }
}

/// Errors decoding values received across the WASM boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("unknown filter kind code {0}")]
    UnknownFilterKind(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_raw_roundtrip() {
        let threshold = Filter::Threshold { threshold: 0.25 };
        assert_eq!(
            Filter::from_raw(threshold.kind(), threshold.threshold()),
            Ok(threshold)
        );

        let gray = Filter::Grayscale;
        assert_eq!(Filter::from_raw(gray.kind(), gray.threshold()), Ok(gray));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert_eq!(
            Filter::from_raw(7, DEFAULT_THRESHOLD),
            Err(AbiError::UnknownFilterKind(7))
        );
    }

    #[test]
    fn test_default_is_threshold_at_half() {
        assert_eq!(
            Filter::default(),
            Filter::Threshold { threshold: 0.5 }
        );
    }
}
