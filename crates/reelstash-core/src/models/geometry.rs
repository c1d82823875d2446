//! Aspect-ratio classification
//!
//! Uploads are classified by the geometry of their first video stream; the
//! classification only chooses the storage-key prefix and is never persisted.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Tolerance absorbing encoder rounding: resolutions within 0.1% of the
/// target ratio still classify. Comparison is strict, so a ratio exactly
/// this far from a target classifies as `Other`.
const RATIO_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectClass {
    /// Within tolerance of 16:9
    Landscape,
    /// Within tolerance of 9:16
    Portrait,
    /// Anything else, including unusual ratios
    Other,
}

impl AspectClass {
    /// Classify from pixel dimensions.
    pub fn from_dimensions(width: u32, height: u32) -> AspectClass {
        let ratio = width as f64 / height as f64;
        if (ratio - 9.0 / 16.0).abs() < RATIO_TOLERANCE {
            AspectClass::Portrait
        } else if (ratio - 16.0 / 9.0).abs() < RATIO_TOLERANCE {
            AspectClass::Landscape
        } else {
            AspectClass::Other
        }
    }

    /// Storage-key prefix for this classification.
    pub fn prefix(&self) -> &'static str {
        match self {
            AspectClass::Landscape => "landscape",
            AspectClass::Portrait => "portrait",
            AspectClass::Other => "other",
        }
    }
}

impl Display for AspectClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.prefix())
    }
}
