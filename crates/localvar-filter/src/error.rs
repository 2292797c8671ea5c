//! Error types for localvar-filter
//!
//! Every error is detected before the first pixel is written, so a failed
//! call leaves both source and destination untouched.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] localvar_core::Error),

    /// Radius or level out of the supported range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The square window does not fit inside the image
    #[error("window of radius {radius} does not fit a {width}x{height} image")]
    WindowTooLarge {
        /// Requested window radius
        radius: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Image is empty, multi-channel, or not 8 bits per sample
    #[error("unsupported format: {reason}")]
    UnsupportedFormat {
        /// What was wrong with the image
        reason: String,
    },

    /// Destination dimensions differ from the source
    #[error("destination mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DestinationMismatch {
        /// Source dimensions
        expected: (u32, u32),
        /// Destination dimensions
        actual: (u32, u32),
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
