//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building regression inputs
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to build a synthetic test image
    #[error("failed to build test image '{name}': {source}")]
    ImageBuild {
        name: &'static str,
        #[source]
        source: localvar_core::Error,
    },

    /// Pixel outside the image requested by a builder
    #[error("pixel ({x}, {y}) is outside a {width}x{height} image")]
    OutOfImage {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
