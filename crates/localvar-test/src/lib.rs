//! localvar-test - Regression test framework for localvar
//!
//! This crate provides a small regression harness in the style of
//! Leptonica's `regutils.c`, plus builders for the synthetic images the
//! regression tests run on.
//!
//! - **Compare** (default): every check is evaluated and failures recorded
//! - **Display**: checks still run, and each passing check is reported too
//!
//! # Usage
//!
//! ```ignore
//! use localvar_test::RegParams;
//!
//! let mut rp = RegParams::new("lmv_flat");
//! rp.compare_values(10.0, mean as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"
//! - `RUST_LOG`: Filter for the `log` output captured by `env_logger`

mod error;
mod images;
mod params;

pub use error::{TestError, TestResult};
pub use images::{gray_from_fn, impulse_gray, uniform_gray};
pub use params::{RegParams, RegTestMode};

/// Route `log` records to the test output.
///
/// Safe to call from every test; only the first call installs the logger.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
