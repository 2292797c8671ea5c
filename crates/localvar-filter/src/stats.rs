//! Local statistics and the variance-weighted blend
//!
//! Integer arithmetic throughout. The mean truncates toward zero, and the
//! variance is computed from that truncated mean:
//!
//! ```text
//!   mean     = sum / area
//!   variance = (sqr_sum - mean * sum) / area
//!   output   = round((alpha * mean + variance * sample) / (variance + alpha))
//! ```
//!
//! A flat window (variance near 0) yields the mean; a window with strong
//! texture yields a value close to the original sample.

use crate::params::MAX_SAMPLE;

/// Mean and variance of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalStats {
    /// Truncated mean of the window
    pub mean: i64,
    /// Truncated variance of the window, computed from the truncated mean
    pub variance: i64,
}

impl LocalStats {
    /// Derive the statistics from window sums.
    ///
    /// `area` must be positive.
    #[inline]
    pub fn from_window(sum: i64, sqr_sum: i64, area: i64) -> Self {
        let mean = sum / area;
        let variance = (sqr_sum - mean * sum) / area;
        LocalStats { mean, variance }
    }

    /// Blend `sample` with the local mean.
    ///
    /// The result is rounded half up and always lies between the mean and
    /// the sample. `alpha` must be at least 1.
    #[inline]
    pub fn blend(&self, sample: u32, alpha: i64) -> u32 {
        let den = self.variance + alpha;
        let num = alpha * self.mean + self.variance * sample as i64;
        let out = (num + den / 2) / den;
        debug_assert!((0..=MAX_SAMPLE).contains(&out));
        out as u32
    }
}
