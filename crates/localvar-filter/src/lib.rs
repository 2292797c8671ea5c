//! localvar-filter - Local mean/variance adaptive smoothing
//!
//! This crate provides an edge-preserving smoothing filter for 8 bpp
//! grayscale images, built on incremental sliding-window statistics:
//!
//! - Row prefix sums (one 1D summed-area table per row)
//! - Window accumulation over the first band of rows
//! - Row-to-row window updates that never rescan the band
//! - Local mean and variance, and the variance-weighted blend
//!
//! Pixels within `radius` of an image edge are passed through unchanged.

mod error;
pub mod lmv;
pub mod params;
pub mod prefix;
pub mod stats;
pub mod window;

pub use error::{FilterError, FilterResult};
pub use params::{LmvParams, MAX_LEVEL, MAX_RADIUS, level_to_alpha};

// Re-export commonly used functions
pub use lmv::{
    LocalStatsMap, local_stats_map, lmv_filter, lmv_filter_in_place, lmv_filter_into,
    lmv_filter_mut,
};
pub use prefix::RowPrefixSums;
pub use stats::LocalStats;
pub use window::{WindowBuffers, WindowSums};
