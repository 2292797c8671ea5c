//! localvar - Local mean/variance adaptive filter
//!
//! Smooths flat regions of an 8 bpp grayscale image toward their local
//! mean while keeping edges and texture, using sliding-window statistics
//! that cost O(1) per pixel regardless of the window radius.
//!
//! # Example
//!
//! ```
//! use localvar::{Pix, filter};
//!
//! let mut bytes = [10u8; 49];
//! bytes[24] = 250;
//! let pixs = Pix::from_gray_bytes(7, 7, &bytes).unwrap();
//!
//! let pixd = filter::lmv_filter(&pixs, 1, 0).unwrap();
//! assert_eq!(pixd.get_pixel(3, 3), Some(250));
//! assert_eq!(pixd.get_pixel(2, 3), Some(10));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use localvar_core::*;

// Re-export the filter crate as a module to avoid name conflicts
pub use localvar_filter as filter;
