//! Row prefix sums
//!
//! One 1D summed-area table per image row, for both the samples and their
//! squares. Entry `j` of a row holds the sum over columns `0..=j`, so the
//! first entry equals the first sample (no zero padding), and the sum over
//! any column span is one subtraction.
//!
//! ```text
//!   samples:  12, 23, 32, 11, 223, 32, ...
//!   sums:     12, 35, 67, 78, 301, 333, ...
//! ```
//!
//! Every row is materialized because the sliding window needs random
//! access to both the row entering and the row leaving the band.

use crate::params::check_gray8;
use crate::FilterResult;
use localvar_core::{Pix, PixMut, pix::get_data_byte};

/// Running sums and running square sums of every row of an 8 bpp image.
#[derive(Debug, Clone)]
pub struct RowPrefixSums {
    width: u32,
    height: u32,
    sum: Vec<i64>,
    sqr_sum: Vec<i64>,
}

impl RowPrefixSums {
    /// Build the prefix sums of every row of an 8 bpp, single-sample image.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FilterError::UnsupportedFormat`] for any other
    /// depth or sample count.
    pub fn from_pix(pix: &Pix) -> FilterResult<Self> {
        check_gray8(pix.width(), pix.height(), pix.depth(), pix.spp())?;
        Ok(Self::from_rows(pix.width(), pix.height(), |y| pix.row_data(y)))
    }

    /// Same as [`RowPrefixSums::from_pix`] for a mutable image.
    pub fn from_pix_mut(pix: &PixMut) -> FilterResult<Self> {
        check_gray8(pix.width(), pix.height(), pix.depth(), pix.spp())?;
        Ok(Self::from_rows(pix.width(), pix.height(), |y| pix.row_data(y)))
    }

    fn from_rows<'a, F>(width: u32, height: u32, row: F) -> Self
    where
        F: Fn(u32) -> &'a [u32],
    {
        let w = width as usize;
        let size = w * height as usize;
        let mut sum = vec![0i64; size];
        let mut sqr_sum = vec![0i64; size];

        for y in 0..height {
            let line = row(y);
            let start = y as usize * w;
            let sums = &mut sum[start..start + w];
            let sqr_sums = &mut sqr_sum[start..start + w];

            let mut acc = 0i64;
            let mut sqr_acc = 0i64;
            for x in 0..width {
                let v = get_data_byte(line, x) as i64;
                acc += v;
                sqr_acc += v * v;
                sums[x as usize] = acc;
                sqr_sums[x as usize] = sqr_acc;
            }
        }

        RowPrefixSums {
            width,
            height,
            sum,
            sqr_sum,
        }
    }

    /// Width of the source image.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source image.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The running sums and running square sums of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> (&[i64], &[i64]) {
        let w = self.width as usize;
        let start = y as usize * w;
        (&self.sum[start..start + w], &self.sqr_sum[start..start + w])
    }

    /// Sum and square sum of row `y` over columns `center - radius ..= center + radius`.
    ///
    /// At `center == radius` the span starts at column 0, so the prefix
    /// value at `2 * radius` is the span itself.
    ///
    /// # Panics
    ///
    /// Panics if `center < radius` or `center + radius >= width`.
    #[inline]
    pub fn span(&self, y: u32, center: u32, radius: u32) -> (i64, i64) {
        let (sum, sqr_sum) = self.row(y);
        let right = (center + radius) as usize;
        if center == radius {
            (sum[right], sqr_sum[right])
        } else {
            let left = (center - radius - 1) as usize;
            (sum[right] - sum[left], sqr_sum[right] - sqr_sum[left])
        }
    }
}
