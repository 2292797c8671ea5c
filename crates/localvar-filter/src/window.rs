//! Sliding window accumulators
//!
//! [`WindowBuffers`] holds, for every column whose window fits inside the
//! image, the sum and square sum of the `k x k` window centred on the
//! current row. It is built once for the first band of rows and then moved
//! down one row at a time, adding the row entering the band at the bottom
//! and subtracting the row leaving it at the top.
//!
//! ```text
//!   center = 5, radius = 4
//!     0: ----------------------------------   leaves on the next step
//!     1: ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//!     ..
//!     5: ~~~~**************************~~~~   columns [r, C-r) computed
//!     ..
//!     9: ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//!    10: ----------------------------------   enters on the next step
//! ```

use crate::prefix::RowPrefixSums;
use std::ops::Range;

/// Per-column window sums for one center row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSums {
    /// Window sum per column; zero outside the valid columns
    pub sum: Vec<i64>,
    /// Window square sum per column; zero outside the valid columns
    pub sqr_sum: Vec<i64>,
}

impl WindowSums {
    fn zeroed(width: u32) -> Self {
        WindowSums {
            sum: vec![0; width as usize],
            sqr_sum: vec![0; width as usize],
        }
    }
}

/// First row of the `2 * radius + 1` row band around `center`.
///
/// Clamped to 0 at the top and shifted up so the band stays inside
/// `0..height` at the bottom.
pub fn band_start(center: u32, radius: u32, height: u32) -> u32 {
    let kernel = 2 * radius + 1;
    let first = center.saturating_sub(radius);
    if first + kernel > height {
        height.saturating_sub(kernel)
    } else {
        first
    }
}

/// Double-buffered window accumulators owned by one filter pass.
#[derive(Debug)]
pub struct WindowBuffers {
    current: WindowSums,
    previous: WindowSums,
    width: u32,
    radius: u32,
    center: u32,
}

impl WindowBuffers {
    /// Accumulate the windows of the band around `center` from scratch.
    ///
    /// For every column `j` in `[radius, width - radius)` the window sum is
    /// the sum over the band rows of the row span centred on `j`.
    ///
    /// # Panics
    ///
    /// Panics if `2 * radius + 1` exceeds the image width or height.
    pub fn init_band(prefix: &RowPrefixSums, center: u32, radius: u32) -> Self {
        let width = prefix.width();
        let first = band_start(center, radius, prefix.height());
        let band = first..first + 2 * radius + 1;
        log::trace!("window band init: center {center}, rows {band:?}, radius {radius}");

        let mut current = WindowSums::zeroed(width);
        for y in band {
            for j in radius..width - radius {
                let (sum, sqr_sum) = prefix.span(y, j, radius);
                current.sum[j as usize] += sum;
                current.sqr_sum[j as usize] += sqr_sum;
            }
        }

        WindowBuffers {
            current,
            previous: WindowSums::zeroed(width),
            width,
            radius,
            center,
        }
    }

    /// Move the window one row down.
    ///
    /// The two buffers are swapped and the new sums are written over the
    /// older one: `new[j] = old[j] + span(entering, j) - span(leaving, j)`,
    /// for the sum and the square sum independently.
    ///
    /// # Panics
    ///
    /// Panics if the row entering the band is past the last image row.
    pub fn advance(&mut self, prefix: &RowPrefixSums) {
        let r = self.radius;
        let leaving = self.center - r;
        let entering = self.center + r + 1;

        std::mem::swap(&mut self.current, &mut self.previous);
        for j in self.columns() {
            let (add, sqr_add) = prefix.span(entering, j, r);
            let (rm, sqr_rm) = prefix.span(leaving, j, r);
            let j = j as usize;
            self.current.sum[j] = self.previous.sum[j] + add - rm;
            self.current.sqr_sum[j] = self.previous.sqr_sum[j] + sqr_add - sqr_rm;
        }
        self.center += 1;
    }

    /// Row the current windows are centred on.
    #[inline]
    pub fn center_row(&self) -> u32 {
        self.center
    }

    /// Window radius.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Columns whose window lies fully inside the image.
    #[inline]
    pub fn columns(&self) -> Range<u32> {
        self.radius..self.width - self.radius
    }

    /// Window sums for the current center row.
    #[inline]
    pub fn current(&self) -> &WindowSums {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use localvar_core::Pix;

    /// Brute-force window sums at (x, y).
    fn window_at(pix: &Pix, x: u32, y: u32, r: u32) -> (i64, i64) {
        let mut sum = 0;
        let mut sqr = 0;
        for wy in y - r..=y + r {
            for wx in x - r..=x + r {
                let v = pix.get_pixel(wx, wy).unwrap() as i64;
                sum += v;
                sqr += v * v;
            }
        }
        (sum, sqr)
    }

    fn textured(w: u32, h: u32) -> Pix {
        let bytes: Vec<u8> = (0..w * h)
            .map(|i| ((i * 97 + (i / w) * 13 + 5) % 256) as u8)
            .collect();
        Pix::from_gray_bytes(w, h, &bytes).unwrap()
    }

    #[test]
    fn test_band_start() {
        assert_eq!(band_start(1, 1, 7), 0);
        assert_eq!(band_start(3, 2, 10), 1);
        assert_eq!(band_start(0, 2, 10), 0);
        // Band shifted up to stay inside the image
        assert_eq!(band_start(9, 2, 10), 5);
    }

    #[test]
    fn test_init_band_matches_brute_force() {
        let pix = textured(11, 9);
        let prefix = RowPrefixSums::from_pix(&pix).unwrap();
        for r in 1..=3u32 {
            let win = WindowBuffers::init_band(&prefix, r, r);
            assert_eq!(win.center_row(), r);
            for x in win.columns() {
                let (sum, sqr) = window_at(&pix, x, r, r);
                assert_eq!(win.current().sum[x as usize], sum, "r={r} x={x}");
                assert_eq!(win.current().sqr_sum[x as usize], sqr, "r={r} x={x}");
            }
            // Columns outside the valid range are never written
            assert_eq!(win.current().sum[0], 0);
            assert_eq!(win.current().sum[(11 - 1) as usize], 0);
        }
    }

    #[test]
    fn test_advance_matches_fresh_band() {
        let pix = textured(13, 12);
        let prefix = RowPrefixSums::from_pix(&pix).unwrap();
        let r = 2;
        let mut win = WindowBuffers::init_band(&prefix, r, r);
        while win.center_row() + 1 < 12 - r {
            win.advance(&prefix);
            let fresh = WindowBuffers::init_band(&prefix, win.center_row(), r);
            assert_eq!(win.current(), fresh.current(), "row {}", win.center_row());
        }
        assert_eq!(win.center_row(), 12 - r - 1);
    }

    #[test]
    fn test_advance_first_column_square_sum() {
        // A bright sample in the row leaving the band at column 0 must be
        // subtracted from the square sum of the first valid column.
        let mut bytes = vec![0u8; 5 * 5];
        bytes[0] = 200;
        let pix = Pix::from_gray_bytes(5, 5, &bytes).unwrap();
        let prefix = RowPrefixSums::from_pix(&pix).unwrap();
        let mut win = WindowBuffers::init_band(&prefix, 1, 1);
        assert_eq!(win.current().sqr_sum[1], 40_000);
        win.advance(&prefix);
        assert_eq!(win.current().sum[1], 0);
        assert_eq!(win.current().sqr_sum[1], 0);
    }
}
