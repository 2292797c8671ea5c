//! Local mean/variance adaptive filter
//!
//! Each interior pixel is replaced by a blend of its own value and the mean
//! of the `(2r+1) x (2r+1)` window around it, weighted by the window
//! variance. Flat regions are smoothed toward the mean; edges and texture
//! keep their original values. `level` sets the variance scale of the
//! transition through `alpha = 5 * level^2 + 10`.
//!
//! Pixels within `r` of any image edge have no complete window and are
//! passed through unchanged.
//!
//! The window sums are maintained incrementally: row prefix sums give each
//! row span in O(1), the first band of rows is accumulated once, and every
//! following row only adds the entering row and subtracts the leaving one.

use crate::params::{LmvParams, check_gray8};
use crate::prefix::RowPrefixSums;
use crate::stats::LocalStats;
use crate::window::WindowBuffers;
use crate::{FilterError, FilterResult};
use localvar_core::{Pix, PixMut, PixelDepth};

/// Result of [`local_stats_map`].
pub struct LocalStatsMap {
    /// Local mean (8 bpp); the original sample on the border band
    pub mean: Pix,
    /// Local variance (32 bpp, one sample per pixel); 0 on the border band
    pub variance: Pix,
}

/// Visit every pixel with a complete window, top to bottom, left to right.
fn scan_interior<F>(prefix: &RowPrefixSums, params: &LmvParams, mut visit: F)
where
    F: FnMut(u32, u32, LocalStats),
{
    let radius = params.radius;
    let area = params.area();
    let end_row = prefix.height() - radius;

    let mut window = WindowBuffers::init_band(prefix, radius, radius);
    loop {
        let y = window.center_row();
        let sums = window.current();
        for x in window.columns() {
            let j = x as usize;
            visit(x, y, LocalStats::from_window(sums.sum[j], sums.sqr_sum[j], area));
        }
        if y + 1 >= end_row {
            break;
        }
        window.advance(prefix);
    }
}

/// Filter an already validated image in place.
fn filter_validated(pix: &mut PixMut, params: &LmvParams) -> FilterResult<()> {
    let alpha = params.alpha();
    log::debug!(
        "lmv filter: {}x{}, radius {}, level {}, alpha {}",
        pix.width(),
        pix.height(),
        params.radius,
        params.level,
        alpha
    );

    let prefix = RowPrefixSums::from_pix_mut(pix)?;
    scan_interior(&prefix, params, |x, y, stats| {
        let sample = pix.get_pixel_unchecked(x, y);
        pix.set_pixel_unchecked(x, y, stats.blend(sample, alpha));
    });
    Ok(())
}

/// Apply the local mean/variance filter, returning a new image.
///
/// # Arguments
///
/// * `pixs` - 8 bpp, single-sample source
/// * `radius` - window half-extent, `>= 1` with `2 * radius < min(w, h)`
/// * `level` - smoothing level, `>= 0`
///
/// # Errors
///
/// See [`lmv_filter_mut`].
///
/// ```
/// use localvar_core::Pix;
/// use localvar_filter::lmv_filter;
///
/// let pixs = Pix::from_gray_bytes(5, 5, &[10; 25]).unwrap();
/// let pixd = lmv_filter(&pixs, 1, 0).unwrap();
/// assert_eq!(pixd.get_pixel(2, 2), Some(10));
/// ```
pub fn lmv_filter(pixs: &Pix, radius: u32, level: i32) -> FilterResult<Pix> {
    let params = LmvParams::new(radius, level);
    check_gray8(pixs.width(), pixs.height(), pixs.depth(), pixs.spp())?;
    params.validate(pixs.width(), pixs.height())?;

    let mut pixd = pixs.to_mut();
    filter_validated(&mut pixd, &params)?;
    Ok(pixd.into())
}

/// Apply the filter to `pixs`, writing the result into `pixd`.
///
/// Border pixels of `pixd` receive copies of the source samples.
///
/// # Errors
///
/// See [`lmv_filter_mut`]. On error `pixd` is left untouched.
pub fn lmv_filter_into(pixs: &Pix, pixd: &mut PixMut, radius: u32, level: i32) -> FilterResult<()> {
    let params = LmvParams::new(radius, level);
    check_gray8(pixs.width(), pixs.height(), pixs.depth(), pixs.spp())?;
    params.validate(pixs.width(), pixs.height())?;
    filter_to_destination((pixs.width(), pixs.height()), pixs.data(), pixd, &params)
}

/// Apply the filter in place.
///
/// # Errors
///
/// See [`lmv_filter_mut`]. On error `pix` is left untouched.
pub fn lmv_filter_in_place(pix: &mut PixMut, radius: u32, level: i32) -> FilterResult<()> {
    let params = LmvParams::new(radius, level);
    check_gray8(pix.width(), pix.height(), pix.depth(), pix.spp())?;
    params.validate(pix.width(), pix.height())?;
    filter_validated(pix, &params)
}

/// Apply the filter to `pix`, into `pixd` if given, otherwise in place.
///
/// # Errors
///
/// - [`FilterError::UnsupportedFormat`] if the source (or destination) is
///   not 8 bpp with one sample per pixel
/// - [`FilterError::InvalidParameter`] if `radius` or `level` is out of range
/// - [`FilterError::WindowTooLarge`] if `2 * radius >= min(width, height)`
/// - [`FilterError::DestinationMismatch`] if `pixd` has other dimensions
///
/// All checks run before any pixel is written.
pub fn lmv_filter_mut(
    pix: &mut PixMut,
    pixd: Option<&mut PixMut>,
    radius: u32,
    level: i32,
) -> FilterResult<()> {
    let Some(pixd) = pixd else {
        return lmv_filter_in_place(pix, radius, level);
    };

    let params = LmvParams::new(radius, level);
    check_gray8(pix.width(), pix.height(), pix.depth(), pix.spp())?;
    params.validate(pix.width(), pix.height())?;
    filter_to_destination((pix.width(), pix.height()), pix.data(), pixd, &params)
}

/// Copy validated source words into `pixd`, then filter `pixd` in place.
///
/// The window sums are built from the copy, so this gives the same result
/// as filtering the source and leaves the border band as source samples.
fn filter_to_destination(
    size: (u32, u32),
    src_data: &[u32],
    pixd: &mut PixMut,
    params: &LmvParams,
) -> FilterResult<()> {
    check_gray8(pixd.width(), pixd.height(), pixd.depth(), pixd.spp())?;
    let actual = (pixd.width(), pixd.height());
    if actual != size {
        return Err(FilterError::DestinationMismatch {
            expected: size,
            actual,
        });
    }

    pixd.data_mut().copy_from_slice(src_data);
    filter_validated(pixd, params)
}

/// Compute the local mean and local variance of every pixel.
///
/// Uses the same windows as [`lmv_filter`]; pixels on the border band get
/// their own sample as mean and a variance of 0.
///
/// # Errors
///
/// Same as [`lmv_filter`], without the level check.
pub fn local_stats_map(pixs: &Pix, radius: u32) -> FilterResult<LocalStatsMap> {
    let params = LmvParams::new(radius, 0);
    check_gray8(pixs.width(), pixs.height(), pixs.depth(), pixs.spp())?;
    params.validate(pixs.width(), pixs.height())?;

    let prefix = RowPrefixSums::from_pix(pixs)?;
    let mut mean = pixs.to_mut();
    let mut variance = Pix::new(pixs.width(), pixs.height(), PixelDepth::Bit32)?.to_mut();
    variance.set_spp(1);

    scan_interior(&prefix, &params, |x, y, stats| {
        mean.set_pixel_unchecked(x, y, stats.mean as u32);
        variance.set_pixel_unchecked(x, y, stats.variance as u32);
    });

    Ok(LocalStatsMap {
        mean: mean.into(),
        variance: variance.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_7x7() -> Pix {
        let mut bytes = [10u8; 49];
        bytes[3 * 7 + 3] = 250;
        Pix::from_gray_bytes(7, 7, &bytes).unwrap()
    }

    #[test]
    fn test_flat_7x7() {
        let pixs = Pix::from_gray_bytes(7, 7, &[10; 49]).unwrap();
        let pixd = lmv_filter(&pixs, 1, 0).unwrap();
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(pixd.get_pixel(x, y), Some(10), "({x},{y})");
            }
        }
    }

    #[test]
    fn test_impulse_7x7() {
        let pixs = impulse_7x7();
        let pixd = lmv_filter(&pixs, 1, 0).unwrap();
        assert_eq!(pixd.get_pixel(3, 3), Some(250));
        for y in 1..6 {
            for x in 1..6 {
                if (x, y) != (3, 3) {
                    assert_eq!(pixd.get_pixel(x, y), Some(10), "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn test_stats_map_impulse() {
        let map = local_stats_map(&impulse_7x7(), 1).unwrap();
        assert_eq!(map.mean.get_pixel(3, 3), Some(36));
        assert_eq!(map.variance.get_pixel(3, 3), Some(5713));
        assert_eq!(map.variance.get_pixel(1, 1), Some(0));
        assert_eq!(map.mean.get_pixel(1, 1), Some(10));
        // Border: original sample, zero variance
        assert_eq!(map.mean.get_pixel(0, 3), Some(10));
        assert_eq!(map.variance.get_pixel(0, 3), Some(0));
        assert_eq!(map.variance.spp(), 1);
    }

    #[test]
    fn test_in_place_matches_copy() {
        let pixs = impulse_7x7();
        let expected = lmv_filter(&pixs, 2, 1).unwrap();
        let mut pm = pixs.to_mut();
        lmv_filter_in_place(&mut pm, 2, 1).unwrap();
        let got: Pix = pm.into();
        assert_eq!(got.data(), expected.data());
    }

    #[test]
    fn test_mut_with_destination_keeps_source() {
        let pixs = impulse_7x7();
        let mut src = pixs.to_mut();
        let mut dst = pixs.create_template().to_mut();
        lmv_filter_mut(&mut src, Some(&mut dst), 1, 0).unwrap();
        assert_eq!(src.data(), pixs.data());
        let expected = lmv_filter(&pixs, 1, 0).unwrap();
        assert_eq!(dst.data(), expected.data());
    }

    #[test]
    fn test_mut_without_destination_is_in_place() {
        let pixs = impulse_7x7();
        let mut pm = pixs.to_mut();
        lmv_filter_mut(&mut pm, None, 1, 3).unwrap();
        let expected = lmv_filter(&pixs, 1, 3).unwrap();
        assert_eq!(pm.data(), expected.data());
    }

    #[test]
    fn test_errors_leave_destination_untouched() {
        let pixs = impulse_7x7();
        let mut dst = Pix::from_gray_bytes(7, 7, &[99; 49]).unwrap().to_mut();
        let before = dst.data().to_vec();
        assert!(matches!(
            lmv_filter_into(&pixs, &mut dst, 4, 0),
            Err(FilterError::WindowTooLarge { .. })
        ));
        assert!(matches!(
            lmv_filter_into(&pixs, &mut dst, 1, -2),
            Err(FilterError::InvalidParameter(_))
        ));
        assert_eq!(dst.data(), &before[..]);
    }

    #[test]
    fn test_destination_mismatch() {
        let pixs = impulse_7x7();
        let mut dst = Pix::new(8, 7, PixelDepth::Bit8).unwrap().to_mut();
        assert!(matches!(
            lmv_filter_into(&pixs, &mut dst, 1, 0),
            Err(FilterError::DestinationMismatch {
                expected: (7, 7),
                actual: (8, 7)
            })
        ));
        let mut dst = Pix::new(7, 7, PixelDepth::Bit16).unwrap().to_mut();
        assert!(matches!(
            lmv_filter_into(&pixs, &mut dst, 1, 0),
            Err(FilterError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_rejects_multichannel() {
        let pix = Pix::new(10, 10, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            lmv_filter(&pix, 1, 0),
            Err(FilterError::UnsupportedFormat { .. })
        ));
        let mut pm = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_spp(3);
        assert!(matches!(
            lmv_filter_in_place(&mut pm, 1, 0),
            Err(FilterError::UnsupportedFormat { .. })
        ));
    }
}
