//! Filter parameters and input validation
//!
//! All accumulators are `i64`. The supported ranges below keep every
//! intermediate value representable:
//!
//! - window square sums are bounded by `area * 255^2`, which for
//!   [`MAX_RADIUS`] is below `2^59`
//! - the blend numerator `alpha * 255 + variance * 255` is below `2^43`
//!   for [`MAX_LEVEL`]

use crate::{FilterError, FilterResult};
use localvar_core::PixelDepth;

/// Largest supported window radius.
pub const MAX_RADIUS: u32 = 1 << 20;

/// Largest supported smoothing level.
pub const MAX_LEVEL: i32 = 1 << 16;

/// Largest sample value of an 8 bpp image.
pub(crate) const MAX_SAMPLE: i64 = 255;

/// Map a smoothing level to the blend variance scale.
///
/// `alpha = 5 * level^2 + 10`, so `alpha >= 10` for every `level >= 0`.
///
/// ```
/// use localvar_filter::level_to_alpha;
///
/// assert_eq!(level_to_alpha(0), 10);
/// assert_eq!(level_to_alpha(3), 55);
/// ```
pub fn level_to_alpha(level: i32) -> i64 {
    let level = level as i64;
    level.saturating_mul(level).saturating_mul(5).saturating_add(10)
}

/// Parameters of one local mean/variance filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LmvParams {
    /// Half-extent of the square window; the kernel side is `2 * radius + 1`
    pub radius: u32,
    /// Smoothing level; larger levels smooth across stronger texture
    pub level: i32,
}

impl Default for LmvParams {
    fn default() -> Self {
        Self {
            radius: 1,
            level: 0,
        }
    }
}

impl LmvParams {
    /// Create parameters without validating them.
    pub fn new(radius: u32, level: i32) -> Self {
        Self { radius, level }
    }

    /// Side length of the square window.
    pub fn kernel_size(&self) -> u64 {
        2 * u64::from(self.radius) + 1
    }

    /// Number of samples in the window.
    pub fn area(&self) -> i64 {
        let k = self.kernel_size() as i64;
        k * k
    }

    /// Blend variance scale derived from the level.
    pub fn alpha(&self) -> i64 {
        level_to_alpha(self.level)
    }

    /// Check the parameters against an image of the given size.
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidParameter`] if `radius` is outside
    ///   `1..=MAX_RADIUS` or `level` is outside `0..=MAX_LEVEL`
    /// - [`FilterError::WindowTooLarge`] if `2 * radius >= min(width, height)`
    pub fn validate(&self, width: u32, height: u32) -> FilterResult<()> {
        if self.radius < 1 || self.radius > MAX_RADIUS {
            return Err(FilterError::InvalidParameter(format!(
                "radius must be in 1..={MAX_RADIUS}, got {}",
                self.radius
            )));
        }
        if self.level < 0 || self.level > MAX_LEVEL {
            return Err(FilterError::InvalidParameter(format!(
                "level must be in 0..={MAX_LEVEL}, got {}",
                self.level
            )));
        }
        if 2 * u64::from(self.radius) >= u64::from(width.min(height)) {
            return Err(FilterError::WindowTooLarge {
                radius: self.radius,
                width,
                height,
            });
        }
        Ok(())
    }
}

/// Validate that an image is non-empty, 8 bpp and single-sample.
pub(crate) fn check_gray8(width: u32, height: u32, depth: PixelDepth, spp: u32) -> FilterResult<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::UnsupportedFormat {
            reason: format!("empty image ({width}x{height})"),
        });
    }
    if depth != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedFormat {
            reason: format!("expected 8 bpp, got {} bpp", depth.bits()),
        });
    }
    if spp != 1 {
        return Err(FilterError::UnsupportedFormat {
            reason: format!("expected 1 sample per pixel, got {spp}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_from_level() {
        assert_eq!(level_to_alpha(0), 10);
        assert_eq!(level_to_alpha(1), 15);
        assert_eq!(level_to_alpha(2), 30);
        assert_eq!(LmvParams::new(1, 4).alpha(), 90);
    }

    #[test]
    fn test_kernel_and_area() {
        let p = LmvParams::new(1, 0);
        assert_eq!(p.kernel_size(), 3);
        assert_eq!(p.area(), 9);
        let p = LmvParams::new(5, 0);
        assert_eq!(p.kernel_size(), 11);
        assert_eq!(p.area(), 121);
    }

    #[test]
    fn test_default() {
        assert_eq!(LmvParams::default(), LmvParams::new(1, 0));
    }

    #[test]
    fn test_accumulators_hold_max_radius() {
        let p = LmvParams::new(MAX_RADIUS, 0);
        let sqr_bound = (p.area() as i128) * (MAX_SAMPLE as i128) * (MAX_SAMPLE as i128);
        assert!(sqr_bound < i64::MAX as i128);
        // The checked form must agree with the i128 bound
        assert!(
            p.area()
                .checked_mul(MAX_SAMPLE * MAX_SAMPLE)
                .is_some()
        );
    }

    #[test]
    fn test_blend_terms_hold_max_level() {
        let alpha = level_to_alpha(MAX_LEVEL);
        let max_variance = MAX_SAMPLE * MAX_SAMPLE;
        let num = alpha
            .checked_mul(MAX_SAMPLE)
            .and_then(|a| a.checked_add(max_variance * MAX_SAMPLE));
        assert!(num.is_some());
        assert!(alpha.checked_add(max_variance).is_some());
    }

    #[test]
    fn test_validate_radius() {
        assert!(matches!(
            LmvParams::new(0, 0).validate(10, 10),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            LmvParams::new(MAX_RADIUS + 1, 0).validate(u32::MAX, u32::MAX),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(LmvParams::new(4, 0).validate(9, 9).is_ok());
    }

    #[test]
    fn test_validate_level() {
        assert!(matches!(
            LmvParams::new(1, -1).validate(10, 10),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            LmvParams::new(1, MAX_LEVEL + 1).validate(10, 10),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(LmvParams::new(1, MAX_LEVEL).validate(10, 10).is_ok());
    }

    #[test]
    fn test_validate_window_fit() {
        // 2r must be strictly less than the smaller dimension
        assert!(matches!(
            LmvParams::new(5, 0).validate(10, 40),
            Err(FilterError::WindowTooLarge {
                radius: 5,
                width: 10,
                height: 40
            })
        ));
        assert!(LmvParams::new(4, 0).validate(10, 40).is_ok());
        assert!(matches!(
            LmvParams::new(2, 0).validate(40, 4),
            Err(FilterError::WindowTooLarge { .. })
        ));
    }

    #[test]
    fn test_check_gray8() {
        assert!(check_gray8(4, 4, PixelDepth::Bit8, 1).is_ok());
        assert!(matches!(
            check_gray8(0, 4, PixelDepth::Bit8, 1),
            Err(FilterError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            check_gray8(4, 4, PixelDepth::Bit16, 1),
            Err(FilterError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            check_gray8(4, 4, PixelDepth::Bit8, 3),
            Err(FilterError::UnsupportedFormat { .. })
        ));
    }
}
