//! Synthetic 8 bpp test images

use crate::error::{TestError, TestResult};
use localvar_core::{Pix, PixelDepth};

/// Create a uniform 8 bpp gray image filled with `val`.
pub fn uniform_gray(width: u32, height: u32, val: u8) -> TestResult<Pix> {
    let pix = Pix::new(width, height, PixelDepth::Bit8).map_err(|source| TestError::ImageBuild {
        name: "uniform_gray",
        source,
    })?;
    let mut pm = pix.to_mut();
    pm.set_all_arbitrary(val as u32);
    Ok(pm.into())
}

/// Create an 8 bpp image whose pixel (x, y) is `f(x, y)`.
pub fn gray_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> TestResult<Pix> {
    let pix = Pix::new(width, height, PixelDepth::Bit8).map_err(|source| TestError::ImageBuild {
        name: "gray_from_fn",
        source,
    })?;
    let mut pm = pix.to_mut();
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, f(x, y) as u32);
        }
    }
    Ok(pm.into())
}

/// Create a uniform `background` image with a single `peak` pixel at (x, y).
pub fn impulse_gray(
    width: u32,
    height: u32,
    background: u8,
    (x, y): (u32, u32),
    peak: u8,
) -> TestResult<Pix> {
    if x >= width || y >= height {
        return Err(TestError::OutOfImage {
            x,
            y,
            width,
            height,
        });
    }
    gray_from_fn(width, height, |px, py| {
        if (px, py) == (x, y) { peak } else { background }
    })
}
