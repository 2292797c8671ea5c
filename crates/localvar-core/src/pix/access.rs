//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels in
//! packed rows.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in an 8-bit image, pixel 0 occupies bits 31..24 of the first word.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without coordinate validation.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`, or if `x` addresses past the row words.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data(self.row_data(y), x, self.depth())
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without coordinate validation.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data(self.row_data(y), x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// The value is masked to the image depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without coordinate validation.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`, or if `x` addresses past the row words.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        set_data(self.row_data_mut(y), x, depth, val);
    }

    /// Set every pixel to `val`, masked to the image depth.
    pub fn set_all_arbitrary(&mut self, val: u32) {
        let depth = self.depth();
        let val = val & depth.max_value();
        let (w, h) = (self.width(), self.height());
        for y in 0..h {
            let line = self.row_data_mut(y);
            for x in 0..w {
                set_data(line, x, depth, val);
            }
        }
    }
}

/// Get a pixel of any depth from a packed row.
#[inline]
pub fn get_data(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => get_data_bit(line, x),
        PixelDepth::Bit2 => get_data_dibit(line, x),
        PixelDepth::Bit4 => get_data_qbit(line, x),
        PixelDepth::Bit8 => get_data_byte(line, x),
        PixelDepth::Bit16 => get_data_two_bytes(line, x),
        PixelDepth::Bit32 => line[x as usize],
    }
}

/// Set a pixel of any depth in a packed row.
#[inline]
pub fn set_data(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit1 => set_data_bit(line, x, val),
        PixelDepth::Bit2 => set_data_dibit(line, x, val),
        PixelDepth::Bit4 => set_data_qbit(line, x, val),
        PixelDepth::Bit8 => set_data_byte(line, x, val),
        PixelDepth::Bit16 => set_data_two_bytes(line, x, val),
        PixelDepth::Bit32 => line[x as usize] = val,
    }
}

/// Read `bits` wide field number `x`, MSB first.
#[inline]
fn get_field(line: &[u32], x: u32, bits: u32) -> u32 {
    let per_word = 32 / bits;
    let word = line[(x / per_word) as usize];
    let shift = 32 - bits * (x % per_word + 1);
    (word >> shift) & ((1u32 << bits) - 1)
}

#[inline]
fn set_field(line: &mut [u32], x: u32, bits: u32, val: u32) {
    let per_word = 32 / bits;
    let mask = (1u32 << bits) - 1;
    let shift = 32 - bits * (x % per_word + 1);
    let word = &mut line[(x / per_word) as usize];
    *word = (*word & !(mask << shift)) | ((val & mask) << shift);
}

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    get_field(line, x, 1)
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    set_field(line, x, 1, val);
}

/// Get a 2-bit pixel value.
#[inline]
pub fn get_data_dibit(line: &[u32], x: u32) -> u32 {
    get_field(line, x, 2)
}

/// Set a 2-bit pixel value.
#[inline]
pub fn set_data_dibit(line: &mut [u32], x: u32, val: u32) {
    set_field(line, x, 2, val);
}

/// Get a 4-bit pixel value.
#[inline]
pub fn get_data_qbit(line: &[u32], x: u32) -> u32 {
    get_field(line, x, 4)
}

/// Set a 4-bit pixel value.
#[inline]
pub fn set_data_qbit(line: &mut [u32], x: u32, val: u32) {
    set_field(line, x, 4, val);
}

/// Get an 8-bit pixel value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    get_field(line, x, 8)
}

/// Set an 8-bit pixel value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    set_field(line, x, 8, val);
}

/// Get a 16-bit pixel value.
#[inline]
pub fn get_data_two_bytes(line: &[u32], x: u32) -> u32 {
    get_field(line, x, 16)
}

/// Set a 16-bit pixel value.
#[inline]
pub fn set_data_two_bytes(line: &mut [u32], x: u32, val: u32) {
    set_field(line, x, 16, val);
}
