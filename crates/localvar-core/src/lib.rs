//! localvar-core - Image container for local statistics filtering
//!
//! This crate provides the data structures the filter operates on:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`PixelDepth`] - Bits per sample
//!
//! Samples are packed MSB-first into 32-bit words with every row starting
//! on a word boundary, so an 8-bit row of width `w` occupies
//! `ceil(w / 4)` words.

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{Pix, PixMut, PixelDepth};
