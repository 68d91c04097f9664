//! Grayscale image representation, padding, and file I/O glue.
//!
//! Generalizes the teacher's `Image` struct and `load_image`/`write_image`
//! pair (`examples/andrei-toterman-image_encryption/src/lib.rs`), trading the
//! teacher's arbitrary-color-format passthrough for a fixed 8-bit grayscale
//! representation, since color images are a non-goal of this crate (spec §1).

use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};
use log::debug;

use crate::error::Result;

/// An 8-bit grayscale image, padded to even dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// `true` if the original width was odd (this image's width is padded by one column).
    pub pad_w: bool,
    /// `true` if the original height was odd (this image's height is padded by one row).
    pub pad_h: bool,
}

impl Image {
    /// Build an `Image` from a pixel buffer of the declared, already-even,
    /// dimensions. Fails if `pixels.len() != width * height`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(crate::error::Error::InvalidImageData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            pad_w: false,
            pad_h: false,
        })
    }

    /// Load a grayscale image from disk, padding odd dimensions by one
    /// column/row of zeros on the right/bottom so both dimensions are even.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let dynamic = image::open(path)?;
        let gray: GrayImage = dynamic.to_luma8();
        Ok(Self::from_gray_image(gray))
    }

    fn from_gray_image(gray: GrayImage) -> Self {
        let (orig_w, orig_h) = gray.dimensions();
        let pad_w = orig_w % 2 != 0;
        let pad_h = orig_h % 2 != 0;
        let width = orig_w + pad_w as u32;
        let height = orig_h + pad_h as u32;

        // allocate with full length up front: a Vec::with_capacity here would
        // silently drop the padded row/column, since nothing ever grows the
        // vector's length back up before the padding loop writes into it.
        let mut pixels = vec![0u8; (width as usize) * (height as usize)];
        for y in 0..orig_h {
            for x in 0..orig_w {
                pixels[(y * width + x) as usize] = gray.get_pixel(x, y).0[0];
            }
        }

        debug!(
            "loaded image {orig_w}x{orig_h}, padded to {width}x{height} (pad_w={pad_w}, pad_h={pad_h})"
        );

        Self {
            pixels,
            width,
            height,
            pad_w,
            pad_h,
        }
    }

    /// Crop this image back to its original (pre-padding) dimensions.
    pub fn cropped(&self) -> Vec<u8> {
        let out_w = self.width - self.pad_w as u32;
        let out_h = self.height - self.pad_h as u32;
        let mut out = Vec::with_capacity((out_w as usize) * (out_h as usize));
        for y in 0..out_h {
            let row_start = (y * self.width) as usize;
            out.extend_from_slice(&self.pixels[row_start..row_start + out_w as usize]);
        }
        out
    }

    /// Write this image to disk as a PNG, cropped to its original dimensions.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let out_w = self.width - self.pad_w as u32;
        let out_h = self.height - self.pad_h as u32;
        let cropped = self.cropped();
        let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(out_w, out_h, cropped)
                .expect("cropped buffer length matches out_w * out_h by construction");
        buffer.save(path)?;
        Ok(())
    }
}
