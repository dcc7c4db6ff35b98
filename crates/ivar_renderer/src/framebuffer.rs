//! 8-bit RGB framebuffer and image writers.
//!
//! TGA output is written by hand (uncompressed truecolor, type 2); every
//! other format goes through the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use thiserror::Error;

/// Bytes per stored pixel (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// Errors from framebuffer allocation and image output.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Cannot allocate a {width}x{height} framebuffer")]
    Allocation { width: u32, height: u32 },

    #[error("{width}x{height} does not fit the 16-bit TGA size fields")]
    TooLargeForTga { width: u32, height: u32 },

    #[error("Output path {0:?} has no file extension")]
    MissingExtension(String),
}

/// Width × height grid of RGB8 triples, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    ///
    /// Fails instead of aborting when the buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, ImageError> {
        let too_large = || ImageError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(too_large)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }

    /// Get the pixel at (x, y), y = 0 being the top row.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgb);
    }

    /// Raw RGB bytes, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable rows, top row first. Rows are disjoint, so they can be
    /// handed to different threads.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let stride = (self.width as usize * BYTES_PER_PIXEL).max(1);
        self.pixels.chunks_exact_mut(stride)
    }

    /// Write an uncompressed 24-bit TGA: bottom row first, BGR order.
    pub fn write_tga<W: Write>(&self, mut writer: W) -> Result<(), ImageError> {
        let (Ok(width), Ok(height)) = (u16::try_from(self.width), u16::try_from(self.height))
        else {
            return Err(ImageError::TooLargeForTga {
                width: self.width,
                height: self.height,
            });
        };

        let mut header = [0u8; 18];
        header[2] = 2; // uncompressed truecolor
        header[12..14].copy_from_slice(&width.to_le_bytes());
        header[14..16].copy_from_slice(&height.to_le_bytes());
        header[16] = 24; // bits per pixel
        writer.write_all(&header)?;

        let stride = self.width as usize * BYTES_PER_PIXEL;
        let mut row_bgr = Vec::with_capacity(stride);
        for y in (0..self.height).rev() {
            let start = y as usize * stride;
            row_bgr.clear();
            for rgb in self.pixels[start..start + stride].chunks_exact(BYTES_PER_PIXEL) {
                row_bgr.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
            }
            writer.write_all(&row_bgr)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Save to `path`, picking the format from the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ImageError::MissingExtension(path.display().to_string()))?;

        if extension == "tga" {
            let file = File::create(path)?;
            self.write_tga(BufWriter::new(file))?;
        } else {
            image::save_buffer(
                path,
                &self.pixels,
                self.width,
                self.height,
                image::ColorType::Rgb8,
            )?;
        }

        info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
