// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! Grayscale raster images.
//!
//! Provides [`GrayImage`], a rectangular 16-bit grayscale pixel matrix with a
//! declared maximum intensity, plus the plain-text PGM (P2) format in the
//! [`pgm`] submodule. Rectangularity is enforced at construction, so every
//! consumer (codec, projections, segmentation) can rely on it.

pub mod error;
pub mod pgm;

use error::{RasterError, Result};

/// A rectangular grayscale pixel matrix with a declared maximum intensity.
///
/// Pixels are stored flat in row-major order: index = y * width + x.
/// `max_value` is the declared maximum (the PGM maxval), which may exceed
/// 255 until the image has been normalized — the Huffman codec requires a
/// normalized image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    max_value: u16,
    pixels: Vec<u16>,
}

impl GrayImage {
    /// Create a zero-filled image.
    pub fn new(width: usize, height: usize, max_value: u16) -> Self {
        Self {
            width,
            height,
            max_value,
            pixels: vec![0u16; width * height],
        }
    }

    /// Build an image from row vectors; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<u16>>, max_value: u16) -> Result<Self> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(RasterError::EmptyMatrix);
        }
        let width = rows[0].len();
        let height = rows.len();
        let mut pixels = Vec::with_capacity(width * height);
        for row in &rows {
            if row.len() != width {
                return Err(RasterError::RaggedRows);
            }
            pixels.extend_from_slice(row);
        }
        Ok(Self {
            width,
            height,
            max_value,
            pixels,
        })
    }

    /// Build an image from flat row-major storage.
    pub fn from_raw(width: usize, height: usize, max_value: u16, pixels: Vec<u16>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyMatrix);
        }
        if pixels.len() != width * height {
            return Err(RasterError::DimensionMismatch);
        }
        Ok(Self {
            width,
            height,
            max_value,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Declared maximum intensity (not necessarily attained by any pixel).
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    pub fn set_max_value(&mut self, max_value: u16) {
        self.max_value = max_value;
    }

    /// Flat row-major pixel storage.
    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Get a pixel value. `x` is the column, `y` the row.
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.pixels[self.index(x, y)]
    }

    /// Set a pixel value.
    pub fn set(&mut self, x: usize, y: usize, value: u16) {
        let idx = self.index(x, y);
        self.pixels[idx] = value;
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> &[u16] {
        debug_assert!(y < self.height, "row {y} >= {}", self.height);
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Largest pixel value actually present (0 for the all-zero image).
    pub fn computed_max(&self) -> u16 {
        self.pixels.iter().copied().max().unwrap_or(0)
    }

    /// Scale every pixel into the 0–255 range.
    ///
    /// Maps `v` to `v * 255 / max_value` with integer division and sets the
    /// declared maximum to 255. An image whose declared maximum is zero has
    /// nothing to scale; only the declared maximum is updated.
    pub fn normalize(&mut self) {
        let max = self.max_value as u32;
        if max > 0 {
            for px in &mut self.pixels {
                *px = (*px as u32 * 255 / max) as u16;
            }
        }
        self.max_value = 255;
    }

    /// Vertically mirrored copy: the top row becomes the bottom row.
    pub fn mirror_vertical(&self) -> GrayImage {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for y in (0..self.height).rev() {
            pixels.extend_from_slice(self.row(y));
        }
        Self {
            width: self.width,
            height: self.height,
            max_value: self.max_value,
            pixels,
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width, "column {x} >= {}", self.width);
        debug_assert!(y < self.height, "row {y} >= {}", self.height);
        y * self.width + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rectangular() {
        let img = GrayImage::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]], 255).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get(0, 0), 1);
        assert_eq!(img.get(2, 1), 6);
        assert_eq!(img.row(1), &[4, 5, 6]);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let result = GrayImage::from_rows(vec![vec![1, 2], vec![3]], 255);
        assert_eq!(result, Err(RasterError::RaggedRows));
    }

    #[test]
    fn from_rows_rejects_empty() {
        assert_eq!(
            GrayImage::from_rows(vec![], 255),
            Err(RasterError::EmptyMatrix)
        );
        assert_eq!(
            GrayImage::from_rows(vec![vec![]], 255),
            Err(RasterError::EmptyMatrix)
        );
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(GrayImage::from_raw(2, 2, 255, vec![0; 4]).is_ok());
        assert_eq!(
            GrayImage::from_raw(2, 2, 255, vec![0; 3]),
            Err(RasterError::DimensionMismatch)
        );
    }

    #[test]
    fn get_set() {
        let mut img = GrayImage::new(4, 3, 255);
        assert_eq!(img.get(3, 2), 0);
        img.set(3, 2, 42);
        assert_eq!(img.get(3, 2), 42);
        // Neighboring positions stay untouched.
        assert_eq!(img.get(2, 2), 0);
        assert_eq!(img.get(3, 1), 0);
    }

    #[test]
    fn normalize_scales_into_byte_range() {
        let mut img = GrayImage::from_rows(vec![vec![0, 500, 1000]], 1000).unwrap();
        img.normalize();
        assert_eq!(img.max_value(), 255);
        assert_eq!(img.pixels(), &[0, 127, 255]);
    }

    #[test]
    fn normalize_zero_max() {
        let mut img = GrayImage::new(2, 2, 0);
        img.normalize();
        assert_eq!(img.max_value(), 255);
        assert!(img.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn mirror_vertical_reverses_rows() {
        let img = GrayImage::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]], 255).unwrap();
        let flipped = img.mirror_vertical();
        assert_eq!(flipped.row(0), &[5, 6]);
        assert_eq!(flipped.row(1), &[3, 4]);
        assert_eq!(flipped.row(2), &[1, 2]);
        // Mirroring twice restores the original.
        assert_eq!(flipped.mirror_vertical(), img);
    }

    #[test]
    fn computed_max() {
        let img = GrayImage::from_rows(vec![vec![3, 9], vec![7, 1]], 255).unwrap();
        assert_eq!(img.computed_max(), 9);
        assert_eq!(GrayImage::new(2, 2, 255).computed_max(), 0);
    }
}
