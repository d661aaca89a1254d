// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! Plain-text PGM (P2) parsing and serialization.
//!
//! The P2 format is a whitespace-separated token stream: the magic number,
//! width, height, the maximum intensity, then width × height pixel values in
//! row-major order. A `#` starts a comment that runs to the end of the line
//! and may appear anywhere in the file.

use super::error::{RasterError, Result};
use super::GrayImage;

/// Magic number of the plain (ASCII) PGM format.
pub const MAGIC: &str = "P2";

/// Parse a plain PGM file into a [`GrayImage`].
///
/// Tokens beyond the declared pixel count are ignored, matching the
/// tolerance of common PGM readers.
pub fn parse(text: &str) -> Result<GrayImage> {
    let mut tokens = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split_whitespace());

    let magic = tokens.next().ok_or(RasterError::UnexpectedEof)?;
    if magic != MAGIC {
        return Err(RasterError::InvalidMagic);
    }

    let width = next_number(&mut tokens)? as usize;
    let height = next_number(&mut tokens)? as usize;
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyMatrix);
    }

    let max_value = next_number(&mut tokens)?;
    if max_value == 0 || max_value > u16::MAX as u32 {
        return Err(RasterError::MaxValueOutOfRange(max_value));
    }

    let mut pixels = Vec::with_capacity(width * height);
    for _ in 0..width * height {
        let value = next_number(&mut tokens)?;
        if value > max_value {
            return Err(RasterError::PixelAboveMax(value));
        }
        pixels.push(value as u16);
    }

    GrayImage::from_raw(width, height, max_value as u16, pixels)
}

/// Serialize an image as a plain PGM file.
pub fn write(image: &GrayImage) -> String {
    let mut out = String::new();
    out.push_str(MAGIC);
    out.push('\n');
    out.push_str("# written by tomo-core\n");
    out.push_str(&format!("{} {}\n", image.width(), image.height()));
    out.push_str(&format!("{}\n", image.max_value()));

    for y in 0..image.height() {
        let row: Vec<String> = image.row(y).iter().map(|px| px.to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }

    out
}

fn next_number<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<u32> {
    tokens
        .next()
        .ok_or(RasterError::UnexpectedEof)?
        .parse::<u32>()
        .map_err(|_| RasterError::InvalidNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let img = parse("P2\n3 2\n15\n0 1 2\n3 4 15\n").unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.max_value(), 15);
        assert_eq!(img.pixels(), &[0, 1, 2, 3, 4, 15]);
    }

    #[test]
    fn parse_with_comments() {
        let text = "P2 # plain PGM\n# a full-line comment\n2 2\n255\n1 2 # trailing\n3 4\n";
        let img = parse(text).unwrap();
        assert_eq!(img.pixels(), &[1, 2, 3, 4]);
    }

    #[test]
    fn parse_irregular_whitespace() {
        // The token stream does not have to align with lines.
        let img = parse("P2\n2   2 255 9\n8 7\t6\n").unwrap();
        assert_eq!(img.pixels(), &[9, 8, 7, 6]);
    }

    #[test]
    fn reject_bad_magic() {
        assert_eq!(parse("P5\n2 2\n255\n0 0 0 0"), Err(RasterError::InvalidMagic));
    }

    #[test]
    fn reject_truncated_pixels() {
        assert_eq!(
            parse("P2\n2 2\n255\n1 2 3"),
            Err(RasterError::UnexpectedEof)
        );
    }

    #[test]
    fn reject_pixel_above_max() {
        assert_eq!(
            parse("P2\n2 1\n15\n3 16"),
            Err(RasterError::PixelAboveMax(16))
        );
    }

    #[test]
    fn reject_zero_max_value() {
        assert_eq!(
            parse("P2\n1 1\n0\n0"),
            Err(RasterError::MaxValueOutOfRange(0))
        );
    }

    #[test]
    fn reject_non_numeric_token() {
        assert_eq!(parse("P2\n2 x\n255\n0 0"), Err(RasterError::InvalidNumber));
    }

    #[test]
    fn write_then_parse_roundtrip() {
        let img = GrayImage::from_rows(vec![vec![0, 128, 255], vec![9, 8, 7]], 255).unwrap();
        let text = write(&img);
        assert_eq!(parse(&text).unwrap(), img);
    }
}
