// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! Error types for raster construction and PGM parsing.

use std::fmt;

/// Errors that can occur while building an image or parsing a PGM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// The pixel matrix has no rows or no columns.
    EmptyMatrix,
    /// Rows of the input matrix have unequal lengths.
    RaggedRows,
    /// Flat pixel storage does not match width × height.
    DimensionMismatch,
    /// The file does not start with the P2 magic number.
    InvalidMagic,
    /// The header or pixel data ended early.
    UnexpectedEof,
    /// A header or pixel token is not a valid decimal number.
    InvalidNumber,
    /// The declared maximum intensity is outside 1–65535.
    MaxValueOutOfRange(u32),
    /// A pixel value exceeds the declared maximum intensity.
    PixelAboveMax(u32),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMatrix => write!(f, "pixel matrix is empty"),
            Self::RaggedRows => write!(f, "pixel matrix rows have unequal lengths"),
            Self::DimensionMismatch => write!(f, "pixel storage does not match width x height"),
            Self::InvalidMagic => write!(f, "missing P2 magic number (not a plain PGM)"),
            Self::UnexpectedEof => write!(f, "unexpected end of PGM data"),
            Self::InvalidNumber => write!(f, "invalid number in PGM data"),
            Self::MaxValueOutOfRange(v) => write!(f, "maximum intensity {v} out of range (1-65535)"),
            Self::PixelAboveMax(v) => write!(f, "pixel value {v} exceeds the declared maximum"),
        }
    }
}

impl std::error::Error for RasterError {}

pub type Result<T> = std::result::Result<T, RasterError>;
