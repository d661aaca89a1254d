// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! # tomo-core
//!
//! Pure-Rust toolkit for grayscale tomography-style raster stacks:
//!
//! - **`raster`** — the in-memory [`GrayImage`] matrix type and the plain
//!   PGM (P2) text format, plus normalization and mirroring.
//! - **`huffman`** — a lossless Huffman container codec: a frequency-minimal
//!   prefix-code tree built per image, serialized via its frequency table,
//!   with exact round-trip reconstruction.
//! - **`volume`** — ordered stacks of image layers with minimum / maximum /
//!   average / median projections along the x, y, or z axis.
//! - **`segment`** — multi-seed shortest-path segmentation over the pixel
//!   grid.
//!
//! The crate performs no file I/O: images and containers move in and out as
//! strings and byte buffers, and loading or storing them is the caller's
//! concern.
//!
//! # Quick start
//!
//! ```rust
//! use tomo_core::{huffman, GrayImage};
//!
//! let image = GrayImage::from_rows(vec![vec![0, 0], vec![1, 1]], 255)?;
//! let container = huffman::encode(&image)?;
//! let restored = huffman::decode(&container)?;
//! assert_eq!(restored, image);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod huffman;
pub mod raster;
pub mod segment;
pub mod volume;

pub use huffman::error::CodecError;
pub use raster::error::RasterError;
pub use raster::GrayImage;
pub use segment::{Seed, SegmentError};
pub use volume::{Axis, Criterion, Volume, VolumeError};
