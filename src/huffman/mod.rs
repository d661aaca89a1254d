// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! Lossless Huffman container codec for grayscale pixel matrices.
//!
//! The container embeds everything the decoder needs — the decoder rebuilds
//! the prefix-code tree from the stored frequency table with the identical
//! construction algorithm and tie-break the encoder used, so no tree
//! serialization is necessary. Layout, all integers **little-endian**:
//!
//! | field              | size        | description                          |
//! |--------------------|-------------|--------------------------------------|
//! | width              | 2 bytes     | image width                          |
//! | height             | 2 bytes     | image height                         |
//! | max value          | 1 byte      | declared maximum intensity (≤ 255)   |
//! | frequency[0..=255] | 256 × 8     | per-symbol occurrence counts         |
//! | payload            | variable    | bit-packed codewords, zero-padded    |
//!
//! The payload concatenates each pixel's codeword in row-major order and
//! zero-pads to a byte boundary. Its meaningful bit length is
//! Σ(code length × frequency); that sum — never end-of-input — is the
//! decoder's authoritative stopping condition.
//!
//! Encode and decode are pure, synchronous, single-threaded transforms.
//! Every call builds and discards its own tree; nothing persists between
//! calls.

pub mod bitio;
pub mod error;
pub mod freq;
pub mod tree;

use bitio::{BitReader, BitWriter};
use error::{CodecError, Result};
use freq::{FrequencyTable, ALPHABET_SIZE};
use tree::{CodeTable, CodeTree, Node};

use crate::raster::GrayImage;

/// Header size: width (2) + height (2) + max value (1).
const HEADER_LEN: usize = 5;
/// Frequency block size: 256 counts of 8 bytes each.
const FREQ_BLOCK_LEN: usize = ALPHABET_SIZE * 8;

/// Encode a normalized image into a Huffman container.
///
/// The image must be normalized: `max_value` and every pixel at most 255.
/// Normalization itself is the caller's responsibility
/// ([`GrayImage::normalize`]).
pub fn encode(image: &GrayImage) -> Result<Vec<u8>> {
    if image.max_value() > 255 {
        return Err(CodecError::InvalidState(
            "image is not normalized (max_value > 255)",
        ));
    }
    if image.width() > u16::MAX as usize || image.height() > u16::MAX as usize {
        return Err(CodecError::InvalidState(
            "image dimensions exceed the 16-bit header fields",
        ));
    }

    let table = FrequencyTable::from_image(image)?;
    let tree = CodeTree::build(&table)?;
    let codes = CodeTable::from_entries(tree.code_entries());

    let mut out = Vec::with_capacity(HEADER_LEN + FREQ_BLOCK_LEN + image.pixels().len() / 4);
    out.extend_from_slice(&(image.width() as u16).to_le_bytes());
    out.extend_from_slice(&(image.height() as u16).to_le_bytes());
    out.push(image.max_value() as u8);
    for &count in table.counts() {
        out.extend_from_slice(&count.to_le_bytes());
    }

    let mut writer = BitWriter::new();
    for &px in image.pixels() {
        // Every pixel was counted, so its symbol has a code.
        let code = codes
            .code(px as u8)
            .ok_or(CodecError::InvalidState("symbol missing from code table"))?;
        writer.write_bits(code);
    }
    out.extend_from_slice(&writer.finish());

    Ok(out)
}

/// Decode a Huffman container back into the exact original image.
pub fn decode(bytes: &[u8]) -> Result<GrayImage> {
    if bytes.len() < HEADER_LEN + FREQ_BLOCK_LEN {
        return Err(CodecError::TruncatedInput);
    }

    let width = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    let height = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
    let max_value = bytes[4] as u16;

    let mut counts = [0u64; ALPHABET_SIZE];
    for (i, count) in counts.iter_mut().enumerate() {
        let start = HEADER_LEN + i * 8;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&bytes[start..start + 8]);
        *count = u64::from_le_bytes(raw);
    }
    let table = FrequencyTable::from_counts(counts);

    let pixel_count = width as u64 * height as u64;
    if table.total() != pixel_count {
        return Err(CodecError::DecodeError(
            "frequency total does not match the declared dimensions",
        ));
    }

    // Same construction, same tie-break: the rebuilt tree is identical to
    // the encoder's.
    let tree = CodeTree::build(&table)?;
    let payload = &bytes[HEADER_LEN + FREQ_BLOCK_LEN..];
    let expected_bits = tree.payload_bits();
    if (payload.len() as u64) * 8 < expected_bits {
        return Err(CodecError::DecodeError(
            "payload is shorter than the frequency table requires",
        ));
    }

    let mut pixels: Vec<u16> = Vec::with_capacity(width * height);
    match tree.root() {
        Node::Leaf { symbol, .. } => {
            // Degenerate single-symbol tree: the code is empty, so the
            // symbol repeats for every pixel without consuming any bits.
            pixels.resize(width * height, *symbol as u16);
        }
        Node::Internal { .. } => {
            let mut reader = BitReader::new(payload);
            for _ in 0..pixel_count {
                let mut node = tree.root();
                let symbol = loop {
                    match node {
                        Node::Leaf { symbol, .. } => break *symbol,
                        Node::Internal { left, right, .. } => {
                            node = if reader.read_bit()? { right } else { left };
                        }
                    }
                };
                pixels.push(symbol as u16);
            }
        }
    }

    GrayImage::from_raw(width, height, max_value, pixels)
        .map_err(|_| CodecError::DecodeError("reconstructed matrix dimensions are invalid"))
}
