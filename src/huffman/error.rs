// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! Error types for the Huffman container codec.
//!
//! All errors are reported synchronously to the caller and nothing is
//! retried: the codec is a deterministic local transformation, so any
//! detected inconsistency between declared dimensions, frequency totals and
//! payload length is a hard failure with no partial result.

use std::fmt;

/// Errors that can occur during container encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A caller precondition was violated; rejected before any work begins.
    InvalidState(&'static str),
    /// A pixel value exceeds the 8-bit symbol range (image not normalized).
    OutOfRange(u16),
    /// No symbol has a non-zero frequency, so no tree can be built.
    EmptyAlphabet,
    /// The byte stream ended inside the header or the frequency table.
    TruncatedInput,
    /// The payload is malformed or inconsistent with the header.
    DecodeError(&'static str),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Self::OutOfRange(v) => write!(f, "pixel value {v} exceeds the symbol range (0-255)"),
            Self::EmptyAlphabet => write!(f, "no symbol has a non-zero frequency"),
            Self::TruncatedInput => write!(f, "unexpected end of container data"),
            Self::DecodeError(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

pub type Result<T> = std::result::Result<T, CodecError>;
