// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! Volume stacks and 2-D projections.
//!
//! A [`Volume`] is an ordered stack of equal-sized grayscale layers. A
//! projection collapses the stack into a single image along one axis:
//! along X every output pixel reduces the values at one image position
//! across all layers; along Y (or Z) the volume is resliced so every output
//! row corresponds to one layer and the reduction runs across image columns
//! (or rows). Y and Z projections are mirrored vertically so they appear in
//! the orientation a viewer expects.

use log::debug;
use rayon::prelude::*;

use std::fmt;

use crate::raster::GrayImage;

/// Smallest stack that still is a volume.
pub const MIN_LAYERS: usize = 2;
/// Largest supported stack.
pub const MAX_LAYERS: usize = 99;

/// Errors that can occur while assembling a volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// The stack has fewer than [`MIN_LAYERS`] or more than [`MAX_LAYERS`] layers.
    LayerCountOutOfRange(usize),
    /// A layer's dimensions differ from the first layer's.
    LayerSizeMismatch { index: usize },
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayerCountOutOfRange(n) => {
                write!(f, "layer count {n} out of range ({MIN_LAYERS}-{MAX_LAYERS})")
            }
            Self::LayerSizeMismatch { index } => {
                write!(f, "layer {index} does not match the volume dimensions")
            }
        }
    }
}

impl std::error::Error for VolumeError {}

pub type Result<T> = std::result::Result<T, VolumeError>;

/// Projection axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Reduce across layers; the output keeps the layer dimensions.
    X,
    /// Reslice by image column; one output row per layer.
    Y,
    /// Reslice by image row; one output row per layer.
    Z,
}

/// Reduction applied to the value stack behind each output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Smallest non-zero value (zero only where the whole stack is zero).
    Minimum,
    /// Largest value.
    Maximum,
    /// Integer mean.
    Average,
    /// Median; an even-sized stack averages the two middle values.
    Median,
}

/// An ordered stack of equal-sized grayscale layers.
#[derive(Debug, Clone)]
pub struct Volume {
    layers: Vec<GrayImage>,
}

impl Volume {
    /// Assemble a volume from layers, validating count and dimensions.
    pub fn new(layers: Vec<GrayImage>) -> Result<Self> {
        if layers.len() < MIN_LAYERS || layers.len() > MAX_LAYERS {
            return Err(VolumeError::LayerCountOutOfRange(layers.len()));
        }
        let (width, height) = (layers[0].width(), layers[0].height());
        for (index, layer) in layers.iter().enumerate() {
            if layer.width() != width || layer.height() != height {
                return Err(VolumeError::LayerSizeMismatch { index });
            }
        }
        Ok(Self { layers })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Width of every layer.
    pub fn width(&self) -> usize {
        self.layers[0].width()
    }

    /// Height of every layer.
    pub fn height(&self) -> usize {
        self.layers[0].height()
    }

    pub fn layers(&self) -> &[GrayImage] {
        &self.layers
    }

    /// Collapse the stack into a single image.
    pub fn project(&self, axis: Axis, criterion: Criterion) -> GrayImage {
        let (out_w, out_h, depth) = match axis {
            Axis::X => (self.width(), self.height(), self.layer_count()),
            Axis::Y => (self.height(), self.layer_count(), self.width()),
            Axis::Z => (self.width(), self.layer_count(), self.height()),
        };
        debug!(
            "projecting {}x{}x{} volume along {:?} with {:?} ({}x{} output)",
            self.width(),
            self.height(),
            self.layer_count(),
            axis,
            criterion,
            out_w,
            out_h,
        );

        let sample = |row: usize, col: usize, k: usize| -> u16 {
            match axis {
                Axis::X => self.layers[k].get(col, row),
                Axis::Y => self.layers[row].get(k, col),
                Axis::Z => self.layers[row].get(col, k),
            }
        };
        let reduce_row = |row: usize| -> Vec<u16> {
            (0..out_w)
                .map(|col| {
                    let stack = (0..depth).map(|k| sample(row, col, k));
                    reduce(stack, depth, criterion)
                })
                .collect()
        };

        // The per-pixel sort makes the median by far the most expensive
        // criterion; it reduces rows in parallel.
        let rows: Vec<Vec<u16>> = if criterion == Criterion::Median {
            (0..out_h).into_par_iter().map(reduce_row).collect()
        } else {
            (0..out_h).map(reduce_row).collect()
        };

        let mut out = GrayImage::new(out_w, out_h, 0);
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                out.set(x, y, value);
            }
        }

        // Y and Z projections come out upside down relative to the viewer.
        if axis != Axis::X {
            out = out.mirror_vertical();
        }

        // The minimum criterion keeps the full display range; everything
        // else declares the attained maximum.
        let max = if criterion == Criterion::Minimum {
            255
        } else {
            out.computed_max()
        };
        out.set_max_value(max);
        out
    }
}

fn reduce(stack: impl Iterator<Item = u16>, depth: usize, criterion: Criterion) -> u16 {
    match criterion {
        Criterion::Maximum => stack.max().unwrap_or(0),
        Criterion::Minimum => {
            // Zeros mark empty space and are ignored unless the whole
            // stack is empty at this position.
            let min = stack.filter(|&v| v != 0).min();
            min.unwrap_or(0)
        }
        Criterion::Average => {
            let sum: u32 = stack.map(u32::from).sum();
            (sum / depth as u32) as u16
        }
        Criterion::Median => {
            let mut values: Vec<u16> = stack.collect();
            values.sort_unstable();
            let mid = values.len() / 2;
            if values.len() % 2 == 0 {
                ((values[mid - 1] as u32 + values[mid] as u32) / 2) as u16
            } else {
                values[mid]
            }
        }
    }
}
