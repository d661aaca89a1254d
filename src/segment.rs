// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/tomocore

//! Seeded shortest-path segmentation.
//!
//! Treats the image as a 4-connected grid whose edge weights are the
//! absolute intensity difference between neighboring pixels, runs Dijkstra
//! from every seed, and labels each pixel with the seed that reaches it at
//! minimal path cost. The grid is implicit — neighbors are computed from
//! coordinates instead of materializing an adjacency list, which keeps the
//! memory footprint at two flat arrays per image.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use log::debug;

use crate::raster::GrayImage;

/// Errors that can occur during segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// At least one seed is required.
    NoSeeds,
    /// A seed lies outside the image bounds.
    SeedOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSeeds => write!(f, "no seeds given"),
            Self::SeedOutOfBounds { x, y } => {
                write!(f, "seed ({x}, {y}) lies outside the image")
            }
        }
    }
}

impl std::error::Error for SegmentError {}

pub type Result<T> = std::result::Result<T, SegmentError>;

/// A labeled starting point for region growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    /// Column of the seed pixel.
    pub x: usize,
    /// Row of the seed pixel.
    pub y: usize,
    /// Label written into the output for every pixel this seed claims.
    pub label: u16,
}

impl Seed {
    pub fn new(x: usize, y: usize, label: u16) -> Self {
        Self { x, y, label }
    }
}

/// Label every pixel with the seed that reaches it at minimal path cost.
///
/// Ties go to the earliest seed in `seeds` (only a strictly smaller cost
/// replaces a label). The returned label matrix has the same dimensions as
/// the input; its declared maximum is the largest label.
pub fn segment(image: &GrayImage, seeds: &[Seed]) -> Result<GrayImage> {
    if seeds.is_empty() {
        return Err(SegmentError::NoSeeds);
    }
    let (width, height) = (image.width(), image.height());
    for seed in seeds {
        if seed.x >= width || seed.y >= height {
            return Err(SegmentError::SeedOutOfBounds {
                x: seed.x,
                y: seed.y,
            });
        }
    }

    let mut best_cost = vec![u64::MAX; width * height];
    let mut best_label = vec![0u16; width * height];

    for seed in seeds {
        debug!(
            "running Dijkstra from seed ({}, {}) with label {}",
            seed.x, seed.y, seed.label
        );
        let cost = shortest_paths(image, seed.x, seed.y);
        for (idx, &c) in cost.iter().enumerate() {
            if c < best_cost[idx] {
                best_cost[idx] = c;
                best_label[idx] = seed.label;
            }
        }
    }

    let mut out = GrayImage::new(width, height, 0);
    for y in 0..height {
        for x in 0..width {
            out.set(x, y, best_label[y * width + x]);
        }
    }
    let max = out.computed_max();
    out.set_max_value(max);
    Ok(out)
}

/// Single-source shortest path costs over the pixel grid.
///
/// Standard binary-heap Dijkstra; stale heap entries are skipped on pop.
/// Every pixel is reachable (the grid is connected), so the returned costs
/// are all finite.
fn shortest_paths(image: &GrayImage, sx: usize, sy: usize) -> Vec<u64> {
    let (width, height) = (image.width(), image.height());
    let mut cost = vec![u64::MAX; width * height];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    cost[sy * width + sx] = 0;
    heap.push(Reverse((0, sy * width + sx)));

    while let Some(Reverse((current, idx))) = heap.pop() {
        if current > cost[idx] {
            continue;
        }
        let x = idx % width;
        let y = idx / width;
        let here = image.get(x, y);

        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbors {
            if nx >= width || ny >= height {
                continue;
            }
            let nidx = ny * width + nx;
            let weight = (here as i32 - image.get(nx, ny) as i32).unsigned_abs() as u64;
            let next = current + weight;
            if next < cost[nidx] {
                cost[nidx] = next;
                heap.push(Reverse((next, nidx)));
            }
        }
    }

    cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_seed_list() {
        let img = GrayImage::new(4, 4, 255);
        assert_eq!(segment(&img, &[]), Err(SegmentError::NoSeeds));
    }

    #[test]
    fn rejects_seed_out_of_bounds() {
        let img = GrayImage::new(4, 4, 255);
        assert_eq!(
            segment(&img, &[Seed::new(4, 0, 1)]),
            Err(SegmentError::SeedOutOfBounds { x: 4, y: 0 })
        );
    }

    #[test]
    fn uniform_image_costs_are_zero_everywhere() {
        // All edges weigh zero, so the first seed claims every pixel.
        let img = GrayImage::new(3, 3, 255);
        let labels = segment(&img, &[Seed::new(0, 0, 7), Seed::new(2, 2, 9)]).unwrap();
        assert!(labels.pixels().iter().all(|&l| l == 7));
        assert_eq!(labels.max_value(), 7);
    }

    #[test]
    fn shortest_paths_follow_intensity_steps() {
        let img = GrayImage::from_rows(vec![vec![0, 0, 10], vec![0, 0, 10]], 255).unwrap();
        let cost = shortest_paths(&img, 0, 0);
        assert_eq!(cost[0], 0);
        assert_eq!(cost[1], 0); // same intensity
        assert_eq!(cost[2], 10); // one step of height 10
        assert_eq!(cost[5], 10);
    }

    #[test]
    fn regions_split_along_an_intensity_barrier() {
        // A bright column separates two flat regions.
        let rows = vec![
            vec![0, 0, 200, 0, 0],
            vec![0, 0, 200, 0, 0],
            vec![0, 0, 200, 0, 0],
        ];
        let img = GrayImage::from_rows(rows, 255).unwrap();
        let labels = segment(&img, &[Seed::new(0, 1, 1), Seed::new(4, 1, 2)]).unwrap();

        for y in 0..3 {
            assert_eq!(labels.get(0, y), 1);
            assert_eq!(labels.get(1, y), 1);
            assert_eq!(labels.get(3, y), 2);
            assert_eq!(labels.get(4, y), 2);
        }
        // Crossing the barrier costs 200 + 200 from either side; the first
        // seed keeps the tie.
        for y in 0..3 {
            assert_eq!(labels.get(2, y), 1);
        }
    }
}
