// src/quadtree/types.rs
// Core types for the linear quadtree - leaf quadrants, cardinal directions,
// and build statistics shared by the merge and neighbor passes.
// RELEVANT FILES:src/quadtree/mod.rs,src/quadtree/merge.rs,src/quadtree/neighbors.rs

use crate::morton::{self, DilatedMasks};

/// A leaf of the quadtree: a maximal axis-aligned square of uniform validity.
///
/// `code` is the Morton code of the square's minimum corner, padded with
/// trailing zeros to full resolution. `level` counts subdivisions from the
/// root, so the square spans `2^(resolution - level)` cells per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrant {
    pub code: u64,
    pub level: u32,
    pub valid: bool,
}

impl Quadrant {
    /// Grid coordinates of the square's minimum corner.
    #[inline]
    pub fn origin(&self) -> (u32, u32) {
        morton::deinterleave(self.code)
    }

    /// Side length in cells for a tree of the given resolution.
    #[inline]
    pub fn side_len(&self, resolution: u32) -> u64 {
        1u64 << (resolution - self.level)
    }

    /// Center of the square, rounded down for single-cell quadrants.
    pub fn center(&self, resolution: u32) -> (i32, i32) {
        let (x, y) = self.origin();
        let half = self.side_len(resolution) / 2;
        (x as i32 + half as i32, y as i32 + half as i32)
    }
}

/// Cardinal neighbor directions. North is +y, matching row-major cell order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Dilated unit step for this direction at the finest level.
    ///
    /// Increments are single channel bits; decrements are the channel's
    /// all-ones pattern, which subtracts one under the masked add.
    #[inline]
    pub fn unit(self, masks: &DilatedMasks) -> u64 {
        match self {
            Direction::North => 0b10,
            Direction::East => 0b01,
            Direction::South => masks.odd_bits,
            Direction::West => masks.even_bits,
        }
    }
}

/// Counters and timing reported by a quadtree build.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    pub leaf_count: usize,
    pub valid_leaf_count: usize,
    pub edge_count: usize,
    pub max_level: u32,
    pub build_time_ms: f32,
}
