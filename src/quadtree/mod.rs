// src/quadtree/mod.rs
// Linear quadtree with level differences over a binary validity grid.
// Build scans cells in Morton order, merges homogeneous runs into maximal
// aligned quadrants, then derives per-leaf neighbor level differences and an
// adjacency list between valid leafs using constant-time dilated-integer
// neighbor finding (Aizawa & Tanaka).
// RELEVANT FILES:src/quadtree/merge.rs,src/quadtree/neighbors.rs,src/morton.rs,src/graph.rs

mod merge;
mod neighbors;
pub mod types;

pub use types::{BuildStats, Direction, Quadrant};

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;

use crate::grid::GridSource;
use crate::morton::{self, DilatedMasks};

/// Hierarchical spatial index over a square power-of-two validity grid.
///
/// A build fully replaces the leaf set, the code lookup table, and the
/// adjacency lists; leaf indices are only meaningful against the build that
/// produced them. Queries take `&self` and never mutate.
pub struct Quadtree {
    resolution: u32,
    masks: DilatedMasks,
    grid_width: usize,
    grid_height: usize,
    leafs: Vec<Quadrant>,
    index: HashMap<u64, u32>,
    adjacency: Vec<Vec<u32>>,
}

impl Quadtree {
    /// Create an empty index.
    ///
    /// `resolution_hint` is the tree depth (log2 of the largest addressable
    /// side length). Hints above 32 are clamped: two interleaved 32-bit
    /// channels are the ceiling for a 64-bit Morton code.
    pub fn new(resolution_hint: u32) -> Self {
        let resolution = resolution_hint.min(32);
        Self {
            resolution,
            masks: DilatedMasks::new(resolution),
            grid_width: 0,
            grid_height: 0,
            leafs: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    /// Partition `grid` into maximal uniform quadrants and derive adjacency.
    ///
    /// An empty grid produces zero leafs; a grid the configured resolution
    /// cannot address is an error.
    pub fn build(&mut self, grid: &dyn GridSource) -> Result<BuildStats> {
        let start_time = Instant::now();

        self.leafs.clear();
        self.index.clear();
        self.adjacency.clear();
        self.grid_width = grid.width();
        self.grid_height = grid.height();

        let cells = self.grid_width as u128 * self.grid_height as u128;
        if cells == 0 {
            return Ok(BuildStats::default());
        }
        if cells > 1u128 << (2 * self.resolution) {
            anyhow::bail!(
                "grid of {}x{} cells exceeds the addressable range at resolution {}",
                self.grid_width,
                self.grid_height,
                self.resolution
            );
        }
        let size = cells as u64;

        // Morton-order scan: a validity flip closes the current run, which is
        // merged downward from the flip code; the trailing run merges upward.
        let width = self.grid_width;
        let cell_valid = |z: u64| {
            let (x, y) = morton::deinterleave(z);
            grid.is_valid(y as usize * width + x as usize)
        };

        let mut run_start = 0u64;
        let mut prev = cell_valid(0);
        for z in 1..size {
            let valid = cell_valid(z);
            if valid != prev {
                self.merge_run(z, run_start, prev);
                run_start = z;
                prev = valid;
            }
        }
        self.merge_run(run_start, size, prev);

        if self.leafs.len() > 1 {
            let diffs = self.level_differences();
            self.adjacency = self.derive_adjacency(&diffs);
        } else {
            // A uniform grid is a single self-contained leaf.
            self.adjacency = vec![Vec::new(); self.leafs.len()];
        }

        let stats = BuildStats {
            leaf_count: self.leafs.len(),
            valid_leaf_count: self.leafs.iter().filter(|l| l.valid).count(),
            edge_count: self.adjacency.iter().map(Vec::len).sum(),
            max_level: self.leafs.iter().map(|l| l.level).max().unwrap_or(0),
            build_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
        };
        log::debug!(
            "quadtree build: {} leafs ({} valid), {} directed edges, max level {}, {:.2} ms",
            stats.leaf_count,
            stats.valid_leaf_count,
            stats.edge_count,
            stats.max_level,
            stats.build_time_ms
        );
        Ok(stats)
    }

    /// Index of the valid leaf containing `(x, y)`, or -1.
    ///
    /// Returns -1 for points outside the grid, points inside a blocked leaf,
    /// and queries against an empty tree.
    pub fn query_valid_region(&self, x: i32, y: i32) -> i32 {
        if x < 0 || y < 0 || x as usize >= self.grid_width || y as usize >= self.grid_height {
            return -1;
        }
        let code = morton::interleave(x as u32, y as u32);
        for level in (0..=self.resolution).rev() {
            let probe = self.truncate_to_level(code, level);
            if let Some(&i) = self.index.get(&probe) {
                let leaf = &self.leafs[i as usize];
                if leaf.level != level {
                    continue;
                }
                return if leaf.valid { i as i32 } else { -1 };
            }
        }
        -1
    }

    /// Leafs of the current build, in emission order.
    pub fn leafs(&self) -> &[Quadrant] {
        &self.leafs
    }

    /// Per-leaf indices of neighboring valid leafs, index-aligned with `leafs()`.
    pub fn adjacency(&self) -> &[Vec<u32>] {
        &self.adjacency
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Zero the code bits below `level`, yielding the ancestor corner code.
    #[inline]
    pub(crate) fn truncate_to_level(&self, code: u64, level: u32) -> u64 {
        let shift = 2 * (self.resolution - level);
        if shift >= 64 {
            0
        } else {
            code & !((1u64 << shift) - 1)
        }
    }
}
