// src/quadtree/neighbors.rs
// Per-leaf neighbor level differences and adjacency derivation.
// Walks the implied tree breadth-first in level waves, propagating slot
// values the way Aizawa & Tanaka's constant-time neighbor scheme prescribes,
// then turns resolved slots into edges between valid leafs.
// RELEVANT FILES:src/quadtree/mod.rs,src/quadtree/types.rs,src/morton.rs

use std::collections::HashMap;

use super::types::Direction;
use super::Quadtree;
use crate::morton;

/// Slot value meaning "finer than this side can see, or off the grid".
///
/// A resolved slot never exceeds 1: a quadrant receives at most one +1 per
/// side, from its unique same-level neighbor subdividing.
pub(crate) const UNRESOLVED: i8 = 2;

/// One quadrant of the implied tree during the level-difference walk.
#[derive(Debug, Clone, Copy)]
struct WalkNode {
    code: u64,
    level: u32,
    slots: [i8; 4],
}

impl Quadtree {
    /// Morton code of the same-size neighbor of `code` in `dir`, or `None`
    /// when that neighbor falls outside the grid.
    pub(crate) fn adjacent_code(&self, code: u64, level: u32, dir: Direction) -> Option<u64> {
        if level == 0 {
            return None;
        }
        let shift = 2 * (self.resolution - level);
        let delta = dir.unit(&self.masks) << shift;
        let (sum, carry_x, carry_y) = self.masks.checked_add(code, delta);
        let in_grid = match dir {
            Direction::East => !carry_x,
            Direction::West => carry_x,
            Direction::North => !carry_y,
            Direction::South => carry_y,
        };
        in_grid.then_some(sum)
    }

    /// Per-leaf, per-direction level differences, index-aligned with the
    /// leafs: 0 = same-size neighbor, negative = coarser neighbor that many
    /// levels up, positive = finer or off-grid (see [`UNRESOLVED`]).
    pub(crate) fn level_differences(&self) -> Vec<[i8; 4]> {
        let mut nodes = vec![WalkNode {
            code: 0,
            level: 0,
            slots: [UNRESOLVED; 4],
        }];
        let mut by_key: HashMap<(u64, u32), u32> = HashMap::new();
        by_key.insert((0, 0), 0);
        let mut wave: Vec<u32> = vec![0];

        while !wave.is_empty() {
            // Every same-level subdivision must be announced before any slot
            // in this wave is inherited, or a child could read a stale value.
            for &id in &wave {
                let node = nodes[id as usize];
                if self.is_leaf_at(node.code, node.level) {
                    continue;
                }
                for dir in Direction::ALL {
                    if let Some(code) = self.adjacent_code(node.code, node.level, dir) {
                        if let Some(&nb) = by_key.get(&(code, node.level)) {
                            nodes[nb as usize].slots[dir.opposite() as usize] += 1;
                        }
                    }
                }
            }

            let mut next = Vec::new();
            for &id in &wave {
                let node = nodes[id as usize];
                if self.is_leaf_at(node.code, node.level) {
                    continue;
                }
                debug_assert!(node.level < self.resolution);
                let child_shift = 2 * (self.resolution - node.level - 1);
                for child in 0..4u64 {
                    let code = node.code | (child << child_shift);
                    // When the resolution hint over-sizes the domain, whole
                    // subtrees fall outside the grid and hold no leafs.
                    if !self.origin_in_grid(code) {
                        continue;
                    }
                    let idx = nodes.len() as u32;
                    nodes.push(WalkNode {
                        code,
                        level: node.level + 1,
                        slots: child_slots(node.slots, child),
                    });
                    by_key.insert((code, node.level + 1), idx);
                    next.push(idx);
                }
            }
            wave = next;
        }

        self.leafs
            .iter()
            .map(|leaf| nodes[by_key[&(leaf.code, leaf.level)] as usize].slots)
            .collect()
    }

    /// Turn resolved level differences into adjacency lists between valid
    /// leafs.
    ///
    /// Each leaf emits edges toward same-size and coarser neighbors only;
    /// finer neighbors are reached from their own side, and the fine side
    /// writes the single reverse edge into its coarser neighbor's list.
    pub(crate) fn derive_adjacency(&self, diffs: &[[i8; 4]]) -> Vec<Vec<u32>> {
        let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); self.leafs.len()];
        for (i, leaf) in self.leafs.iter().enumerate() {
            if !leaf.valid {
                continue;
            }
            for dir in Direction::ALL {
                let diff = diffs[i][dir as usize];
                if diff > 0 {
                    continue;
                }
                let level = (leaf.level as i32 + diff as i32) as u32;
                let anchor = if diff == 0 {
                    leaf.code
                } else {
                    self.truncate_to_level(leaf.code, level)
                };
                let Some(code) = self.adjacent_code(anchor, level, dir) else {
                    continue;
                };
                let Some(&j) = self.index.get(&code) else {
                    continue;
                };
                if !self.leafs[j as usize].valid {
                    continue;
                }
                adjacency[i].push(j);
                if diff < 0 {
                    adjacency[j as usize].push(i as u32);
                }
            }
        }
        adjacency
    }

    fn is_leaf_at(&self, code: u64, level: u32) -> bool {
        self.index
            .get(&code)
            .is_some_and(|&i| self.leafs[i as usize].level == level)
    }

    fn origin_in_grid(&self, code: u64) -> bool {
        let (x, y) = morton::deinterleave(code);
        (x as usize) < self.grid_width && (y as usize) < self.grid_height
    }
}

/// Slots for the child at Morton position `child` (bit 0 = east half,
/// bit 1 = north half): zero toward siblings, inherited minus one across the
/// parent's boundary.
fn child_slots(parent: [i8; 4], child: u64) -> [i8; 4] {
    let inherit = |dir: Direction| {
        let slot = parent[dir as usize];
        if slot == UNRESOLVED {
            UNRESOLVED
        } else {
            slot - 1
        }
    };
    let east_half = child & 0b01 != 0;
    let north_half = child & 0b10 != 0;

    let mut slots = [0i8; 4];
    slots[Direction::East as usize] = if east_half { inherit(Direction::East) } else { 0 };
    slots[Direction::West as usize] = if east_half { 0 } else { inherit(Direction::West) };
    slots[Direction::North as usize] = if north_half { inherit(Direction::North) } else { 0 };
    slots[Direction::South as usize] = if north_half { 0 } else { inherit(Direction::South) };
    slots
}
