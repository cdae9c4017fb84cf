// src/quadtree/merge.rs
// Morton-run merging: covers a homogeneous run of cells with the minimal set
// of maximal, alignment-respecting square quadrants.
// RELEVANT FILES:src/quadtree/mod.rs,src/quadtree/types.rs

use super::types::Quadrant;
use super::Quadtree;

impl Quadtree {
    /// Cover the half-open Morton run between `from` and `to` with maximal
    /// aligned quadrants of uniform validity, registering each in the lookup
    /// table.
    ///
    /// When `from` is below `to` the merge grows upward from the low bound,
    /// aligning block starts; otherwise it grows downward from the high
    /// bound, aligning block ends. A quadrant of `4^k` cells is only
    /// placeable where its anchored bound is a multiple of `4^k`, so the two
    /// directions keep distinct alignment arithmetic.
    pub(crate) fn merge_run(&mut self, from: u64, to: u64, valid: bool) {
        let resolution = self.resolution();
        if from <= to {
            let mut lo = from;
            while lo < to {
                let k = quad_alignment(lo, resolution).min(largest_fit(to - lo));
                self.push_leaf(lo, resolution - k, valid);
                lo += 1u64 << (2 * k);
            }
        } else {
            let mut hi = from;
            while hi > to {
                let k = quad_alignment(hi, resolution).min(largest_fit(hi - to));
                hi -= 1u64 << (2 * k);
                self.push_leaf(hi, resolution - k, valid);
            }
        }
    }

    fn push_leaf(&mut self, code: u64, level: u32, valid: bool) {
        self.index.insert(code, self.leafs.len() as u32);
        self.leafs.push(Quadrant { code, level, valid });
    }
}

/// Largest `k` such that `4^k` divides `code`, capped at the resolution.
#[inline]
fn quad_alignment(code: u64, resolution: u32) -> u32 {
    if code == 0 {
        resolution
    } else {
        (code.trailing_zeros() / 2).min(resolution)
    }
}

/// Largest `k` such that `4^k <= span`. `span` must be nonzero.
#[inline]
fn largest_fit(span: u64) -> u32 {
    span.ilog2() / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_codes(tree: &Quadtree) -> Vec<(u64, u32)> {
        tree.leafs().iter().map(|l| (l.code, l.level)).collect()
    }

    #[test]
    fn upward_merge_respects_start_alignment() {
        // [1, 16) at resolution 2: three singles forced by alignment, then
        // three aligned 4-cell blocks.
        let mut tree = Quadtree::new(2);
        tree.merge_run(1, 16, true);
        assert_eq!(
            run_codes(&tree),
            vec![(1, 2), (2, 2), (3, 2), (4, 1), (8, 1), (12, 1)]
        );
    }

    #[test]
    fn downward_merge_respects_end_alignment() {
        // Same run anchored at the high bound produces the same cover in
        // descending order.
        let mut tree = Quadtree::new(2);
        tree.merge_run(16, 1, true);
        assert_eq!(
            run_codes(&tree),
            vec![(12, 1), (8, 1), (4, 1), (3, 2), (2, 2), (1, 2)]
        );
    }

    #[test]
    fn full_domain_merges_to_a_single_quadrant() {
        let mut tree = Quadtree::new(3);
        tree.merge_run(0, 64, true);
        assert_eq!(run_codes(&tree), vec![(0, 0)]);
    }

    #[test]
    fn merge_direction_covers_identical_sets() {
        for (a, b) in [(0u64, 64u64), (5, 23), (7, 57), (1, 2), (16, 48)] {
            let mut up = Quadtree::new(3);
            up.merge_run(a, b, true);
            let mut down = Quadtree::new(3);
            down.merge_run(b, a, true);
            let mut up_codes = run_codes(&up);
            let mut down_codes = run_codes(&down);
            up_codes.sort_unstable();
            down_codes.sort_unstable();
            assert_eq!(up_codes, down_codes, "cover differs for [{a}, {b})");
        }
    }
}
