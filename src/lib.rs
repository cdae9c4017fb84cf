//! Linear quadtree spatial index with constant-time Morton-code neighbor
//! finding and A* path search over the derived region graph.
//!
//! A build partitions a binary valid/blocked grid into maximal uniform
//! quadrants addressed by Morton code, resolves every quadrant's neighbor
//! level differences with dilated-integer arithmetic, and links valid
//! quadrants into an adjacency list. A [`NavigationGraph`] flattens that
//! adjacency into CSR node/edge arrays weighted by Euclidean center
//! distance, and [`find_path`] runs A* over it with an indexed
//! (decrease-key) binary heap.
//!
//! ```
//! use quadnav::{BitGrid, NavigationGraph, Quadtree};
//!
//! let grid = BitGrid::from_fn(8, 8, |x, _| x != 3);
//! let mut tree = Quadtree::new(3);
//! tree.build(&grid).unwrap();
//! let mut graph = NavigationGraph::new();
//! graph.build(&tree);
//! let path = quadnav::find_path(&tree, &graph, 0, 0, 7, 7);
//! assert!(path.is_empty(), "column 3 walls the grid off");
//! ```

pub mod error;
pub mod graph;
pub mod grid;
pub mod heap;
pub mod morton;
pub mod quadtree;
pub mod search;

pub use error::QuadnavError;
pub use graph::{NavigationEdge, NavigationGraph, NavigationNode};
pub use grid::{BitGrid, GridSource};
pub use heap::IndexedHeap;
pub use quadtree::{BuildStats, Direction, Quadrant, Quadtree};
pub use search::find_path;
