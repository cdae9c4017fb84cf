// src/graph.rs
// Navigation graph over valid quadtree leafs with a flattened CSR edge layout.
// Nodes are region centers; each node owns a contiguous slice of a single
// shared edge array, sized up front so edge insertion never relocates.
// RELEVANT FILES:src/quadtree/mod.rs,src/search.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::quadtree::Quadtree;

/// Graph node at a region center, owning `[edge_start, edge_start + edge_count)`
/// of the shared edge array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct NavigationNode {
    pub x: i32,
    pub y: i32,
    pub edge_start: u32,
    pub edge_count: u32,
}

/// Directed edge to `target` weighted by center-to-center Euclidean distance.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct NavigationEdge {
    pub target: u32,
    pub distance: f32,
}

const _: () = {
    assert!(std::mem::size_of::<NavigationNode>() == 16);
    assert!(std::mem::size_of::<NavigationEdge>() == 8);
};

/// Compact node/edge graph derived from a quadtree's leafs and adjacency.
///
/// Node indices coincide with leaf indices of the build the graph was derived
/// from; blocked leafs keep their slot but never gain edges. Rebuild after
/// every quadtree build.
#[derive(Debug, Default)]
pub struct NavigationGraph {
    nodes: Vec<NavigationNode>,
    edges: Vec<NavigationEdge>,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive nodes and edges from the tree's current build.
    ///
    /// Pass one places every node at its region center and reserves its edge
    /// range from the accumulated degree; pass two sizes the edge array once
    /// and fills each node's range, bumping the node's live counter per edge.
    pub fn build(&mut self, tree: &Quadtree) {
        self.nodes.clear();
        self.edges.clear();

        let resolution = tree.resolution();
        let adjacency = tree.adjacency();

        let mut running = 0u32;
        for (leaf, neighbors) in tree.leafs().iter().zip(adjacency) {
            let (x, y) = leaf.center(resolution);
            self.nodes.push(NavigationNode {
                x,
                y,
                edge_start: running,
                edge_count: 0,
            });
            running += neighbors.len() as u32;
        }

        self.edges.resize(running as usize, NavigationEdge::zeroed());
        for (i, neighbors) in adjacency.iter().enumerate() {
            for &j in neighbors {
                self.add_edge(i as u32, j);
            }
        }

        log::debug!(
            "navigation graph: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
    }

    fn add_edge(&mut self, a: u32, b: u32) {
        let from = self.nodes[a as usize];
        let to = self.nodes[b as usize];
        let distance = Vec2::new(from.x as f32, from.y as f32)
            .distance(Vec2::new(to.x as f32, to.y as f32));

        let node = &mut self.nodes[a as usize];
        self.edges[(node.edge_start + node.edge_count) as usize] = NavigationEdge {
            target: b,
            distance,
        };
        node.edge_count += 1;
    }

    pub fn nodes(&self) -> &[NavigationNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[NavigationEdge] {
        &self.edges
    }

    /// The outgoing edge slice reserved for `node`.
    pub fn edges_of(&self, node: u32) -> &[NavigationEdge] {
        let n = &self.nodes[node as usize];
        &self.edges[n.edge_start as usize..(n.edge_start + n.edge_count) as usize]
    }
}
