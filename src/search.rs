// src/search.rs
// A* path search over the navigation graph.
// Resolves pixel endpoints to leaf regions through the quadtree, then runs a
// heap-driven search with Euclidean distance to the goal pixel as heuristic.
// RELEVANT FILES:src/graph.rs,src/heap.rs,src/quadtree/mod.rs

use glam::Vec2;

use crate::graph::NavigationGraph;
use crate::heap::IndexedHeap;
use crate::quadtree::Quadtree;

/// Shortest traversable path from `(from_x, from_y)` to `(to_x, to_y)`.
///
/// Returns a flat `x, y` coordinate list: empty when either endpoint is
/// blocked, out of bounds, or unreachable; exactly four values when both
/// endpoints share a region; otherwise the caller's exact endpoints threaded
/// through the centers of the regions between them.
pub fn find_path(
    tree: &Quadtree,
    graph: &NavigationGraph,
    from_x: i32,
    from_y: i32,
    to_x: i32,
    to_y: i32,
) -> Vec<i32> {
    let start = tree.query_valid_region(from_x, from_y);
    let goal = tree.query_valid_region(to_x, to_y);
    if start == -1 || goal == -1 {
        return Vec::new();
    }
    if start == goal {
        return vec![from_x, from_y, to_x, to_y];
    }

    let nodes = graph.nodes();
    if nodes.len() != tree.leafs().len() {
        log::warn!(
            "navigation graph has {} nodes for {} leafs; rebuild it after every quadtree build",
            nodes.len(),
            tree.leafs().len()
        );
        return Vec::new();
    }

    let (start, goal) = (start as usize, goal as usize);
    let goal_pixel = Vec2::new(to_x as f32, to_y as f32);
    let heuristic =
        |i: usize| Vec2::new(nodes[i].x as f32, nodes[i].y as f32).distance(goal_pixel);

    let mut g_score = vec![f32::INFINITY; nodes.len()];
    let mut parent = vec![-1i32; nodes.len()];
    let mut closed = vec![false; nodes.len()];
    let mut open = IndexedHeap::new(|a: &f32, b: &f32| a < b);

    g_score[start] = 0.0;
    open.push(heuristic(start), start as u32);

    let mut found = false;
    while !open.is_empty() {
        let current = open.top_id() as usize;
        open.pop();
        if current == goal {
            found = true;
            break;
        }
        closed[current] = true;

        for edge in graph.edges_of(current as u32) {
            let next = edge.target as usize;
            if closed[next] {
                continue;
            }
            let tentative = g_score[current] + edge.distance;
            if tentative < g_score[next] {
                g_score[next] = tentative;
                parent[next] = current as i32;
                // Inserts unseen nodes and decrease-keys queued ones alike.
                open.push(tentative + heuristic(next), next as u32);
            }
        }
    }
    if !found {
        return Vec::new();
    }

    // Walk the parent chain back to the start, then emit start-to-goal with
    // the endpoint region centers replaced by the caller's exact pixels.
    let mut chain = vec![goal];
    let mut cursor = parent[goal];
    while cursor != -1 {
        chain.push(cursor as usize);
        cursor = parent[cursor as usize];
    }
    chain.reverse();

    let last = chain.len() - 1;
    let mut path = Vec::with_capacity(chain.len() * 2);
    for (i, &node) in chain.iter().enumerate() {
        if i == 0 {
            path.extend_from_slice(&[from_x, from_y]);
        } else if i == last {
            path.extend_from_slice(&[to_x, to_y]);
        } else {
            path.extend_from_slice(&[nodes[node].x, nodes[node].y]);
        }
    }
    path
}
