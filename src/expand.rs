//! Successor generation with junctions folded away.
//!
//! Road data breaks highways at unnamed junctions. The search only ever
//! stands on cities, so a segment that ends in a junction is followed on
//! through every way out of that junction until a city is reached. The
//! whole chain becomes one logical edge whose cost is the sum of its
//! segments.
//!
//! Say we have
//!
//! ```text
//! A --- Jct_I-29 --- B
//! |        |
//! C        D
//! ```
//!
//! Expanding `A` yields `C` directly and `B` and `D` through the junction,
//! both carrying the cost of `A -> Jct_I-29` on top of their own segment.

use std::collections::HashSet;
use std::slice;

use crate::graph::SearchNode;
use crate::metric::Metric;
use crate::types::{LocationTable, NodeId, RoadGraph, Segment};

// Nodes on the current descent. Each frame points at the node it was
// entered from, so walking the parents gives the path back to the city
// the expansion started from.
struct Frame<'a> {
    id: &'a str,
    parent: Option<usize>,
}

struct Descent<'a> {
    node: SearchNode,
    frame: usize,
    segments: slice::Iter<'a, Segment>,
}

fn on_descent(arena: &[Frame<'_>], mut frame: usize, id: &str) -> bool {
    loop {
        if arena[frame].id == id {
            return true;
        }
        match arena[frame].parent {
            Some(parent) => frame = parent,
            None => return false,
        }
    }
}

/// Every city reachable from `current` over one segment, or over a chain of
/// junctions, in adjacency order.
///
/// Nothing comes back for a city that is already explored. A junction is
/// not entered again while it is on the path being followed, and neither
/// is anything in `explored`, which keeps junction cycles finite. Cities are
/// always returned, including the one the expansion started from when a
/// junction leads back to it.
pub fn expand<'a>(
    current: &'a SearchNode,
    goal: &str,
    explored: &HashSet<NodeId>,
    metric: Metric,
    locations: &LocationTable,
    graph: &'a RoadGraph,
) -> Vec<SearchNode> {
    let mut successors = Vec::new();
    if explored.contains(&current.id) {
        return successors;
    }

    let mut arena = vec![Frame { id: &current.id, parent: None }];
    let mut stack = vec![Descent {
        node: current.clone(),
        frame: 0,
        segments: graph.neighbors(&current.id).iter(),
    }];

    while let Some(top) = stack.last_mut() {
        let Some(segment) = top.segments.next() else {
            stack.pop();
            continue;
        };
        let next = top.node.traverse(segment, goal, metric, locations);
        if locations.is_city(&segment.end) {
            successors.push(next);
            continue;
        }

        let parent = top.frame;
        if explored.contains(&segment.end) || on_descent(&arena, parent, &segment.end) {
            continue;
        }
        arena.push(Frame { id: &segment.end, parent: Some(parent) });
        stack.push(Descent {
            node: next,
            frame: arena.len() - 1,
            segments: graph.neighbors(&segment.end).iter(),
        });
    }

    successors
}
