//! Bounded reachability.
//!
//! A breadth-first search from one start node that stops as soon as `limit` distinct
//! nodes (start included) have been seen. The sampler only needs to know whether its
//! walk *can* reach the target size, so the work is bounded by the target, not by the
//! size of the graph.
//!
//! Edges are followed in the direction [`GraphBackend::neighbors`] reports them.

use crate::graph::{check_node, GraphBackend};
use crate::Result;
use std::collections::HashSet;

/// Number of distinct nodes reachable from `start`, including `start`, capped at `limit`.
///
/// Fails with [`crate::Error::InvalidNode`] if `start` or any neighbor the backend
/// reports is out of range.
pub fn reachable_within<G: GraphBackend>(graph: &G, start: usize, limit: usize) -> Result<usize> {
    let n = graph.node_count();
    check_node(start, n)?;
    if limit <= 1 {
        return Ok(limit);
    }

    let mut seen: HashSet<usize> = HashSet::with_capacity(limit.min(n));
    let mut queue: Vec<usize> = vec![start];
    seen.insert(start);

    let mut head = 0usize;
    while head < queue.len() {
        let cur = queue[head];
        head += 1;
        for &nx in graph.neighbors(cur)?.iter() {
            check_node(nx, n)?;
            if seen.insert(nx) {
                if seen.len() >= limit {
                    return Ok(limit);
                }
                queue.push(nx);
            }
        }
    }

    Ok(seen.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;
    use crate::Error;

    #[test]
    fn counts_component_of_start() {
        // 0 - 1 - 2, and 3 - 4 separately
        let g = AdjacencyList::from_edges(5, &[(0, 1), (1, 2), (3, 4)]).unwrap();

        assert_eq!(reachable_within(&g, 0, 10).unwrap(), 3);
        assert_eq!(reachable_within(&g, 2, 10).unwrap(), 3);
        assert_eq!(reachable_within(&g, 4, 10).unwrap(), 2);
    }

    #[test]
    fn stops_at_limit() {
        let edges: Vec<(usize, usize)> = (0..99).map(|i| (i, i + 1)).collect();
        let g = AdjacencyList::from_edges(100, &edges).unwrap();

        assert_eq!(reachable_within(&g, 0, 5).unwrap(), 5);
        assert_eq!(reachable_within(&g, 50, 1).unwrap(), 1);
    }

    #[test]
    fn follows_arc_direction() {
        // 0 -> 1 -> 2, 2 has no way back
        let g = AdjacencyList::from_directed_edges(3, &[(0, 1), (1, 2)]).unwrap();

        assert_eq!(reachable_within(&g, 0, 3).unwrap(), 3);
        assert_eq!(reachable_within(&g, 2, 3).unwrap(), 1);
    }

    #[test]
    fn self_loop_does_not_count_twice() {
        let g = AdjacencyList::from_edges(2, &[(0, 0)]).unwrap();
        assert_eq!(reachable_within(&g, 0, 2).unwrap(), 1);
    }

    #[test]
    fn invalid_start_is_rejected() {
        let g = AdjacencyList::from_edges(2, &[(0, 1)]).unwrap();
        assert!(matches!(
            reachable_within(&g, 7, 2),
            Err(Error::InvalidNode { node: 7, node_count: 2 })
        ));
    }
}
