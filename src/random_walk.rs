//! Induced-subgraph sampling by a single random walk.
//!
//! The walk starts at a uniformly chosen node and repeatedly moves to a uniformly chosen
//! neighbor of the current node until `number_of_nodes` distinct nodes have been visited.
//! Revisits are allowed; only the count of distinct nodes decides termination. The
//! sample is the subgraph induced on the visited nodes.
//!
//! A walk that cannot grow ends with [`Error::DeadEnd`]:
//! - the current node has no neighbors,
//! - fewer than `number_of_nodes` nodes are reachable from the start node (checked before
//!   the first step when `check_reachability` is set),
//! - the stall budget ran out: too many consecutive steps found no new node.
//!
//! Unless `max_stalled_steps` is set, the stall budget is derived from the graph. A walk on
//! a connected undirected graph reaches any given node within `2m(n - 1)` expected steps
//! (`m` edges, `n` nodes), so a stall of [`UNDIRECTED_STALL_FACTOR`] times that bound has
//! vanishing probability once the reachability check has passed. Directed graphs can trap
//! the walk in a closed set, so they get the bound itself. The budget is computed on the
//! first revisit.

use crate::backend::{AnyGraph, GraphHandle};
use crate::graph::{check_node, GraphBackend};
use crate::reachability::reachable_within;
use crate::subgraph::InducedSubgraph;
use crate::{DeadEndCause, Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::any::Any;
use std::collections::BTreeSet;
use tracing::debug;

/// Multiple of the undirected cover-time bound used as the default stall budget.
///
/// Each window of `2 * 2m(n - 1)` steps finds a new node with probability at least 1/2,
/// so the budget fails a connected undirected walk with probability at most `2^-32`.
pub const UNDIRECTED_STALL_FACTOR: usize = 64;

/// Stall budget used when `max_stalled_steps` is unset.
///
/// Always at least `node_count`, and saturates instead of overflowing.
pub fn default_stall_budget<G: GraphBackend + ?Sized>(graph: &G) -> usize {
    let n = graph.node_count();
    let cover = graph
        .edge_count()
        .max(1)
        .saturating_mul(2)
        .saturating_mul(n.saturating_sub(1).max(1));
    let budget = if graph.is_directed() {
        cover
    } else {
        cover.saturating_mul(UNDIRECTED_STALL_FACTOR)
    };
    budget.max(n).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomWalkConfig {
    /// Number of distinct nodes in the sample. Must be positive.
    pub number_of_nodes: usize,
    pub seed: u64,
    /// Consecutive steps without a new node before the walk is declared stuck.
    /// `None` derives the budget from the graph size.
    pub max_stalled_steps: Option<usize>,
    /// Count the nodes reachable from the start node before walking.
    pub check_reachability: bool,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            number_of_nodes: 100,
            seed: 42,
            max_stalled_steps: None,
            check_reachability: true,
        }
    }
}

/// Samples induced subgraphs with a single random walk.
///
/// The sampler owns its random source. Successive calls continue the same random
/// stream, so a fresh sampler with the same config replays the same sequence of samples.
#[derive(Debug, Clone)]
pub struct RandomWalkSampler {
    config: RandomWalkConfig,
    rng: ChaCha8Rng,
}

impl Default for RandomWalkSampler {
    fn default() -> Self {
        let config = RandomWalkConfig::default();
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }
}

impl RandomWalkSampler {
    pub fn new(config: RandomWalkConfig) -> Result<Self> {
        if config.number_of_nodes == 0 {
            return Err(Error::InvalidParameter(
                "number_of_nodes must be positive".to_string(),
            ));
        }
        if config.max_stalled_steps == Some(0) {
            return Err(Error::InvalidParameter(
                "max_stalled_steps must be positive".to_string(),
            ));
        }
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        })
    }

    pub fn with_seed(number_of_nodes: usize, seed: u64) -> Result<Self> {
        Self::new(RandomWalkConfig {
            number_of_nodes,
            seed,
            ..RandomWalkConfig::default()
        })
    }

    pub fn config(&self) -> &RandomWalkConfig {
        &self.config
    }

    /// Walk `graph` and return the subgraph induced on the visited nodes.
    pub fn sample<G: GraphBackend>(&mut self, graph: &G) -> Result<InducedSubgraph<G::Subgraph>> {
        let nodes = self.sample_nodes(graph)?;
        graph.build_subgraph(&nodes)
    }

    /// Like [`RandomWalkSampler::sample`], for graphs whose type is only known at runtime.
    ///
    /// The backend is picked once, before any walking, by [`GraphHandle::detect`].
    /// Accepted types are [`AdjacencyList`](crate::AdjacencyList),
    /// [`AdjacencyMatrix`](crate::AdjacencyMatrix), [`AnyGraph`], and with the `petgraph`
    /// feature `UnGraph<(), ()>` and `DiGraph<(), ()>`. Anything else, including petgraph
    /// graphs with other weight types, fails with [`Error::UnsupportedGraphType`]; use
    /// [`RandomWalkSampler::sample`] for those.
    pub fn sample_any<T: Any>(&mut self, graph: &T) -> Result<InducedSubgraph<AnyGraph>> {
        let handle = GraphHandle::detect(graph)?;
        debug!(backend = %handle.kind(), "selected graph backend");
        self.sample(&handle)
    }

    /// Walk `graph` and return the visited node set without building a subgraph.
    pub fn sample_nodes<G: GraphBackend>(&mut self, graph: &G) -> Result<BTreeSet<usize>> {
        let target = self.config.number_of_nodes;
        let available = graph.node_count();
        if target > available {
            return Err(Error::SampleSizeExceedsGraph {
                requested: target,
                available,
            });
        }
        debug!(nodes = available, target, "starting random walk");

        let mut walk = Walk::start(graph, &mut self.rng, self.config.max_stalled_steps)?;
        if self.config.check_reachability {
            let reachable = reachable_within(graph, walk.cursor, target)?;
            if reachable < target {
                return Err(walk.dead_end(target, DeadEndCause::Unreachable { reachable }));
            }
        }
        while walk.visited.len() < target {
            walk.step(graph, &mut self.rng, target)?;
        }

        debug!(steps = walk.steps, target, "random walk done");
        Ok(walk.visited)
    }
}

/// Per-call walk state. The cursor is always in `visited`.
#[derive(Debug)]
struct Walk {
    cursor: usize,
    visited: BTreeSet<usize>,
    steps: usize,
    stalled: usize,
    /// Resolved on the first revisit when not configured.
    stall_budget: Option<usize>,
}

impl Walk {
    fn start<G: GraphBackend, R: Rng>(
        graph: &G,
        rng: &mut R,
        stall_budget: Option<usize>,
    ) -> Result<Self> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::SampleSizeExceedsGraph {
                requested: 1,
                available: 0,
            });
        }
        let cursor = rng.random_range(0..n);
        Ok(Self {
            cursor,
            visited: BTreeSet::from([cursor]),
            steps: 0,
            stalled: 0,
            stall_budget,
        })
    }

    fn step<G: GraphBackend, R: Rng>(
        &mut self,
        graph: &G,
        rng: &mut R,
        target: usize,
    ) -> Result<()> {
        let next = match graph.neighbors(self.cursor)?.choose(rng) {
            Some(&next) => next,
            None => return Err(self.dead_end(target, DeadEndCause::NoNeighbors)),
        };
        check_node(next, graph.node_count())?;

        self.cursor = next;
        self.steps += 1;
        if self.visited.insert(next) {
            self.stalled = 0;
        } else {
            self.stalled += 1;
            let budget = *self
                .stall_budget
                .get_or_insert_with(|| default_stall_budget(graph));
            if self.stalled >= budget {
                let cause = DeadEndCause::StepBudgetExhausted { steps: self.stalled };
                return Err(self.dead_end(target, cause));
            }
        }
        Ok(())
    }

    fn dead_end(&self, target: usize, cause: DeadEndCause) -> Error {
        debug!(
            node = self.cursor,
            visited = self.visited.len(),
            target,
            %cause,
            "random walk hit a dead end"
        );
        Error::DeadEnd {
            node: self.cursor,
            visited: self.visited.len(),
            target,
            cause,
        }
    }
}

/// Draw one sample per seed, in parallel.
///
/// Each seed gets its own sampler, so output `i` equals
/// `RandomWalkSampler::new(RandomWalkConfig { seed: seeds[i], ..config })?.sample(graph)`
/// regardless of the number of threads.
#[cfg(feature = "parallel")]
pub fn sample_parallel<G>(
    graph: &G,
    config: RandomWalkConfig,
    seeds: &[u64],
) -> Vec<Result<InducedSubgraph<G::Subgraph>>>
where
    G: GraphBackend + Sync,
    G::Subgraph: Send,
{
    use rayon::prelude::*;

    seeds
        .par_iter()
        .map(|&seed| RandomWalkSampler::new(RandomWalkConfig { seed, ..config })?.sample(graph))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AdjacencyList;

    fn path(n: usize) -> AdjacencyList {
        let edges: Vec<(usize, usize)> = (1..n).map(|i| (i - 1, i)).collect();
        AdjacencyList::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn cursor_stays_in_visited_set() {
        let g = path(20);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut walk = Walk::start(&g, &mut rng, None).unwrap();
        assert!(walk.visited.contains(&walk.cursor));

        for _ in 0..200 {
            walk.step(&g, &mut rng, 20).unwrap();
            assert!(walk.visited.contains(&walk.cursor));
            let nbrs = g.neighbors_ref(walk.cursor);
            assert!(!nbrs.is_empty());
        }
        assert_eq!(walk.steps, 200);
    }

    #[test]
    fn steps_follow_edges() {
        let g = path(10);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut walk = Walk::start(&g, &mut rng, None).unwrap();
        for _ in 0..50 {
            let before = walk.cursor;
            walk.step(&g, &mut rng, 10).unwrap();
            assert!(g.neighbors_ref(before).contains(&walk.cursor));
        }
    }

    #[test]
    fn zero_target_is_rejected() {
        assert!(matches!(
            RandomWalkSampler::with_seed(0, 1),
            Err(Error::InvalidParameter(_))
        ));
        let cfg = RandomWalkConfig { max_stalled_steps: Some(0), ..RandomWalkConfig::default() };
        assert!(matches!(RandomWalkSampler::new(cfg), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn default_config_matches_constructor_defaults() {
        let s = RandomWalkSampler::default();
        assert_eq!(s.config().number_of_nodes, 100);
        assert_eq!(s.config().seed, 42);
        assert!(s.config().check_reachability);
        assert_eq!(s.config().max_stalled_steps, None);
    }

    #[test]
    fn default_budget_scales_with_graph() {
        // 2m(n - 1) = 2 * 19 * 19 for the path, times the undirected factor.
        assert_eq!(default_stall_budget(&path(20)), 2 * 19 * 19 * UNDIRECTED_STALL_FACTOR);
        assert_eq!(default_stall_budget(&path(1)), 2 * UNDIRECTED_STALL_FACTOR);

        let directed = AdjacencyList::from_directed_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert_eq!(default_stall_budget(&directed), 2 * 2 * 2);

        let isolated = AdjacencyList::from_edges(5, &[]).unwrap();
        assert!(default_stall_budget(&isolated) >= 5);
    }

    #[test]
    fn default_budget_ends_directed_trap() {
        let g = AdjacencyList::from_directed_edges(3, &[(0, 1), (1, 1), (2, 1)]).unwrap();
        let cfg = RandomWalkConfig {
            number_of_nodes: 3,
            seed: 5,
            max_stalled_steps: None,
            check_reachability: false,
        };
        let err = RandomWalkSampler::new(cfg).unwrap().sample_nodes(&g).unwrap_err();
        let steps = default_stall_budget(&g);
        assert_eq!(steps, 2 * 3 * 2);
        assert!(matches!(
            err,
            Error::DeadEnd { node: 1, cause: DeadEndCause::StepBudgetExhausted { steps: s }, .. } if s == steps
        ));
    }

    #[test]
    fn stalled_walk_hits_step_budget() {
        // Every node funnels into the self-loop at 1.
        let g = AdjacencyList::from_directed_edges(3, &[(0, 1), (1, 1), (2, 1)]).unwrap();
        let cfg = RandomWalkConfig {
            number_of_nodes: 3,
            seed: 5,
            max_stalled_steps: Some(25),
            check_reachability: false,
        };
        let err = RandomWalkSampler::new(cfg).unwrap().sample_nodes(&g).unwrap_err();
        match err {
            Error::DeadEnd { node, target, cause, .. } => {
                assert_eq!(node, 1);
                assert_eq!(target, 3);
                assert_eq!(cause, DeadEndCause::StepBudgetExhausted { steps: 25 });
            }
            other => panic!("expected DeadEnd, got {other:?}"),
        }
    }

    #[test]
    fn successive_calls_continue_the_stream() {
        let g = path(50);
        let mut a = RandomWalkSampler::with_seed(5, 9).unwrap();
        let mut b = RandomWalkSampler::with_seed(5, 9).unwrap();

        let a1 = a.sample_nodes(&g).unwrap();
        let a2 = a.sample_nodes(&g).unwrap();
        let b1 = b.sample_nodes(&g).unwrap();
        let b2 = b.sample_nodes(&g).unwrap();
        assert_eq!(a1, b1);
        assert_eq!(a2, b2);
    }
}
