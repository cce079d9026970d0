//! `walk-sampler`: induced-subgraph sampling by a single random walk.
//!
//! The walk runs over any representation implementing [`GraphBackend`]. When the graph
//! type is only known at runtime, [`RandomWalkSampler::sample_any`] picks the backend
//! once per call through the registry in [`backend`].
//!
//! Public invariants (must not drift):
//! - **Node ids**: nodes are `0..node_count()`; sampled subgraphs are relabeled to
//!   `0..k` in ascending original id order and carry the mapping back.
//! - **Induced edges**: a sampled subgraph has exactly the parent's edges between the
//!   sampled nodes.
//! - **Determinism**: a sampler's output depends only on its config, the graph, and the
//!   sequence of calls made on it.
//! - **Termination**: every call returns; a walk that cannot reach the target size fails
//!   with [`Error::DeadEnd`].

pub mod backend;
pub mod graph;
pub mod random_walk;
pub mod reachability;
pub mod subgraph;

pub use backend::{AnyGraph, GraphHandle, GraphKind};
#[cfg(feature = "petgraph")]
pub use backend::{PetDiGraph, PetUnGraph};
pub use graph::{AdjacencyList, AdjacencyMatrix, GraphBackend};
#[cfg(feature = "parallel")]
pub use random_walk::sample_parallel;
pub use random_walk::{default_stall_budget, RandomWalkConfig, RandomWalkSampler};
pub use reachability::reachable_within;
pub use subgraph::InducedSubgraph;

use std::fmt;

/// Why a walk stopped short of its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadEndCause {
    /// The current node has no outgoing neighbors.
    NoNeighbors,
    /// Fewer nodes than the target are reachable from the start node.
    Unreachable { reachable: usize },
    /// This many consecutive steps visited no new node.
    StepBudgetExhausted { steps: usize },
}

impl fmt::Display for DeadEndCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadEndCause::NoNeighbors => f.write_str("node has no neighbors"),
            DeadEndCause::Unreachable { reachable } => {
                write!(f, "only {reachable} nodes reachable from the start node")
            }
            DeadEndCause::StepBudgetExhausted { steps } => {
                write!(f, "no new node in {steps} consecutive steps")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported graph type: {type_name}")]
    UnsupportedGraphType { type_name: &'static str },
    #[error("sample size {requested} exceeds graph size {available}")]
    SampleSizeExceedsGraph { requested: usize, available: usize },
    #[error("node {node} out of range for a graph with {node_count} nodes")]
    InvalidNode { node: usize, node_count: usize },
    #[error("walk stuck at node {node} after visiting {visited} of {target} nodes: {cause}")]
    DeadEnd {
        node: usize,
        visited: usize,
        target: usize,
        cause: DeadEndCause,
    },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
