//! Induced subgraphs with their mapping back to the parent graph.

use crate::graph::{check_node, GraphBackend};
use crate::{Error, Result};

/// A graph built from a node subset of a larger graph.
///
/// Node `i` of [`InducedSubgraph::graph`] is node `original_ids()[i]` of the parent.
/// `original_ids` is strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct InducedSubgraph<G> {
    graph: G,
    original_ids: Vec<usize>,
}

impl<G> InducedSubgraph<G> {
    pub(crate) fn new(graph: G, original_ids: Vec<usize>) -> Self {
        debug_assert!(original_ids.windows(2).all(|w| w[0] < w[1]));
        Self { graph, original_ids }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn into_inner(self) -> G {
        self.graph
    }

    pub fn into_parts(self) -> (G, Vec<usize>) {
        (self.graph, self.original_ids)
    }

    /// Parent ids of the sampled nodes, in ascending order.
    pub fn original_ids(&self) -> &[usize] {
        &self.original_ids
    }

    pub fn node_count(&self) -> usize {
        self.original_ids.len()
    }

    pub fn original_id(&self, local: usize) -> Option<usize> {
        self.original_ids.get(local).copied()
    }

    pub fn local_id(&self, original: usize) -> Option<usize> {
        self.original_ids.binary_search(&original).ok()
    }

    pub fn contains(&self, original: usize) -> bool {
        self.local_id(original).is_some()
    }

    /// Swap the graph representation, keeping the id mapping.
    ///
    /// `f` must keep the node count and numbering.
    pub(crate) fn map_graph<H>(self, f: impl FnOnce(G) -> H) -> InducedSubgraph<H> {
        InducedSubgraph {
            graph: f(self.graph),
            original_ids: self.original_ids,
        }
    }
}

impl<G: GraphBackend> InducedSubgraph<G> {
    /// For backends outside this crate.
    ///
    /// `original_ids` must be strictly increasing and hold one id per node of `graph`, and
    /// every edge of `graph` must stay within its node range.
    pub fn from_sorted_ids(graph: G, original_ids: Vec<usize>) -> Result<Self> {
        if let Some(w) = original_ids.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::InvalidParameter(format!(
                "subgraph ids must be strictly increasing, found {} before {}",
                w[0], w[1]
            )));
        }
        let node_count = original_ids.len();
        if graph.node_count() != node_count {
            return Err(Error::InvalidParameter(format!(
                "subgraph has {} nodes but {node_count} original ids",
                graph.node_count()
            )));
        }
        for (u, v) in graph.edges() {
            check_node(u, node_count)?;
            check_node(v, node_count)?;
        }
        Ok(Self { graph, original_ids })
    }

    /// Edges of the subgraph in parent ids.
    ///
    /// The id mapping is monotone, so undirected edges keep the `u <= v` orientation.
    pub fn original_edges(&self) -> Vec<(usize, usize)> {
        self.graph
            .edges()
            .into_iter()
            .map(|(u, v)| (self.original_ids[u], self.original_ids[v]))
            .collect()
    }
}
