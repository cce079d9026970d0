//! Runtime backend selection.
//!
//! [`GraphHandle::detect`] is the backend registry: it looks up the concrete type of a
//! graph by `TypeId` and returns a tagged handle, or [`Error::UnsupportedGraphType`].
//! Callers that know their graph type at compile time can use [`GraphBackend`] directly
//! and skip the lookup.
//!
//! Registered types:
//! - [`AdjacencyList`]
//! - [`AdjacencyMatrix`]
//! - [`AnyGraph`] (so sampled graphs can be sampled again)
//! - `petgraph::graph::UnGraph<(), ()>` and `petgraph::graph::DiGraph<(), ()>` with the
//!   `petgraph` feature
//!
//! Petgraph graphs with other weight or index types are not registered: the registry
//! matches exact types. They still implement [`GraphBackend`] and sample statically.

use crate::graph::{AdjacencyList, AdjacencyMatrix, GraphBackend};
use crate::subgraph::InducedSubgraph;
use crate::{Error, Result};
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Unweighted, undirected petgraph graph accepted by the registry.
#[cfg(feature = "petgraph")]
pub type PetUnGraph = petgraph::graph::UnGraph<(), ()>;

/// Unweighted, directed petgraph graph accepted by the registry.
#[cfg(feature = "petgraph")]
pub type PetDiGraph = petgraph::graph::DiGraph<(), ()>;

/// Type tag of a registered representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    AdjacencyList,
    AdjacencyMatrix,
    #[cfg(feature = "petgraph")]
    Petgraph,
    #[cfg(feature = "petgraph")]
    PetgraphDirected,
}

impl GraphKind {
    pub fn name(self) -> &'static str {
        match self {
            GraphKind::AdjacencyList => "adjacency-list",
            GraphKind::AdjacencyMatrix => "adjacency-matrix",
            #[cfg(feature = "petgraph")]
            GraphKind::Petgraph => "petgraph",
            #[cfg(feature = "petgraph")]
            GraphKind::PetgraphDirected => "petgraph-directed",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed graph tagged with the backend that serves it.
#[derive(Debug, Clone, Copy)]
pub enum GraphHandle<'a> {
    AdjacencyList(&'a AdjacencyList),
    AdjacencyMatrix(&'a AdjacencyMatrix),
    #[cfg(feature = "petgraph")]
    Petgraph(&'a PetUnGraph),
    #[cfg(feature = "petgraph")]
    PetgraphDirected(&'a PetDiGraph),
}

impl<'a> GraphHandle<'a> {
    /// Select the backend for `graph` by its concrete type.
    pub fn detect<T: Any>(graph: &'a T) -> Result<Self> {
        let any: &'a dyn Any = graph;
        if let Some(g) = any.downcast_ref::<AdjacencyList>() {
            return Ok(GraphHandle::AdjacencyList(g));
        }
        if let Some(g) = any.downcast_ref::<AdjacencyMatrix>() {
            return Ok(GraphHandle::AdjacencyMatrix(g));
        }
        if let Some(g) = any.downcast_ref::<AnyGraph>() {
            return Ok(g.as_handle());
        }
        #[cfg(feature = "petgraph")]
        {
            if let Some(g) = any.downcast_ref::<PetUnGraph>() {
                return Ok(GraphHandle::Petgraph(g));
            }
            if let Some(g) = any.downcast_ref::<PetDiGraph>() {
                return Ok(GraphHandle::PetgraphDirected(g));
            }
        }
        Err(Error::UnsupportedGraphType {
            type_name: type_name::<T>(),
        })
    }

    pub fn kind(&self) -> GraphKind {
        match self {
            GraphHandle::AdjacencyList(_) => GraphKind::AdjacencyList,
            GraphHandle::AdjacencyMatrix(_) => GraphKind::AdjacencyMatrix,
            #[cfg(feature = "petgraph")]
            GraphHandle::Petgraph(_) => GraphKind::Petgraph,
            #[cfg(feature = "petgraph")]
            GraphHandle::PetgraphDirected(_) => GraphKind::PetgraphDirected,
        }
    }
}

impl GraphBackend for GraphHandle<'_> {
    type Subgraph = AnyGraph;

    fn node_count(&self) -> usize {
        match *self {
            GraphHandle::AdjacencyList(g) => g.node_count(),
            GraphHandle::AdjacencyMatrix(g) => g.node_count(),
            #[cfg(feature = "petgraph")]
            GraphHandle::Petgraph(g) => GraphBackend::node_count(g),
            #[cfg(feature = "petgraph")]
            GraphHandle::PetgraphDirected(g) => GraphBackend::node_count(g),
        }
    }

    fn neighbors(&self, node: usize) -> Result<Cow<'_, [usize]>> {
        match *self {
            GraphHandle::AdjacencyList(g) => g.neighbors(node),
            GraphHandle::AdjacencyMatrix(g) => g.neighbors(node),
            #[cfg(feature = "petgraph")]
            GraphHandle::Petgraph(g) => GraphBackend::neighbors(g, node),
            #[cfg(feature = "petgraph")]
            GraphHandle::PetgraphDirected(g) => GraphBackend::neighbors(g, node),
        }
    }

    fn build_subgraph(&self, nodes: &BTreeSet<usize>) -> Result<InducedSubgraph<AnyGraph>> {
        Ok(match *self {
            GraphHandle::AdjacencyList(g) => g.build_subgraph(nodes)?.map_graph(AnyGraph::from),
            GraphHandle::AdjacencyMatrix(g) => {
                g.build_subgraph(nodes)?.map_graph(AnyGraph::from)
            }
            #[cfg(feature = "petgraph")]
            GraphHandle::Petgraph(g) => g.build_subgraph(nodes)?.map_graph(AnyGraph::from),
            #[cfg(feature = "petgraph")]
            GraphHandle::PetgraphDirected(g) => {
                g.build_subgraph(nodes)?.map_graph(AnyGraph::from)
            }
        })
    }

    fn edge_count(&self) -> usize {
        match *self {
            GraphHandle::AdjacencyList(g) => g.edge_count(),
            GraphHandle::AdjacencyMatrix(g) => g.edge_count(),
            #[cfg(feature = "petgraph")]
            GraphHandle::Petgraph(g) => GraphBackend::edge_count(g),
            #[cfg(feature = "petgraph")]
            GraphHandle::PetgraphDirected(g) => GraphBackend::edge_count(g),
        }
    }

    fn is_directed(&self) -> bool {
        match *self {
            GraphHandle::AdjacencyList(g) => g.is_directed(),
            GraphHandle::AdjacencyMatrix(g) => g.is_directed(),
            #[cfg(feature = "petgraph")]
            GraphHandle::Petgraph(g) => GraphBackend::is_directed(g),
            #[cfg(feature = "petgraph")]
            GraphHandle::PetgraphDirected(g) => GraphBackend::is_directed(g),
        }
    }

    fn edges(&self) -> Vec<(usize, usize)> {
        match *self {
            GraphHandle::AdjacencyList(g) => g.edges(),
            GraphHandle::AdjacencyMatrix(g) => g.edges(),
            #[cfg(feature = "petgraph")]
            GraphHandle::Petgraph(g) => GraphBackend::edges(g),
            #[cfg(feature = "petgraph")]
            GraphHandle::PetgraphDirected(g) => GraphBackend::edges(g),
        }
    }
}

/// Owned graph in one of the registered representations.
///
/// This is what sampling through a [`GraphHandle`] produces: the subgraph keeps the
/// representation of its parent.
#[derive(Debug, Clone)]
pub enum AnyGraph {
    AdjacencyList(AdjacencyList),
    AdjacencyMatrix(AdjacencyMatrix),
    #[cfg(feature = "petgraph")]
    Petgraph(PetUnGraph),
    #[cfg(feature = "petgraph")]
    PetgraphDirected(PetDiGraph),
}

impl AnyGraph {
    pub fn as_handle(&self) -> GraphHandle<'_> {
        match self {
            AnyGraph::AdjacencyList(g) => GraphHandle::AdjacencyList(g),
            AnyGraph::AdjacencyMatrix(g) => GraphHandle::AdjacencyMatrix(g),
            #[cfg(feature = "petgraph")]
            AnyGraph::Petgraph(g) => GraphHandle::Petgraph(g),
            #[cfg(feature = "petgraph")]
            AnyGraph::PetgraphDirected(g) => GraphHandle::PetgraphDirected(g),
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.as_handle().kind()
    }

    pub fn as_adjacency_list(&self) -> Option<&AdjacencyList> {
        match self {
            AnyGraph::AdjacencyList(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_adjacency_matrix(&self) -> Option<&AdjacencyMatrix> {
        match self {
            AnyGraph::AdjacencyMatrix(g) => Some(g),
            _ => None,
        }
    }
}

impl From<AdjacencyList> for AnyGraph {
    fn from(g: AdjacencyList) -> Self {
        AnyGraph::AdjacencyList(g)
    }
}

impl From<AdjacencyMatrix> for AnyGraph {
    fn from(g: AdjacencyMatrix) -> Self {
        AnyGraph::AdjacencyMatrix(g)
    }
}

#[cfg(feature = "petgraph")]
impl From<PetUnGraph> for AnyGraph {
    fn from(g: PetUnGraph) -> Self {
        AnyGraph::Petgraph(g)
    }
}

#[cfg(feature = "petgraph")]
impl From<PetDiGraph> for AnyGraph {
    fn from(g: PetDiGraph) -> Self {
        AnyGraph::PetgraphDirected(g)
    }
}

impl GraphBackend for AnyGraph {
    type Subgraph = AnyGraph;

    fn node_count(&self) -> usize {
        self.as_handle().node_count()
    }

    fn neighbors(&self, node: usize) -> Result<Cow<'_, [usize]>> {
        match self {
            AnyGraph::AdjacencyList(g) => g.neighbors(node),
            AnyGraph::AdjacencyMatrix(g) => g.neighbors(node),
            #[cfg(feature = "petgraph")]
            AnyGraph::Petgraph(g) => GraphBackend::neighbors(g, node),
            #[cfg(feature = "petgraph")]
            AnyGraph::PetgraphDirected(g) => GraphBackend::neighbors(g, node),
        }
    }

    fn build_subgraph(&self, nodes: &BTreeSet<usize>) -> Result<InducedSubgraph<AnyGraph>> {
        self.as_handle().build_subgraph(nodes)
    }

    fn edge_count(&self) -> usize {
        self.as_handle().edge_count()
    }

    fn is_directed(&self) -> bool {
        self.as_handle().is_directed()
    }

    fn edges(&self) -> Vec<(usize, usize)> {
        self.as_handle().edges()
    }
}
