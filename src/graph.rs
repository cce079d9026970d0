//! Graph backend trait and the bundled storage representations.

use crate::subgraph::InducedSubgraph;
use crate::{Error, Result};
use std::borrow::Cow;
use std::collections::BTreeSet;

/// The read-only capability set a random walk needs from a graph representation.
///
/// Node ids are `0..node_count()` and must stay stable while the graph is borrowed.
pub trait GraphBackend {
    /// Graph type produced by [`GraphBackend::build_subgraph`].
    type Subgraph;

    fn node_count(&self) -> usize;

    /// Out-neighbors of `node` (all neighbors for undirected graphs).
    ///
    /// Representations that already store adjacency lists hand out borrowed slices;
    /// dense ones allocate a fresh list per call.
    fn neighbors(&self, node: usize) -> Result<Cow<'_, [usize]>>;

    /// Subgraph induced on `nodes`: every edge whose endpoints are both in the set, and no
    /// others.
    ///
    /// Nodes are relabeled to `0..nodes.len()` in ascending original id order. The returned
    /// wrapper keeps the mapping back to the original ids.
    fn build_subgraph(&self, nodes: &BTreeSet<usize>) -> Result<InducedSubgraph<Self::Subgraph>>;

    fn edge_count(&self) -> usize;

    fn is_directed(&self) -> bool;

    /// All edges. Undirected edges are reported once, as `(u, v)` with `u <= v`.
    fn edges(&self) -> Vec<(usize, usize)>;

    fn degree(&self, node: usize) -> Result<usize> {
        Ok(self.neighbors(node)?.len())
    }
}

pub(crate) fn check_node(node: usize, node_count: usize) -> Result<()> {
    if node < node_count {
        Ok(())
    } else {
        Err(Error::InvalidNode { node, node_count })
    }
}

fn check_node_set(nodes: &BTreeSet<usize>, node_count: usize) -> Result<()> {
    // Sorted set: only the largest id can be out of range.
    match nodes.last() {
        Some(&max) => check_node(max, node_count),
        None => Ok(()),
    }
}

/// Sparse graph stored as sorted, deduplicated out-neighbor lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    adj: Vec<Vec<usize>>,
    directed: bool,
}

impl AdjacencyList {
    /// Undirected graph on `n` nodes. Duplicate edges collapse; `(u, u)` is a self-loop.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adj = vec![Vec::new(); n];
        for &(u, v) in edges {
            check_node(u, n)?;
            check_node(v, n)?;
            adj[u].push(v);
            if u != v {
                adj[v].push(u);
            }
        }
        Ok(Self::normalized(adj, false))
    }

    /// Directed graph on `n` nodes; `(u, v)` is the arc `u -> v`.
    pub fn from_directed_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut adj = vec![Vec::new(); n];
        for &(u, v) in edges {
            check_node(u, n)?;
            check_node(v, n)?;
            adj[u].push(v);
        }
        Ok(Self::normalized(adj, true))
    }

    /// Directed graph from raw out-neighbor lists, one list per node.
    pub fn from_adjacency(adj: Vec<Vec<usize>>) -> Result<Self> {
        let n = adj.len();
        for &v in adj.iter().flatten() {
            check_node(v, n)?;
        }
        Ok(Self::normalized(adj, true))
    }

    fn normalized(mut adj: Vec<Vec<usize>>, directed: bool) -> Self {
        for nbrs in &mut adj {
            nbrs.sort_unstable();
            nbrs.dedup();
        }
        Self { adj, directed }
    }

    /// Borrowed neighbor slice; empty for out-of-range nodes.
    pub fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.adj.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl GraphBackend for AdjacencyList {
    type Subgraph = AdjacencyList;

    fn node_count(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, node: usize) -> Result<Cow<'_, [usize]>> {
        check_node(node, self.adj.len())?;
        Ok(Cow::Borrowed(self.adj[node].as_slice()))
    }

    fn build_subgraph(&self, nodes: &BTreeSet<usize>) -> Result<InducedSubgraph<AdjacencyList>> {
        check_node_set(nodes, self.adj.len())?;
        let ids: Vec<usize> = nodes.iter().copied().collect();
        // Relabeling is monotone, so the filtered lists stay sorted.
        let adj = ids
            .iter()
            .map(|&u| {
                self.adj[u]
                    .iter()
                    .filter_map(|v| ids.binary_search(v).ok())
                    .collect()
            })
            .collect();
        let graph = AdjacencyList { adj, directed: self.directed };
        Ok(InducedSubgraph::new(graph, ids))
    }

    fn edge_count(&self) -> usize {
        let total: usize = self.adj.iter().map(Vec::len).sum();
        if self.directed {
            return total;
        }
        let loops = self
            .adj
            .iter()
            .enumerate()
            .filter(|(u, nbrs)| nbrs.binary_search(u).is_ok())
            .count();
        (total - loops) / 2 + loops
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (u, nbrs) in self.adj.iter().enumerate() {
            for &v in nbrs {
                if self.directed || u <= v {
                    out.push((u, v));
                }
            }
        }
        out
    }
}

/// Dense graph stored as a square weight matrix. `rows[u][v] > 0.0` is the edge `u -> v`.
///
/// The graph counts as undirected when the matrix is symmetric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<f64>>,
    symmetric: bool,
}

impl AdjacencyMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(Error::InvalidParameter(format!(
                "adjacency matrix must be square: row {i} has {} columns, expected {n}",
                row.len()
            )));
        }
        Ok(Self::from_square(rows))
    }

    fn from_square(rows: Vec<Vec<f64>>) -> Self {
        let n = rows.len();
        let symmetric = (0..n).all(|i| (i + 1..n).all(|j| rows[i][j] == rows[j][i]));
        Self { rows, symmetric }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn edge_weight(&self, source: usize, target: usize) -> Result<f64> {
        check_node(source, self.rows.len())?;
        check_node(target, self.rows.len())?;
        Ok(self.rows[source][target])
    }
}

impl GraphBackend for AdjacencyMatrix {
    type Subgraph = AdjacencyMatrix;

    fn node_count(&self) -> usize {
        self.rows.len()
    }

    fn neighbors(&self, node: usize) -> Result<Cow<'_, [usize]>> {
        check_node(node, self.rows.len())?;
        let nbrs = self.rows[node]
            .iter()
            .enumerate()
            .filter(|(_, &w)| w > 0.0)
            .map(|(i, _)| i)
            .collect();
        Ok(Cow::Owned(nbrs))
    }

    fn build_subgraph(&self, nodes: &BTreeSet<usize>) -> Result<InducedSubgraph<AdjacencyMatrix>> {
        check_node_set(nodes, self.rows.len())?;
        let ids: Vec<usize> = nodes.iter().copied().collect();
        let rows = ids
            .iter()
            .map(|&u| ids.iter().map(|&v| self.rows[u][v]).collect())
            .collect();
        Ok(InducedSubgraph::new(AdjacencyMatrix::from_square(rows), ids))
    }

    fn edge_count(&self) -> usize {
        self.rows
            .iter()
            .enumerate()
            .map(|(u, row)| {
                let first = if self.symmetric { u } else { 0 };
                row[first..].iter().filter(|&&w| w > 0.0).count()
            })
            .sum()
    }

    fn is_directed(&self) -> bool {
        !self.symmetric
    }

    fn edges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (u, row) in self.rows.iter().enumerate() {
            let first = if self.symmetric { u } else { 0 };
            for (v, &w) in row.iter().enumerate().skip(first) {
                if w > 0.0 {
                    out.push((u, v));
                }
            }
        }
        out
    }
}

#[cfg(feature = "petgraph")]
impl<N, E, Ty, Ix> GraphBackend for petgraph::Graph<N, E, Ty, Ix>
where
    N: Clone,
    E: Clone,
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    type Subgraph = petgraph::Graph<N, E, Ty, Ix>;

    fn node_count(&self) -> usize {
        petgraph::Graph::node_count(self)
    }

    fn neighbors(&self, node: usize) -> Result<Cow<'_, [usize]>> {
        check_node(node, petgraph::Graph::node_count(self))?;
        let nbrs = petgraph::Graph::neighbors(self, petgraph::graph::NodeIndex::<Ix>::new(node))
            .map(|idx| idx.index())
            .collect();
        Ok(Cow::Owned(nbrs))
    }

    fn build_subgraph(
        &self,
        nodes: &BTreeSet<usize>,
    ) -> Result<InducedSubgraph<petgraph::Graph<N, E, Ty, Ix>>> {
        check_node_set(nodes, petgraph::Graph::node_count(self))?;
        // `filter_map` keeps node order and drops edges with a removed endpoint.
        let graph = self.filter_map(
            |idx, weight| nodes.contains(&idx.index()).then(|| weight.clone()),
            |_, weight| Some(weight.clone()),
        );
        Ok(InducedSubgraph::new(graph, nodes.iter().copied().collect()))
    }

    fn edge_count(&self) -> usize {
        petgraph::Graph::edge_count(self)
    }

    fn is_directed(&self) -> bool {
        petgraph::Graph::is_directed(self)
    }

    fn edges(&self) -> Vec<(usize, usize)> {
        let directed = petgraph::Graph::is_directed(self);
        self.edge_indices()
            .filter_map(|e| self.edge_endpoints(e))
            .map(|(a, b)| {
                let (u, v) = (a.index(), b.index());
                if directed {
                    (u, v)
                } else {
                    (u.min(v), u.max(v))
                }
            })
            .collect()
    }
}
