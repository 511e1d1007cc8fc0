use tracing::debug;

use super::builder::{Edge, Endpoint};
use crate::dset::DisjointSet;
use crate::error::SolverError;

/// Kruskal's scan over edges already sorted by weight.
///
/// Stops as soon as `remained_edges` reaches zero, leaving the rest unread.
pub fn kruskal(
    remained_edges: &mut usize,
    dset: &mut DisjointSet,
    yield_mst_edge: &mut impl FnMut(&Edge),
    sorted_edges: &[Edge],
) {
    if *remained_edges == 0 {
        return;
    }
    for e in sorted_edges {
        if dset.merge(e.u as usize, e.v as usize) {
            yield_mst_edge(e);
            *remained_edges -= 1;
            if *remained_edges == 0 {
                break;
            }
        }
    }
}

/// Minimum spanning tree over `n_nodes` nodes, in acceptance order.
///
/// `sorted_edges` must be sorted ascending by weight; ties are taken in slice order.
pub fn minimum_spanning_tree(
    n_nodes: usize,
    sorted_edges: &[Edge],
) -> Result<Vec<Edge>, SolverError> {
    if n_nodes == 0 {
        return Err(SolverError::EmptyPopulation);
    }
    if let Some(e) = sorted_edges
        .iter()
        .find(|e| e.u as usize >= n_nodes || e.v as usize >= n_nodes)
    {
        return Err(SolverError::NodeOutOfRange {
            u: e.u,
            v: e.v,
            n_nodes,
        });
    }
    debug_assert!(sorted_edges.windows(2).all(|w| w[0].weight <= w[1].weight));

    let required = n_nodes - 1;
    let mut remained_edges = required;
    let mut dset = DisjointSet::new(n_nodes);
    let mut tree = Vec::with_capacity(required);
    kruskal(
        &mut remained_edges,
        &mut dset,
        &mut |e| tree.push(*e),
        sorted_edges,
    );

    if remained_edges > 0 {
        return Err(SolverError::Disconnected {
            accepted: tree.len(),
            required,
        });
    }
    debug!(
        nodes = n_nodes,
        edges = sorted_edges.len(),
        accepted = tree.len(),
        "spanning tree complete"
    );
    Ok(tree)
}

/// Spanning tree over a two-category population of `n` entities per category.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanningTree {
    n: usize,
    edges: Vec<Edge>,
}

impl SpanningTree {
    pub(crate) fn new(n: usize, edges: Vec<Edge>) -> Self {
        Self { n, edges }
    }

    /// Accepted edges in combined node ids, in acceptance order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn links(&self) -> impl Iterator<Item = (Endpoint, Endpoint, f64)> + '_ {
        self.edges.iter().map(|e| {
            let (a, b) = e.endpoints(self.n);
            (a, b, e.weight)
        })
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
