//! Spanning tree, stable matching and coin change over a two-category
//! population of located entities.

pub mod coin_change;
pub mod config;
pub mod dset;
pub mod entity;
pub mod error;
pub mod graph;
pub mod matching;
pub mod population;

pub use coin_change::{coin_change, Change, CoinChange};
pub use config::{SolverConfig, Supply};
pub use entity::{Category, Located, Point, Population, Proposer, Receiver};
pub use error::{ParseError, SolverError};
pub use graph::{Edge, EdgeKind, Endpoint, SpanningTree};
pub use matching::{stable_matching, Matching, Preferences};
pub use population::Parsed;

/// Minimum spanning tree over all `2n` entities.
pub fn find_mst(pop: &Population) -> Result<SpanningTree, SolverError> {
    let n = pop.validate()?;
    let mut edges = graph::full_graph(pop);
    graph::sort_edges(&mut edges);
    let tree = graph::minimum_spanning_tree(2 * n, &edges)?;
    Ok(SpanningTree::new(n, tree))
}

/// Proposer and receiver preferences by ascending distance.
pub fn preferences(pop: &Population) -> Result<Preferences, SolverError> {
    let n = pop.validate()?;
    let mut edges = graph::bipartite_graph(pop);
    graph::sort_edges(&mut edges);
    Preferences::from_sorted_edges(n, &edges)
}

/// Proposer-optimal stable matching, closest receiver most preferred.
pub fn find_stable_matching(pop: &Population) -> Result<Matching, SolverError> {
    stable_matching(&preferences(pop)?)
}

/// Decomposes the capacity of `config.pair.0` into the weights of `config.pair.1`.
pub fn find_coin_change(pop: &Population, config: &SolverConfig) -> Result<CoinChange, SolverError> {
    let (p, r) = config.pair;
    let proposer = pop.proposer(p)?;
    let receiver = pop.receiver(r)?;
    if proposer.capacity == 0 {
        return Err(SolverError::ZeroCapacity { proposer: p });
    }
    entity::validate_weights(receiver)?;
    Ok(coin_change(proposer.capacity, &receiver.weights, config.supply))
}
