pub mod builder;
pub mod mst;

pub use builder::{bipartite_graph, full_graph, sort_edges, Edge, EdgeKind, Endpoint};
pub use mst::{kruskal, minimum_spanning_tree, SpanningTree};
