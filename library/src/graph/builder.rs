use crate::entity::{Category, Located, Population};

/// An entity reference in its own category's id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub category: Category,
    pub id: u32,
}

impl Endpoint {
    pub const fn proposer(id: u32) -> Self {
        Self {
            category: Category::Proposer,
            id,
        }
    }

    pub const fn receiver(id: u32) -> Self {
        Self {
            category: Category::Receiver,
            id,
        }
    }

    /// Node id in the combined graph of `2n` nodes: proposers keep `0..n`,
    /// receivers are shifted to `n..2n`.
    pub fn node(self, n: usize) -> u32 {
        match self.category {
            Category::Proposer => self.id,
            Category::Receiver => self.id + n as u32,
        }
    }

    pub fn from_node(node: u32, n: usize) -> Self {
        let n = n as u32;
        if node < n {
            Self::proposer(node)
        } else {
            Self::receiver(node - n)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    ProposerProposer,
    ProposerReceiver,
    ReceiverReceiver,
}

impl EdgeKind {
    pub fn categories(self) -> (Category, Category) {
        match self {
            EdgeKind::ProposerProposer => (Category::Proposer, Category::Proposer),
            EdgeKind::ProposerReceiver => (Category::Proposer, Category::Receiver),
            EdgeKind::ReceiverReceiver => (Category::Receiver, Category::Receiver),
        }
    }
}

/// Undirected edge weighted by euclidean distance.
///
/// In a full graph `u` and `v` are combined node ids (see [`Endpoint::node`]).
/// In a bipartite graph `u` is a proposer id and `v` a receiver id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub u: u32,
    pub v: u32,
    pub weight: f64,
    pub kind: EdgeKind,
}

impl Edge {
    /// Endpoints of a full-graph edge in native id spaces.
    pub fn endpoints(&self, n: usize) -> (Endpoint, Endpoint) {
        (Endpoint::from_node(self.u, n), Endpoint::from_node(self.v, n))
    }
}

/// All `n(2n - 1)` edges of the complete graph over both categories.
///
/// Construction order: for each proposer, its pairs with later proposers and
/// then with every receiver; finally all receiver pairs.
pub fn full_graph(pop: &Population) -> Vec<Edge> {
    let n = pop.proposers().len();
    let mut edges = Vec::with_capacity(n * (2 * n).saturating_sub(1));

    for (i, p1) in pop.proposers().iter().enumerate() {
        for p2 in &pop.proposers()[i + 1..] {
            edges.push(Edge {
                u: Endpoint::proposer(p1.id).node(n),
                v: Endpoint::proposer(p2.id).node(n),
                weight: p1.distance_to(p2),
                kind: EdgeKind::ProposerProposer,
            });
        }
        for r in pop.receivers() {
            edges.push(Edge {
                u: Endpoint::proposer(p1.id).node(n),
                v: Endpoint::receiver(r.id).node(n),
                weight: p1.distance_to(r),
                kind: EdgeKind::ProposerReceiver,
            });
        }
    }
    for (i, r1) in pop.receivers().iter().enumerate() {
        for r2 in &pop.receivers()[i + 1..] {
            edges.push(Edge {
                u: Endpoint::receiver(r1.id).node(n),
                v: Endpoint::receiver(r2.id).node(n),
                weight: r1.distance_to(r2),
                kind: EdgeKind::ReceiverReceiver,
            });
        }
    }
    edges
}

/// The `n^2` proposer-receiver edges, in native id spaces.
pub fn bipartite_graph(pop: &Population) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(pop.proposers().len() * pop.receivers().len());
    for p in pop.proposers() {
        for r in pop.receivers() {
            edges.push(Edge {
                u: p.id,
                v: r.id,
                weight: p.distance_to(r),
                kind: EdgeKind::ProposerReceiver,
            });
        }
    }
    edges
}

/// Ascending by weight. Stable, so ties keep construction order.
pub fn sort_edges(edges: &mut [Edge]) {
    edges.sort_by(|a, b| a.weight.total_cmp(&b.weight));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn line(n: usize) -> Population {
        let mut pop = Population::new();
        for i in 0..n {
            pop.push_proposer((i as f64, 0.0), 1);
            pop.push_receiver((i as f64, 1.0), vec![1]);
        }
        pop
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    fn full_graph_counts_every_pair(#[case] n: usize) {
        let edges = full_graph(&line(n));
        assert_eq!(edges.len(), n * (2 * n - 1));

        let count = |kind| edges.iter().filter(|e| e.kind == kind).count();
        assert_eq!(count(EdgeKind::ProposerProposer), n * (n - 1) / 2);
        assert_eq!(count(EdgeKind::ProposerReceiver), n * n);
        assert_eq!(count(EdgeKind::ReceiverReceiver), n * (n - 1) / 2);
        assert!(edges.iter().all(|e| e.u < e.v && (e.v as usize) < 2 * n));
    }

    #[test]
    fn full_graph_offsets_receivers() {
        let edges = full_graph(&line(3));
        for e in &edges {
            let (a, b) = e.endpoints(3);
            assert_eq!((a.category, b.category), e.kind.categories());
        }
        let pr = edges
            .iter()
            .find(|e| e.kind == EdgeKind::ProposerReceiver && e.u == 2)
            .unwrap();
        assert_eq!(pr.endpoints(3), (Endpoint::proposer(2), Endpoint::receiver(0)));
        assert_eq!(pr.v, 3);
    }

    #[test]
    fn bipartite_graph_keeps_native_ids() {
        let edges = bipartite_graph(&line(3));
        assert_eq!(edges.len(), 9);
        assert!(edges.iter().all(|e| e.u < 3 && e.v < 3));
        assert_eq!(edges[4].weight, 1.0);
        assert_eq!(edges[2].weight, 5f64.sqrt());
    }

    #[test]
    fn sorting_keeps_construction_order_on_ties() {
        let mut edges = bipartite_graph(&line(3));
        sort_edges(&mut edges);
        let head: Vec<(u32, u32)> = edges.iter().take(3).map(|e| (e.u, e.v)).collect();
        assert_eq!(head, [(0, 0), (1, 1), (2, 2)]);
        assert!(edges.windows(2).all(|w| w[0].weight <= w[1].weight));
    }

    #[test]
    fn node_ids_round_trip() {
        for node in 0..8 {
            assert_eq!(Endpoint::from_node(node, 4).node(4), node);
        }
        assert_eq!(Endpoint::from_node(5, 4), Endpoint::receiver(1));
    }
}
