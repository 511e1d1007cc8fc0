//! Proposer-optimal stable matching over distance-derived preferences.
//!
//! Deferred acceptance in which a displaced proposer resumes from its own
//! cursor instead of restarting its list. Every offer advances one cursor, so
//! at most `n^2` offers are made.

use tracing::{debug, trace};

use crate::entity::Category;
use crate::error::SolverError;
use crate::graph::Edge;

const UNMATCHED: u32 = u32::MAX;

/// Preference tables for `n` proposers and `n` receivers.
#[derive(Clone, Debug)]
pub struct Preferences {
    n: usize,
    // ranked[p * n..(p + 1) * n]: receivers in p's order, most preferred first
    ranked: Vec<u32>,
    // rank[r * n + p]: position of p in r's order, 1 = most preferred
    rank: Vec<u32>,
}

impl Preferences {
    /// Builds both tables from proposer-receiver edges sorted ascending by weight.
    ///
    /// Every (proposer, receiver) pair must appear exactly once.
    pub fn from_sorted_edges(n: usize, sorted_edges: &[Edge]) -> Result<Self, SolverError> {
        if n == 0 {
            return Err(SolverError::EmptyPopulation);
        }
        let mut ranked = vec![UNMATCHED; n * n];
        let mut rank = vec![0; n * n];
        let mut filled = vec![0usize; n];
        let mut ranked_by = vec![0u32; n];

        for e in sorted_edges {
            let (p, r) = (e.u as usize, e.v as usize);
            if p >= n {
                return Err(SolverError::UnknownEntity {
                    category: Category::Proposer,
                    id: e.u,
                    len: n,
                });
            }
            if r >= n {
                return Err(SolverError::UnknownEntity {
                    category: Category::Receiver,
                    id: e.v,
                    len: n,
                });
            }
            if rank[r * n + p] != 0 {
                return Err(SolverError::DuplicatePreference {
                    proposer: e.u,
                    receiver: e.v,
                });
            }
            ranked[p * n + filled[p]] = e.v;
            filled[p] += 1;
            ranked_by[r] += 1;
            rank[r * n + p] = ranked_by[r];
        }

        if let Some(p) = filled.iter().position(|&c| c != n) {
            return Err(SolverError::IncompletePreferences {
                proposer: p as u32,
                found: filled[p],
                expected: n,
            });
        }
        Ok(Self { n, ranked, rank })
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Receivers in `p`'s order, most preferred first.
    pub fn proposer_list(&self, p: u32) -> &[u32] {
        let p = p as usize;
        &self.ranked[p * self.n..(p + 1) * self.n]
    }

    /// Position of `p` in `r`'s order, 1 = most preferred.
    pub fn rank(&self, r: u32, p: u32) -> u32 {
        self.rank[r as usize * self.n + p as usize]
    }

    pub fn receiver_prefers(&self, r: u32, p: u32, q: u32) -> bool {
        self.rank(r, p) < self.rank(r, q)
    }
}

/// A perfect matching, one receiver per proposer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matching {
    receiver_of: Vec<u32>,
    proposer_of: Vec<u32>,
}

impl Matching {
    pub fn receiver_of(&self, p: u32) -> u32 {
        self.receiver_of[p as usize]
    }

    pub fn proposer_of(&self, r: u32) -> u32 {
        self.proposer_of[r as usize]
    }

    /// `(proposer, receiver)` pairs in ascending proposer order.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.receiver_of
            .iter()
            .enumerate()
            .map(|(p, &r)| (p as u32, r))
    }

    pub fn len(&self) -> usize {
        self.receiver_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver_of.is_empty()
    }

    /// Unmatched pairs that strictly prefer each other over their partners.
    pub fn blocking_pairs(&self, prefs: &Preferences) -> Vec<(u32, u32)> {
        let mut blocking = vec![];
        for (p, r) in self.pairs() {
            for &better in prefs.proposer_list(p) {
                if better == r {
                    break;
                }
                if prefs.receiver_prefers(better, p, self.proposer_of(better)) {
                    blocking.push((p, better));
                }
            }
        }
        blocking
    }
}

pub fn stable_matching(prefs: &Preferences) -> Result<Matching, SolverError> {
    let n = prefs.len();
    let mut cursor = vec![0usize; n];
    let mut receiver_of = vec![UNMATCHED; n];
    let mut proposer_of = vec![UNMATCHED; n];

    // Proposers waiting for a partner. The top is served next, so a displaced
    // proposer is resumed before the next id in sequence.
    let mut free: Vec<u32> = (0..n as u32).rev().collect();
    let mut offers = 0usize;
    let mut rotations = 0usize;

    while let Some(p) = free.pop() {
        loop {
            let Some(&r) = prefs.proposer_list(p).get(cursor[p as usize]) else {
                return Err(SolverError::PreferencesExhausted { proposer: p });
            };
            cursor[p as usize] += 1;
            offers += 1;

            let q = proposer_of[r as usize];
            if q == UNMATCHED {
                receiver_of[p as usize] = r;
                proposer_of[r as usize] = p;
                break;
            }
            if q == p {
                break;
            }
            if prefs.receiver_prefers(r, p, q) {
                receiver_of[p as usize] = r;
                proposer_of[r as usize] = p;
                receiver_of[q as usize] = UNMATCHED;
                trace!(receiver = r, from = q, to = p, "rotation");
                rotations += 1;
                free.push(q);
                break;
            }
        }
    }

    debug!(n, offers, rotations, "stable matching complete");
    Ok(Matching {
        receiver_of,
        proposer_of,
    })
}
