use thiserror::Error;

use crate::entity::Category;

/// Contract violations detected at a solver boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("population is empty")]
    EmptyPopulation,
    #[error("population is unbalanced: {proposers} proposers, {receivers} receivers")]
    PopulationMismatch { proposers: usize, receivers: usize },
    #[error("proposer {proposer} has zero capacity")]
    ZeroCapacity { proposer: u32 },
    #[error("receiver {receiver} carries no weights")]
    EmptyWeights { receiver: u32 },
    #[error("receiver {receiver} carries a zero weight")]
    ZeroWeight { receiver: u32 },
    #[error("{category} {id} has a non-finite coordinate")]
    NonFiniteCoordinate { category: Category, id: u32 },
    #[error("{category} {id} is out of range for a population of {len}")]
    UnknownEntity { category: Category, id: u32, len: usize },
    #[error("edge ({u}, {v}) leaves the node range 0..{n_nodes}")]
    NodeOutOfRange { u: u32, v: u32, n_nodes: usize },
    #[error("edges span only {accepted} of {required} tree edges")]
    Disconnected { accepted: usize, required: usize },
    #[error("proposer {proposer} ranks {found} receivers, expected {expected}")]
    IncompletePreferences {
        proposer: u32,
        found: usize,
        expected: usize,
    },
    #[error("proposer {proposer} ranks receiver {receiver} twice")]
    DuplicatePreference { proposer: u32, receiver: u32 },
    #[error("proposer {proposer} exhausted its preferences unmatched")]
    PreferencesExhausted { proposer: u32 },
}

/// Failure to read a population from its text records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: invalid {field} `{token}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        token: String,
    },
    #[error("line {line}: receiver record carries no weights")]
    EmptyWeights { line: usize },
    #[error("failed to read population")]
    Io(#[from] std::io::Error),
}
