use std::fmt;

use crate::error::SolverError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Proposer,
    Receiver,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Proposer => write!(f, "proposer"),
            Category::Receiver => write!(f, "receiver"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Point {
        Point::new(x, y)
    }
}

pub trait Located {
    fn pos(&self) -> Point;

    fn distance_to(&self, other: &impl Located) -> f64 {
        self.pos().distance(other.pos())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proposer {
    pub id: u32,
    pub pos: Point,
    pub capacity: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Receiver {
    pub id: u32,
    pub pos: Point,
    // Denominations in record order. Solvers sort their own copy.
    pub weights: Vec<u32>,
}

impl Located for Proposer {
    fn pos(&self) -> Point {
        self.pos
    }
}

impl Located for Receiver {
    fn pos(&self) -> Point {
        self.pos
    }
}

/// Two categories of located entities, each numbered `0..n` by insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    proposers: Vec<Proposer>,
    receivers: Vec<Receiver>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_proposer(&mut self, pos: impl Into<Point>, capacity: u32) -> u32 {
        let id = self.proposers.len() as u32;
        self.proposers.push(Proposer {
            id,
            pos: pos.into(),
            capacity,
        });
        id
    }

    pub fn push_receiver(&mut self, pos: impl Into<Point>, weights: Vec<u32>) -> u32 {
        let id = self.receivers.len() as u32;
        self.receivers.push(Receiver {
            id,
            pos: pos.into(),
            weights,
        });
        id
    }

    pub fn proposers(&self) -> &[Proposer] {
        &self.proposers
    }

    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    pub fn proposer(&self, id: u32) -> Result<&Proposer, SolverError> {
        self.proposers
            .get(id as usize)
            .ok_or(SolverError::UnknownEntity {
                category: Category::Proposer,
                id,
                len: self.proposers.len(),
            })
    }

    pub fn receiver(&self, id: u32) -> Result<&Receiver, SolverError> {
        self.receivers
            .get(id as usize)
            .ok_or(SolverError::UnknownEntity {
                category: Category::Receiver,
                id,
                len: self.receivers.len(),
            })
    }

    /// Checks the preconditions shared by every solver and returns the
    /// per-category population size.
    pub fn validate(&self) -> Result<usize, SolverError> {
        let n = self.proposers.len();
        if n != self.receivers.len() {
            return Err(SolverError::PopulationMismatch {
                proposers: n,
                receivers: self.receivers.len(),
            });
        }
        if n == 0 {
            return Err(SolverError::EmptyPopulation);
        }

        for p in &self.proposers {
            if !p.pos.is_finite() {
                return Err(SolverError::NonFiniteCoordinate {
                    category: Category::Proposer,
                    id: p.id,
                });
            }
            if p.capacity == 0 {
                return Err(SolverError::ZeroCapacity { proposer: p.id });
            }
        }
        for r in &self.receivers {
            if !r.pos.is_finite() {
                return Err(SolverError::NonFiniteCoordinate {
                    category: Category::Receiver,
                    id: r.id,
                });
            }
            validate_weights(r)?;
        }
        Ok(n)
    }
}

pub(crate) fn validate_weights(r: &Receiver) -> Result<(), SolverError> {
    if r.weights.is_empty() {
        return Err(SolverError::EmptyWeights { receiver: r.id });
    }
    if r.weights.contains(&0) {
        return Err(SolverError::ZeroWeight { receiver: r.id });
    }
    Ok(())
}
