//! Line records for populations.
//!
//! ```text
//! 0 x y capacity
//! 1 x y w1 w2 .. wk
//! ```
//!
//! Proposer (`0`) and receiver (`1`) lines may interleave freely; ids follow
//! insertion order within each category. Lines with any other tag are skipped.

use std::io::{self, BufRead, Write};
use std::str::{FromStr, SplitAsciiWhitespace};

use rand::Rng;
use tracing::{debug, warn};

use crate::entity::{Point, Population};
use crate::error::ParseError;

const PROPOSER_TAG: &str = "0";
const RECEIVER_TAG: &str = "1";

const CAPACITY_RANGE: std::ops::Range<u32> = 1000..2000;
const WEIGHT_RANGE: std::ops::Range<u32> = 10..40;
const WEIGHTS_PER_RECEIVER: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Parsed {
    pub population: Population,
    /// 1-based numbers of lines skipped for an unknown tag.
    pub skipped_lines: Vec<usize>,
}

struct Record<'a> {
    line: usize,
    tokens: SplitAsciiWhitespace<'a>,
}

impl<'a> Record<'a> {
    fn token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    fn value<T: FromStr>(&mut self, field: &'static str) -> Result<T, ParseError> {
        let token = self.token().ok_or(ParseError::MissingField {
            line: self.line,
            field,
        })?;
        token.parse::<T>().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            field,
            token: token.to_owned(),
        })
    }

    fn point(&mut self) -> Result<Point, ParseError> {
        Ok(Point::new(self.value("x")?, self.value("y")?))
    }

    fn weights(&mut self) -> Result<Vec<u32>, ParseError> {
        let mut weights = vec![];
        while let Some(token) = self.token() {
            weights.push(token.parse().map_err(|_| ParseError::InvalidNumber {
                line: self.line,
                field: "weight",
                token: token.to_owned(),
            })?);
        }
        if weights.is_empty() {
            return Err(ParseError::EmptyWeights { line: self.line });
        }
        Ok(weights)
    }
}

impl Population {
    pub fn parse(text: &str) -> Result<Parsed, ParseError> {
        let mut population = Population::new();
        let mut skipped_lines = vec![];

        for (i, line) in text.lines().enumerate() {
            let mut record = Record {
                line: i + 1,
                tokens: line.split_ascii_whitespace(),
            };
            match record.token() {
                None => continue,
                Some(PROPOSER_TAG) => {
                    let pos = record.point()?;
                    let capacity = record.value("capacity")?;
                    population.push_proposer(pos, capacity);
                }
                Some(RECEIVER_TAG) => {
                    let pos = record.point()?;
                    let weights = record.weights()?;
                    population.push_receiver(pos, weights);
                }
                Some(tag) => {
                    warn!(line = i + 1, tag, "skipping record with unknown tag");
                    skipped_lines.push(i + 1);
                }
            }
        }

        debug!(
            proposers = population.proposers().len(),
            receivers = population.receivers().len(),
            skipped = skipped_lines.len(),
            "population parsed"
        );
        Ok(Parsed {
            population,
            skipped_lines,
        })
    }

    pub fn read(mut reader: impl BufRead) -> Result<Parsed, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// Writes proposer `i` and receiver `i` on consecutive lines.
    pub fn write_to(&self, mut w: impl Write) -> io::Result<()> {
        let n = self.proposers().len().max(self.receivers().len());
        for i in 0..n {
            if let Some(p) = self.proposers().get(i) {
                writeln!(w, "{PROPOSER_TAG} {} {} {}", p.pos.x, p.pos.y, p.capacity)?;
            }
            if let Some(r) = self.receivers().get(i) {
                write!(w, "{RECEIVER_TAG} {} {}", r.pos.x, r.pos.y)?;
                for weight in &r.weights {
                    write!(w, " {weight}")?;
                }
                writeln!(w)?;
            }
        }
        w.flush()
    }

    /// `n` proposers and `n` receivers scattered over the unit square.
    pub fn random(rng: &mut impl Rng, n: usize) -> Population {
        let mut population = Population::new();
        for _ in 0..n {
            population.push_proposer(
                (rng.gen::<f64>(), rng.gen::<f64>()),
                rng.gen_range(CAPACITY_RANGE),
            );
            population.push_receiver(
                (rng.gen::<f64>(), rng.gen::<f64>()),
                (0..WEIGHTS_PER_RECEIVER)
                    .map(|_| rng.gen_range(WEIGHT_RANGE))
                    .collect(),
            );
        }
        population
    }
}
