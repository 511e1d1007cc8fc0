use std::{fmt, str::FromStr};

/// How many units of each listed weight a decomposition may use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Supply {
    /// Every distinct weight is a denomination with unlimited units.
    #[default]
    Unbounded,
    /// Every list entry is a single unit; duplicates count separately.
    Bounded,
}

impl fmt::Display for Supply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Supply::Unbounded => write!(f, "unbounded"),
            Supply::Bounded => write!(f, "bounded"),
        }
    }
}

impl FromStr for Supply {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unbounded" => Ok(Supply::Unbounded),
            "bounded" => Ok(Supply::Bounded),
            _ => Err(format!("unknown supply model `{s}`")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub supply: Supply,
    /// `(proposer, receiver)` whose capacity and weights feed the coin change.
    pub pair: (u32, u32),
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            supply: Supply::default(),
            pair: (0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_parses_its_own_display() {
        for supply in [Supply::Unbounded, Supply::Bounded] {
            assert_eq!(supply.to_string().parse::<Supply>(), Ok(supply));
        }
        assert!("infinite".parse::<Supply>().is_err());
    }

    #[test]
    fn defaults_to_first_pair_unbounded() {
        let config = SolverConfig::default();
        assert_eq!(config.supply, Supply::Unbounded);
        assert_eq!(config.pair, (0, 0));
    }
}
