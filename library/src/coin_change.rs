//! Minimum-count decomposition of a capacity into receiver weights.

use tracing::debug;

use crate::config::Supply;

const UNREACHABLE: u32 = u32::MAX;

/// Item counts aligned to an ascending weight list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    weights: Vec<u32>,
    counts: Vec<u32>,
}

impl Change {
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total_items(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn total_weight(&self) -> u64 {
        self.weights
            .iter()
            .zip(&self.counts)
            .map(|(&w, &c)| w as u64 * c as u64)
            .sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoinChange {
    /// Fewest items summing to exactly the capacity.
    Exact(Change),
    /// No combination sums to the capacity. `closest` is the fewest-item
    /// decomposition of the largest reachable amount below it, and
    /// `remainder` is what is left uncovered.
    Unreachable { remainder: u32, closest: Change },
}

impl CoinChange {
    pub fn is_exact(&self) -> bool {
        matches!(self, CoinChange::Exact(_))
    }

    pub fn change(&self) -> &Change {
        match self {
            CoinChange::Exact(change) => change,
            CoinChange::Unreachable { closest, .. } => closest,
        }
    }
}

trait ChangeTable {
    /// Fewest items summing to `amount`, if any combination does.
    fn min_count(&self, amount: u32) -> Option<u32>;

    /// Counts aligned to the sorted weights. `amount` must be reachable.
    fn decompose(&self, amount: u32, weights: &[u32]) -> Vec<u32>;
}

// min_count[a]: fewest items reaching a, UNREACHABLE if none
// choice[a]: denomination taken last to reach a, 0 if a is zero or unreachable
struct UnboundedTable {
    min_count: Vec<u32>,
    choice: Vec<u32>,
}

impl UnboundedTable {
    fn build(capacity: u32, weights: &[u32]) -> Self {
        let mut denominations = weights.to_vec();
        denominations.dedup();
        denominations.retain(|&w| w > 0);

        let len = capacity as usize + 1;
        let mut min_count = vec![UNREACHABLE; len];
        let mut choice = vec![0; len];
        min_count[0] = 0;

        for amount in 1..len {
            let mut best = UNREACHABLE;
            let mut pick = 0;
            for &w in &denominations {
                if w as usize > amount {
                    break;
                }
                let prev = min_count[amount - w as usize];
                // Ties go to the larger denomination.
                if prev != UNREACHABLE && prev < best {
                    best = prev + 1;
                    pick = w;
                }
            }
            min_count[amount] = best;
            choice[amount] = pick;
        }
        Self { min_count, choice }
    }
}

impl ChangeTable for UnboundedTable {
    fn min_count(&self, amount: u32) -> Option<u32> {
        Some(self.min_count[amount as usize]).filter(|&c| c != UNREACHABLE)
    }

    fn decompose(&self, amount: u32, weights: &[u32]) -> Vec<u32> {
        let mut counts = vec![0; weights.len()];
        let mut remaining = amount;
        while remaining > 0 {
            let w = self.choice[remaining as usize];
            if w == 0 {
                break;
            }
            // Duplicates are credited to their first position.
            counts[weights.partition_point(|&x| x < w)] += 1;
            remaining -= w;
        }
        debug_assert_eq!(remaining, 0);
        counts
    }
}

// best[a]: fewest items reaching a using each list entry at most once
// taken[i][a]: whether best[a] after considering item i uses item i
struct BoundedTable {
    best: Vec<u32>,
    taken: Vec<Vec<bool>>,
}

impl BoundedTable {
    fn build(capacity: u32, weights: &[u32]) -> Self {
        let len = capacity as usize + 1;
        let mut best = vec![UNREACHABLE; len];
        best[0] = 0;
        let mut taken = vec![vec![false; len]; weights.len()];

        for (i, &w) in weights.iter().enumerate() {
            let w = w as usize;
            if w == 0 || w >= len {
                continue;
            }
            for amount in (w..len).rev() {
                let prev = best[amount - w];
                if prev != UNREACHABLE && prev < best[amount] {
                    best[amount] = prev + 1;
                    taken[i][amount] = true;
                }
            }
        }
        Self { best, taken }
    }
}

impl ChangeTable for BoundedTable {
    fn min_count(&self, amount: u32) -> Option<u32> {
        Some(self.best[amount as usize]).filter(|&c| c != UNREACHABLE)
    }

    fn decompose(&self, amount: u32, weights: &[u32]) -> Vec<u32> {
        let mut counts = vec![0; weights.len()];
        let mut remaining = amount as usize;
        for i in (0..weights.len()).rev() {
            if remaining == 0 {
                break;
            }
            if self.taken[i][remaining] {
                counts[i] = 1;
                remaining -= weights[i] as usize;
            }
        }
        debug_assert_eq!(remaining, 0);
        counts
    }
}

/// Decomposes `capacity` into the fewest items drawn from `weights`.
///
/// Counts in the result are aligned to `weights` sorted ascending. Zero
/// weights are never used.
pub fn coin_change(capacity: u32, weights: &[u32], supply: Supply) -> CoinChange {
    let mut weights = weights.to_vec();
    weights.sort_unstable();

    let table: Box<dyn ChangeTable> = match supply {
        Supply::Unbounded => Box::new(UnboundedTable::build(capacity, &weights)),
        Supply::Bounded => Box::new(BoundedTable::build(capacity, &weights)),
    };
    debug!(
        capacity,
        items = weights.len(),
        %supply,
        min_count = ?table.min_count(capacity),
        "coin change table built"
    );

    if table.min_count(capacity).is_some() {
        let counts = table.decompose(capacity, &weights);
        return CoinChange::Exact(Change { weights, counts });
    }

    // Zero is always reachable.
    let reached = (0..capacity)
        .rev()
        .find(|&a| table.min_count(a).is_some())
        .unwrap_or(0);
    let counts = table.decompose(reached, &weights);
    CoinChange::Unreachable {
        remainder: capacity - reached,
        closest: Change { weights, counts },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn exact(capacity: u32, weights: &[u32], supply: Supply) -> Vec<u32> {
        match coin_change(capacity, weights, supply) {
            CoinChange::Exact(change) => change.counts,
            other => panic!("expected exact change, got {other:?}"),
        }
    }

    #[rstest]
    #[case::one_of_each(16, &[1, 5, 10], &[1, 1, 1])]
    #[case::unsorted_input(16, &[10, 1, 5], &[1, 1, 1])]
    #[case::greedy_fails(12, &[1, 6, 9], &[0, 2, 0])]
    #[case::needs_unreachable_detour(9, &[3, 5], &[3, 0])]
    #[case::duplicates_credit_first(10, &[5, 1, 5], &[0, 2, 0])]
    #[case::single_denomination(40, &[8], &[5])]
    fn unbounded_exact(#[case] capacity: u32, #[case] weights: &[u32], #[case] counts: &[u32]) {
        assert_eq!(exact(capacity, weights, Supply::Unbounded), counts);
    }

    #[rstest]
    #[case::one_of_each(16, &[1, 5, 10], &[1, 1, 1])]
    #[case::duplicates_are_separate_items(10, &[5, 1, 5], &[0, 1, 1])]
    #[case::prefers_fewer_items(8, &[4, 4, 6, 2], &[1, 0, 0, 1])]
    fn bounded_exact(#[case] capacity: u32, #[case] weights: &[u32], #[case] counts: &[u32]) {
        let counts_found = exact(capacity, weights, Supply::Bounded);
        assert_eq!(counts_found.iter().sum::<u32>(), counts.iter().sum::<u32>());
        let mut sorted = weights.to_vec();
        sorted.sort_unstable();
        let total: u32 = sorted.iter().zip(&counts_found).map(|(w, c)| w * c).sum();
        assert_eq!(total, capacity);
        assert!(counts_found.iter().all(|&c| c <= 1));
    }

    #[test]
    fn flags_unreachable_capacity() {
        let result = coin_change(3, &[5, 10], Supply::Unbounded);
        assert!(!result.is_exact());
        assert_eq!(
            result,
            CoinChange::Unreachable {
                remainder: 3,
                closest: Change {
                    weights: vec![5, 10],
                    counts: vec![0, 0],
                },
            }
        );
    }

    #[rstest]
    #[case::unbounded(Supply::Unbounded, 1, &[2, 0])]
    #[case::bounded(Supply::Bounded, 2, &[0, 1])]
    fn unreachable_keeps_closest_amount(
        #[case] supply: Supply,
        #[case] remainder: u32,
        #[case] counts: &[u32],
    ) {
        match coin_change(7, &[3, 5], supply) {
            CoinChange::Unreachable {
                remainder: r,
                closest,
            } => {
                assert_eq!(r, remainder);
                assert_eq!(closest.counts(), counts);
                assert_eq!(closest.total_weight(), 7 - remainder as u64);
            }
            other => panic!("expected unreachable, got {other:?}"),
        }
    }

    #[test]
    fn unbounded_table_matches_recurrence() {
        let table = UnboundedTable::build(16, &[1, 5, 10]);
        assert_eq!(table.min_count, [0, 1, 2, 3, 4, 1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 2, 3]);
        assert_eq!(table.choice[16], 10);
        assert_eq!(table.choice[6], 5);
        assert_eq!(table.choice[0], 0);

        let table = UnboundedTable::build(4, &[5]);
        assert_eq!(table.min_count(3), None);
        assert_eq!(table.choice[3], 0);
    }

    fn brute_force_unbounded(capacity: u32, weights: &[u32]) -> Option<u32> {
        match weights.split_first() {
            None => (capacity == 0).then_some(0),
            Some((&w, rest)) => (0..=capacity / w)
                .filter_map(|k| brute_force_unbounded(capacity - k * w, rest).map(|c| c + k))
                .min(),
        }
    }

    fn brute_force_bounded(capacity: u32, weights: &[u32]) -> Option<u32> {
        (0u32..1 << weights.len())
            .filter(|mask| {
                let sum: u32 = (0..weights.len())
                    .filter(|i| mask >> i & 1 == 1)
                    .map(|i| weights[i])
                    .sum();
                sum == capacity
            })
            .map(|mask| mask.count_ones())
            .min()
    }

    proptest! {
        #[test]
        fn unbounded_is_minimal(
            capacity in 1u32..=30,
            weights in prop::collection::vec(2u32..=12, 1..=3),
        ) {
            let result = coin_change(capacity, &weights, Supply::Unbounded);
            let change = result.change();
            match brute_force_unbounded(capacity, &weights) {
                Some(best) => {
                    prop_assert!(result.is_exact());
                    prop_assert_eq!(change.total_weight(), capacity as u64);
                    prop_assert_eq!(change.total_items(), best);
                }
                None => {
                    prop_assert!(!result.is_exact());
                    prop_assert!(change.total_weight() < capacity as u64);
                }
            }
        }

        #[test]
        fn bounded_is_minimal(
            capacity in 1u32..=60,
            weights in prop::collection::vec(1u32..=20, 1..=6),
        ) {
            let result = coin_change(capacity, &weights, Supply::Bounded);
            let change = result.change();
            prop_assert!(change.counts().iter().all(|&c| c <= 1));
            match brute_force_bounded(capacity, &weights) {
                Some(best) => {
                    prop_assert!(result.is_exact());
                    prop_assert_eq!(change.total_weight(), capacity as u64);
                    prop_assert_eq!(change.total_items(), best);
                }
                None => prop_assert!(!result.is_exact()),
            }
        }
    }
}
