//! Candidate generation for one slot and one free list.
//!
//! # Algorithm
//!
//! 1. Filter the list to topics with quota left whose last placement is
//!    at least `gap` slots back. The coupled topic is never a regular
//!    candidate; only the coupling rule places it.
//! 2. Enumerate every combination of `min..=max` eligible topics
//!    (ascending size, lexicographic within a size).
//! 3. Score each combination by the remaining demand it discharges,
//!    `sum(required[t] - count[t])`, and sort descending (stable).
//! 4. With shuffling on, randomize order inside each equal-score run.
//!
//! Solo topics are only valid alone: multi-topic combinations holding one
//! are dropped, and the singleton is offered even below `min`.
//!
//! The demand score is a greedy heuristic to reach a solution with less
//! backtracking; it does not affect completeness.

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::state::{ListSpec, SearchState, TopicId, TopicTable};

/// Ordering policy for equal-score combinations.
#[derive(Debug, Clone)]
pub(crate) enum TieBreak {
    /// Keep enumeration order. Repeated runs are identical.
    Fixed,
    /// Shuffle each equal-score run with this generator.
    Shuffled(StdRng),
}

impl TieBreak {
    pub fn shuffled(seed: u64) -> Self {
        TieBreak::Shuffled(StdRng::seed_from_u64(seed))
    }

    /// Sorts by score descending, then applies the tie policy.
    fn order(&mut self, scored: &mut [(usize, Vec<TopicId>)]) {
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        if let TieBreak::Shuffled(rng) = self {
            for run in scored.chunk_by_mut(|a, b| a.0 == b.0) {
                run.shuffle(rng);
            }
        }
    }
}

/// Produces eligible topics and scored combinations for a slot.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CandidateGenerator<'a> {
    table: &'a TopicTable,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(table: &'a TopicTable) -> Self {
        Self { table }
    }

    /// Topics of `list` that may be newly placed on `slot`.
    pub fn eligible(&self, list: &ListSpec, state: &SearchState, slot: usize) -> Vec<TopicId> {
        list.ids
            .iter()
            .copied()
            .filter(|&id| !self.table.is_coupled_topic(id))
            .filter(|&id| state.is_eligible(id, slot, self.table))
            .collect()
    }

    /// Ordered combinations of `eligible` sized within `[min, max]`.
    ///
    /// Empty when `min` exceeds the number of eligible topics (and no solo
    /// singleton applies): the slot is infeasible under `state`.
    pub fn combinations(
        &self,
        list: &ListSpec,
        eligible: &[TopicId],
        min: usize,
        max: usize,
        state: &SearchState,
        tie_break: &mut TieBreak,
    ) -> Vec<Vec<TopicId>> {
        let max = max.min(eligible.len());

        let mut combos: Vec<Vec<TopicId>> = Vec::new();
        if min <= max {
            for size in min..=max {
                combos.extend(
                    eligible
                        .iter()
                        .copied()
                        .combinations(size)
                        .filter(|c| c.len() <= 1 || !c.iter().any(|&id| list.is_solo(id))),
                );
            }
        }
        if min > 1 && max >= 1 {
            combos.extend(
                eligible
                    .iter()
                    .copied()
                    .filter(|&id| list.is_solo(id))
                    .map(|id| vec![id]),
            );
        }

        let mut scored: Vec<(usize, Vec<TopicId>)> = combos
            .into_iter()
            .map(|c| (self.score(&c, state), c))
            .collect();
        tie_break.order(&mut scored);
        scored.into_iter().map(|(_, c)| c).collect()
    }

    /// Remaining demand discharged by placing `combo`.
    pub fn score(&self, combo: &[TopicId], state: &SearchState) -> usize {
        combo.iter().map(|&id| state.remaining(id, self.table)).sum()
    }
}
