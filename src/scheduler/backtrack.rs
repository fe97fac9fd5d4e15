//! Depth-first backtracking over slots.
//!
//! # Algorithm
//!
//! For slot `i` (state machine `0..=N`, `N` = all slots assigned):
//! 1. Prune if any free list's outstanding demand exceeds
//!    `slots_left * max`, or if the coupled topic still needs more
//!    placements than there are triggering slots left.
//! 2. At `i == N`, succeed iff every count equals its requirement.
//! 3. Force the coupled topic if slot `i`'s primary triggers it and its
//!    quota isn't exhausted; it consumes one list-A place.
//! 4. For each list-A combination (generator order), reject duplicates
//!    and quota overflow, commit to a copy of the state, then for each
//!    list-B combination commit to a further copy and recurse into `i + 1`.
//! 5. First success wins. Failure pops this slot's tentative pick and
//!    returns nothing; the caller's state is never touched.
//!
//! Recursion depth is bounded by the slot count.
//!
//! # Reference
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", 4th ed., Ch. 6.3: Backtracking Search for CSPs
//! - Prosser (1993), "Hybrid Algorithms for the Constraint Satisfaction Problem"

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::candidates::{CandidateGenerator, TieBreak};
use super::state::{SearchState, TopicId, TopicTable};

/// Counters describing one or more search attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Slot states entered.
    pub nodes: usize,
    /// States rejected by demand or coupling pruning.
    pub prunes: usize,
    /// Recursive calls that came back without a solution.
    pub backtracks: usize,
}

impl SearchStats {
    /// Adds another attempt's counters.
    pub fn absorb(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.prunes += other.prunes;
        self.backtracks += other.backtracks;
    }
}

/// Topics chosen for one slot's free lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SlotPick {
    pub list_a: Vec<TopicId>,
    pub list_b: Vec<TopicId>,
}

/// Result of one attempt.
#[derive(Debug)]
pub(crate) struct SearchOutcome {
    /// Per-slot picks and the final state, on success.
    pub solution: Option<(Vec<SlotPick>, SearchState)>,
    pub stats: SearchStats,
}

/// One search attempt over a compiled model.
pub(crate) struct BacktrackingScheduler<'a> {
    table: &'a TopicTable,
    generator: CandidateGenerator<'a>,
    tie_break: TieBreak,
    picks: Vec<SlotPick>,
    stats: SearchStats,
}

impl<'a> BacktrackingScheduler<'a> {
    pub fn new(table: &'a TopicTable, tie_break: TieBreak) -> Self {
        Self {
            table,
            generator: CandidateGenerator::new(table),
            tie_break,
            picks: Vec::with_capacity(table.slot_count()),
            stats: SearchStats::default(),
        }
    }

    /// Runs the search from `initial` (primary topics already placed).
    pub fn run(mut self, initial: SearchState) -> SearchOutcome {
        let solution = self
            .schedule_slot(0, &initial)
            .map(|final_state| (self.picks, final_state));
        SearchOutcome {
            solution,
            stats: self.stats,
        }
    }

    fn schedule_slot(&mut self, slot: usize, state: &SearchState) -> Option<SearchState> {
        self.stats.nodes += 1;
        let table = self.table;
        let generator = self.generator;

        if self.should_prune(slot, state) {
            self.stats.prunes += 1;
            return None;
        }

        if slot == table.slot_count() {
            return if table.is_complete(state) {
                Some(state.clone())
            } else {
                debug!("reached the last slot with unmet quotas");
                None
            };
        }

        let forced = self.forced_topic(slot, state);
        if let Some(id) = forced {
            debug!(slot, topic = table.name(id), "coupled topic forced");
        }

        let list_a = &table.list_a;
        let taken = usize::from(forced.is_some());
        let min_a = list_a.bounds.min.saturating_sub(taken);
        let max_a = list_a.bounds.max.saturating_sub(taken);
        let eligible_a = generator.eligible(list_a, state, slot);
        let combos_a =
            generator.combinations(list_a, &eligible_a, min_a, max_a, state, &mut self.tie_break);
        if combos_a.is_empty() {
            debug!(
                slot,
                min_a,
                eligible = eligible_a.len(),
                "no feasible list-A pick"
            );
            return None;
        }

        for combo_a in combos_a {
            let picked_a: Vec<TopicId> = forced.into_iter().chain(combo_a).collect();
            if has_duplicates(&picked_a) {
                trace!(slot, "skipping list-A pick with a repeated topic");
                continue;
            }

            let after_a = state.with_placed(&picked_a, slot);
            if picked_a
                .iter()
                .any(|&id| after_a.count(id) > table.required[id])
            {
                trace!(slot, "skipping list-A pick over quota");
                continue;
            }

            let list_b = &table.list_b;
            let eligible_b = generator.eligible(list_b, &after_a, slot);
            let combos_b = generator.combinations(
                list_b,
                &eligible_b,
                list_b.bounds.min,
                list_b.bounds.max,
                &after_a,
                &mut self.tie_break,
            );

            for combo_b in combos_b {
                let after_b = after_a.with_placed(&combo_b, slot);
                trace!(
                    slot,
                    list_a = ?table.names_of(&picked_a),
                    list_b = ?table.names_of(&combo_b),
                    "trying"
                );

                self.picks.push(SlotPick {
                    list_a: picked_a.clone(),
                    list_b: combo_b,
                });
                if let Some(done) = self.schedule_slot(slot + 1, &after_b) {
                    return Some(done);
                }
                self.picks.pop();
                self.stats.backtracks += 1;
            }
        }

        debug!(slot, "no combination fits, backtracking");
        None
    }

    /// Demand-versus-capacity and coupling feasibility checks.
    fn should_prune(&self, slot: usize, state: &SearchState) -> bool {
        let table = self.table;
        let slots_left = table.slot_count().saturating_sub(slot);

        for list in [&table.list_a, &table.list_b] {
            let demand: usize = list.ids.iter().map(|&id| state.remaining(id, table)).sum();
            let capacity = slots_left * list.bounds.max;
            if demand > capacity {
                debug!(
                    slot,
                    list = %list.name,
                    demand,
                    capacity,
                    "pruned: demand exceeds capacity"
                );
                return true;
            }
        }

        if let Some((primary, topic)) = table.coupling {
            let needed = state.remaining(topic, table);
            let triggers = table.primary_by_slot[slot.min(table.slot_count())..]
                .iter()
                .filter(|&&id| id == primary)
                .count();
            if needed > triggers {
                debug!(
                    slot,
                    topic = table.name(topic),
                    needed,
                    triggers,
                    "pruned: coupled topic can't be completed"
                );
                return true;
            }
        }

        false
    }

    fn forced_topic(&self, slot: usize, state: &SearchState) -> Option<TopicId> {
        let (primary, topic) = self.table.coupling?;
        (self.table.primary_by_slot[slot] == primary && state.remaining(topic, self.table) > 0)
            .then_some(topic)
    }
}

fn has_duplicates(ids: &[TopicId]) -> bool {
    ids.iter()
        .enumerate()
        .any(|(i, id)| ids[i + 1..].contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DomainModel, PrimaryList, SlotBounds, TopicList};

    fn four_slot_model() -> DomainModel {
        DomainModel::new(
            ["D1", "D2", "D3", "D4"],
            PrimaryList::from_order("P", ["p1", "p2", "p1", "p2"]),
            TopicList::new("A", SlotBounds::new(1, 2))
                .with_topic("x", 2)
                .with_topic("y", 2)
                .with_topic("z", 2),
            TopicList::new("B", SlotBounds::exactly(1))
                .with_topic("u", 2)
                .with_topic("v", 2),
        )
    }

    fn solve(model: &DomainModel) -> (Option<Vec<(Vec<String>, Vec<String>)>>, SearchStats) {
        let table = TopicTable::new(model).unwrap();
        let outcome = BacktrackingScheduler::new(&table, TieBreak::Fixed).run(table.initial_state());
        let picks = outcome.solution.map(|(picks, state)| {
            assert!(table.is_complete(&state));
            picks
                .iter()
                .map(|p| (table.names_of(&p.list_a), table.names_of(&p.list_b)))
                .collect()
        });
        (picks, outcome.stats)
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_small_model_solution() {
        let (picks, stats) = solve(&four_slot_model());
        let picks = picks.unwrap();
        assert_eq!(
            picks,
            vec![
                (names(&["x", "y"]), names(&["u"])),
                (names(&["z"]), names(&["v"])),
                (names(&["x", "y"]), names(&["u"])),
                (names(&["z"]), names(&["v"])),
            ]
        );
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.backtracks, 0);
    }

    #[test]
    fn test_coupling_forces_topic() {
        let mut model = four_slot_model();
        model.list_a.topics[2].name = "k".into();
        let model = model.with_coupling("p2", "k");
        let (picks, _) = solve(&model);
        let picks = picks.unwrap();
        assert_eq!(picks[1].0, names(&["k"]));
        assert_eq!(picks[3].0, names(&["k"]));
        assert!(!picks[0].0.contains(&"k".to_string()));
        assert!(!picks[2].0.contains(&"k".to_string()));
    }

    #[test]
    fn test_infeasible_model_exhausts() {
        // Three list-B topics must all sit on slots 0 and 2, two fit.
        let model = DomainModel::new(
            ["D1", "D2", "D3"],
            PrimaryList::from_order("P", ["p1", "p2", "p1"]),
            TopicList::new("A", SlotBounds::exactly(1))
                .with_topic("x", 2)
                .with_topic("y", 1),
            TopicList::new("B", SlotBounds::new(1, 2))
                .with_topic("u", 2)
                .with_topic("v", 2)
                .with_topic("w", 2),
        );
        let (picks, stats) = solve(&model);
        assert!(picks.is_none());
        assert!(stats.nodes > 1);
    }

    #[test]
    fn test_demand_prune_at_root() {
        let mut model = four_slot_model();
        // 9 placements needed, 4 slots * 2 = 8 capacity.
        model.list_a = model.list_a.with_topic("w", 3);
        let (picks, stats) = solve(&model);
        assert!(picks.is_none());
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.prunes, 1);
    }

    #[test]
    fn test_coupling_prune_at_root() {
        let mut model = four_slot_model();
        model.primary = PrimaryList::from_order("P", ["p1", "p2", "p1", "p3"]);
        let model = model.with_coupling("p2", "z");
        let (picks, stats) = solve(&model);
        assert!(picks.is_none());
        assert_eq!(stats.prunes, 1);
        assert_eq!(stats.nodes, 1);
    }

    #[test]
    fn test_recall_week_first_descent() {
        let (picks, stats) = solve(&DomainModel::recall_week());
        let picks = picks.unwrap();
        assert_eq!(picks.len(), 8);
        assert_eq!(stats.backtracks, 0);
        assert_eq!(
            picks[0].0,
            names(&["Transcription", "RNA-localisation", "Alternative-Splicing"])
        );
        assert_eq!(picks[1].0[0], "Chromatin");
        assert_eq!(picks[5].0[0], "Chromatin");
        assert_eq!(picks[7].0.len(), 2);
    }

    #[test]
    fn test_has_duplicates() {
        assert!(!has_duplicates(&[1, 2, 3]));
        assert!(has_duplicates(&[1, 2, 1]));
        assert!(!has_duplicates(&[]));
    }

    #[test]
    fn test_stats_absorb() {
        let mut total = SearchStats::default();
        total.absorb(SearchStats {
            nodes: 3,
            prunes: 1,
            backtracks: 2,
        });
        total.absorb(SearchStats {
            nodes: 1,
            prunes: 0,
            backtracks: 0,
        });
        assert_eq!(total.nodes, 4);
        assert_eq!(total.prunes, 1);
        assert_eq!(total.backtracks, 2);
    }
}
