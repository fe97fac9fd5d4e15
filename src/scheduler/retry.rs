//! Retry driver and public entry point.
//!
//! Each attempt starts from a fresh state with the primary topics
//! re-placed identically. With shuffling on, attempt `k` reseeds its tie
//! breaker from `base_seed + k`, so attempts explore different orders.
//! The attempt ceiling is the only bound on the search.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::backtrack::{BacktrackingScheduler, SearchStats, SlotPick};
use super::candidates::TieBreak;
use super::state::TopicTable;
use crate::error::ScheduleError;
use crate::models::{Assignment, DomainModel, RepeatCounter, SlotAssignment};
use crate::validation::{validate_model, ValidationError, ValidationErrorKind};

/// Default attempt ceiling.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Search knobs for one generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Attempt ceiling.
    pub max_attempts: usize,
    /// Randomize the order of equal-score combinations.
    pub shuffle: bool,
    /// Base seed for shuffling. `None` = fresh entropy per `generate` call.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            shuffle: false,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the attempt ceiling.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Enables or disables shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Sets the base seed (implies nothing about `shuffle`).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A successful generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    /// Complete slot-by-slot assignment.
    pub assignment: Assignment,
    /// Final placement counts (equal to the requirements).
    pub counter: RepeatCounter,
    /// 1-based number of the successful attempt.
    pub attempts: usize,
    /// Search counters summed over all attempts.
    pub stats: SearchStats,
}

/// Validated model plus search configuration.
///
/// # Example
///
/// ```
/// use recall_schedule::models::DomainModel;
/// use recall_schedule::scheduler::{ScheduleGenerator, SolverConfig};
///
/// let generator = ScheduleGenerator::new(DomainModel::recall_week(), SolverConfig::default())
///     .unwrap();
/// let schedule = generator.generate().unwrap();
/// assert_eq!(schedule.assignment.len(), 8);
/// assert_eq!(schedule.counter.get("Chromatin"), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    model: DomainModel,
    table: TopicTable,
    config: SolverConfig,
}

impl ScheduleGenerator {
    /// Validates `model` and prepares it for search.
    ///
    /// # Errors
    /// `ScheduleError::InvalidModel` listing every inconsistency found.
    pub fn new(model: DomainModel, config: SolverConfig) -> Result<Self, ScheduleError> {
        validate_model(&model).map_err(ScheduleError::InvalidModel)?;
        let table = compile(&model)?;
        Ok(Self {
            model,
            table,
            config,
        })
    }

    /// The model being scheduled.
    pub fn model(&self) -> &DomainModel {
        &self.model
    }

    /// The search configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs attempts until one succeeds or the ceiling is reached.
    ///
    /// # Errors
    /// `ScheduleError::Exhausted` if every attempt fails.
    pub fn generate(&self) -> Result<GeneratedSchedule, ScheduleError> {
        let base_seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());
        let mut stats = SearchStats::default();

        for attempt in 1..=self.config.max_attempts {
            let tie_break = if self.config.shuffle {
                TieBreak::shuffled(base_seed.wrapping_add(attempt as u64))
            } else {
                TieBreak::Fixed
            };

            let outcome =
                BacktrackingScheduler::new(&self.table, tie_break).run(self.table.initial_state());
            stats.absorb(outcome.stats);

            match outcome.solution {
                Some((picks, final_state)) => {
                    info!(attempt, nodes = stats.nodes, "schedule generated");
                    return Ok(GeneratedSchedule {
                        assignment: self.build_assignment(&picks),
                        counter: self.table.counter(&final_state),
                        attempts: attempt,
                        stats,
                    });
                }
                None => debug!(attempt, nodes = outcome.stats.nodes, "attempt failed"),
            }
        }

        info!(
            attempts = self.config.max_attempts,
            "no valid schedule within the attempt ceiling"
        );
        Err(ScheduleError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    fn build_assignment(&self, picks: &[SlotPick]) -> Assignment {
        let slots = self
            .model
            .iter_slots()
            .zip(picks)
            .zip(&self.table.primary_by_slot)
            .map(|((slot, pick), &primary)| SlotAssignment {
                slot,
                primary: self.table.name(primary).to_string(),
                list_a: self.table.names_of(&pick.list_a),
                list_b: self.table.names_of(&pick.list_b),
            })
            .collect();
        Assignment { slots }
    }
}

/// Interns `model` for search. Validation already rejects every model
/// this fails on.
fn compile(model: &DomainModel) -> Result<TopicTable, ScheduleError> {
    TopicTable::new(model).ok_or_else(|| {
        ScheduleError::InvalidModel(vec![ValidationError::new(
            ValidationErrorKind::UnknownTopic,
            "Model references a topic that no list defines",
        )])
    })
}

/// Generates a schedule for `model`.
///
/// Returns the complete assignment and its repeat counter, or fails with
/// `InvalidModel` (before searching) or `Exhausted` (after the ceiling).
pub fn generate_schedule(
    model: &DomainModel,
    config: &SolverConfig,
) -> Result<(Assignment, RepeatCounter), ScheduleError> {
    let generated = ScheduleGenerator::new(model.clone(), config.clone())?.generate()?;
    Ok((generated.assignment, generated.counter))
}
