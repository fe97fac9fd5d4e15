//! Post-hoc schedule audit.
//!
//! Re-checks a finished assignment against its domain model and reports
//! warnings. The audit is diagnostic only: it never rejects a schedule
//! and is not what guarantees correctness (the search does that).
//!
//! # Checks
//!
//! | Warning | Condition |
//! |---------|-----------|
//! | RepeatMismatch | Topic placed on a different number of slots than required |
//! | CounterMismatch | Reported counter disagrees with the assignment |
//! | SlotBounds | Free-list size outside bounds (solo singleton accepted), or no primary |
//! | DuplicateTopic | Same topic twice within one slot's list |
//! | SoloShared | Solo topic placed alongside another topic of its list |
//! | GapViolation | Consecutive placements closer than the gap |
//! | CouplingBroken | Coupled topic missing from a triggering slot, or placed elsewhere |

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Assignment, Category, DomainModel, RepeatCounter};

/// Kinds of audit warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditWarningKind {
    /// A topic occupies a different number of slots than required.
    RepeatMismatch,
    /// The reported counter disagrees with the placements in the schedule.
    CounterMismatch,
    /// A free list's size on a slot is outside its bounds, or the primary
    /// topic is missing.
    SlotBounds,
    /// A topic is listed twice within one slot's list.
    DuplicateTopic,
    /// A solo topic shares its slot with another topic of the same list.
    SoloShared,
    /// Two consecutive placements of a topic are closer than the gap.
    GapViolation,
    /// The coupled topic is missing from a triggering slot or placed on
    /// another slot.
    CouplingBroken,
}

/// One audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Warning category.
    pub kind: AuditWarningKind,
    /// Slot index the warning is about, if slot-specific.
    pub slot: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Audit report for one assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleAudit {
    /// Findings in check order: repeats, slots, coupling.
    pub warnings: Vec<AuditWarning>,
}

impl ScheduleAudit {
    /// Audits `assignment` and `counter` against `model`.
    pub fn inspect(assignment: &Assignment, counter: &RepeatCounter, model: &DomainModel) -> Self {
        let mut audit = Self::default();
        audit.check_repeats(assignment, counter, model);
        audit.check_slots(assignment, model);
        audit.check_coupling(assignment, model);
        audit
    }

    /// Whether no warnings were found.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Warnings of one kind.
    pub fn of_kind(&self, kind: AuditWarningKind) -> impl Iterator<Item = &AuditWarning> + '_ {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// Emits every warning through `tracing`.
    pub fn log(&self) {
        for w in &self.warnings {
            warn!(kind = ?w.kind, slot = ?w.slot, "{}", w.message);
        }
    }

    fn push(&mut self, kind: AuditWarningKind, slot: Option<usize>, message: String) {
        self.warnings.push(AuditWarning {
            kind,
            slot,
            message,
        });
    }

    fn check_repeats(&mut self, assignment: &Assignment, counter: &RepeatCounter, model: &DomainModel) {
        self.check_counter(assignment, counter, model);

        for (name, required) in model.requirements() {
            let slots = assignment.occurrences(name);
            if slots.len() != required {
                self.push(
                    AuditWarningKind::RepeatMismatch,
                    None,
                    format!(
                        "'{}' repeated {} times (expected {})",
                        name,
                        slots.len(),
                        required
                    ),
                );
            }
            for pair in slots.windows(2) {
                if pair[1] - pair[0] < model.gap {
                    self.push(
                        AuditWarningKind::GapViolation,
                        Some(pair[1]),
                        format!(
                            "'{}' on slots {} and {} (gap {})",
                            name, pair[0], pair[1], model.gap
                        ),
                    );
                }
            }
        }
    }

    fn check_counter(&mut self, assignment: &Assignment, counter: &RepeatCounter, model: &DomainModel) {
        let placed = assignment.count_placements();
        for (name, _) in model.requirements() {
            if counter.get(name) != placed.get(name) {
                self.push(
                    AuditWarningKind::CounterMismatch,
                    None,
                    format!(
                        "counter reports {} for '{}' but the schedule holds {}",
                        counter.get(name),
                        name,
                        placed.get(name)
                    ),
                );
            }
        }
        for (name, count) in counter.iter() {
            if count > 0 && model.required(name).is_none() {
                self.push(
                    AuditWarningKind::CounterMismatch,
                    None,
                    format!("counter reports {} for unknown topic '{}'", count, name),
                );
            }
        }
    }

    fn check_slots(&mut self, assignment: &Assignment, model: &DomainModel) {
        for slot in &assignment.slots {
            let label = &slot.slot.label;
            let index = Some(slot.slot.index);

            if slot.primary.is_empty() {
                self.push(
                    AuditWarningKind::SlotBounds,
                    index,
                    format!("{} has no {} topic", label, model.primary.name),
                );
            }

            for category in [Category::A, Category::B] {
                let Some(list) = model.list(category) else {
                    continue;
                };
                let topics = slot.topics(category);
                let solo_alone = topics.len() == 1 && list.is_solo(&topics[0]);
                if !list.bounds.contains(topics.len()) && !solo_alone {
                    self.push(
                        AuditWarningKind::SlotBounds,
                        index,
                        format!("{} topics on {} = {}", list.name, label, topics.len()),
                    );
                }

                if topics.len() > 1 {
                    for solo in topics.iter().filter(|t| list.is_solo(t)) {
                        self.push(
                            AuditWarningKind::SoloShared,
                            index,
                            format!(
                                "solo topic '{}' shares {} on {} with {} other topic(s)",
                                solo,
                                list.name,
                                label,
                                topics.len() - 1
                            ),
                        );
                    }
                }

                for (i, t) in topics.iter().enumerate() {
                    if topics[i + 1..].contains(t) {
                        self.push(
                            AuditWarningKind::DuplicateTopic,
                            index,
                            format!("'{}' listed twice in {} on {}", t, list.name, label),
                        );
                    }
                }
            }
        }
    }

    fn check_coupling(&mut self, assignment: &Assignment, model: &DomainModel) {
        let Some(coupling) = &model.coupling else {
            return;
        };
        for slot in &assignment.slots {
            let triggered = slot.primary == coupling.primary;
            let present = slot.list_a.iter().any(|t| *t == coupling.topic);
            if triggered != present {
                self.push(
                    AuditWarningKind::CouplingBroken,
                    Some(slot.slot.index),
                    if triggered {
                        format!(
                            "'{}' missing on {} alongside '{}'",
                            coupling.topic, slot.slot.label, coupling.primary
                        )
                    } else {
                        format!(
                            "'{}' placed on {} without '{}'",
                            coupling.topic, slot.slot.label, coupling.primary
                        )
                    },
                );
            }
        }
    }
}
