//! Input validation for domain models.
//!
//! Checks that a `DomainModel` is self-consistent before any search runs,
//! so a provably infeasible model fails fast with a configuration error
//! instead of burning the whole attempt budget. Detects:
//! - Empty slot sequences
//! - Duplicate topic names (within or across lists)
//! - Primary order length mismatches and unknown topic references
//! - Inverted per-slot bounds
//! - Primary quotas that disagree with the fixed order
//! - Quota totals outside per-list slot capacity
//! - Quotas the gap makes impossible
//! - Coupling quotas that exceed the triggering primary occurrences
//! - Solo topics declared on list A
//!
//! Passing validation does not guarantee a schedule exists; it only
//! rules out the cheap-to-detect contradictions.
//!
//! # Reference
//! Dechter (2003), "Constraint Processing", Ch. 3: Consistency-Enforcing Algorithms

use std::collections::HashSet;
use std::fmt;

use crate::models::{DomainModel, TopicList};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The model has no slots.
    EmptyModel,
    /// Two topics share the same name.
    DuplicateTopic,
    /// Primary order length differs from the slot count.
    SequenceLength,
    /// A reference names a topic that doesn't exist in the expected list.
    UnknownTopic,
    /// A list's minimum per-slot count exceeds its maximum.
    InvalidBounds,
    /// A primary topic's quota disagrees with the fixed order.
    PrimaryQuota,
    /// A list's total quota doesn't fit the per-slot capacity.
    CapacityMismatch,
    /// A topic needs more repeats than the gap allows.
    GapUnsatisfiable,
    /// The coupled topic needs more repeats than the coupling can place.
    CouplingUnsatisfiable,
    /// Solo topics declared on a list that doesn't support them.
    MisplacedSoloTopic,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Largest number of placements a topic can get in `slots` slots when
/// consecutive placements must be at least `gap` apart.
pub fn max_placements(slots: usize, gap: usize) -> usize {
    if gap <= 1 {
        slots
    } else {
        slots.div_ceil(gap)
    }
}

/// Validates a domain model.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_model(model: &DomainModel) -> ValidationResult {
    let mut errors = Vec::new();
    let slots = model.slot_count();

    if slots == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyModel,
            "Model has no slots",
        ));
    }

    // Topic names are global keys
    let mut names = HashSet::new();
    let all_topics = model
        .primary
        .topics
        .iter()
        .chain(&model.list_a.topics)
        .chain(&model.list_b.topics);
    for topic in all_topics {
        if !names.insert(topic.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTopic,
                format!("Duplicate topic name: {}", topic.name),
            ));
        }
    }

    check_primary(model, &mut errors);
    check_list(model, &model.list_a, &mut errors);
    check_list(model, &model.list_b, &mut errors);
    check_coupling(model, &mut errors);

    // List A shares its slots with the forced coupled topic, so only
    // list B may hold solo topics.
    for solo in &model.list_a.solo_topics {
        errors.push(ValidationError::new(
            ValidationErrorKind::MisplacedSoloTopic,
            format!(
                "Solo topic '{}' declared on list '{}'; only '{}' may have solo topics",
                solo, model.list_a.name, model.list_b.name
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_primary(model: &DomainModel, errors: &mut Vec<ValidationError>) {
    let primary = &model.primary;

    if primary.order.len() != model.slot_count() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SequenceLength,
            format!(
                "Primary order '{}' has {} entries for {} slots",
                primary.name,
                primary.order.len(),
                model.slot_count()
            ),
        ));
    }

    for name in &primary.order {
        if primary.topic(name).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTopic,
                format!("Primary order references unknown topic '{name}'"),
            ));
        }
    }

    for topic in &primary.topics {
        let positions: Vec<usize> = primary
            .order
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == topic.name)
            .map(|(i, _)| i)
            .collect();

        if positions.len() != topic.repeats {
            errors.push(ValidationError::new(
                ValidationErrorKind::PrimaryQuota,
                format!(
                    "Primary topic '{}' requires {} repeats but the order places it {} times",
                    topic.name,
                    topic.repeats,
                    positions.len()
                ),
            ));
        }

        if positions.windows(2).any(|w| w[1] - w[0] < model.gap) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PrimaryQuota,
                format!(
                    "Primary topic '{}' repeats closer than the gap of {}",
                    topic.name, model.gap
                ),
            ));
        }
    }
}

fn check_list(model: &DomainModel, list: &TopicList, errors: &mut Vec<ValidationError>) {
    let slots = model.slot_count();
    let bounds = list.bounds;

    if bounds.min > bounds.max {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBounds,
            format!(
                "List '{}' has min {} above max {}",
                list.name, bounds.min, bounds.max
            ),
        ));
    }

    let total = list.total_repeats();
    if total > slots * bounds.max {
        errors.push(ValidationError::new(
            ValidationErrorKind::CapacityMismatch,
            format!(
                "List '{}' needs {} placements but {} slots hold at most {}",
                list.name,
                total,
                slots,
                slots * bounds.max
            ),
        ));
    }
    // Solo topics let a slot go below the minimum, so the floor only
    // binds without them.
    if list.solo_topics.is_empty() && total < slots * bounds.min {
        errors.push(ValidationError::new(
            ValidationErrorKind::CapacityMismatch,
            format!(
                "List '{}' has only {} placements but {} slots need at least {}",
                list.name,
                total,
                slots,
                slots * bounds.min
            ),
        ));
    }

    let limit = max_placements(slots, model.gap);
    for topic in &list.topics {
        if topic.repeats > limit {
            errors.push(ValidationError::new(
                ValidationErrorKind::GapUnsatisfiable,
                format!(
                    "Topic '{}' requires {} repeats but gap {} allows at most {} in {} slots",
                    topic.name, topic.repeats, model.gap, limit, slots
                ),
            ));
        }
    }

    for solo in &list.solo_topics {
        if list.topic(solo).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTopic,
                format!("Solo topic '{}' is not in list '{}'", solo, list.name),
            ));
        }
    }
}

fn check_coupling(model: &DomainModel, errors: &mut Vec<ValidationError>) {
    let Some(coupling) = &model.coupling else {
        return;
    };

    if model.primary.topic(&coupling.primary).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownTopic,
            format!(
                "Coupling primary '{}' is not in list '{}'",
                coupling.primary, model.primary.name
            ),
        ));
    }

    let Some(topic) = model.list_a.topic(&coupling.topic) else {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownTopic,
            format!(
                "Coupling topic '{}' is not in list '{}'",
                coupling.topic, model.list_a.name
            ),
        ));
        return;
    };

    let triggers = model.primary.occurrences_from(&coupling.primary, 0);
    if topic.repeats > triggers {
        errors.push(ValidationError::new(
            ValidationErrorKind::CouplingUnsatisfiable,
            format!(
                "Coupled topic '{}' requires {} repeats but '{}' occurs on only {} slots",
                topic.name, topic.repeats, coupling.primary, triggers
            ),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PrimaryList, SlotBounds, TopicList};

    fn small_model() -> DomainModel {
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

    fn kinds(model: &DomainModel) -> Vec<ValidationErrorKind> {
        validate_model(model)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_models() {
        assert!(validate_model(&small_model()).is_ok());
        assert!(validate_model(&DomainModel::recall_week()).is_ok());
    }

    #[test]
    fn test_empty_model() {
        let mut model = small_model();
        model.slots.clear();
        model.primary.order.clear();
        assert!(kinds(&model).contains(&ValidationErrorKind::EmptyModel));
    }

    #[test]
    fn test_duplicate_topic_across_lists() {
        let mut model = small_model();
        model.list_b = model.list_b.with_topic("x", 0);
        assert!(kinds(&model).contains(&ValidationErrorKind::DuplicateTopic));
    }

    #[test]
    fn test_sequence_length() {
        let mut model = small_model();
        model.slots.push("D5".into());
        assert!(kinds(&model).contains(&ValidationErrorKind::SequenceLength));
    }

    #[test]
    fn test_unknown_primary_in_order() {
        let mut model = small_model();
        model.primary.order[3] = "ghost".into();
        let k = kinds(&model);
        assert!(k.contains(&ValidationErrorKind::UnknownTopic));
        assert!(k.contains(&ValidationErrorKind::PrimaryQuota));
    }

    #[test]
    fn test_primary_gap_violation() {
        let mut model = small_model();
        model.primary = PrimaryList::from_order("P", ["p1", "p1", "p2", "p2"]);
        assert!(kinds(&model).contains(&ValidationErrorKind::PrimaryQuota));
    }

    #[test]
    fn test_invalid_bounds() {
        let mut model = small_model();
        model.list_a.bounds = SlotBounds::new(3, 2);
        assert!(kinds(&model).contains(&ValidationErrorKind::InvalidBounds));
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut model = small_model();
        model.list_b = model.list_b.with_topic("w", 1);
        let errors = validate_model(&model).unwrap_err();
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::CapacityMismatch && e.message.contains("at most")
        }));
    }

    #[test]
    fn test_capacity_floor() {
        let mut model = small_model();
        model.list_a.bounds = SlotBounds::exactly(2);
        model.list_a.topics.truncate(1);
        let errors = validate_model(&model).unwrap_err();
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::CapacityMismatch && e.message.contains("at least")
        }));
    }

    #[test]
    fn test_capacity_floor_relaxed_by_solo() {
        let mut model = small_model();
        model.list_b.bounds = SlotBounds::new(2, 2);
        model.list_b.topics.truncate(1);
        model.list_b.solo_topics.push("u".into());
        // Floor check skipped; the remaining errors are unrelated to capacity.
        let errors = validate_model(&model).err().unwrap_or_default();
        assert!(!errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CapacityMismatch));
    }

    #[test]
    fn test_gap_unsatisfiable() {
        let mut model = small_model();
        model.list_a.topics[0].repeats = 3;
        assert_eq!(max_placements(4, 2), 2);
        assert!(kinds(&model).contains(&ValidationErrorKind::GapUnsatisfiable));
    }

    #[test]
    fn test_max_placements() {
        assert_eq!(max_placements(8, 2), 4);
        assert_eq!(max_placements(7, 2), 4);
        assert_eq!(max_placements(8, 3), 3);
        assert_eq!(max_placements(5, 0), 5);
        assert_eq!(max_placements(5, 1), 5);
    }

    #[test]
    fn test_unknown_solo_topic() {
        let mut model = small_model();
        model.list_b.solo_topics.push("x".into());
        assert!(kinds(&model).contains(&ValidationErrorKind::UnknownTopic));
    }

    #[test]
    fn test_solo_topic_on_list_a_rejected() {
        let model = DomainModel::new(
            ["D1", "D2", "D3"],
            PrimaryList::from_order("P", ["p2", "p1", "p2"]),
            TopicList::new("A", SlotBounds::new(1, 2))
                .with_topic("k", 2)
                .with_topic("s", 2)
                .with_topic("x", 1)
                .with_solo_topic("s"),
            TopicList::new("B", SlotBounds::exactly(1))
                .with_topic("u", 2)
                .with_topic("v", 1),
        )
        .with_coupling("p2", "k");
        assert_eq!(
            kinds(&model),
            vec![ValidationErrorKind::MisplacedSoloTopic]
        );
    }

    #[test]
    fn test_coupling_unknown_topic() {
        let model = small_model().with_coupling("p2", "u");
        assert!(kinds(&model).contains(&ValidationErrorKind::UnknownTopic));
        let model = small_model().with_coupling("x", "y");
        assert!(kinds(&model).contains(&ValidationErrorKind::UnknownTopic));
    }

    #[test]
    fn test_coupling_unsatisfiable() {
        let mut model = small_model();
        model.primary = PrimaryList::from_order("P", ["p1", "p2", "p1", "p3"]);
        let model = model.with_coupling("p2", "x");
        assert_eq!(
            kinds(&model),
            vec![ValidationErrorKind::CouplingUnsatisfiable]
        );
    }

    #[test]
    fn test_multiple_errors() {
        let mut model = small_model();
        model.list_a.bounds = SlotBounds::new(3, 2);
        model.list_b = model.list_b.with_topic("u", 1);
        let errors = validate_model(&model).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
