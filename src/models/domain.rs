//! Domain model: the static input of one schedule generation.
//!
//! Bundles the slot sequence, the three topic lists, the minimum gap
//! between repeats, and the optional coupling between a primary topic and
//! a list-A topic. A `DomainModel` is immutable once built and is passed
//! explicitly to every component, so independent generations with
//! different models never share state.
//!
//! # Coupling
//! On every slot whose primary topic is `coupling.primary`, the list-A
//! topic `coupling.topic` is placed (while it still has quota left). The
//! coupled topic is placed by this rule only.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Category, PrimaryList, Slot, SlotBounds, TopicList};
use crate::error::ScheduleError;

/// Forced co-occurrence of a primary topic and a list-A topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupling {
    /// Primary topic that triggers the rule.
    pub primary: String,
    /// List-A topic forced onto the triggering slots.
    pub topic: String,
}

/// Complete static description of a scheduling problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainModel {
    /// Slot labels, in order. Slot `i` is identified by its index.
    pub slots: Vec<String>,
    /// Fixed-order primary list.
    pub primary: PrimaryList,
    /// First free list.
    pub list_a: TopicList,
    /// Second free list.
    pub list_b: TopicList,
    /// Minimum distance between two placements of the same topic.
    pub gap: usize,
    /// Primary/list-A coupling rule.
    #[serde(default)]
    pub coupling: Option<Coupling>,
}

impl DomainModel {
    /// Creates a model with the given slots and lists, gap 2 and no coupling.
    pub fn new<I, S>(slots: I, primary: PrimaryList, list_a: TopicList, list_b: TopicList) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: slots.into_iter().map(Into::into).collect(),
            primary,
            list_a,
            list_b,
            gap: 2,
            coupling: None,
        }
    }

    /// Sets the minimum gap between repeats.
    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the coupling rule.
    pub fn with_coupling(mut self, primary: impl Into<String>, topic: impl Into<String>) -> Self {
        self.coupling = Some(Coupling {
            primary: primary.into(),
            topic: topic.into(),
        });
        self
    }

    /// The built-in Monday-to-Monday active-recall week.
    ///
    /// Eight slots (the last one a second Monday), primary "M1" rotating
    /// four topics twice, "Biochem" with 2-3 topics per day and
    /// "Development" with exactly 2, gap 2, and Chromatin coupled to
    /// Rosana+Antoine.
    pub fn recall_week() -> Self {
        let slots = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
            "Monday2",
        ];
        let primary = PrimaryList::from_order(
            "M1",
            [
                "Farr",
                "Rosana+Antoine",
                "Russel+Flicek",
                "Segal",
                "Farr",
                "Rosana+Antoine",
                "Russel+Flicek",
                "Segal",
            ],
        );
        let biochem = TopicList::new("Biochem", SlotBounds::new(2, 3))
            .with_topic("Transcription", 3)
            .with_topic("Chromatin", 2)
            .with_topic("RNA-localisation", 3)
            .with_topic("Alternative-Splicing", 3)
            .with_topic("Translation-I", 3)
            .with_topic("RNA-Turnover", 3)
            .with_topic("Translation II + Small-RNAs", 3)
            .with_topic("Nuclear-Coordination", 3);
        let development = TopicList::new("Development", SlotBounds::exactly(2))
            .with_topic("Santos+Scarpa", 2)
            .with_topic("StJohnston", 2)
            .with_topic("Sanson", 2)
            .with_topic("Ahringer", 2)
            .with_topic("Steventon", 2)
            .with_topic("Boroviak", 2)
            .with_topic("Clark", 2)
            .with_topic("Teixera", 2);

        Self::new(slots, primary, biochem, development)
            .with_gap(2)
            .with_coupling("Rosana+Antoine", "Chromatin")
    }

    /// Parses a model from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON model file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Number of slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot at `index`, if any.
    pub fn slot(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).map(|label| Slot::new(index, label))
    }

    /// Iterates over all slots in order.
    pub fn iter_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, label)| Slot::new(index, label))
    }

    /// The free list for `category` (`None` for the primary list).
    pub fn list(&self, category: Category) -> Option<&TopicList> {
        match category {
            Category::A => Some(&self.list_a),
            Category::B => Some(&self.list_b),
            Category::Primary => None,
        }
    }

    /// Display name of the list for `category`.
    pub fn list_name(&self, category: Category) -> &str {
        match category {
            Category::A => &self.list_a.name,
            Category::B => &self.list_b.name,
            Category::Primary => &self.primary.name,
        }
    }

    /// Category of the topic called `name`.
    pub fn category_of(&self, name: &str) -> Option<Category> {
        if self.primary.topic(name).is_some() {
            Some(Category::Primary)
        } else if self.list_a.topic(name).is_some() {
            Some(Category::A)
        } else if self.list_b.topic(name).is_some() {
            Some(Category::B)
        } else {
            None
        }
    }

    /// Required repeat count of the topic called `name`.
    pub fn required(&self, name: &str) -> Option<usize> {
        self.primary
            .topic(name)
            .or_else(|| self.list_a.topic(name))
            .or_else(|| self.list_b.topic(name))
            .map(|t| t.repeats)
    }

    /// All topic names with their required repeat counts, primary first.
    pub fn requirements(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.primary
            .topics
            .iter()
            .chain(&self.list_a.topics)
            .chain(&self.list_b.topics)
            .map(|t| (t.name.as_str(), t.repeats))
    }
}

impl Default for DomainModel {
    fn default() -> Self {
        Self::recall_week()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recall_week_shape() {
        let model = DomainModel::recall_week();
        assert_eq!(model.slot_count(), 8);
        assert_eq!(model.primary.order.len(), 8);
        assert_eq!(model.list_a.topics.len(), 8);
        assert_eq!(model.list_b.topics.len(), 8);
        assert_eq!(model.list_a.total_repeats(), 23);
        assert_eq!(model.list_b.total_repeats(), 16);
        assert_eq!(model.required("Chromatin"), Some(2));
        assert_eq!(model.required("Farr"), Some(2));
        assert_eq!(model.required("nope"), None);
    }

    #[test]
    fn test_category_of() {
        let model = DomainModel::recall_week();
        assert_eq!(model.category_of("Segal"), Some(Category::Primary));
        assert_eq!(model.category_of("Transcription"), Some(Category::A));
        assert_eq!(model.category_of("Clark"), Some(Category::B));
        assert_eq!(model.category_of("Unknown"), None);
    }

    #[test]
    fn test_slots() {
        let model = DomainModel::recall_week();
        let last = model.slot(7).unwrap();
        assert_eq!(last.index, 7);
        assert_eq!(last.label, "Monday2");
        assert!(model.slot(8).is_none());
        assert_eq!(model.iter_slots().count(), 8);
    }

    #[test]
    fn test_json_roundtrip() {
        let model = DomainModel::recall_week();
        let json = serde_json::to_string(&model).unwrap();
        let back = DomainModel::from_json_str(&json).unwrap();
        assert_eq!(back.slots, model.slots);
        assert_eq!(back.coupling, model.coupling);
        assert_eq!(back.list_a.bounds, model.list_a.bounds);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "slots": ["D1", "D2"],
            "primary": { "name": "P", "topics": [{ "name": "p", "repeats": 1 }, { "name": "q", "repeats": 1 }], "order": ["p", "q"] },
            "list_a": { "name": "A", "topics": [], "bounds": { "min": 0, "max": 1 } },
            "list_b": { "name": "B", "topics": [], "bounds": { "min": 0, "max": 1 } },
            "gap": 2
        }"#;
        let model = DomainModel::from_json_str(json).unwrap();
        assert!(model.coupling.is_none());
        assert!(model.list_b.solo_topics.is_empty());
    }

    #[test]
    fn test_json_parse_error() {
        let err = DomainModel::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ScheduleError::Json(_)));
    }
}
