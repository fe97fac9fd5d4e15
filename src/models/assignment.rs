//! Assignment (solution) model.
//!
//! An assignment maps every slot to its primary topic and the topics
//! chosen from both free lists. It is produced only for complete
//! solutions; partial search state never leaves the scheduler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Category, Slot};

/// Topics placed on one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// The slot.
    pub slot: Slot,
    /// The fixed primary topic.
    pub primary: String,
    /// Topics from list A (forced placement first, then searched picks).
    pub list_a: Vec<String>,
    /// Topics from list B.
    pub list_b: Vec<String>,
}

impl SlotAssignment {
    /// Creates a slot assignment with empty free lists.
    pub fn new(slot: Slot, primary: impl Into<String>) -> Self {
        Self {
            slot,
            primary: primary.into(),
            list_a: Vec::new(),
            list_b: Vec::new(),
        }
    }

    /// Topics of `category` on this slot.
    pub fn topics(&self, category: Category) -> &[String] {
        match category {
            Category::Primary => std::slice::from_ref(&self.primary),
            Category::A => &self.list_a,
            Category::B => &self.list_b,
        }
    }

    /// Total number of topics on this slot across all lists.
    pub fn total(&self) -> usize {
        1 + self.list_a.len() + self.list_b.len()
    }

    /// Whether `name` is placed on this slot in any list.
    pub fn contains(&self, name: &str) -> bool {
        self.primary == name
            || self.list_a.iter().any(|t| t == name)
            || self.list_b.iter().any(|t| t == name)
    }
}

/// A complete slot-by-slot assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// One entry per slot, in slot order.
    pub slots: Vec<SlotAssignment>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the assignment has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Topics of `category` on slot `index` (empty if out of range).
    pub fn topics(&self, index: usize, category: Category) -> &[String] {
        self.slots
            .get(index)
            .map(|s| s.topics(category))
            .unwrap_or(&[])
    }

    /// Slot indices holding `name`, ascending.
    pub fn occurrences(&self, name: &str) -> Vec<usize> {
        self.slots
            .iter()
            .filter(|s| s.contains(name))
            .map(|s| s.slot.index)
            .collect()
    }

    /// Counts placements per topic name, as found in the assignment.
    pub fn count_placements(&self) -> RepeatCounter {
        let mut counter = RepeatCounter::new();
        for slot in &self.slots {
            for category in Category::ALL {
                for name in slot.topics(category) {
                    counter.increment(name);
                }
            }
        }
        counter
    }
}

/// Number of slots each topic has been placed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepeatCounter(BTreeMap<String, usize>);

impl RepeatCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `name` (0 if never placed).
    pub fn get(&self, name: &str) -> usize {
        self.0.get(name).copied().unwrap_or(0)
    }

    /// Sets the count for `name`.
    pub fn set(&mut self, name: impl Into<String>, count: usize) {
        self.0.insert(name.into(), count);
    }

    /// Adds one placement of `name`.
    pub fn increment(&mut self, name: &str) {
        *self.0.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Iterates over `(name, count)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, usize)> for RepeatCounter {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Assignment {
        let mut a = SlotAssignment::new(Slot::new(0, "Mon"), "p");
        a.list_a = vec!["x".into(), "y".into()];
        a.list_b = vec!["u".into()];
        let mut b = SlotAssignment::new(Slot::new(1, "Tue"), "q");
        b.list_a = vec!["z".into()];
        b.list_b = vec!["v".into()];
        let mut c = SlotAssignment::new(Slot::new(2, "Wed"), "p");
        c.list_a = vec!["x".into()];
        c.list_b = vec!["u".into()];
        Assignment {
            slots: vec![a, b, c],
        }
    }

    #[test]
    fn test_occurrences() {
        let a = sample();
        assert_eq!(a.occurrences("x"), vec![0, 2]);
        assert_eq!(a.occurrences("p"), vec![0, 2]);
        assert_eq!(a.occurrences("v"), vec![1]);
        assert!(a.occurrences("none").is_empty());
    }

    #[test]
    fn test_topics_by_category() {
        let a = sample();
        assert_eq!(a.topics(0, Category::Primary), &["p".to_string()]);
        assert_eq!(a.topics(0, Category::A).len(), 2);
        assert!(a.topics(9, Category::B).is_empty());
        assert_eq!(a.slots[0].total(), 4);
    }

    #[test]
    fn test_count_placements() {
        let counter = sample().count_placements();
        assert_eq!(counter.get("x"), 2);
        assert_eq!(counter.get("z"), 1);
        assert_eq!(counter.get("missing"), 0);
        assert_eq!(counter.total(), 10);
    }

    #[test]
    fn test_counter_serializes_as_map() {
        let mut c = RepeatCounter::new();
        c.set("a", 2);
        c.increment("b");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"a":2,"b":1}"#);
    }
}
