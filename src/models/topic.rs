//! Topic and topic-list models.
//!
//! A topic is a named unit of study that must be revisited a fixed number
//! of times over the scheduling horizon. Topics are grouped into three
//! lists: one primary list with a fixed per-slot order, and two free
//! lists whose per-slot composition is chosen by search.

use serde::{Deserialize, Serialize};

/// Which list a topic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Fixed-order list: exactly one topic per slot, never searched.
    Primary,
    /// First free list (searched first at every slot).
    A,
    /// Second free list (searched inside each list-A choice).
    B,
}

impl Category {
    /// All categories in display order (free lists first, primary last).
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::Primary];
}

/// A topic with its required repeat count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic name (the key used everywhere else).
    pub name: String,
    /// Number of slots this topic must occupy, exactly.
    pub repeats: usize,
}

impl Topic {
    /// Creates a topic.
    pub fn new(name: impl Into<String>, repeats: usize) -> Self {
        Self {
            name: name.into(),
            repeats,
        }
    }
}

/// Inclusive bounds on how many topics of one list a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBounds {
    /// Minimum topics per slot.
    pub min: usize,
    /// Maximum topics per slot.
    pub max: usize,
}

impl SlotBounds {
    /// Creates bounds `[min, max]`.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Bounds allowing exactly `n` topics.
    pub fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Whether `count` lies within the bounds.
    #[inline]
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

/// A free (searched) topic list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicList {
    /// Display name of the list (e.g. "Biochem").
    pub name: String,
    /// Topics in candidate order.
    pub topics: Vec<Topic>,
    /// Per-slot topic count bounds.
    pub bounds: SlotBounds,
    /// Topics that must be the only topic of this list on their slot.
    #[serde(default)]
    pub solo_topics: Vec<String>,
}

impl TopicList {
    /// Creates an empty list with the given bounds.
    pub fn new(name: impl Into<String>, bounds: SlotBounds) -> Self {
        Self {
            name: name.into(),
            topics: Vec::new(),
            bounds,
            solo_topics: Vec::new(),
        }
    }

    /// Adds a topic.
    pub fn with_topic(mut self, name: impl Into<String>, repeats: usize) -> Self {
        self.topics.push(Topic::new(name, repeats));
        self
    }

    /// Marks a topic as solo.
    pub fn with_solo_topic(mut self, name: impl Into<String>) -> Self {
        self.solo_topics.push(name.into());
        self
    }

    /// Finds a topic by name.
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Sum of all repeat counts in the list.
    pub fn total_repeats(&self) -> usize {
        self.topics.iter().map(|t| t.repeats).sum()
    }

    /// Whether `name` is a solo topic.
    pub fn is_solo(&self, name: &str) -> bool {
        self.solo_topics.iter().any(|s| s == name)
    }
}

/// The fixed-order primary list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryList {
    /// Display name of the list (e.g. "M1").
    pub name: String,
    /// Primary topics and their repeat counts.
    pub topics: Vec<Topic>,
    /// `order[i]` is the primary topic placed on slot `i`.
    pub order: Vec<String>,
}

impl PrimaryList {
    /// Creates a primary list from a per-slot order.
    ///
    /// Each distinct topic's repeat count is its number of occurrences in
    /// `order`, in first-occurrence order.
    pub fn from_order<I, S>(name: impl Into<String>, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order: Vec<String> = order.into_iter().map(Into::into).collect();
        let mut topics: Vec<Topic> = Vec::new();
        for name in &order {
            match topics.iter_mut().find(|t| &t.name == name) {
                Some(topic) => topic.repeats += 1,
                None => topics.push(Topic::new(name.clone(), 1)),
            }
        }
        Self {
            name: name.into(),
            topics,
            order,
        }
    }

    /// Finds a topic by name.
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Number of slots at or after `from_slot` whose primary topic is `name`.
    pub fn occurrences_from(&self, name: &str, from_slot: usize) -> usize {
        self.order
            .iter()
            .skip(from_slot)
            .filter(|t| t.as_str() == name)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_bounds_contains() {
        let b = SlotBounds::new(2, 3);
        assert!(!b.contains(1));
        assert!(b.contains(2));
        assert!(b.contains(3));
        assert!(!b.contains(4));
        assert!(SlotBounds::exactly(2).contains(2));
    }

    #[test]
    fn test_primary_from_order_counts_repeats() {
        let p = PrimaryList::from_order("M1", ["a", "b", "a", "c"]);
        assert_eq!(p.topics.len(), 3);
        assert_eq!(p.topic("a").map(|t| t.repeats), Some(2));
        assert_eq!(p.topic("c").map(|t| t.repeats), Some(1));
        assert_eq!(p.occurrences_from("a", 1), 1);
        assert_eq!(p.occurrences_from("a", 0), 2);
    }

    #[test]
    fn test_topic_list_builder() {
        let list = TopicList::new("Dev", SlotBounds::exactly(2))
            .with_topic("x", 2)
            .with_topic("y", 3)
            .with_solo_topic("y");
        assert_eq!(list.total_repeats(), 5);
        assert!(list.is_solo("y"));
        assert!(!list.is_solo("x"));
        assert!(list.topic("z").is_none());
    }
}
