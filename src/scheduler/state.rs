//! Interned topic table and per-branch search state.
//!
//! Topic names are interned to dense ids once per generator so the
//! search works on small vectors. `SearchState` is a value type: each
//! choice point clones it before committing a combination, so a failed
//! branch can never leak counts into its siblings or ancestors.

use std::collections::HashMap;

use crate::models::{DomainModel, RepeatCounter, SlotBounds, TopicList};

/// Dense topic index into `TopicTable`.
pub(crate) type TopicId = usize;

/// One free list, resolved to topic ids.
#[derive(Debug, Clone)]
pub(crate) struct ListSpec {
    pub name: String,
    /// Topic ids in candidate order.
    pub ids: Vec<TopicId>,
    pub bounds: SlotBounds,
    pub solo: Vec<TopicId>,
}

impl ListSpec {
    fn resolve(list: &TopicList, index: &HashMap<&str, TopicId>) -> Option<Self> {
        let ids = list
            .topics
            .iter()
            .map(|t| index.get(t.name.as_str()).copied())
            .collect::<Option<Vec<_>>>()?;
        let solo = list
            .solo_topics
            .iter()
            .map(|name| index.get(name.as_str()).copied())
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            name: list.name.clone(),
            ids,
            bounds: list.bounds,
            solo,
        })
    }

    #[inline]
    pub fn is_solo(&self, id: TopicId) -> bool {
        self.solo.contains(&id)
    }
}

/// The domain model compiled for search.
#[derive(Debug, Clone)]
pub(crate) struct TopicTable {
    pub names: Vec<String>,
    pub required: Vec<usize>,
    /// Primary topic id of each slot.
    pub primary_by_slot: Vec<TopicId>,
    pub list_a: ListSpec,
    pub list_b: ListSpec,
    /// `(primary, list-A topic)` of the coupling rule.
    pub coupling: Option<(TopicId, TopicId)>,
    pub gap: usize,
}

impl TopicTable {
    /// Compiles a model. Returns `None` if a reference can't be resolved,
    /// which validation rules out.
    pub fn new(model: &DomainModel) -> Option<Self> {
        let mut names = Vec::new();
        let mut required = Vec::new();
        for (name, repeats) in model.requirements() {
            names.push(name.to_string());
            required.push(repeats);
        }

        let index: HashMap<&str, TopicId> = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.as_str(), id))
            .collect();

        let primary_by_slot = model
            .primary
            .order
            .iter()
            .map(|name| index.get(name.as_str()).copied())
            .collect::<Option<Vec<_>>>()?;

        let coupling = match &model.coupling {
            Some(c) => Some((
                *index.get(c.primary.as_str())?,
                *index.get(c.topic.as_str())?,
            )),
            None => None,
        };

        let list_a = ListSpec::resolve(&model.list_a, &index)?;
        let list_b = ListSpec::resolve(&model.list_b, &index)?;

        Some(Self {
            names,
            required,
            primary_by_slot,
            list_a,
            list_b,
            coupling,
            gap: model.gap,
        })
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.primary_by_slot.len()
    }

    #[inline]
    pub fn topic_count(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn name(&self, id: TopicId) -> &str {
        &self.names[id]
    }

    /// Whether `id` is placed only through the coupling rule.
    #[inline]
    pub fn is_coupled_topic(&self, id: TopicId) -> bool {
        self.coupling.is_some_and(|(_, topic)| topic == id)
    }

    /// Fresh state with every primary topic placed on its slot.
    pub fn initial_state(&self) -> SearchState {
        let mut state = SearchState::empty(self.topic_count());
        for (slot, &id) in self.primary_by_slot.iter().enumerate() {
            state.place(id, slot);
        }
        state
    }

    /// Whether every topic has exactly its required count.
    pub fn is_complete(&self, state: &SearchState) -> bool {
        state.counts == self.required
    }

    /// Converts final counts back to names.
    pub fn counter(&self, state: &SearchState) -> RepeatCounter {
        self.names
            .iter()
            .cloned()
            .zip(state.counts.iter().copied())
            .collect()
    }

    /// Resolves ids to names.
    pub fn names_of(&self, ids: &[TopicId]) -> Vec<String> {
        ids.iter().map(|&id| self.names[id].clone()).collect()
    }
}

/// Placement counts and last-placement slots of one search branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchState {
    counts: Vec<usize>,
    /// `None` = never placed; the gap holds trivially.
    last_seen: Vec<Option<usize>>,
}

impl SearchState {
    pub fn empty(topic_count: usize) -> Self {
        Self {
            counts: vec![0; topic_count],
            last_seen: vec![None; topic_count],
        }
    }

    #[inline]
    pub fn count(&self, id: TopicId) -> usize {
        self.counts[id]
    }

    #[inline]
    pub fn last_seen(&self, id: TopicId) -> Option<usize> {
        self.last_seen[id]
    }

    /// Placements still owed to `id`.
    #[inline]
    pub fn remaining(&self, id: TopicId, table: &TopicTable) -> usize {
        table.required[id].saturating_sub(self.counts[id])
    }

    /// Quota left and gap satisfied at `slot`.
    pub fn is_eligible(&self, id: TopicId, slot: usize, table: &TopicTable) -> bool {
        self.counts[id] < table.required[id]
            && self.last_seen[id].map_or(true, |last| slot.saturating_sub(last) >= table.gap)
    }

    pub fn place(&mut self, id: TopicId, slot: usize) {
        self.counts[id] += 1;
        self.last_seen[id] = Some(slot);
    }

    /// Copy of this state with `ids` placed on `slot`.
    pub fn with_placed(&self, ids: &[TopicId], slot: usize) -> Self {
        let mut next = self.clone();
        for &id in ids {
            next.place(id, slot);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_from_recall_week() {
        let model = DomainModel::recall_week();
        let table = TopicTable::new(&model).unwrap();
        assert_eq!(table.slot_count(), 8);
        assert_eq!(table.topic_count(), 4 + 8 + 8);
        assert_eq!(table.list_a.ids.len(), 8);
        let (primary, topic) = table.coupling.unwrap();
        assert_eq!(table.name(primary), "Rosana+Antoine");
        assert_eq!(table.name(topic), "Chromatin");
        assert!(table.is_coupled_topic(topic));
        assert!(!table.is_coupled_topic(primary));
    }

    #[test]
    fn test_unresolvable_model() {
        let mut model = DomainModel::recall_week();
        model.primary.order[0] = "ghost".into();
        assert!(TopicTable::new(&model).is_none());
    }

    #[test]
    fn test_initial_state_places_primary() {
        let table = TopicTable::new(&DomainModel::recall_week()).unwrap();
        let state = table.initial_state();
        let farr = table.primary_by_slot[0];
        assert_eq!(state.count(farr), 2);
        assert_eq!(state.last_seen(farr), Some(4));
        assert_eq!(state.remaining(farr, &table), 0);
        assert!(!table.is_complete(&state));
    }

    #[test]
    fn test_eligibility_respects_gap_and_quota() {
        let table = TopicTable::new(&DomainModel::recall_week()).unwrap();
        let id = table.list_b.ids[0];
        let mut state = table.initial_state();
        assert!(state.is_eligible(id, 0, &table));

        state.place(id, 0);
        assert!(!state.is_eligible(id, 1, &table));
        assert!(state.is_eligible(id, 2, &table));

        state.place(id, 2);
        assert!(!state.is_eligible(id, 5, &table));
    }

    #[test]
    fn test_with_placed_leaves_parent_untouched() {
        let table = TopicTable::new(&DomainModel::recall_week()).unwrap();
        let parent = table.initial_state();
        let ids = [table.list_a.ids[0], table.list_a.ids[2]];
        let child = parent.with_placed(&ids, 3);
        assert_eq!(child.count(ids[0]), 1);
        assert_eq!(child.last_seen(ids[1]), Some(3));
        assert_eq!(parent.count(ids[0]), 0);
        assert_eq!(parent.last_seen(ids[1]), None);
    }
}
