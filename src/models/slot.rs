//! Slot model.
//!
//! A slot is one ordinal position in the fixed sequence of days. Labels
//! may repeat a weekday name (a Monday-to-Monday week ends on "Monday2"),
//! but slots are never treated as a cycle: slot 7 is not adjacent to slot 0.

use serde::{Deserialize, Serialize};

/// One position in the slot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// 0-based ordinal position.
    pub index: usize,
    /// Display label (e.g. "Tuesday").
    pub label: String,
}

impl Slot {
    /// Creates a slot.
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}
