//! Scheduling domain models.
//!
//! Provides the static problem description and the solution types.
//!
//! # Concepts
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Slot` | One position in the fixed day sequence |
//! | `Topic` | Named unit with a required repeat count |
//! | `PrimaryList` | Fixed per-slot order, never searched |
//! | `TopicList` | Free list searched per slot, with per-slot bounds |
//! | `DomainModel` | Slots + three lists + gap + coupling |
//! | `Assignment` | Complete slot-to-topics mapping |
//! | `RepeatCounter` | Placements per topic |

mod assignment;
mod domain;
mod slot;
mod topic;

pub use assignment::{Assignment, RepeatCounter, SlotAssignment};
pub use domain::{Coupling, DomainModel};
pub use slot::Slot;
pub use topic::{Category, PrimaryList, SlotBounds, Topic, TopicList};
