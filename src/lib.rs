//! Active-recall study scheduler.
//!
//! Assigns recurring study topics from three lists onto a fixed sequence
//! of day slots. Every topic must appear on exactly its required number
//! of slots, at least `gap` slots apart, within per-slot count bounds,
//! with one primary topic forcing a coupled list-A topic onto its days.
//! The search is exhaustive depth-first backtracking with demand-based
//! pruning and demand-ordered candidates, wrapped in a bounded retry loop.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `DomainModel`, `TopicList`, `PrimaryList`,
//!   `Slot`, `Assignment`, `RepeatCounter`
//! - **`validation`**: Startup consistency checks of a `DomainModel`
//! - **`scheduler`**: Candidate generation, backtracking, retry driver, audit
//! - **`render`**: Plain-text and SVG presentation
//! - **`error`**: `ScheduleError`
//!
//! # References
//!
//! - Dechter (2003), "Constraint Processing"
//! - Karpicke & Roediger (2008), "The Critical Importance of Retrieval for Learning"
//!
//! # Example
//!
//! ```
//! use recall_schedule::models::DomainModel;
//! use recall_schedule::scheduler::{generate_schedule, SolverConfig};
//!
//! let model = DomainModel::recall_week();
//! let (assignment, counter) = generate_schedule(&model, &SolverConfig::default()).unwrap();
//! assert_eq!(assignment.occurrences("Chromatin"), vec![1, 5]);
//! assert_eq!(counter.get("Transcription"), 3);
//! ```

pub mod error;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
