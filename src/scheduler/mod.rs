//! Backtracking scheduler, retry driver, and schedule audit.
//!
//! # Pipeline
//!
//! `DomainModel` → topic table → candidate generator → backtracking
//! search → retry driver → `Assignment` + `RepeatCounter`.
//!
//! # Algorithm
//!
//! Slots are assigned in order. At each slot the primary topic is fixed,
//! the coupled list-A topic may be forced, and the remaining list-A and
//! list-B picks are searched over demand-ordered combinations with
//! depth-first backtracking. Demand-versus-capacity pruning cuts branches
//! that can no longer complete. Each choice point works on a copy of the
//! search state, so failed branches leave no trace.
//!
//! # Errors
//!
//! A dead end is internal and handled by backtracking. Only an invalid
//! model (`ScheduleError::InvalidModel`) or an exhausted attempt budget
//! (`ScheduleError::Exhausted`) reaches the caller.
//!
//! # Audit
//!
//! `ScheduleAudit` re-checks a finished schedule and reports warnings;
//! it is diagnostic only.
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Dechter (2003), "Constraint Processing", Ch. 5-6

mod audit;
mod backtrack;
mod candidates;
mod retry;
mod state;

pub use audit::{AuditWarning, AuditWarningKind, ScheduleAudit};
pub use backtrack::SearchStats;
pub use retry::{
    generate_schedule, GeneratedSchedule, ScheduleGenerator, SolverConfig, DEFAULT_MAX_ATTEMPTS,
};
