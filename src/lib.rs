//! Bounded minimum-press solver for button-counter machines.
//!
//! Each machine line pairs counter targets with buttons that increment a
//! fixed subset of counters by one per press. The solver finds the minimum
//! total number of presses reaching the targets exactly, within an
//! explicit node budget, and separately minimizes toggle presses for the
//! line's indicator-light pattern.

pub mod cache;
pub mod lights;
pub mod machine;
pub mod propagate;
pub mod schedule;
pub mod solver;

// Re-export main types
pub use cache::AnswerCache;
pub use lights::min_toggle_presses;
pub use machine::{Button, Machine, ParseError};
pub use propagate::{propagate, PressBounds};
pub use schedule::{replay, verify_schedule, PressSchedule, ReplayResult, ReplayStatus};
pub use solver::{solve, Outcome, SolveReport, SolverConfig};
