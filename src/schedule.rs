//! Replaying press schedules against a machine.
//!
//! A schedule assigns a press count to every button. Replaying it applies
//! each button's increments and classifies the result, which is how solver
//! answers are checked for feasibility.

use crate::machine::Machine;

/// Presses per button, indexed like `Machine::buttons`.
pub type PressSchedule = Vec<u64>;

/// How a replayed schedule relates to the machine's targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStatus {
    /// Every counter landed exactly on its target.
    Satisfied,
    /// A counter was pushed past its target.
    Overshot { counter: usize },
    /// A counter fell short of its target.
    Short { counter: usize },
}

/// Result of replaying one schedule.
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub status: ReplayStatus,
    /// Counter values after the replay (up to the point an overshoot was
    /// detected).
    pub counts: Vec<u64>,
    pub total_presses: u64,
}

impl ReplayResult {
    pub fn satisfied(&self) -> bool {
        self.status == ReplayStatus::Satisfied
    }
}

/// Apply a schedule button by button. A schedule shorter than the button
/// list leaves the remaining buttons unpressed; extra entries are ignored.
///
/// Increments are all positive, so a final count equal to the target means
/// the counter never exceeded it along the way.
pub fn replay(machine: &Machine, schedule: &[u64]) -> ReplayResult {
    let targets = machine.targets();
    let mut counts = vec![0u64; targets.len()];
    let mut total_presses = 0u64;

    for (wiring, &presses) in machine.buttons().iter().zip(schedule) {
        total_presses += presses;
        for &counter in wiring {
            counts[counter] += presses;
            if counts[counter] > targets[counter] {
                return ReplayResult {
                    status: ReplayStatus::Overshot { counter },
                    counts,
                    total_presses,
                };
            }
        }
    }

    for (counter, (&count, &target)) in counts.iter().zip(targets).enumerate() {
        if count < target {
            return ReplayResult {
                status: ReplayStatus::Short { counter },
                counts,
                total_presses,
            };
        }
    }

    ReplayResult {
        status: ReplayStatus::Satisfied,
        counts,
        total_presses,
    }
}

/// Does the schedule reach every target exactly?
pub fn verify_schedule(machine: &Machine, schedule: &[u64]) -> bool {
    replay(machine, schedule).satisfied()
}
