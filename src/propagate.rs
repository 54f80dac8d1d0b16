//! Press-bound tightening used by the search driver.
//!
//! Each counter's remaining deficit must be covered exactly by the presses
//! of the buttons wired to it. Repeatedly narrowing every button's press
//! range against those sum constraints shrinks the branching factor before
//! the driver commits to anything, and detects many dead branches outright.

use smallvec::{smallvec, SmallVec};

use crate::machine::Machine;

/// Per-button press-count bounds for one search branch.
///
/// A branch clones its parent's bounds before committing a press count, so
/// sibling branches never observe each other's tightenings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressBounds {
    pub min: SmallVec<[u64; 16]>,
    pub max: SmallVec<[u64; 16]>,
}

impl PressBounds {
    /// Starting bounds: no lower bound, and no button pressed more often
    /// than the tightest counter it touches allows.
    pub fn initial(machine: &Machine) -> Self {
        let min = smallvec![0; machine.button_count()];
        let max = machine
            .buttons()
            .iter()
            .map(|wiring| {
                wiring
                    .iter()
                    .map(|&counter| machine.targets()[counter])
                    .min()
                    .unwrap_or(0)
            })
            .collect();

        Self { min, max }
    }

    /// How much room a button's press count still has.
    pub fn slack(&self, button: usize) -> u64 {
        self.max[button] - self.min[button]
    }

    /// Pin a button's press count to a single value.
    pub fn fix(&mut self, button: usize, presses: u64) {
        self.min[button] = presses;
        self.max[button] = presses;
    }
}

/// Tighten `bounds` against the remaining counter deficits until a full
/// pass changes nothing, in place.
///
/// Returns `false` iff the bounds are proven infeasible. `true` only means
/// "not refuted" - this prunes, it does not solve; a button's press count
/// is committed only when its range collapses to a single value.
pub fn propagate(machine: &Machine, deficits: &[u64], bounds: &mut PressBounds) -> bool {
    let mut changed = true;
    while changed {
        changed = false;
        for counter in 0..machine.counter_count() {
            let deficit = deficits[counter];
            if deficit == 0 {
                continue;
            }

            let active: SmallVec<[usize; 16]> = (0..machine.button_count())
                .filter(|&button| machine.affects(counter, button) && bounds.max[button] > 0)
                .collect();

            if active.is_empty() {
                // Nonzero deficit with nothing left to cover it.
                return false;
            }

            if active.len() == 1 {
                let only = active[0];
                if deficit < bounds.min[only] || deficit > bounds.max[only] {
                    return false;
                }
                if bounds.min[only] != deficit || bounds.max[only] != deficit {
                    bounds.fix(only, deficit);
                    changed = true;
                }
            }

            for &button in &active {
                // The other covering buttons can contribute at most the sum
                // of their upper bounds, and at least the sum of their lower
                // bounds; both sums saturate so a tightening can only ever
                // be looser than the true one.
                let others_max = active
                    .iter()
                    .filter(|&&other| other != button)
                    .fold(0u64, |sum, &other| sum.saturating_add(bounds.max[other]));
                let needed = deficit.saturating_sub(others_max);
                if needed > bounds.max[button] {
                    return false;
                }
                if needed > bounds.min[button] {
                    bounds.min[button] = needed;
                    changed = true;
                }

                let others_min = active
                    .iter()
                    .filter(|&&other| other != button)
                    .fold(0u64, |sum, &other| sum.saturating_add(bounds.min[other]));
                if others_min > deficit {
                    return false;
                }
                let allowed = deficit - others_min;
                if allowed < bounds.min[button] {
                    return false;
                }
                if allowed < bounds.max[button] {
                    bounds.max[button] = allowed;
                    changed = true;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Machine {
        // Targets [2, 3] covered by buttons {0}, {1}, {0,1}; the known
        // minimum schedule is presses [0, 1, 2].
        Machine::new(None, vec![2, 3], vec![vec![0], vec![1], vec![0, 1]]).unwrap()
    }

    #[test]
    fn test_initial_bounds() {
        let machine = fixture();
        let bounds = PressBounds::initial(&machine);

        assert_eq!(bounds.min.as_slice(), &[0, 0, 0]);
        assert_eq!(bounds.max.as_slice(), &[2, 3, 2]);
    }

    #[test]
    fn test_sum_constraint_tightens_lower_bound() {
        let machine = fixture();
        let mut bounds = PressBounds::initial(&machine);

        assert!(propagate(&machine, &[2, 3], &mut bounds));
        // Counter 1 needs 3 but button {0,1} can give at most 2, so button
        // {1} must be pressed at least once.
        assert_eq!(bounds.min.as_slice(), &[0, 1, 0]);
        assert_eq!(bounds.max.as_slice(), &[2, 3, 2]);
    }

    #[test]
    fn test_never_excludes_known_solution() {
        let machine = fixture();
        let mut bounds = PressBounds::initial(&machine);
        assert!(propagate(&machine, &[2, 3], &mut bounds));

        let known = [0u64, 1, 2];
        for (button, &presses) in known.iter().enumerate() {
            assert!(bounds.min[button] <= presses);
            assert!(presses <= bounds.max[button]);
        }
    }

    #[test]
    fn test_idempotent_at_fixpoint() {
        let machine = fixture();
        let mut bounds = PressBounds::initial(&machine);
        assert!(propagate(&machine, &[2, 3], &mut bounds));

        let fixpoint = bounds.clone();
        assert!(propagate(&machine, &[2, 3], &mut bounds));
        assert_eq!(bounds, fixpoint);
    }

    #[test]
    fn test_uncovered_counter_is_infeasible() {
        let machine = Machine::new(None, vec![1], vec![]).unwrap();
        let mut bounds = PressBounds::initial(&machine);

        assert!(!propagate(&machine, &[1], &mut bounds));
    }

    #[test]
    fn test_single_button_collapses_to_deficit() {
        let machine = Machine::new(None, vec![5], vec![vec![0]]).unwrap();
        let mut bounds = PressBounds::initial(&machine);

        assert!(propagate(&machine, &[5], &mut bounds));
        assert_eq!(bounds.min.as_slice(), &[5]);
        assert_eq!(bounds.max.as_slice(), &[5]);
    }

    #[test]
    fn test_contradictory_single_cover_is_infeasible() {
        // One button covers both counters but the targets differ.
        let machine = Machine::new(None, vec![1, 2], vec![vec![0, 1]]).unwrap();
        let mut bounds = PressBounds::initial(&machine);

        assert!(!propagate(&machine, &[1, 2], &mut bounds));
    }
}
