//! Minimum toggle presses for the indicator-light half of a machine.
//!
//! Pressing a button toggles every light it wires, so pressing it twice
//! cancels out and only the subset of pressed buttons matters.

use crate::machine::Machine;

/// Subsets beyond this width cannot be enumerated with a u64 mask.
const MAX_ENUMERABLE_BUTTONS: usize = 63;

/// Smallest number of button presses whose toggles reproduce the machine's
/// light pattern exactly.
///
/// `None` when the machine has no light pattern, no subset matches, or the
/// button count exceeds the enumerable width.
pub fn min_toggle_presses(machine: &Machine) -> Option<u64> {
    let lights = machine.lights()?;
    let buttons = machine.buttons();
    if buttons.len() > MAX_ENUMERABLE_BUTTONS {
        return None;
    }

    let mut best: Option<u64> = None;
    for mask in 0u64..(1u64 << buttons.len()) {
        let mut state = vec![false; lights.len()];
        for (button, wiring) in buttons.iter().enumerate() {
            if mask & (1 << button) != 0 {
                for &light in wiring {
                    state[light] = !state[light];
                }
            }
        }

        if state == lights {
            let presses = u64::from(mask.count_ones());
            best = Some(best.map_or(presses, |b| b.min(presses)));
        }
    }

    best
}
