//! Bounded minimum-press search for one machine.
//!
//! The driver runs iterative deepening over the total press budget: the
//! smallest budget admitting an exact cover of the targets is the minimum,
//! so the first success is optimal by construction. Every search node
//! re-propagates press bounds to shrink the ranges of the buttons still to
//! be assigned, and a node budget caps each deepening pass so a hard
//! machine yields `BudgetExceeded` instead of running away.

use std::time::Instant;

use smallvec::{smallvec, SmallVec};

use crate::machine::Machine;
use crate::propagate::{propagate, PressBounds};
use crate::schedule::PressSchedule;

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum search nodes per deepening pass.
    pub node_limit: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_limit: 50_000_000,
        }
    }
}

/// What the search concluded about a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Minimum total presses reaching every target exactly.
    Solved(u64),
    /// No press schedule reaches the targets.
    Infeasible,
    /// The node budget ran out before a conclusion. Not an error: the
    /// caller may retry with a larger limit or leave the machine
    /// unresolved.
    BudgetExceeded,
}

/// Result of one solve call.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: Outcome,
    /// Presses per button for the found minimum, in button order.
    pub schedule: Option<PressSchedule>,
    /// Nodes explored across all deepening passes.
    pub nodes_explored: u64,
    pub time_elapsed_ms: u64,
}

/// Find the minimum total press count for a machine.
pub fn solve(machine: &Machine, config: &SolverConfig) -> SolveReport {
    let start_time = Instant::now();

    let mut initial = PressBounds::initial(machine);
    if !propagate(machine, machine.targets(), &mut initial) {
        return SolveReport {
            outcome: Outcome::Infeasible,
            schedule: None,
            nodes_explored: 0,
            time_elapsed_ms: elapsed_ms(start_time),
        };
    }

    // Most-constrained-first: buttons with the narrowest press range
    // branch least.
    let mut order: Vec<usize> = (0..machine.button_count()).collect();
    order.sort_by_key(|&button| initial.slack(button));

    let mut search = Search {
        machine,
        order,
        node_limit: config.node_limit,
        pass_nodes: 0,
        total_nodes: 0,
        presses: smallvec![0; machine.button_count()],
    };

    // The counter needing the most increments bounds the answer from
    // below; pressing one counter at a time bounds the loop from above.
    for limit in machine.max_target()..=machine.sum_targets() {
        search.pass_nodes = 0;
        let counts: SmallVec<[u64; 16]> = smallvec![0; machine.counter_count()];
        match search.dfs(0, &counts, 0, limit, &initial) {
            Dfs::Found => {
                return SolveReport {
                    outcome: Outcome::Solved(limit),
                    schedule: Some(search.presses.to_vec()),
                    nodes_explored: search.total_nodes,
                    time_elapsed_ms: elapsed_ms(start_time),
                };
            }
            Dfs::Exhausted => {}
            Dfs::Bail => {
                return SolveReport {
                    outcome: Outcome::BudgetExceeded,
                    schedule: None,
                    nodes_explored: search.total_nodes,
                    time_elapsed_ms: elapsed_ms(start_time),
                };
            }
        }
    }

    SolveReport {
        outcome: Outcome::Infeasible,
        schedule: None,
        nodes_explored: search.total_nodes,
        time_elapsed_ms: elapsed_ms(start_time),
    }
}

enum Dfs {
    Found,
    Exhausted,
    Bail,
}

struct Search<'a> {
    machine: &'a Machine,
    /// Buttons in ascending-slack order; depth indexes into this.
    order: Vec<usize>,
    node_limit: u64,
    pass_nodes: u64,
    total_nodes: u64,
    /// Press counts committed on the current path, indexed by button.
    presses: SmallVec<[u64; 16]>,
}

impl Search<'_> {
    fn dfs(
        &mut self,
        depth: usize,
        counts: &[u64],
        used: u64,
        limit: u64,
        bounds: &PressBounds,
    ) -> Dfs {
        self.pass_nodes += 1;
        self.total_nodes += 1;
        if self.pass_nodes > self.node_limit {
            return Dfs::Bail;
        }

        let targets = self.machine.targets();
        let mut solved = true;
        for (count, target) in counts.iter().zip(targets) {
            if count > target {
                return Dfs::Exhausted;
            }
            if count != target {
                solved = false;
            }
        }
        if solved {
            for &button in &self.order[depth..] {
                self.presses[button] = 0;
            }
            return Dfs::Found;
        }
        if depth >= self.order.len() {
            return Dfs::Exhausted;
        }

        // No schedule can close the widest remaining gap within budget.
        let max_deficit = counts
            .iter()
            .zip(targets)
            .map(|(count, target)| target - count)
            .max()
            .unwrap_or(0);
        if used + max_deficit > limit {
            return Dfs::Exhausted;
        }

        let button = self.order[depth];
        let lo = bounds.min[button];
        let hi = bounds.max[button].min(limit - used);
        if lo > hi {
            return Dfs::Exhausted;
        }

        for presses in lo..=hi {
            let mut next_counts: SmallVec<[u64; 16]> = SmallVec::from_slice(counts);
            let mut overshot = false;
            for counter in 0..next_counts.len() {
                if self.machine.affects(counter, button) {
                    next_counts[counter] += presses;
                    if next_counts[counter] > targets[counter] {
                        overshot = true;
                    }
                }
            }
            if overshot {
                // Increments only grow with the press count.
                break;
            }

            let deficits: SmallVec<[u64; 16]> = next_counts
                .iter()
                .zip(targets)
                .map(|(count, target)| target - count)
                .collect();
            let mut next_bounds = bounds.clone();
            next_bounds.fix(button, 0);
            if !propagate(self.machine, &deficits, &mut next_bounds) {
                continue;
            }

            match self.dfs(depth + 1, &next_counts, used + presses, limit, &next_bounds) {
                Dfs::Found => {
                    self.presses[button] = presses;
                    return Dfs::Found;
                }
                Dfs::Exhausted => {}
                Dfs::Bail => return Dfs::Bail,
            }
        }

        Dfs::Exhausted
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
