//! CLI entry point for the machine solver.
//!
//! Usage:
//!   machine-solver solve <machines.txt> [options]
//!   machine-solver solve --stdin [options]
//!
//! Options:
//!   --node-limit <n>   Search nodes per deepening pass (default: 50000000)
//!   --cache <file>     JSON map of 1-based machine index to known answer
//!
//! One machine per input line. Per-machine progress goes to stderr; the
//! aggregate report is printed as JSON on stdout. Exits 0 when every
//! machine resolved, 1 when the node budget left any machine unresolved.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use machine_solver::{min_toggle_presses, solve, AnswerCache, Machine, Outcome, SolverConfig};

#[derive(Parser)]
#[command(name = "machine-solver")]
#[command(about = "Bounded minimum-press solver for button-counter machines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every machine in an input file
    Solve {
        /// Path to the machine list (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read machines from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Maximum search nodes per deepening pass
        #[arg(long, default_value = "50000000")]
        node_limit: u64,

        /// JSON file mapping 1-based machine indices to known answers
        #[arg(long, value_name = "FILE")]
        cache: Option<PathBuf>,
    },
}

/// Aggregate output for a run. Unresolved machines are listed, never
/// folded into the resolved sum.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutput {
    light_press_total: u64,
    resolved_sum: u64,
    resolved_count: usize,
    cached_count: usize,
    unresolved: Vec<usize>,
    time_elapsed_ms: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            node_limit,
            cache,
        } => run_solve(file, stdin, node_limit, cache),
    }
}

fn run_solve(
    file: Option<PathBuf>,
    stdin: bool,
    node_limit: u64,
    cache_path: Option<PathBuf>,
) -> Result<()> {
    let start_time = Instant::now();

    let text = if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read machines from stdin.")?;
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read machine list({}).", path.display()))?
    } else {
        bail!("Must provide either a file path or --stdin.");
    };

    let mut machines = Vec::new();
    for (line_index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let machine = Machine::parse(line)
            .with_context(|| format!("Failed to parse machine on line {}.", line_index + 1))?;
        machines.push(machine);
    }

    let cache = match cache_path {
        Some(path) => AnswerCache::load(path)?,
        None => AnswerCache::default(),
    };

    let config = SolverConfig { node_limit };

    let mut light_press_total = 0u64;
    let mut resolved_sum = 0u64;
    let mut resolved_count = 0usize;
    let mut cached_count = 0usize;
    let mut unresolved = Vec::new();

    for (index, machine) in machines.iter().enumerate() {
        let machine_index = index + 1;

        if machine.lights().is_some() {
            match min_toggle_presses(machine) {
                Some(presses) => light_press_total += presses,
                None => eprintln!(
                    "machine {}: no toggle subset matches the light pattern",
                    machine_index
                ),
            }
        }

        if let Some(answer) = cache.get(machine_index) {
            eprintln!("machine {}: cached => {}", machine_index, answer);
            cached_count += 1;
            resolved_count += 1;
            resolved_sum += answer;
            continue;
        }

        let report = solve(machine, &config);
        match report.outcome {
            Outcome::Solved(presses) => {
                eprintln!(
                    "machine {}: solved => {} ({} nodes)",
                    machine_index, presses, report.nodes_explored
                );
                resolved_count += 1;
                resolved_sum += presses;
            }
            Outcome::BudgetExceeded => {
                eprintln!(
                    "machine {}: budget exceeded ({} nodes)",
                    machine_index, report.nodes_explored
                );
                unresolved.push(machine_index);
            }
            Outcome::Infeasible => {
                bail!(
                    "Machine {} is infeasible; a well-formed machine always has a \
                     press schedule, so the input is malformed.",
                    machine_index
                );
            }
        }
    }

    eprintln!(
        "{} resolved ({} cached), {} unresolved of {} machine(s)",
        resolved_count,
        cached_count,
        unresolved.len(),
        machines.len()
    );

    let unresolved_count = unresolved.len();
    let output = RunOutput {
        light_press_total,
        resolved_sum,
        resolved_count,
        cached_count,
        unresolved,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if unresolved_count == 0 {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
