//! Monte Carlo simulator for the upgrade forge.
//!
//! Runs many independent trials from one starting inventory and reports:
//! - How often every target slot reaches Legendary
//! - Cash spent by successful and failed trials
//! - Gacha draws needed when missing materials are bought
//!
//! Trials go through `core::run_trial`, the same engine the interactive
//! driver uses.

mod config;
mod report;
mod runner;

pub use config::{SimConfig, DEFAULT_NUM_RUNS};
pub use report::{
    aggregate, format_cash, trial_text, Aggregate, PartitionStats, SimReport, Summary,
};
pub use runner::{run_simulation, run_simulation_with, trial_rng};
