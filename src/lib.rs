//! Legendsim - Monte Carlo simulator for 3-into-1 gear upgrades
//!
//! This module exposes the upgrade engine, the batch simulator and the input
//! parsing shared by the binaries.

pub mod build_info;
pub mod core;
pub mod forge;
pub mod input;
pub mod items;
pub mod simulator;
pub mod utils;
