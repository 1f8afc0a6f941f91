//! Material tiers and equipment slots.

pub mod types;

pub use types::*;
