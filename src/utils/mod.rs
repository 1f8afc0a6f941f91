//! Utility modules: file persistence.

pub mod persistence;

pub use persistence::*;
