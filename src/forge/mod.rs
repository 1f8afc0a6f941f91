//! Crafting rules: the probability/cost table, the shared conversion
//! primitive, and gacha rolls.

pub mod logic;
pub mod persistence;
pub mod types;

pub use logic::*;
pub use persistence::*;
pub use types::*;
