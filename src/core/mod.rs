//! Upgrade engine: trial state, the trial loop, and its outcome record.

pub mod outcome;
pub mod trial;
pub mod trial_state;

pub use outcome::*;
pub use trial::*;
pub use trial_state::*;
