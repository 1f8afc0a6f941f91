//! Parsing of user-supplied answers and CLI values.
//!
//! Everything here is pure; the interactive driver decides whether to
//! re-prompt, warn or fall back to a default.

use crate::core::StartingSlot;
use crate::items::{Slot, SlotSet};
use crate::simulator::DEFAULT_NUM_RUNS;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not a non-negative whole number")]
    InvalidCount(String),

    #[error("unknown slot '{0}' (expected head, top, bottom or gloves)")]
    UnknownSlot(String),

    #[error("invalid slot spec '{0}' (expected <slot>=<elite>,<epic>[,<rare>,<common>])")]
    InvalidSlotSpec(String),
}

/// `y`/`yes` in any case turns an option on; anything else turns it off.
pub fn parse_yes_no(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Parse a non-negative material count.
pub fn parse_count(answer: &str) -> Result<u32, InputError> {
    let trimmed = answer.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| InputError::InvalidCount(trimmed.to_string()))
}

/// Trial count; empty or unparsable input falls back to the default.
pub fn parse_run_count(answer: &str) -> u32 {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return DEFAULT_NUM_RUNS;
    }
    trimmed.parse().unwrap_or(DEFAULT_NUM_RUNS)
}

/// Split free text on whitespace and commas and match each token against the
/// slot names. Duplicates are ignored. Unknown tokens are returned alongside
/// the set so the caller can warn about them. An empty result means all slots.
pub fn parse_target_slots(answer: &str) -> (SlotSet, Vec<InputError>) {
    let mut targets = SlotSet::empty();
    let mut unknown = Vec::new();

    for token in answer
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        match Slot::from_name(token) {
            Some(slot) => {
                targets.insert(slot);
            }
            None => unknown.push(InputError::UnknownSlot(token.to_string())),
        }
    }

    (targets, unknown)
}

/// Parse `<slot>=<elite>,<epic>[,<rare>,<common>]`, e.g. `head=9,0`.
pub fn parse_slot_spec(spec: &str) -> Result<(Slot, StartingSlot), InputError> {
    let invalid = || InputError::InvalidSlotSpec(spec.to_string());

    let (name, counts) = spec.split_once('=').ok_or_else(invalid)?;
    let slot =
        Slot::from_name(name).ok_or_else(|| InputError::UnknownSlot(name.trim().to_string()))?;

    let counts = counts
        .split(',')
        .map(parse_count)
        .collect::<Result<Vec<u32>, InputError>>()?;

    let starting = match counts.as_slice() {
        [elite, epic] => StartingSlot::new(*elite, *epic),
        [elite, epic, rare] => StartingSlot {
            rare: *rare,
            ..StartingSlot::new(*elite, *epic)
        },
        [elite, epic, rare, common] => StartingSlot {
            common: *common,
            rare: *rare,
            elite: *elite,
            epic: *epic,
        },
        _ => return Err(invalid()),
    };

    Ok((slot, starting))
}
