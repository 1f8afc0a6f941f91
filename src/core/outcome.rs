//! Trial outcome record returned by the engine.

use crate::forge::Materials;
use crate::items::{Slot, Tier, SLOT_COUNT};
use serde::{Deserialize, Serialize};

/// How a trial reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialEnd {
    /// Every target slot holds a Legendary.
    Completed,
    /// Gacha disabled and no target slot can attempt any conversion.
    Stuck,
    /// Gacha enabled and the draw cap was reached first.
    Aborted,
}

impl TrialEnd {
    pub fn label(&self) -> &'static str {
        match self {
            TrialEnd::Completed => "completed",
            TrialEnd::Stuck => "stuck",
            TrialEnd::Aborted => "aborted",
        }
    }
}

/// Per-slot attempt counters and result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotOutcome {
    /// Elite→Epic attempts
    pub epic_attempts: u32,
    /// Epic→Legendary attempts
    pub legendary_attempts: u32,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub success: bool,
    pub end: TrialEnd,
    /// Total cash spent on paid conversions and gacha draws
    pub cash: u64,
    pub gacha_draws: u64,
    /// Units obtained from gacha, per slot and tier
    pub gacha_hauls: [Materials; SLOT_COUNT],
    pub slots: [SlotOutcome; SLOT_COUNT],
    /// Crafting rounds (gacha off) or conversion passes (gacha on)
    pub rounds: u64,
    pub final_inventory: [Materials; SLOT_COUNT],
}

impl TrialOutcome {
    pub fn slot(&self, slot: Slot) -> &SlotOutcome {
        &self.slots[slot.index()]
    }

    pub fn haul(&self, slot: Slot) -> &Materials {
        &self.gacha_hauls[slot.index()]
    }

    pub fn materials(&self, slot: Slot) -> &Materials {
        &self.final_inventory[slot.index()]
    }

    pub fn total_epic_attempts(&self) -> u64 {
        self.slots.iter().map(|s| s.epic_attempts as u64).sum()
    }

    pub fn total_legendary_attempts(&self) -> u64 {
        self.slots.iter().map(|s| s.legendary_attempts as u64).sum()
    }

    /// Units of a tier drawn across all slots.
    pub fn drawn_of_tier(&self, tier: Tier) -> u64 {
        self.gacha_hauls.iter().map(|h| h.count(tier) as u64).sum()
    }
}
