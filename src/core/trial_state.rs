//! Starting inventory and the mutable per-trial state.

use super::outcome::{SlotOutcome, TrialEnd, TrialOutcome};
use crate::forge::{
    attempt_conversion, roll_gacha_tier, roll_random_slot, Conversion, ForgeConfig, Materials,
};
use crate::items::{Slot, SlotSet, Tier, SLOT_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Materials a player holds for one slot before a trial.
/// Common and Rare only matter when gacha is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartingSlot {
    #[serde(default)]
    pub common: u32,
    #[serde(default)]
    pub rare: u32,
    pub elite: u32,
    pub epic: u32,
}

impl StartingSlot {
    pub fn new(elite: u32, epic: u32) -> Self {
        Self {
            elite,
            epic,
            ..Default::default()
        }
    }

    fn to_materials(self) -> Materials {
        let mut materials = Materials::new();
        materials.set(Tier::Common, self.common);
        materials.set(Tier::Rare, self.rare);
        materials.set(Tier::Elite, self.elite);
        materials.set(Tier::Epic, self.epic);
        materials
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartingInventory {
    pub slots: [StartingSlot; SLOT_COUNT],
}

impl StartingInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same Elite/Epic counts in every slot.
    pub fn uniform(elite: u32, epic: u32) -> Self {
        Self {
            slots: [StartingSlot::new(elite, epic); SLOT_COUNT],
        }
    }

    pub fn with_slot(mut self, slot: Slot, starting: StartingSlot) -> Self {
        self.set(slot, starting);
        self
    }

    pub fn slot(&self, slot: Slot) -> &StartingSlot {
        &self.slots[slot.index()]
    }

    pub fn set(&mut self, slot: Slot, starting: StartingSlot) {
        self.slots[slot.index()] = starting;
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SlotCounters {
    epic_attempts: u32,
    legendary_attempts: u32,
}

/// Working state of a single trial. Owns its own copy of every count.
#[derive(Debug, Clone)]
pub struct TrialState {
    inventory: [Materials; SLOT_COUNT],
    counters: [SlotCounters; SLOT_COUNT],
    targets: SlotSet,
    cash: u64,
    gacha_draws: u64,
    gacha_hauls: [Materials; SLOT_COUNT],
    rounds: u64,
}

impl TrialState {
    /// Slots outside `targets` are seeded with one Legendary so they count as
    /// done and are never crafted on.
    pub fn new(starting: &StartingInventory, targets: SlotSet) -> Self {
        let mut inventory = [Materials::new(); SLOT_COUNT];
        for slot in Slot::ALL {
            let mut materials = starting.slot(slot).to_materials();
            if !targets.contains(slot) {
                materials.set(Tier::Legendary, 1);
            }
            inventory[slot.index()] = materials;
        }

        Self {
            inventory,
            counters: [SlotCounters::default(); SLOT_COUNT],
            targets,
            cash: 0,
            gacha_draws: 0,
            gacha_hauls: [Materials::new(); SLOT_COUNT],
            rounds: 0,
        }
    }

    pub fn targets(&self) -> SlotSet {
        self.targets
    }

    pub fn materials(&self, slot: Slot) -> &Materials {
        &self.inventory[slot.index()]
    }

    pub fn cash(&self) -> u64 {
        self.cash
    }

    pub fn gacha_draws(&self) -> u64 {
        self.gacha_draws
    }

    pub fn is_done(&self, slot: Slot) -> bool {
        self.materials(slot).has_legendary()
    }

    pub fn all_targets_done(&self) -> bool {
        Slot::ALL.iter().all(|slot| self.is_done(*slot))
    }

    /// Whether any unfinished target slot can attempt a paid conversion.
    pub fn action_possible(&self) -> bool {
        self.targets.iter().any(|slot| {
            let m = self.materials(slot);
            !m.has_legendary()
                && (m.can_craft_from(Tier::Epic) || m.can_craft_from(Tier::Elite))
        })
    }

    pub fn begin_round(&mut self) {
        self.rounds += 1;
    }

    /// Attempt one conversion on `slot`, charging its cost and counting the
    /// attempt. Returns None when the slot lacks a full batch.
    pub fn craft<R: Rng>(
        &mut self,
        slot: Slot,
        conversion: Conversion,
        config: &ForgeConfig,
        rng: &mut R,
    ) -> Option<bool> {
        let materials = &mut self.inventory[slot.index()];
        let attempt = attempt_conversion(materials, conversion, config, rng)?;
        self.cash += attempt.cost;

        if conversion.is_paid() {
            let counters = &mut self.counters[slot.index()];
            if conversion == Conversion::EpicToLegendary {
                counters.legendary_attempts += 1;
            } else {
                counters.epic_attempts += 1;
            }
        }
        Some(attempt.success)
    }

    /// Perform one paid gacha draw. The unit lands on a uniformly random slot,
    /// target or not.
    pub fn draw<R: Rng>(&mut self, config: &ForgeConfig, rng: &mut R) -> (Slot, Tier) {
        self.cash += config.cost_gacha;
        self.gacha_draws += 1;

        let tier = roll_gacha_tier(config, rng);
        let slot = roll_random_slot(rng);
        self.inventory[slot.index()].add(tier, 1);
        self.gacha_hauls[slot.index()].add(tier, 1);
        (slot, tier)
    }

    pub fn into_outcome(self, end: TrialEnd) -> TrialOutcome {
        let mut slots = [SlotOutcome::default(); SLOT_COUNT];
        for slot in Slot::ALL {
            let counters = self.counters[slot.index()];
            slots[slot.index()] = SlotOutcome {
                epic_attempts: counters.epic_attempts,
                legendary_attempts: counters.legendary_attempts,
                success: self.is_done(slot),
            };
        }

        TrialOutcome {
            success: end == TrialEnd::Completed,
            end,
            cash: self.cash,
            gacha_draws: self.gacha_draws,
            gacha_hauls: self.gacha_hauls,
            slots,
            rounds: self.rounds,
            final_inventory: self.inventory,
        }
    }
}
