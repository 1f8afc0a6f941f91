use super::types::*;
use crate::items::{Slot, Tier, SLOT_COUNT};
use rand::Rng;

/// Outcome of a single conversion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftAttempt {
    pub success: bool,
    /// Cash charged for the attempt, regardless of outcome.
    pub cost: u64,
}

/// Attempt one 3-into-1 conversion on a slot's materials.
/// Returns None and leaves the materials untouched when fewer than
/// `CRAFT_BATCH` source units are held.
pub fn attempt_conversion<R: Rng>(
    materials: &mut Materials,
    conversion: Conversion,
    config: &ForgeConfig,
    rng: &mut R,
) -> Option<CraftAttempt> {
    let source = conversion.source();
    if !materials.can_craft_from(source) {
        return None;
    }

    let held = materials.count(source);
    let success = rng.gen::<f64>() < config.success_rate(conversion);
    if success {
        materials.set(source, held - CRAFT_BATCH);
        materials.add(conversion.destination(), 1);
    } else {
        materials.set(source, held - FAIL_CONSUMED);
    }

    Some(CraftAttempt {
        success,
        cost: config.attempt_cost(conversion),
    })
}

/// The conversion a slot should attempt next under the paid-tier priority:
/// Epic→Legendary first, then Elite→Epic.
pub fn preferred_paid_conversion(materials: &Materials) -> Option<Conversion> {
    if materials.can_craft_from(Tier::Epic) {
        Some(Conversion::EpicToLegendary)
    } else if materials.can_craft_from(Tier::Elite) {
        Some(Conversion::EliteToEpic)
    } else {
        None
    }
}

/// Roll the tier of a gacha draw. Thresholds are cumulative in the order
/// Epic, Elite, Rare; Common is the remainder.
pub fn roll_gacha_tier<R: Rng>(config: &ForgeConfig, rng: &mut R) -> Tier {
    let roll = rng.gen::<f64>();

    let epic_threshold = config.gacha_prob_epic;
    let elite_threshold = epic_threshold + config.gacha_prob_elite;
    let rare_threshold = elite_threshold + config.gacha_prob_rare;

    if roll < epic_threshold {
        Tier::Epic
    } else if roll < elite_threshold {
        Tier::Elite
    } else if roll < rare_threshold {
        Tier::Rare
    } else {
        Tier::Common
    }
}

/// Roll the slot a gacha draw lands on, uniformly over all slots.
pub fn roll_random_slot<R: Rng>(rng: &mut R) -> Slot {
    Slot::ALL[rng.gen_range(0..SLOT_COUNT)]
}
