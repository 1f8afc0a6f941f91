//! The per-trial upgrade engine.
//!
//! A trial advances one `TrialState` until every target slot holds a
//! Legendary or no further progress is possible:
//!
//! - **Gacha off**: discrete rounds. Each round makes at most one paid attempt
//!   per unfinished target slot (Epic→Legendary before Elite→Epic). The trial
//!   is stuck once no target slot has 3 Epic or 3 Elite left.
//! - **Gacha on**: exhaustive conversion passes. When a pass changes nothing,
//!   one paid draw adds a random unit to a random slot. Only the draw cap in
//!   `ForgeConfig::max_draws` can end it unsuccessfully.

use super::outcome::{TrialEnd, TrialOutcome};
use super::trial_state::{StartingInventory, TrialState};
use crate::forge::{preferred_paid_conversion, Conversion, ForgeConfig};
use crate::items::SlotSet;
use rand::Rng;

/// Free and paid conversions below Legendary, highest value first.
const LOWER_CONVERSIONS: [Conversion; 3] = [
    Conversion::EliteToEpic,
    Conversion::RareToElite,
    Conversion::CommonToRare,
];

/// Run one complete trial. `targets` of None or an empty set means all slots.
/// The starting inventory is only read.
pub fn run_trial<R: Rng>(
    starting: &StartingInventory,
    gacha_enabled: bool,
    targets: Option<&SlotSet>,
    config: &ForgeConfig,
    rng: &mut R,
) -> TrialOutcome {
    let targets = SlotSet::resolve(targets);
    let mut state = TrialState::new(starting, targets);

    let end = if gacha_enabled {
        run_with_gacha(&mut state, config, rng)
    } else {
        run_rounds(&mut state, config, rng)
    };

    let outcome = state.into_outcome(end);
    tracing::debug!(
        end = outcome.end.label(),
        cash = outcome.cash,
        draws = outcome.gacha_draws,
        rounds = outcome.rounds,
        "trial finished"
    );
    outcome
}

fn run_rounds<R: Rng>(state: &mut TrialState, config: &ForgeConfig, rng: &mut R) -> TrialEnd {
    let targets = state.targets();
    loop {
        if state.all_targets_done() {
            return TrialEnd::Completed;
        }
        if !state.action_possible() {
            return TrialEnd::Stuck;
        }

        state.begin_round();
        for slot in targets.iter() {
            if state.is_done(slot) {
                continue;
            }
            if let Some(conversion) = preferred_paid_conversion(state.materials(slot)) {
                state.craft(slot, conversion, config, rng);
            }
        }
    }
}

fn run_with_gacha<R: Rng>(
    state: &mut TrialState,
    config: &ForgeConfig,
    rng: &mut R,
) -> TrialEnd {
    loop {
        if state.all_targets_done() {
            return TrialEnd::Completed;
        }

        state.begin_round();
        let progress = exhaust_conversions(state, config, rng);
        if progress || state.all_targets_done() {
            continue;
        }

        if state.gacha_draws() >= config.max_draws {
            tracing::warn!(
                draws = state.gacha_draws(),
                cash = state.cash(),
                "draw cap reached before all targets finished; aborting trial"
            );
            return TrialEnd::Aborted;
        }
        let (slot, tier) = state.draw(config, rng);
        tracing::trace!(slot = slot.name(), tier = tier.name(), "gacha draw");
    }
}

/// One pass over the unfinished target slots, running each conversion to
/// exhaustion. Returns whether anything was attempted.
fn exhaust_conversions<R: Rng>(
    state: &mut TrialState,
    config: &ForgeConfig,
    rng: &mut R,
) -> bool {
    let targets = state.targets();
    let mut progress = false;

    for slot in targets.iter() {
        // Stop at the first Legendary; surplus Epics are never spent.
        while !state.is_done(slot)
            && state
                .craft(slot, Conversion::EpicToLegendary, config, rng)
                .is_some()
        {
            progress = true;
        }
        if state.is_done(slot) {
            continue;
        }

        for conversion in LOWER_CONVERSIONS {
            while state.craft(slot, conversion, config, rng).is_some() {
                progress = true;
            }
        }
    }

    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StartingSlot;
    use crate::items::{Slot, Tier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_already_empty_inventory_is_stuck() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = run_trial(
            &StartingInventory::new(),
            false,
            None,
            &ForgeConfig::default(),
            &mut rng,
        );
        assert!(!outcome.success);
        assert_eq!(outcome.end, TrialEnd::Stuck);
        assert_eq!(outcome.cash, 0);
        assert_eq!(outcome.rounds, 0);
    }

    #[test]
    fn test_starting_inventory_not_mutated() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let starting = StartingInventory::uniform(30, 2);
        let before = starting;
        run_trial(&starting, true, None, &ForgeConfig::default(), &mut rng);
        assert_eq!(starting, before);
    }

    #[test]
    fn test_gacha_pass_stops_at_first_legendary() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = ForgeConfig {
            prob_epic_to_legendary: 1.0,
            ..Default::default()
        };
        let starting =
            StartingInventory::new().with_slot(Slot::Head, StartingSlot::new(0, 9));
        let targets = SlotSet::from_slots(&[Slot::Head]);
        let outcome = run_trial(&starting, true, Some(&targets), &config, &mut rng);

        assert!(outcome.success);
        assert_eq!(outcome.slot(Slot::Head).legendary_attempts, 1);
        assert_eq!(outcome.materials(Slot::Head).count(Tier::Epic), 6);
        assert_eq!(outcome.gacha_draws, 0);
        assert_eq!(outcome.cash, 3000);
    }

    #[test]
    fn test_gacha_pass_uses_free_conversions() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = ForgeConfig {
            prob_common_to_rare: 1.0,
            prob_rare_to_elite: 1.0,
            prob_elite_to_epic: 1.0,
            prob_epic_to_legendary: 1.0,
            ..Default::default()
        };
        // 81 Common -> 27 Rare -> 9 Elite -> 3 Epic -> 1 Legendary
        let starting = StartingInventory::new().with_slot(
            Slot::Top,
            StartingSlot {
                common: 81,
                ..Default::default()
            },
        );
        let targets = SlotSet::from_slots(&[Slot::Top]);
        let outcome = run_trial(&starting, true, Some(&targets), &config, &mut rng);

        assert!(outcome.success);
        assert_eq!(outcome.gacha_draws, 0);
        assert_eq!(outcome.slot(Slot::Top).epic_attempts, 3);
        assert_eq!(outcome.slot(Slot::Top).legendary_attempts, 1);
        assert_eq!(outcome.cash, 3 * 500 + 3000);
    }

    #[test]
    fn test_common_and_rare_inert_without_gacha() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let starting = StartingInventory::new().with_slot(
            Slot::Bottom,
            StartingSlot {
                common: 30,
                rare: 30,
                elite: 0,
                epic: 0,
            },
        );
        let outcome = run_trial(&starting, false, None, &ForgeConfig::default(), &mut rng);
        assert_eq!(outcome.end, TrialEnd::Stuck);
        assert_eq!(outcome.materials(Slot::Bottom).count(Tier::Common), 30);
        assert_eq!(outcome.materials(Slot::Bottom).count(Tier::Rare), 30);
    }

    #[test]
    fn test_draw_cap_aborts() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let config = ForgeConfig {
            max_draws: 5,
            ..Default::default()
        };
        let outcome = run_trial(&StartingInventory::new(), true, None, &config, &mut rng);
        assert!(!outcome.success);
        assert_eq!(outcome.end, TrialEnd::Aborted);
        assert_eq!(outcome.gacha_draws, 5);
    }
}
