//! Simulation configuration.

use crate::core::StartingInventory;
use crate::items::SlotSet;

pub const DEFAULT_NUM_RUNS: u32 = 30;

/// Configuration for a batch of trials sharing one starting inventory.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent trials
    pub num_runs: u32,

    /// Base seed; trial `i` uses `seed + i` (None = entropy)
    pub seed: Option<u64>,

    /// Whether missing materials may be bought with gacha draws
    pub gacha_enabled: bool,

    /// Slots to bring to Legendary (None = all four)
    pub targets: Option<SlotSet>,

    /// Materials held before every trial
    pub starting: StartingInventory,

    /// 0 = no runner logging, 1 = start/finish logs, 2 = also report each
    /// finished trial to the caller
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_NUM_RUNS,
            seed: None,
            gacha_enabled: false,
            targets: None,
            starting: StartingInventory::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Craft only with the materials on hand.
    pub fn materials_only(starting: StartingInventory) -> Self {
        Self {
            starting,
            gacha_enabled: false,
            ..Default::default()
        }
    }

    /// Buy missing materials with gacha draws until every target is done.
    pub fn with_gacha(starting: StartingInventory) -> Self {
        Self {
            starting,
            gacha_enabled: true,
            ..Default::default()
        }
    }

    /// Resolved target set (None or empty means every slot).
    pub fn target_set(&self) -> SlotSet {
        SlotSet::resolve(self.targets.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Slot;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.num_runs, 30);
        assert!(!config.gacha_enabled);
        assert_eq!(config.target_set(), SlotSet::all());
    }

    #[test]
    fn test_presets_set_gacha_flag() {
        let starting = StartingInventory::uniform(9, 0);
        assert!(!SimConfig::materials_only(starting).gacha_enabled);
        assert!(SimConfig::with_gacha(starting).gacha_enabled);
        assert_eq!(SimConfig::with_gacha(starting).starting, starting);
    }

    #[test]
    fn test_default_reports_summary_only() {
        assert_eq!(SimConfig::default().verbosity, 1);
    }

    #[test]
    fn test_target_set_keeps_selection() {
        let config = SimConfig {
            targets: Some(SlotSet::from_slots(&[Slot::Head, Slot::Gloves])),
            ..Default::default()
        };
        assert_eq!(config.target_set().len(), 2);
    }
}
