use crate::items::{Tier, TIER_COUNT};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Source units required to attempt a conversion.
pub const CRAFT_BATCH: u32 = 3;
/// Source units lost when an attempt fails. One unit of the batch survives.
pub const FAIL_CONSUMED: u32 = 2;

pub const PROB_COMMON_TO_RARE: f64 = 0.40;
pub const PROB_RARE_TO_ELITE: f64 = 0.30;
pub const PROB_ELITE_TO_EPIC: f64 = 0.25;
pub const PROB_EPIC_TO_LEGENDARY: f64 = 0.20;

pub const COST_ELITE_TO_EPIC: u64 = 500;
pub const COST_EPIC_TO_LEGENDARY: u64 = 3000;
pub const COST_GACHA: u64 = 2000;

pub const GACHA_PROB_EPIC: f64 = 0.02;
pub const GACHA_PROB_ELITE: f64 = 0.10;
pub const GACHA_PROB_RARE: f64 = 0.33;
// Common takes the remainder (0.55).

pub const DEFAULT_MAX_DRAWS: u64 = 1_000_000;

/// An adjacent-tier 3-into-1 conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conversion {
    CommonToRare,
    RareToElite,
    EliteToEpic,
    EpicToLegendary,
}

impl Conversion {
    pub const ALL: [Conversion; 4] = [
        Conversion::CommonToRare,
        Conversion::RareToElite,
        Conversion::EliteToEpic,
        Conversion::EpicToLegendary,
    ];

    pub fn source(&self) -> Tier {
        match self {
            Conversion::CommonToRare => Tier::Common,
            Conversion::RareToElite => Tier::Rare,
            Conversion::EliteToEpic => Tier::Elite,
            Conversion::EpicToLegendary => Tier::Epic,
        }
    }

    pub fn destination(&self) -> Tier {
        match self {
            Conversion::CommonToRare => Tier::Rare,
            Conversion::RareToElite => Tier::Elite,
            Conversion::EliteToEpic => Tier::Epic,
            Conversion::EpicToLegendary => Tier::Legendary,
        }
    }

    /// Paid conversions are charged cash and counted as attempts.
    pub fn is_paid(&self) -> bool {
        matches!(self, Conversion::EliteToEpic | Conversion::EpicToLegendary)
    }
}

/// Material counts for one slot, indexed by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Materials {
    pub counts: [u32; TIER_COUNT],
}

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, tier: Tier) -> u32 {
        self.counts[tier.index()]
    }

    pub fn set(&mut self, tier: Tier, count: u32) {
        self.counts[tier.index()] = count;
    }

    pub fn add(&mut self, tier: Tier, amount: u32) {
        let slot = &mut self.counts[tier.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Whether a conversion out of `tier` may be attempted.
    pub fn can_craft_from(&self, tier: Tier) -> bool {
        self.count(tier) >= CRAFT_BATCH
    }

    pub fn has_legendary(&self) -> bool {
        self.count(Tier::Legendary) >= 1
    }
}

/// Probability and cost table for crafting and gacha draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub prob_common_to_rare: f64,
    pub prob_rare_to_elite: f64,
    pub prob_elite_to_epic: f64,
    pub prob_epic_to_legendary: f64,
    pub cost_elite_to_epic: u64,
    pub cost_epic_to_legendary: u64,
    pub cost_gacha: u64,
    pub gacha_prob_epic: f64,
    pub gacha_prob_elite: f64,
    pub gacha_prob_rare: f64,
    /// Draws after which an unfinished gacha trial is aborted.
    pub max_draws: u64,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            prob_common_to_rare: PROB_COMMON_TO_RARE,
            prob_rare_to_elite: PROB_RARE_TO_ELITE,
            prob_elite_to_epic: PROB_ELITE_TO_EPIC,
            prob_epic_to_legendary: PROB_EPIC_TO_LEGENDARY,
            cost_elite_to_epic: COST_ELITE_TO_EPIC,
            cost_epic_to_legendary: COST_EPIC_TO_LEGENDARY,
            cost_gacha: COST_GACHA,
            gacha_prob_epic: GACHA_PROB_EPIC,
            gacha_prob_elite: GACHA_PROB_ELITE,
            gacha_prob_rare: GACHA_PROB_RARE,
            max_draws: DEFAULT_MAX_DRAWS,
        }
    }
}

impl ForgeConfig {
    pub fn success_rate(&self, conversion: Conversion) -> f64 {
        match conversion {
            Conversion::CommonToRare => self.prob_common_to_rare,
            Conversion::RareToElite => self.prob_rare_to_elite,
            Conversion::EliteToEpic => self.prob_elite_to_epic,
            Conversion::EpicToLegendary => self.prob_epic_to_legendary,
        }
    }

    /// Cash charged per attempt, success or not.
    pub fn attempt_cost(&self, conversion: Conversion) -> u64 {
        match conversion {
            Conversion::EliteToEpic => self.cost_elite_to_epic,
            Conversion::EpicToLegendary => self.cost_epic_to_legendary,
            Conversion::CommonToRare | Conversion::RareToElite => 0,
        }
    }

    pub fn gacha_prob_common(&self) -> f64 {
        (1.0 - self.gacha_prob_epic - self.gacha_prob_elite - self.gacha_prob_rare).max(0.0)
    }

    /// Draw weight of a tier. Legendary is never drawn.
    pub fn gacha_weight(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Epic => self.gacha_prob_epic,
            Tier::Elite => self.gacha_prob_elite,
            Tier::Rare => self.gacha_prob_rare,
            Tier::Common => self.gacha_prob_common(),
            Tier::Legendary => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("prob_common_to_rare", self.prob_common_to_rare),
            ("prob_rare_to_elite", self.prob_rare_to_elite),
            ("prob_elite_to_epic", self.prob_elite_to_epic),
            ("prob_epic_to_legendary", self.prob_epic_to_legendary),
            ("gacha_prob_epic", self.gacha_prob_epic),
            ("gacha_prob_elite", self.gacha_prob_elite),
            ("gacha_prob_rare", self.gacha_prob_rare),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        let drawn = self.gacha_prob_epic + self.gacha_prob_elite + self.gacha_prob_rare;
        // Small slack for float sums like 0.02 + 0.10 + 0.88.
        if drawn > 1.0 + 1e-9 {
            return Err(ConfigError::GachaWeightsExceedOne(drawn));
        }
        if self.max_draws == 0 {
            return Err(ConfigError::ZeroDrawCap);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("gacha epic/elite/rare weights sum to {0}, above 1")]
    GachaWeightsExceedOne(f64),
    #[error("max_draws must be at least 1")]
    ZeroDrawCap,
    #[error("failed to read config {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_tiers_are_adjacent() {
        for conversion in Conversion::ALL {
            assert_eq!(conversion.source().next(), Some(conversion.destination()));
        }
    }

    #[test]
    fn test_only_top_conversions_are_paid() {
        let config = ForgeConfig::default();
        assert!(!Conversion::CommonToRare.is_paid());
        assert!(!Conversion::RareToElite.is_paid());
        assert_eq!(config.attempt_cost(Conversion::CommonToRare), 0);
        assert_eq!(config.attempt_cost(Conversion::RareToElite), 0);
        assert_eq!(config.attempt_cost(Conversion::EliteToEpic), 500);
        assert_eq!(config.attempt_cost(Conversion::EpicToLegendary), 3000);
    }

    #[test]
    fn test_gacha_common_is_remainder() {
        let config = ForgeConfig::default();
        assert!((config.gacha_prob_common() - 0.55).abs() < 1e-9);
        let total: f64 = Tier::ALL.iter().map(|t| config.gacha_weight(*t)).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(config.gacha_weight(Tier::Legendary), 0.0);
    }

    #[test]
    fn test_materials_batch_gate() {
        let mut m = Materials::new();
        m.set(Tier::Elite, 2);
        assert!(!m.can_craft_from(Tier::Elite));
        m.add(Tier::Elite, 1);
        assert!(m.can_craft_from(Tier::Elite));
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let config = ForgeConfig {
            prob_elite_to_epic: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "prob_elite_to_epic",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_overfull_gacha_weights() {
        let config = ForgeConfig {
            gacha_prob_rare: 0.95,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GachaWeightsExceedOne(_))
        ));
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(ForgeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ForgeConfig = serde_json::from_str(r#"{"cost_gacha": 1500}"#).unwrap();
        assert_eq!(config.cost_gacha, 1500);
        assert_eq!(config.cost_epic_to_legendary, COST_EPIC_TO_LEGENDARY);
        assert_eq!(config.max_draws, DEFAULT_MAX_DRAWS);
    }
}
