//! Batch runner: executes independent trials and folds them into a report.
//!
//! Every trial gets its own RNG. With a base seed, trial `i` is seeded with
//! `seed + i`, so a single trial can be replayed in isolation.

use super::config::SimConfig;
use super::report::SimReport;
use crate::core::{run_trial, TrialOutcome};
use crate::forge::ForgeConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, forge: &ForgeConfig) -> SimReport {
    run_simulation_with(config, forge, |_, _| {})
}

/// Like `run_simulation`. At verbosity 2 and above, `on_trial` is called with
/// the 1-based index of each trial as soon as it finishes.
pub fn run_simulation_with<F>(
    config: &SimConfig,
    forge: &ForgeConfig,
    mut on_trial: F,
) -> SimReport
where
    F: FnMut(u32, &TrialOutcome),
{
    let targets = config.target_set();
    if config.verbosity >= 1 {
        tracing::info!(
            runs = config.num_runs,
            gacha = config.gacha_enabled,
            targets = targets.len(),
            seed = ?config.seed,
            "starting simulation"
        );
    }

    let mut outcomes = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = trial_rng(config.seed, run_idx);
        let outcome = run_trial(
            &config.starting,
            config.gacha_enabled,
            Some(&targets),
            forge,
            &mut rng,
        );
        if config.verbosity >= 2 {
            on_trial(run_idx + 1, &outcome);
        }
        outcomes.push(outcome);
    }

    let report = SimReport::from_outcomes(outcomes, config.gacha_enabled);
    if config.verbosity >= 1 {
        tracing::info!(
            succeeded = report.runs_succeeded,
            failed = report.runs_failed,
            aborted = report.runs_aborted,
            "simulation finished"
        );
    }
    report
}

/// RNG for trial `run_idx` (0-based).
pub fn trial_rng(seed: Option<u64>, run_idx: u32) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StartingInventory;

    #[test]
    fn test_full_simulation() {
        let config = SimConfig {
            num_runs: 5,
            seed: Some(42),
            starting: StartingInventory::uniform(12, 1),
            verbosity: 0,
            ..Default::default()
        };

        let report = run_simulation(&config, &ForgeConfig::default());

        assert_eq!(report.num_runs, 5);
        assert_eq!(report.outcomes.len(), 5);
        assert_eq!(report.runs_succeeded + report.runs_failed, 5);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 8,
            seed: Some(7),
            gacha_enabled: true,
            starting: StartingInventory::uniform(3, 0),
            ..Default::default()
        };
        let forge = ForgeConfig::default();

        let a = run_simulation(&config, &forge);
        let b = run_simulation(&config, &forge);
        assert_eq!(a.outcomes, b.outcomes);
    }

    #[test]
    fn test_trial_replays_from_offset_seed() {
        let config = SimConfig {
            num_runs: 4,
            seed: Some(100),
            starting: StartingInventory::uniform(9, 2),
            ..Default::default()
        };
        let forge = ForgeConfig::default();
        let report = run_simulation(&config, &forge);

        let mut rng = trial_rng(Some(100), 3);
        let replay = run_trial(&config.starting, false, None, &forge, &mut rng);
        assert_eq!(report.outcomes[3], replay);
    }

    #[test]
    fn test_callback_sees_every_trial_in_order() {
        let config = SimConfig {
            num_runs: 6,
            seed: Some(1),
            verbosity: 2,
            ..Default::default()
        };
        let mut seen = Vec::new();
        run_simulation_with(&config, &ForgeConfig::default(), |idx, _| seen.push(idx));
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_summary_verbosity_skips_trial_callback() {
        let config = SimConfig {
            num_runs: 6,
            seed: Some(1),
            verbosity: 1,
            ..Default::default()
        };
        let mut calls = 0;
        let report = run_simulation_with(&config, &ForgeConfig::default(), |_, _| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(report.outcomes.len(), 6);
    }

    #[test]
    fn test_zero_runs() {
        let config = SimConfig {
            num_runs: 0,
            seed: Some(1),
            ..Default::default()
        };
        let report = run_simulation(&config, &ForgeConfig::default());
        assert_eq!(report.num_runs, 0);
        assert!(report.stats.success.is_none());
        assert!(report.stats.failure.is_none());
        assert_eq!(report.success_rate(), 0.0);
    }
}
