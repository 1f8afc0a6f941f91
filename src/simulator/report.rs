//! Outcome aggregation and report generation.

use crate::core::{TrialEnd, TrialOutcome};
use crate::items::{Slot, Tier};
use serde::Serialize;

/// Mean/min/max over one numeric field of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub min: u64,
    pub max: u64,
}

impl Summary {
    /// None for an empty input.
    pub fn from_values<I: IntoIterator<Item = u64>>(values: I) -> Option<Self> {
        let mut count: u64 = 0;
        let mut sum: u128 = 0;
        let mut min = u64::MAX;
        let mut max = 0;
        for v in values {
            count += 1;
            sum += v as u128;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            mean: sum as f64 / count as f64,
            min,
            max,
        })
    }
}

/// Statistics for the successful or the failed trials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionStats {
    pub count: u32,
    pub cash: Summary,
    /// Only computed when gacha is enabled
    pub draws: Option<Summary>,
}

impl PartitionStats {
    fn from_partition(outcomes: &[&TrialOutcome], gacha_enabled: bool) -> Option<Self> {
        let cash = Summary::from_values(outcomes.iter().map(|o| o.cash))?;
        let draws = if gacha_enabled {
            Summary::from_values(outcomes.iter().map(|o| o.gacha_draws))
        } else {
            None
        };
        Some(Self {
            count: outcomes.len() as u32,
            cash,
            draws,
        })
    }
}

/// Success/failure split of a batch of outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub success: Option<PartitionStats>,
    pub failure: Option<PartitionStats>,
}

/// Read-only fold over outcomes: partition by `success` and summarize each
/// non-empty side.
pub fn aggregate(outcomes: &[TrialOutcome], gacha_enabled: bool) -> Aggregate {
    let (succeeded, failed): (Vec<&TrialOutcome>, Vec<&TrialOutcome>) =
        outcomes.iter().partition(|o| o.success);
    Aggregate {
        success: PartitionStats::from_partition(&succeeded, gacha_enabled),
        failure: PartitionStats::from_partition(&failed, gacha_enabled),
    }
}

/// Aggregated results from multiple trials.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub gacha_enabled: bool,
    pub runs_succeeded: u32,
    pub runs_failed: u32,
    pub runs_aborted: u32,
    pub stats: Aggregate,

    // Individual outcomes for per-trial breakdowns
    pub outcomes: Vec<TrialOutcome>,
}

impl SimReport {
    pub fn from_outcomes(outcomes: Vec<TrialOutcome>, gacha_enabled: bool) -> Self {
        let num_runs = outcomes.len() as u32;
        let runs_succeeded = outcomes.iter().filter(|o| o.success).count() as u32;
        let runs_aborted = outcomes
            .iter()
            .filter(|o| o.end == TrialEnd::Aborted)
            .count() as u32;
        let stats = aggregate(&outcomes, gacha_enabled);

        Self {
            num_runs,
            gacha_enabled,
            runs_succeeded,
            runs_failed: num_runs - runs_succeeded,
            runs_aborted,
            stats,
            outcomes,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.num_runs == 0 {
            0.0
        } else {
            self.runs_succeeded as f64 / self.num_runs as f64
        }
    }

    /// Generate the summary block.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                        SUMMARY\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Runs: {} total\n", self.num_runs));
        report.push_str(&format!(
            "Succeeded: {}, Failed: {}",
            self.runs_succeeded, self.runs_failed
        ));
        if self.runs_aborted > 0 {
            report.push_str(&format!(" ({} aborted at draw cap)", self.runs_aborted));
        }
        report.push('\n');
        report.push_str(&format!(
            "Success rate: {:.1}%\n\n",
            self.success_rate() * 100.0
        ));

        match &self.stats.success {
            Some(stats) => {
                push_cash_section(&mut report, "CASH SPENT (SUCCESSFUL RUNS)", stats)
            }
            None => report.push_str("No successful runs.\n\n"),
        }
        match &self.stats.failure {
            Some(stats) => push_cash_section(&mut report, "CASH SPENT (FAILED RUNS)", stats),
            None => report.push_str("No failed runs.\n\n"),
        }

        if self.gacha_enabled {
            if let Some(draws) = self.stats.success.as_ref().and_then(|s| s.draws) {
                push_draw_section(&mut report, "GACHA DRAWS (SUCCESSFUL RUNS)", &draws);
            }
            if let Some(draws) = self.stats.failure.as_ref().and_then(|s| s.draws) {
                push_draw_section(&mut report, "GACHA DRAWS (FAILED RUNS)", &draws);
            }
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// Per-trial outcomes stay out of the JSON export.
impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 8)?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("gacha_enabled", &self.gacha_enabled)?;
        state.serialize_field("runs_succeeded", &self.runs_succeeded)?;
        state.serialize_field("runs_failed", &self.runs_failed)?;
        state.serialize_field("runs_aborted", &self.runs_aborted)?;
        state.serialize_field("success_rate", &(self.success_rate() * 100.0))?;
        state.serialize_field("success", &self.stats.success)?;
        state.serialize_field("failure", &self.stats.failure)?;
        state.end()
    }
}

fn push_cash_section(report: &mut String, title: &str, stats: &PartitionStats) {
    report.push_str(&section_rule(title));
    report.push_str(&format!("  Runs: {}\n", stats.count));
    report.push_str(&format!("  Mean: {}\n", format_cash(stats.cash.mean.round() as u64)));
    report.push_str(&format!("  Min:  {}\n", format_cash(stats.cash.min)));
    report.push_str(&format!("  Max:  {}\n\n", format_cash(stats.cash.max)));
}

fn push_draw_section(report: &mut String, title: &str, draws: &Summary) {
    report.push_str(&section_rule(title));
    report.push_str(&format!("  Mean: {:.1}\n", draws.mean));
    report.push_str(&format!("  Min:  {}\n", draws.min));
    report.push_str(&format!("  Max:  {}\n\n", draws.max));
}

fn section_rule(title: &str) -> String {
    let dashes = 60usize.saturating_sub(title.chars().count() + 4);
    format!("── {} {}\n", title, "─".repeat(dashes))
}

/// Breakdown of a single trial (1-based `index`).
pub fn trial_text(index: u32, outcome: &TrialOutcome, gacha_enabled: bool) -> String {
    let mut text = format!("Trial {}:\n", index);

    for slot in Slot::ALL {
        let s = outcome.slot(slot);
        text.push_str(&format!(
            "  {:<6} epic attempts: {:>3}, legendary attempts: {:>3}  {}\n",
            slot.name(),
            s.epic_attempts,
            s.legendary_attempts,
            if s.success { "success" } else { "failed" }
        ));
    }
    text.push_str(&format!("  Cash spent: {}\n", format_cash(outcome.cash)));

    if gacha_enabled {
        text.push_str(&format!("  Gacha draws: {}\n", outcome.gacha_draws));
        for slot in Slot::ALL {
            let haul = outcome.haul(slot);
            text.push_str(&format!(
                "    {:<6} haul -> Common:{}, Rare:{}, Elite:{}, Epic:{}\n",
                slot.name(),
                haul.count(Tier::Common),
                haul.count(Tier::Rare),
                haul.count(Tier::Elite),
                haul.count(Tier::Epic)
            ));
        }
    }
    if outcome.end == TrialEnd::Aborted {
        text.push_str("  Aborted: draw cap reached\n");
    }

    text
}

/// Format a cash amount with thousands separators, e.g. 1234567 -> "1,234,567".
pub fn format_cash(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
