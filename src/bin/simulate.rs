//! Non-interactive simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- --elite 9                 # 30 runs, 9 Elite per slot
//!   cargo run --bin simulate -- -n 1000 --gacha --seed 42 # Reproducible gacha batch
//!   cargo run --bin simulate -- --targets head,gloves --slot head=12,1

use clap::Parser;
use legendsim::build_info;
use legendsim::core::StartingInventory;
use legendsim::forge::load_config;
use legendsim::input::{parse_slot_spec, parse_target_slots};
use legendsim::items::SlotSet;
use legendsim::simulator::{run_simulation_with, trial_text, SimConfig, DEFAULT_NUM_RUNS};
use legendsim::utils::save_json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Monte Carlo simulator for 3-into-1 gear upgrades")]
struct Args {
    /// Number of trials
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_RUNS)]
    runs: u32,

    /// Base seed; trial i uses seed + i
    #[arg(short, long)]
    seed: Option<u64>,

    /// Buy missing materials with gacha draws
    #[arg(short, long)]
    gacha: bool,

    /// Target slots, e.g. "head,gloves" (default: all)
    #[arg(short, long)]
    targets: Option<String>,

    /// Elite count for every slot
    #[arg(long, default_value_t = 0)]
    elite: u32,

    /// Epic count for every slot
    #[arg(long, default_value_t = 0)]
    epic: u32,

    /// Per-slot override: <slot>=<elite>,<epic>[,<rare>,<common>]
    #[arg(long = "slot", value_name = "SPEC")]
    slots: Vec<String>,

    /// Forge table JSON (default: ~/.legendsim/forge.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save a JSON summary to sim_report_<timestamp>.json
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print only the summary block
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let forge = load_config(args.config.as_deref())?;
    let config = build_config(&args)?;

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                 LEGENDARY UPGRADE SIMULATOR                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("{}", build_info::version_line());
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!(
        "  Gacha:          {}",
        if config.gacha_enabled { "on" } else { "off" }
    );
    let targets: Vec<&str> = config.target_set().iter().map(|s| s.name()).collect();
    println!("  Targets:        {}", targets.join(", "));
    for slot in config.target_set().iter() {
        let s = config.starting.slot(slot);
        println!(
            "  {:<6}          Elite {}, Epic {}, Rare {}, Common {}",
            slot.name(),
            s.elite,
            s.epic,
            s.rare,
            s.common
        );
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();

    let gacha = config.gacha_enabled;
    let report = run_simulation_with(&config, &forge, |index, outcome| {
        print!("{}", trial_text(index, outcome, gacha));
    });

    println!();
    println!("{}", report.to_text());

    if args.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        save_json(&PathBuf::from(&filename), &report)?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let mut starting = StartingInventory::uniform(args.elite, args.epic);
    for spec in &args.slots {
        let (slot, counts) = parse_slot_spec(spec)?;
        starting.set(slot, counts);
    }

    let targets = match &args.targets {
        Some(text) => {
            let (selected, unknown) = parse_target_slots(text);
            for err in unknown {
                tracing::warn!("ignoring {}", err);
            }
            Some(selected)
        }
        None => None,
    };

    Ok(SimConfig {
        num_runs: args.runs,
        seed: args.seed,
        gacha_enabled: args.gacha,
        targets: targets.map(|t| SlotSet::resolve(Some(&t))),
        starting,
        verbosity: if args.quiet { 1 } else { 2 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use legendsim::items::Slot;

    #[test]
    fn test_quiet_drops_per_trial_output() {
        let quiet = build_config(&Args::parse_from(["simulate", "--quiet"])).unwrap();
        assert_eq!(quiet.verbosity, 1);
        let normal = build_config(&Args::parse_from(["simulate"])).unwrap();
        assert_eq!(normal.verbosity, 2);
    }

    #[test]
    fn test_slot_override_on_uniform_counts() {
        let args = Args::parse_from(["simulate", "--elite", "9", "--slot", "top=3,4"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.starting.slot(Slot::Head).elite, 9);
        assert_eq!(config.starting.slot(Slot::Top).elite, 3);
        assert_eq!(config.starting.slot(Slot::Top).epic, 4);
    }
}
