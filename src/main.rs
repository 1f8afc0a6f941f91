//! Interactive driver: asks for the trial setup on stdin, prints every trial
//! and the summary.

use legendsim::build_info;
use legendsim::core::{StartingInventory, StartingSlot};
use legendsim::forge::load_config;
use legendsim::input::{parse_count, parse_run_count, parse_target_slots, parse_yes_no};
use legendsim::items::SlotSet;
use legendsim::simulator::{run_simulation_with, trial_text, SimConfig};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", build_info::version_line());
        return Ok(());
    }
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");

    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let forge = load_config(None)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    writeln!(out, "{}", build_info::version_line())?;
    writeln!(out)?;
    let config = ask_setup(&mut input, &mut out)?;
    writeln!(out)?;

    let gacha = config.gacha_enabled;
    let report = run_simulation_with(&config, &forge, |index, outcome| {
        print!("{}", trial_text(index, outcome, gacha));
    });

    writeln!(out)?;
    write!(out, "{}", report.to_text())?;
    Ok(())
}

/// Collect the gacha flag, target slots, starting counts and trial count.
fn ask_setup<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<SimConfig> {
    let gacha_enabled = parse_yes_no(&prompt(input, out, "Enable gacha? (y/n): ")?);

    let (selected, unknown) = parse_target_slots(&prompt(
        input,
        out,
        "Target slots (head, top, bottom, gloves; blank = all): ",
    )?);
    for err in &unknown {
        writeln!(out, "Ignoring {}", err)?;
    }
    if selected.is_empty() && !unknown.is_empty() {
        writeln!(out, "No valid slots given; targeting all four.")?;
    }
    let targets = SlotSet::resolve(Some(&selected));

    let mut starting = StartingInventory::new();
    for slot in targets.iter() {
        let epic = ask_count(input, out, &format!("{} Epic count: ", slot.name()))?;
        let elite = ask_count(input, out, &format!("{} Elite count: ", slot.name()))?;
        starting.set(slot, StartingSlot::new(elite, epic));
    }

    let num_runs = parse_run_count(&prompt(input, out, "Number of trials (blank = 30): ")?);

    Ok(SimConfig {
        num_runs,
        gacha_enabled,
        targets: Some(targets),
        starting,
        verbosity: 2,
        ..Default::default()
    })
}

fn ask_count<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<u32> {
    loop {
        match parse_count(&prompt(input, out, question)?) {
            Ok(count) => return Ok(count),
            Err(err) => writeln!(out, "Invalid input: {}", err)?,
        }
    }
}

/// Print `question` and read one line. Closed input is an error so that
/// re-prompting cannot spin forever.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<String> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use legendsim::items::Slot;
    use std::io::Cursor;

    #[test]
    fn test_setup_reprompts_invalid_count() {
        let mut input = Cursor::new("yes\nhead, boots\n-3\n2\n9\n\n");
        let mut out = Vec::new();
        let config = ask_setup(&mut input, &mut out).unwrap();

        assert!(config.gacha_enabled);
        assert_eq!(config.target_set(), SlotSet::from_slots(&[Slot::Head]));
        assert_eq!(config.starting.slot(Slot::Head), &StartingSlot::new(9, 2));
        assert_eq!(config.num_runs, 30);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Ignoring unknown slot 'boots'"));
        assert!(printed.contains("Invalid input"));
        assert!(!printed.contains("No valid slots"));
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn test_all_invalid_targets_fall_back_with_notice() {
        let mut input = Cursor::new("n
cape, boots
0
3
0
3
0
3
0
3
1
");
        let mut out = Vec::new();
        let config = ask_setup(&mut input, &mut out).unwrap();

        assert_eq!(config.target_set(), SlotSet::all());
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Ignoring unknown slot").count(), 2);
        assert!(printed.contains("No valid slots given; targeting all four."));
    }

    #[test]
    fn test_blank_targets_ask_every_slot() {
        let mut input = Cursor::new("n\n\n0\n9\n0\n9\n0\n9\n0\n9\n5\n");
        let mut out = Vec::new();
        let config = ask_setup(&mut input, &mut out).unwrap();

        assert!(!config.gacha_enabled);
        assert_eq!(config.target_set(), SlotSet::all());
        assert_eq!(config.starting, StartingInventory::uniform(9, 0));
        assert_eq!(config.num_runs, 5);
    }

    #[test]
    fn test_closed_input_is_error() {
        let mut input = Cursor::new("y\n");
        let mut out = Vec::new();
        let err = ask_setup(&mut input, &mut out).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
