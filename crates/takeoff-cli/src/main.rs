// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use takeoff_core::display;
use takeoff_core::search::suggest;
use takeoff_core::speed::{estimate_speed, estimate_takeoff};
use takeoff_core::{geometry, open_dataset, AircraftRecord, Session, Settings};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV export of the aircraft characteristics sheet
    #[arg(short, long, env = "TAKEOFF_DATASET", global = true)]
    dataset: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List aircraft matching a partial name, code or manufacturer
    Search {
        query: String,
        /// Print the matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the details and takeoff estimate for an exact model name
    Info {
        model: String,
        /// Angle of attack in degrees
        #[arg(short, long)]
        angle: Option<f64>,
    },
    /// Estimate takeoff speed from a wing area without a dataset
    Speed {
        /// Wing area in ft²
        #[arg(long)]
        area: f64,
        /// Angle of attack in degrees
        #[arg(long, default_value_t = 10.0)]
        angle: f64,
    },
    /// Line-driven lookup session (:pick N, :area X, :angle X, :quit)
    Interactive,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let settings = Settings::load();

    match cli.command {
        Commands::Speed { area, angle } => {
            println!("Takeoff speed: {}", display::format_speed(estimate_speed(area, angle)));
        }
        Commands::Search { query, json } => {
            let dataset = open_dataset(cli.dataset, &settings)?;
            let results = suggest(&query, dataset.records());
            if json {
                let records: Vec<&AircraftRecord> = results.iter().map(Arc::as_ref).collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if results.is_empty() {
                println!("No aircraft found matching '{}'", query);
            } else {
                for (i, r) in results.iter().enumerate() {
                    print_suggestion(i, r);
                }
            }
        }
        Commands::Info { model, angle } => {
            let dataset = open_dataset(cli.dataset, &settings)?;
            let record = dataset
                .find_by_model(&model)
                .ok_or_else(|| anyhow::anyhow!("No aircraft with model name '{}'", model))?;
            let angle = angle.unwrap_or(settings.default_angle_deg);
            let record: &AircraftRecord = record;
            let area = geometry::effective_wing_area(None, Some(record));

            println!("Wing Area: {}", display::format_wing_area(area));
            println!("Angle of Attack: {}°", angle);
            for (label, value) in display::speed_lines(&estimate_takeoff(area, Some(record), angle)) {
                println!("{}: {}", label, value);
            }
            println!();
            print_record(record);
        }
        Commands::Interactive => {
            let dataset = open_dataset(cli.dataset, &settings)?;
            let mut session = Session::from_settings(Arc::new(dataset), &settings);
            run_interactive(&mut session)?;
        }
    }

    Ok(())
}

fn suggestion_line(index: usize, record: &AircraftRecord) -> String {
    let ids: Vec<&str> = record.identifiers().collect();
    format!(
        "{:>3}. {} [{}]",
        index,
        record.model_name().unwrap_or(display::PLACEHOLDER),
        ids.join(" / ")
    )
}

fn print_suggestion(index: usize, record: &AircraftRecord) {
    println!("{}", suggestion_line(index, record));
}

/// Lines printed after a typed query. A blank query closes the list silently.
fn query_report(query: &str, suggestions: &[Arc<AircraftRecord>]) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    if suggestions.is_empty() {
        return vec!["No matches".to_string()];
    }
    suggestions
        .iter()
        .enumerate()
        .map(|(i, r)| suggestion_line(i, r))
        .collect()
}

fn print_record(record: &AircraftRecord) {
    println!(
        "Selected Aircraft Info: {}",
        record.model_name().unwrap_or(display::PLACEHOLDER)
    );
    for (label, value) in display::detail_lines(record)
        .into_iter()
        .chain(display::summary_lines(record))
    {
        println!("  {}: {}", label, value);
    }
}

fn print_state(session: &Session) {
    println!(
        "Wing Area: {} | Angle: {}°",
        display::format_wing_area(session.wing_area_display()),
        session.angle_deg()
    );
    for (label, value) in display::speed_lines(&session.estimate()) {
        println!("{}: {}", label, value);
    }
}

fn run_interactive(session: &mut Session) -> Result<()> {
    println!(
        "{} aircraft loaded. Type to search; :pick N, :area X, :angle X, :info, :quit",
        session.dataset().len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }
        let line = line.trim_end_matches(&['\r', '\n'][..]);

        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit", _) | (":q", _) => break,
            (":pick", n) => {
                let picked = n
                    .trim()
                    .parse::<usize>()
                    .is_ok_and(|i| session.select_index(i));
                if picked {
                    print_state(session);
                } else {
                    println!("No suggestion #{}", n.trim());
                }
            }
            (":area", v) => {
                session.set_override_wing_area(v);
                print_state(session);
            }
            (":angle", v) => {
                session.set_angle(v);
                print_state(session);
            }
            (":info", _) => match session.selection() {
                Some(record) => print_record(record),
                None => println!("No aircraft selected"),
            },
            _ => {
                // Each line is a complete edit, so the quiet period is skipped
                session.set_query(line, Instant::now());
                session.flush_search();
                for out in query_report(line, session.suggestions()) {
                    println!("{}", out);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_speed() {
        let cli = Cli::try_parse_from(["takeoff", "speed", "--area", "1000"]).unwrap();
        match cli.command {
            Commands::Speed { area, angle } => {
                assert_eq!(area, 1000.0);
                assert_eq!(angle, 10.0);
            }
            _ => panic!("expected speed"),
        }
    }

    #[test]
    fn test_blank_query_prints_nothing() {
        let records = vec![Arc::new(
            AircraftRecord::new()
                .with(takeoff_core::Field::IcaoCode, "B738")
                .with(takeoff_core::Field::ModelFaa, "737-800"),
        )];

        assert!(query_report("", &[]).is_empty());
        assert!(query_report("   ", &[]).is_empty());
        assert_eq!(query_report("zzz", &[]), vec!["No matches".to_string()]);

        let lines = query_report("737", &records);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("737-800"));
        assert!(lines[0].contains("B738"));
    }
}
