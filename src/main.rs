// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::path::PathBuf;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use serial_melody::serial::print_ports;
use serial_melody::session::save_prompt;
use serial_melody::ui::ProgressBar;
use serial_melody::{Outcome, Session, Settings};

fn cli() -> Command {
    Command::new("serial-melody")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert serial port characters (1-9, A-I) to a MIDI melody")
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("Serial port (default: COM10 / /dev/ttyACM0)"),
        )
        .arg(
            Arg::new("baud")
                .long("baud")
                .value_name("RATE")
                .value_parser(value_parser!(u32))
                .help("Baud rate (default: 230400)"),
        )
        .arg(
            Arg::new("duration")
                .long("duration")
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .help("Read duration in seconds (default: 30)"),
        )
        .arg(
            Arg::new("tempo")
                .long("tempo")
                .value_name("BPM")
                .value_parser(value_parser!(u32).range(1..))
                .help("Tempo in BPM (default: 120)"),
        )
        .arg(
            Arg::new("instrument")
                .long("instrument")
                .value_name("PROGRAM")
                .value_parser(value_parser!(u8).range(0..=127))
                .help("MIDI instrument number (default: 73 - flute)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Output MIDI file (prompts when omitted)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("YAML settings file; flags override it"),
        )
        .arg(
            Arg::new("no-open")
                .long("no-open")
                .action(ArgAction::SetTrue)
                .help("Do not open the output folder after saving"),
        )
        .arg(
            Arg::new("list-ports")
                .long("list-ports")
                .action(ArgAction::SetTrue)
                .help("List available serial ports and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("More log output (-v, -vv, -vvv)"),
        )
}

/// Overlay flags given on the command line onto `settings`
fn apply_overrides(settings: &mut Settings, matches: &ArgMatches) {
    if let Some(port) = matches.get_one::<String>("port") {
        settings.port = port.clone();
    }
    if let Some(&baud) = matches.get_one::<u32>("baud") {
        settings.baud = baud;
    }
    if let Some(&duration) = matches.get_one::<u64>("duration") {
        settings.duration = duration;
    }
    if let Some(&tempo) = matches.get_one::<u32>("tempo") {
        settings.tempo = tempo;
    }
    if let Some(&instrument) = matches.get_one::<u8>("instrument") {
        settings.instrument = instrument;
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        settings.output = Some(output.clone());
    }
    if matches.get_flag("no-open") {
        settings.open_folder = false;
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Saved { path, notes } => {
            println!("MIDI file '{}' created successfully.", path.display());
            println!("Converted {} characters to notes.", notes);
        }
        Outcome::NoData => {
            println!("No valid data (1-9, A-I) received from serial port.");
        }
        Outcome::Canceled => {
            println!("Save operation canceled.");
        }
        Outcome::TransportFailed(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Make sure the device is connected and the port is correct.");
        }
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-ports") {
        print_ports()?;
        return Ok(());
    }

    let mut settings = match matches.get_one::<PathBuf>("config") {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    apply_overrides(&mut settings, &matches);
    settings.validate()?;

    println!("Serial to MIDI Melody Converter (1-9 & A-I)");
    println!("-------------------------------------------");
    println!(
        "Reading {} at {} baud for {} seconds...",
        settings.port, settings.baud, settings.duration
    );

    let mut prompt = save_prompt(&settings);
    let mut progress = ProgressBar::stdout();
    let session = Session::new(settings);

    let outcome = session.run(&mut progress, prompt.as_mut())?;
    report(&outcome);
    Ok(())
}
