use clap::{Arg, ArgAction, Command};
use std::path::Path;

use bulkcase::{parsing, problem};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("bulkcase")
        .version(VERSION)
        .propagate_version(true)
        .about("The bulk test case entry parser.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Parse the given bulk entry text and report whether it is well formed")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the bulk entry text you want to check. Use \"-\" to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Parse the given bulk entry text and emit the cases as JSON")
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print the emitted JSON."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the bulk entry text you want to convert. Use \"-\" to read from standard input."),
                ),
        )
        .get_matches();

    initialize_logging(matches.get_flag("debug"));

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .expect("filename is a required argument");
            check(Path::new(filename));
        }
        Some(("convert", submatches)) => {
            let filename = submatches
                .get_one::<String>("filename")
                .expect("filename is a required argument");
            let pretty = submatches.get_flag("pretty");
            convert(Path::new(filename), pretty);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: bulkcase [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn initialize_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn check(filename: &Path) {
    let content = load_or_exit(filename);
    let cases = parsing::parse(&content);

    if let Some(message) = problem::find_failure(&cases) {
        eprintln!("{}", problem::full_parse_error(filename, &cases, message));
        std::process::exit(1);
    }

    let steps: usize = cases
        .iter()
        .map(|case| {
            case.steps
                .len()
        })
        .sum();

    println!(
        "{}: {} case{}, {} step{}",
        filename.to_string_lossy(),
        cases.len(),
        if cases.len() == 1 { "" } else { "s" },
        steps,
        if steps == 1 { "" } else { "s" },
    );
}

fn convert(filename: &Path, pretty: bool) {
    let content = load_or_exit(filename);
    let cases = parsing::parse(&content);

    let output = if pretty {
        serde_json::to_string_pretty(&cases)
    } else {
        serde_json::to_string(&cases)
    }
    .expect("Serializing cases to JSON");

    // The cases are emitted even when one of them carries an error; the
    // error is part of the data. The exit status is how scripts find out
    // the submission was not fully well formed.
    println!("{}", output);

    if let Some(message) = problem::find_failure(&cases) {
        eprintln!("{}", problem::concise_parse_error(filename, message));
        std::process::exit(1);
    }
}

fn load_or_exit(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}
