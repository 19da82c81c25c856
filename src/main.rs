use std::fmt::Display;
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgGroup, ArgMatches};
use log::debug;
use prettytable::{row, Table};
use separator::Separatable;

use sokoban_search::config::{BeamConfig, Format, HeuristicKind, LrtaConfig, Method};
use sokoban_search::level::Level;
use sokoban_search::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Beam search and LRTA* on sokoban levels")
        .arg(
            Arg::with_name("method")
                .short("m")
                .long("method")
                .takes_value(true)
                .possible_values(&["beam", "beam-search", "lrta", "lrta-star"])
                .default_value("beam")
                .help("search algorithm"),
        )
        .arg(
            Arg::with_name("heuristic")
                .short("e")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&["displaced", "manhattan", "euclidean", "hungarian", "improved"])
                .default_value("manhattan")
                .help("estimate of the remaining cost"),
        )
        .arg(
            Arg::with_name("beam-width")
                .long("beam-width")
                .takes_value(true)
                .validator(parses_as::<usize>)
                .help("beam search: states kept each iteration"),
        )
        .arg(
            Arg::with_name("max-steps")
                .long("max-steps")
                .takes_value(true)
                .validator(parses_as::<usize>)
                .help("beam search iterations or LRTA* moves per trial"),
        )
        .arg(
            Arg::with_name("restart-threshold")
                .long("restart-threshold")
                .takes_value(true)
                .validator(parses_as::<usize>)
                .help("beam search: iterations without improvement before restarting"),
        )
        .arg(
            Arg::with_name("randomness")
                .long("randomness")
                .takes_value(true)
                .validator(is_factor)
                .help("beam search: relative noise added to heuristic values"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .validator(parses_as::<u64>)
                .help("beam search: random seed"),
        )
        .arg(
            Arg::with_name("max-restarts")
                .long("max-restarts")
                .takes_value(true)
                .validator(parses_as::<usize>)
                .help("LRTA*: number of trials"),
        )
        .arg(
            Arg::with_name("custom")
                .short("c")
                .long("custom")
                .help("print states in custom format"),
        )
        .arg(
            Arg::with_name("xsb")
                .short("x")
                .long("xsb")
                .help("print states in XSB format (default)"),
        )
        .group(ArgGroup::with_name("format").arg("custom").arg("xsb"))
        .arg(
            Arg::with_name("compare")
                .long("compare")
                .help("run every method with every heuristic and print a summary"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("don't print the states along the path"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let format = if matches.is_present("custom") {
        Format::Custom
    } else {
        Format::Xsb
    };
    let path = matches.value_of("file").expect("file is a required arg");

    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    let beam = beam_config(&matches);
    let lrta = lrta_config(&matches);

    if matches.is_present("compare") {
        compare(&level, beam, lrta);
        return;
    }

    let method = match parse_value::<Method>(&matches, "method") {
        Method::BeamSearch(_) => Method::BeamSearch(beam),
        Method::LrtaStar(_) => Method::LrtaStar(lrta),
    };
    let heuristic = parse_value::<HeuristicKind>(&matches, "heuristic");
    debug!("{:?}", method);

    if let Err(err) = heuristic.check(&level) {
        eprintln!("Can't use the {} heuristic: {}", heuristic, err);
        process::exit(1);
    }

    println!(
        "Solving {} using {} with the {} heuristic...",
        path, method, heuristic
    );
    let solution = level.solve(method, heuristic).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });

    println!("Expanded states: {}", solution.expanded.separated_string());
    println!("{}", solution.stats);
    if solution.is_solved() {
        println!("Found solution:");
    } else {
        println!("No solution found, best attempt:");
    }
    if !matches.is_present("quiet") {
        for state in &solution.path {
            println!("{}", state.format(format));
        }
    }
    println!("{} moves", (solution.path.len() - 1).separated_string());
}

fn beam_config(matches: &ArgMatches<'_>) -> BeamConfig {
    let default = BeamConfig::default();
    BeamConfig {
        beam_width: value_or(matches, "beam-width", default.beam_width),
        max_steps: value_or(matches, "max-steps", default.max_steps),
        restart_threshold: value_or(matches, "restart-threshold", default.restart_threshold),
        randomness_factor: value_or(matches, "randomness", default.randomness_factor),
        seed: value_or(matches, "seed", default.seed),
    }
}

fn lrta_config(matches: &ArgMatches<'_>) -> LrtaConfig {
    let default = LrtaConfig::default();
    LrtaConfig {
        max_steps: value_or(matches, "max-steps", default.max_steps),
        max_restarts: value_or(matches, "max-restarts", default.max_restarts),
    }
}

fn compare(level: &Level, beam: BeamConfig, lrta: LrtaConfig) {
    let mut table = Table::new();
    table.add_row(row!["Method", "Heuristic", "Solved", "Moves", "Expanded"]);

    for &method in &[Method::BeamSearch(beam), Method::LrtaStar(lrta)] {
        for &heuristic in &HeuristicKind::ALL {
            match level.solve(method, heuristic) {
                Ok(solution) => {
                    let solved = if solution.is_solved() { "yes" } else { "no" };
                    table.add_row(row![
                        method,
                        heuristic,
                        solved,
                        r->(solution.path.len() - 1).separated_string(),
                        r->solution.expanded.separated_string()
                    ]);
                }
                Err(err) => {
                    debug!("Skipping {} with {}: {}", method, heuristic, err);
                    table.add_row(row![method, heuristic, "-", "-", "-"]);
                }
            }
        }
    }

    table.printstd();
}

fn parses_as<T>(value: String) -> Result<(), String>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map(|_| ())
        .map_err(|err| format!("{}: {}", value, err))
}

fn is_factor(value: String) -> Result<(), String> {
    match value.parse::<f64>() {
        Ok(factor) if factor.is_finite() && factor >= 0.0 => Ok(()),
        _ => Err(format!("{} is not a non-negative number", value)),
    }
}

/// Only for args that have a validator or a default value.
fn parse_value<T>(matches: &ArgMatches<'_>, name: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let value = matches.value_of(name).unwrap_or_default();
    value.parse().unwrap_or_else(|err| {
        eprintln!("Invalid {}: {}", name, err);
        process::exit(1);
    })
}

fn value_or<T: FromStr>(matches: &ArgMatches<'_>, name: &str, default: T) -> T {
    matches
        .value_of(name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
