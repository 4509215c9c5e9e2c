#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The command-line interface: argument parsing, dispatch and reporting.

use backjump::sat::cdcl::Cdcl;
use backjump::sat::cnf::Cnf;
use backjump::sat::dimacs::{parse_dimacs_text, parse_file};
use backjump::sat::error::SolverError;
use backjump::sat::solver::{Limits, SearchStats, Solver, Verdict};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Exit code for a finished solve, SAT or UNSAT alike.
const EXIT_SOLVED: u8 = 0;
/// Exit code when a conflict budget ran out before a verdict.
const EXIT_INDETERMINATE: u8 = 2;

/// Command-line interface of the `backjump` SAT solver.
#[derive(Parser, Debug)]
#[command(name = "backjump", version, about = "A CDCL SAT solver for DIMACS CNF input")]
pub struct Cli {
    /// Path to a DIMACS .cnf file; shorthand for the `file` subcommand.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonOptions,
}

/// The available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// DIMACS input as a string, e.g. "p cnf 2 2\n1 -2 0\n2 0".
        #[arg(short, long)]
        input: String,
    },

    /// Solve every .cnf file under a directory.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,
    },
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonOptions {
    /// Enable debug logging of the search (decisions, propagations,
    /// conflicts, learned clauses).
    #[arg(short, long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Skip checking the model against the original clauses on SAT.
    #[arg(long, global = true, default_value_t = false)]
    pub no_verify: bool,

    /// Print search statistics after solving.
    #[arg(short, long, global = true, default_value_t = false)]
    pub stats: bool,

    /// Suppress printing the model on SAT.
    #[arg(long, global = true, default_value_t = false)]
    pub no_model: bool,

    /// Give up with INDETERMINATE after this many conflicts.
    #[arg(long, global = true)]
    pub max_conflicts: Option<u64>,
}

/// Dispatches the parsed command line. Returns the process exit code.
///
/// # Errors
///
/// Returns any input error; the caller reports it and exits nonzero.
pub fn run(cli: &Cli) -> Result<u8, SolverError> {
    match (&cli.command, &cli.path) {
        (Some(Commands::File { path }), _) | (None, Some(path)) => solve_path(path, &cli.common),
        (Some(Commands::Text { input }), _) => {
            let cnf = parse_dimacs_text(input)?;
            Ok(solve_and_report(cnf, &cli.common, None, Duration::ZERO))
        }
        (Some(Commands::Dir { path }), _) => solve_dir(path, &cli.common),
        (None, None) => Err(SolverError::NoInput),
    }
}

fn solve_path(path: &Path, common: &CommonOptions) -> Result<u8, SolverError> {
    let start = Instant::now();
    let cnf = parse_file(path)?;
    let parse_time = start.elapsed();
    Ok(solve_and_report(cnf, common, Some(path), parse_time))
}

/// Solves every `.cnf` file under `path`, reporting each in turn. The exit
/// code is the worst one encountered.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<u8, SolverError> {
    let mut exit = EXIT_SOLVED;
    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let file_path = entry.path();
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }
        exit = exit.max(solve_path(file_path, common)?);
    }
    Ok(exit)
}

fn solve_and_report(
    cnf: Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> u8 {
    if let Some(path) = label {
        println!("c solving {}", path.display());
    }

    let limits = Limits {
        max_conflicts: common.max_conflicts,
    };
    let mut solver: Cdcl = Cdcl::with_limits(cnf, limits);

    let start = Instant::now();
    let verdict = solver.solve();
    let elapsed = start.elapsed();

    let exit = match &verdict {
        Verdict::Sat(model) => {
            println!("SAT");
            if !common.no_model {
                println!("{model}");
            }
            if !common.no_verify {
                assert!(
                    solver.cnf().verify(model),
                    "model failed verification against the original clauses"
                );
            }
            EXIT_SOLVED
        }
        Verdict::Unsat => {
            println!("UNSAT");
            EXIT_SOLVED
        }
        Verdict::Indeterminate => {
            println!("INDETERMINATE");
            EXIT_INDETERMINATE
        }
    };

    if common.stats {
        print_stats(parse_time, elapsed, &solver.stats());
    }

    exit
}

fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<24} {value:>18}  |");
}

fn print_stats(parse_time: Duration, elapsed: Duration, stats: &SearchStats) {
    println!("=====================[ Search Statistics ]=====================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Solve time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    stat_line("Conflicts", stats.conflicts);
    stat_line("Decisions", stats.decisions);
    stat_line("Propagations", stats.propagations);
    stat_line("Restarts", stats.restarts);
    stat_line("Learnt clauses", stats.learnt_clauses);
    println!("===============================================================");
}
