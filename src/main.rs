//! # walksat
//!
//! `walksat` is a command-line front end for the WalkSAT local search solver.
//! It reads problems in DIMACS CNF format, or as plain clause text, and runs a
//! bounded number of randomised tries to find a satisfying assignment.
//!
//! Local search is incomplete: when the budget runs out the solver reports
//! `s UNSATISFIABLE`, which only means no model was found.
//!
//! ## Usage
//!
//! ```sh
//! walksat [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! `PATH` given without a subcommand is solved directly. A directory is walked
//! and every `.cnf` file in it is solved in turn.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a CNF file in DIMACS format.
//!     ```sh
//!     walksat file --path <path_to_cnf_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Solve a CNF formula provided as plain text.
//!     ```sh
//!     walksat text --input "1 -2 0
//!     2 3 0" [OPTIONS]
//!     ```
//!
//! 3.  **`generate`**: Print a random k-SAT instance in DIMACS format.
//!     ```sh
//!     walksat generate --vars 100 --clauses 420 --planted --seed 7
//!     ```
//!
//! 4.  **`completions`**: Print a shell completion script.
//!
//! ### Common Options
//!
//! -   `-t, --max-tries <N>`: Restarts from a fresh random assignment (default: `5`).
//! -   `-f, --max-flips <N>`: Flips per try (default: `100`).
//! -   `-n, --noise <P>`: Probability of a random-walk move (default: `0.4`).
//! -   `--seed <SEED>`: Seed for the random number generator.
//! -   `--timeout <SECS>`: Wall-clock limit.
//! -   `-d, --debug`: Debug logging. `RUST_LOG` overrides it.
//! -   `--verify <BOOL>`, `--stats <BOOL>`, `-p, --print-solution <BOOL>` (default: `true`).

use clap::Parser;
use command_line::cli::{Cli, Commands};
use std::process::ExitCode;

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better performance
/// and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point.
///
/// Parses command-line arguments and dispatches to the matching handler.
/// Errors are printed to stderr and turn into a non-zero exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let debug = match &cli.command {
        Some(Commands::File { common, .. } | Commands::Text { common, .. }) => {
            common.debug || cli.common.debug
        }
        _ => cli.common.debug,
    };
    command_line::cli::init_logging(debug);

    let result = match cli.command {
        Some(Commands::File { path, common }) => command_line::cli::solve_file(&path, &common),
        Some(Commands::Text { input, common }) => command_line::cli::solve_text(&input, &common),
        Some(Commands::Generate {
            vars,
            clauses,
            k,
            seed,
            planted,
            output,
        }) => command_line::cli::generate(vars, clauses, k, seed, planted, output.as_deref()),
        Some(Commands::Completions { shell }) => {
            command_line::cli::print_completions(shell);
            Ok(())
        }
        None => match cli.path {
            Some(path) => command_line::cli::solve_path(&path, &cli.common),
            None => {
                eprintln!("No command provided. Use --help for more information.");
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
