#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use log::{error, info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};
use walksat::sat::cnf::Cnf;
use walksat::sat::configs::{DEFAULT_MAX_FLIPS, DEFAULT_MAX_TRIES, DEFAULT_NOISE, SolverConfig};
use walksat::sat::dimacs::{parse_file, parse_textual_cnf};
use walksat::sat::error::{CnfError, DimacsError, SolverError};
use walksat::sat::generator::{planted_k_sat, random_k_sat};
use walksat::sat::solver::{SolutionStats, Solver, Verdict};
use walksat::sat::walksat::WalkSat;

/// Defines the command-line interface for the walksat application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "walksat", version, about = "A WalkSAT local search SAT solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as a DIMACS .cnf file to solve, or a directory whose
    /// `.cnf` files are all solved.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `generate`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long = "path", id = "file_path")]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        /// Each line represents a clause, literals are space-separated, and 0 terminates a clause.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a random k-SAT instance and print it in DIMACS format.
    Generate {
        /// Number of variables.
        #[arg(long)]
        vars: usize,

        /// Number of clauses.
        #[arg(long)]
        clauses: usize,

        /// Literals per clause.
        #[arg(short, long, default_value_t = 3)]
        k: usize,

        /// Seed for the generator. Drawn at random when absent.
        #[arg(long)]
        seed: Option<u64>,

        /// Hide a satisfying assignment in the instance, making it satisfiable.
        #[arg(long, default_value_t = false)]
        planted: bool,

        /// Write the instance to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check a found model against the formula before reporting it.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the satisfying assignment as a `v` line.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub(crate) print_solution: bool,

    /// Number of independent restarts.
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_TRIES)]
    pub(crate) max_tries: usize,

    /// Flips allowed per restart.
    #[arg(short = 'f', long, default_value_t = DEFAULT_MAX_FLIPS)]
    pub(crate) max_flips: usize,

    /// Probability of a random-walk move instead of a greedy one.
    #[arg(short, long, default_value_t = DEFAULT_NOISE)]
    pub(crate) noise: f64,

    /// Seed for the random number generator. Drawn at random when absent.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Wall-clock limit in seconds, checked between flips.
    #[arg(long, value_parser = parse_seconds)]
    pub(crate) timeout: Option<Duration>,
}

impl CommonOptions {
    pub(crate) fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_tries: self.max_tries,
            max_flips: self.max_flips,
            noise: self.noise,
            seed: self.seed,
            timeout: self.timeout,
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

/// Everything that can stop the command line before a verdict is printed.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{}: {source}", .path.display())]
    Input { path: PathBuf, source: DimacsError },

    #[error("invalid input: {0}")]
    Text(#[from] DimacsError),

    #[error("invalid formula: {0}")]
    Formula(#[from] CnfError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("not a file or directory: {}", .0.display())]
    NotFound(PathBuf),
}

/// Sets up `env_logger`. `RUST_LOG` takes precedence over `--debug`.
pub(crate) fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Writes completion scripts for `shell` to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
}

/// Solves a single file, or every `.cnf` file under a directory.
///
/// # Errors
///
/// If `path` does not exist, or names a single file that cannot be parsed.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if path.is_dir() {
        solve_dir(path, common)
    } else if path.is_file() {
        solve_file(path, common)
    } else {
        Err(CliError::NotFound(path.to_path_buf()))
    }
}

/// Parses and solves one DIMACS file.
///
/// # Errors
///
/// If the file cannot be read or parsed, or the options are invalid.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = parse_file(path).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_time = time.elapsed();

    solve_and_report(cnf, common, Some(path), parse_time)
}

/// Solves a directory of CNF files.
///
/// Iterates over all `.cnf` files in the directory tree. Files that fail to
/// parse are reported and skipped.
///
/// # Errors
///
/// If the solver options are invalid.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            warn!("skipping non-CNF file: {}", file_path.display());
            continue;
        }

        match solve_file(file_path, common) {
            Ok(()) => {}
            Err(e @ CliError::Input { .. }) => error!("{e}"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Solves a formula given as headerless clause text.
///
/// # Errors
///
/// If the text is not a valid formula or the options are invalid.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), CliError> {
    let time = Instant::now();
    let cnf = Cnf::from_clauses(parse_textual_cnf(input)?)?;
    let parse_time = time.elapsed();

    solve_and_report(cnf, common, None, parse_time)
}

/// Generates a random instance and writes it as DIMACS.
///
/// # Errors
///
/// If the instance parameters are impossible or the output cannot be written.
pub(crate) fn generate(
    vars: usize,
    clauses: usize,
    k: usize,
    seed: Option<u64>,
    planted: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    let mut rng = fastrand::Rng::with_seed(seed);
    let cnf = if planted {
        planted_k_sat(vars, clauses, k, &mut rng)?.0
    } else {
        random_k_sat(vars, clauses, k, &mut rng)?
    };
    info!("generated {vars} variables, {clauses} clauses, k = {k}, seed {seed}");

    let dimacs = format!("c random {k}-SAT, seed {seed}\n{cnf}");
    match output {
        Some(path) => std::fs::write(path, dimacs).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(dimacs.as_bytes())
                .map_err(|source| CliError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}

/// Checks a satisfiable verdict against the formula.
///
/// # Panics
///
/// If the model does not satisfy the formula.
pub(crate) fn verify_solution(cnf: &Cnf, verdict: &Verdict) {
    if let Some(model) = verdict.model() {
        let ok = cnf.verify(&model.to_solutions());
        println!("c Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    }
}

/// Runs the solver on `cnf`.
///
/// # Returns
/// A tuple containing:
/// * `Verdict`: The verdict, with the model if one was found.
/// * `Duration`: The time taken to solve the formula.
/// * `WalkSat`: The solver, which still owns the formula and its statistics.
///
/// # Errors
///
/// If the solver configuration is invalid.
pub(crate) fn solve(
    cnf: Cnf,
    common: &CommonOptions,
) -> Result<(Verdict, Duration, WalkSat), CliError> {
    let mut solver = WalkSat::new(cnf, common.solver_config())?;

    let time = Instant::now();
    let verdict = solver.solve();
    let elapsed = time.elapsed();

    Ok((verdict, elapsed, solver))
}

/// Solves a formula and reports the verdict, including stats and verification.
///
/// # Errors
///
/// If the solver configuration is invalid.
pub(crate) fn solve_and_report(
    cnf: Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<(), CliError> {
    if let Some(name) = label {
        println!("c Solving: {}", name.display());
    }

    let (verdict, elapsed, solver) = solve(cnf, common)?;

    if common.verify {
        verify_solution(solver.cnf(), &verdict);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            solver.cnf(),
            &solver.stats(),
            memory_usage(),
        );
    }

    println!("{}", verdict.status_line());
    if common.print_solution {
        if let Some(model) = verdict.model() {
            println!("{}", model.to_solutions());
        }
    }

    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("c |  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("c |  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    s: &SolutionStats,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("c =======================[ Problem Statistics ]=======================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.num_clauses());
    stat_line("Literals", cnf.num_literals());

    println!("c ========================[ Search Statistics ]=======================");
    stat_line("Seed", s.seed);
    stat_line("Tries", s.tries);
    stat_line_with_rate("Flips", s.flips, elapsed_secs);
    stat_line("Random walk moves", s.random_walk_moves);
    stat_line("Greedy moves", s.greedy_moves);
    stat_line("Timed out", s.timed_out);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("c ====================================================================");
}
