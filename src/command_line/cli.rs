#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sudoku_solver::sudoku::board::Board;
use sudoku_solver::sudoku::output::SolutionWriter;
use sudoku_solver::sudoku::parse::parse_file;
use sudoku_solver::sudoku::solver::{SearchStats, Solver};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the Sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku_solver",
    version,
    about = "An exhaustive Sudoku solver that enumerates every completion"
)]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single puzzle file.
    Solve {
        /// Path to the puzzle file. The format is nine lines of nine cells,
        /// `1..=9` for clues, `0` or `.` for empty cells.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file found under a directory.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable verification: every emitted solution is checked to be
    /// permutation-valid and to retain the given clues.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of each solution grid as it is found.
    #[arg(short, long, default_value_t = true)]
    pub(crate) print_solutions: bool,

    /// Persist solutions to the solution file.
    #[arg(long, default_value_t = true)]
    pub(crate) save: bool,

    /// Override the solution file path (default: `<input>-solution.txt`).
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
}

/// Solves a single puzzle file: parse, encode, enumerate, report.
///
/// Every solution is printed and appended to the solution file as it is
/// found; once the search is exhausted the outcome summary and statistics
/// are printed.
///
/// # Errors
///
/// A human-readable message if the file is missing or malformed, the puzzle
/// is self-contradictory, or the solution file cannot be written.
pub(crate) fn solve_puzzle(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    let puzzle = match parse_file(path) {
        Ok(board) => board,
        Err(e) => return Err(format!("Error parsing puzzle file: {e}")),
    };
    let parse_time = time.elapsed();

    println!("The puzzle:");
    println!("{puzzle}");

    if common.debug {
        println!("Clues: {}", puzzle.clue_count());
        println!("Empty cells: {}", puzzle.empty_count());
    }

    let mut solver = match Solver::new(&puzzle) {
        Ok(solver) => solver,
        Err(e) => return Err(format!("The input puzzle has a conflict: {e}")),
    };

    let solution_path = common
        .output
        .clone()
        .unwrap_or_else(|| solution_path_for(path));
    let mut writer = if common.save {
        match SolutionWriter::create(&solution_path) {
            Ok(writer) => Some(writer),
            Err(e) => {
                return Err(format!("Unable to create {}: {e}", solution_path.display()));
            }
        }
    } else {
        None
    };

    epoch::advance().unwrap();
    let time = std::time::Instant::now();

    while let Some(solution) = solver.next_solution() {
        if common.verify {
            let ok = solution.is_valid_solution() && solution.retains_clues_of(solver.puzzle());
            assert!(ok, "Solution failed verification!");
        }

        if common.print_solutions {
            println!("#{} solution:", solver.solution_count());
            println!("{solution}");
        }

        if let Some(writer) = writer.as_mut() {
            if let Err(e) = writer.write(&solution) {
                return Err(format!("Unable to write {}: {e}", solution_path.display()));
            }
        }
    }

    let elapsed = time.elapsed();

    if let Some(writer) = writer.take() {
        if let Err(e) = writer.finish() {
            return Err(format!("Unable to write {}: {e}", solution_path.display()));
        }
    }

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.debug {
        println!("Time: {elapsed:?}");
    }

    if common.verify && solver.solution_count() > 0 {
        println!("Verified: true");
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &puzzle,
            &solver.stats(),
            solver.solution_count(),
            allocated_mib,
            resident_mib,
        );
    }

    report_outcome(
        solver.solution_count(),
        common.save.then_some(solution_path.as_path()),
    );

    Ok(())
}

/// Solves a directory of puzzle files.
///
/// Walks the directory tree in path order and solves every file with a
/// `.sudoku` extension; everything else is skipped.
///
/// # Errors
///
/// The first failing puzzle's message, as from [`solve_puzzle`].
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        std::process::exit(1);
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .sorted_by(|a, b| a.path().cmp(b.path()))
    {
        let file_path = entry.path().to_path_buf();
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            continue;
        }

        if !file_path.is_file() {
            continue;
        }

        println!("Solving: {}", file_path.display());
        solve_puzzle(&file_path, common)?;
    }

    Ok(())
}

/// Default solution file path: the input path with `-solution.txt` appended.
fn solution_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push("-solution.txt");
    PathBuf::from(name)
}

/// Translates the final solution count into the summary text.
fn report_outcome(count: usize, solution_file: Option<&Path>) {
    match count {
        0 => println!("There is no solution."),
        1 => println!("There is one solution."),
        n => println!("There are {n} solutions."),
    }

    if let Some(path) = solution_file {
        if count == 1 {
            println!("Solution is saved in file named {}", path.display());
        } else if count > 1 {
            println!("Solutions are saved in file named {}", path.display());
        }
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    puzzle: &Board,
    s: &SearchStats,
    n_solutions: usize,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Given clues", puzzle.clue_count());
    stat_line("Empty cells", puzzle.empty_count());

    println!("========================[ Search Statistics ]========================");
    stat_line("Solutions", n_solutions);
    stat_line_with_rate("Candidates tried", s.candidates, elapsed_secs);
    stat_line_with_rate("Placements", s.placements, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
