//! # Sudoku Solver
//!
//! A command-line solver that reads a 9x9 Sudoku puzzle from a file and
//! enumerates *every* valid completion by exhaustive backtracking search
//! over per-column, per-row, and per-block availability tables. Each
//! solution is printed to the console and appended to a solution file
//! (`<input>-solution.txt` unless overridden with `--output`).
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle file directly
//! sudoku_solver puzzle.sudoku
//!
//! # The same, via the explicit subcommand
//! sudoku_solver solve --path puzzle.sudoku
//!
//! # Solve every .sudoku file under a directory
//! sudoku_solver dir --path puzzles/
//!
//! # Generate shell completions
//! sudoku_solver completions bash
//! ```
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Enable debug output (default: `false`).
//! -   `-v, --verify`: Check every emitted solution (default: `true`).
//! -   `-s, --stats`: Print timing, search, and memory statistics
//!     (default: `true`).
//! -   `-p, --print-solutions`: Print each solution grid (default: `true`).
//! -   `--save`: Persist solutions to the solution file (default: `true`).
//! -   `-o, --output <PATH>`: Override the solution file path.
//!
//! The puzzle file format is nine lines of nine cells each: `1..=9` are
//! given clues, `0` or `.` mark empty cells. A puzzle whose clues conflict
//! is rejected before any search begins; a puzzle with no completion is not
//! an error and reports "There is no solution."
//!
//! This file contains the entry point and dispatch; the CLI definition and
//! the solving drivers live in the `command_line` module, and the solver
//! itself in the `sudoku_solver` library crate.

use crate::command_line::cli::{self, Cli, Commands};
use clap::{CommandFactory, Parser};

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and maps failures to a non-zero exit code.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand. This defaults to solving a single puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            finish(cli::solve_puzzle(&path, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => finish(cli::solve_puzzle(&path, &common)),

        Some(Commands::Dir { path, common }) => finish(cli::solve_dir(&path, &common)),

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Reports a command failure to stderr and exits non-zero.
fn finish(result: Result<(), String>) {
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
