#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exhaustive enumeration of 9x9 Sudoku puzzles.
//!
//! The pipeline is: parse a puzzle file into a [`board::Board`], hand it to a
//! [`solver::Solver`] session (which reorders rows by clue density and builds
//! the availability tables, rejecting contradictory input), then consume the
//! session as an iterator over *every* valid completion.

/// Grid representation, rendering, and solution validity checks.
pub mod board;
/// Writing solution files in the compact digit format.
pub mod output;
/// Parsing puzzle text into a board.
pub mod parse;
/// The solver session: encoding, backtracking search, statistics.
pub mod solver;
/// Availability bitsets and the row-order permutation.
pub mod state;

use thiserror::Error;

/// Errors produced while loading or encoding a puzzle.
///
/// `Contradiction` is fatal input validation: it is raised by the encoder
/// before any search begins, never by the search itself. A puzzle with no
/// completions is *not* an error; it simply enumerates zero solutions.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A given clue duplicates a value already forced by another clue in the
    /// same row, column, or block. Coordinates and value are 1-based, in the
    /// caller's original row order.
    #[error("{value} can't be in ({row},{col}): its row, column, or block already holds it")]
    Contradiction {
        /// 1-based row of the offending clue, in original row order.
        row: usize,
        /// 1-based column of the offending clue.
        col: usize,
        /// 1-based clue value.
        value: usize,
    },

    /// The puzzle text does not have the 9-lines-of-9-cells shape.
    #[error("malformed puzzle: {0}")]
    BadShape(String),

    /// A cell character outside `1..=9`, `0`, and `.`.
    #[error("invalid cell character {ch:?} on line {line}")]
    InvalidCell {
        /// 1-based line number in the input.
        line: usize,
        /// The offending character.
        ch: char,
    },

    /// The puzzle file could not be read.
    #[error("failed to read puzzle: {0}")]
    Io(#[from] std::io::Error),
}
