#![deny(missing_docs)]
//! This crate enumerates every valid completion of a 9x9 Sudoku puzzle using
//! backtracking search over per-column, per-row, and per-block availability
//! tables.

/// The `sudoku` module implements the board model, the puzzle parser, the
/// exhaustive solver session, and the solution-file writer.
pub mod sudoku;
