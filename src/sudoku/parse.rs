#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the plain-text Sudoku puzzle format.
//!
//! A puzzle is nine lines, each carrying one token of nine cell characters:
//! `'1'..='9'` are given clues (stored zero-based), and `'0'` or `'.'` mark
//! empty cells. Only the first whitespace-delimited token of a line is
//! considered, so trailing annotations after a puzzle row are ignored, and
//! blank lines are skipped entirely. Anything else is rejected: the solver
//! core assumes it always receives a structurally valid 9x9 board, so all
//! shape and character validation happens here.

use crate::sudoku::PuzzleError;
use crate::sudoku::board::{Board, SIZE};
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses puzzle text from a `BufRead` source into a [`Board`].
///
/// # Errors
///
/// - [`PuzzleError::Io`] if reading from `reader` fails.
/// - [`PuzzleError::BadShape`] if there are more or fewer than nine puzzle
///   rows, or a row token is not exactly nine characters long.
/// - [`PuzzleError::InvalidCell`] on any cell character outside `1..=9`,
///   `0`, and `.`.
pub fn parse_puzzle<R: BufRead>(reader: R) -> Result<Board, PuzzleError> {
    let mut board = Board::empty();
    let mut row = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };

        if row == SIZE {
            return Err(PuzzleError::BadShape(format!(
                "expected {SIZE} rows, found extra content on line {}",
                index + 1
            )));
        }

        let cells = token.chars().collect_vec();
        if cells.len() != SIZE {
            return Err(PuzzleError::BadShape(format!(
                "line {}: expected {SIZE} cells, found {}",
                index + 1,
                cells.len()
            )));
        }

        for (col, &ch) in cells.iter().enumerate() {
            let value = match ch {
                '1'..='9' => Some(ch as u8 - b'1'),
                '0' | '.' => None,
                _ => {
                    return Err(PuzzleError::InvalidCell {
                        line: index + 1,
                        ch,
                    });
                }
            };
            board.set(row, col, value);
        }
        row += 1;
    }

    if row != SIZE {
        return Err(PuzzleError::BadShape(format!(
            "expected {SIZE} rows, found {row}"
        )));
    }

    Ok(board)
}

/// Parses a puzzle file specified by its path.
///
/// Convenience wrapper that opens the file, wraps it in a `BufReader`, and
/// calls [`parse_puzzle`].
///
/// # Errors
///
/// [`PuzzleError::Io`] if the file cannot be opened, plus everything
/// [`parse_puzzle`] reports.
pub fn parse_file(path: &Path) -> Result<Board, PuzzleError> {
    let file = std::fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    parse_puzzle(reader)
}
