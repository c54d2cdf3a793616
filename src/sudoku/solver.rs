//! The solver session: exhaustive backtracking enumeration of every valid
//! completion of a puzzle.
//!
//! A [`Solver`] owns all mutable search state (the working grid, the three
//! availability tables, the explicit depth-first stack, and the solution
//! counter), so one process can solve any number of puzzles by constructing
//! one session per puzzle.
//!
//! Construction runs the board state encoder: rows are reordered by
//! descending clue density, the availability tables are seeded from the
//! given clues, and contradictory input is rejected before any search
//! begins. The session is then consumed as an iterator: each call to
//! [`Solver::next_solution`] resumes the depth-first search where the
//! previous solution was yielded and runs until the next complete
//! assignment, so the full solution sequence is produced lazily and exactly
//! once. Candidates at each cell are tried exhaustively in ascending value
//! order; this is an all-solutions enumeration, not a first-answer solver.
//!
//! Placement and removal are strictly paired: a frame is pushed when a value
//! is placed and its placement is undone whenever the frame is popped, so
//! availability state can never leak between sibling branches.

use crate::sudoku::PuzzleError;
use crate::sudoku::board::{Board, SIZE};
use crate::sudoku::state::{Availability, RowOrder};
use smallvec::SmallVec;

/// Counters describing the work done by a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Candidate values tested against the availability tables.
    pub candidates: usize,
    /// Values placed into the working grid.
    pub placements: usize,
    /// Placements undone after their subtree was exhausted.
    pub backtracks: usize,
}

/// Where the search left off between two `next_solution` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Mid-search: continue from the current stack and candidate value.
    Searching,
    /// The previous call yielded a complete assignment; backtrack once
    /// before continuing.
    Yielded,
    /// Every branch has been explored.
    Exhausted,
}

/// An exhaustive Sudoku solver session.
///
/// Created from a puzzle board, then driven either through the [`Iterator`]
/// implementation or [`Self::next_solution`]. Yielded boards are in the
/// caller's original row order.
#[derive(Debug, Clone)]
pub struct Solver {
    /// The puzzle as given, untouched after construction.
    puzzle: Board,
    /// The grid mutated during search, in reordered row space.
    working: Board,
    /// Maps search row positions back to original rows.
    order: RowOrder,
    /// Column, row, and block availability, kept consistent with `working`.
    avail: Availability,
    /// Coordinates of the non-clue cells, row-major in reordered space.
    open: Vec<(u8, u8)>,
    /// Value currently placed at each search depth. Depth `d` fills
    /// `open[d]`; the stack length is the current depth.
    stack: SmallVec<[u8; 81]>,
    /// Next candidate value to try at the current depth.
    next_value: u8,
    cursor: Cursor,
    n_solutions: usize,
    stats: SearchStats,
}

impl Solver {
    /// Encodes `puzzle` into a ready-to-run session.
    ///
    /// Reorders rows by descending clue density, seeds the working grid and
    /// the availability tables from the given clues, and records the open
    /// cells the search will fill.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::Contradiction`] if a clue duplicates a value already
    /// forced in its row, column, or block. The reported coordinates are
    /// 1-based and in the original row order.
    pub fn new(puzzle: &Board) -> Result<Self, PuzzleError> {
        let order = RowOrder::by_clue_density(puzzle);
        let working = order.permute(puzzle);
        let mut avail = Availability::new();
        let mut open = Vec::with_capacity(puzzle.empty_count());

        for row in 0..SIZE {
            for col in 0..SIZE {
                match working.get(row, col) {
                    Some(value) => {
                        if !avail.is_open(row, col, value) {
                            return Err(PuzzleError::Contradiction {
                                row: order.original(row) + 1,
                                col: col + 1,
                                value: usize::from(value) + 1,
                            });
                        }
                        avail.cover(row, col, value);
                    }
                    None => open.push((row as u8, col as u8)),
                }
            }
        }

        Ok(Self {
            puzzle: puzzle.clone(),
            working,
            order,
            avail,
            open,
            stack: SmallVec::new(),
            next_value: 0,
            cursor: Cursor::Searching,
            n_solutions: 0,
            stats: SearchStats::default(),
        })
    }

    /// The puzzle this session was built from.
    #[must_use]
    pub const fn puzzle(&self) -> &Board {
        &self.puzzle
    }

    /// Complete assignments found so far in this run.
    #[must_use]
    pub const fn solution_count(&self) -> usize {
        self.n_solutions
    }

    /// Work counters for this run.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the search to exhaustion and returns every remaining solution.
    pub fn all_solutions(&mut self) -> Vec<Board> {
        self.collect()
    }

    /// Resumes the search and returns the next complete assignment, or
    /// `None` once every branch has been explored.
    pub fn next_solution(&mut self) -> Option<Board> {
        match self.cursor {
            Cursor::Exhausted => return None,
            Cursor::Yielded => {
                // The grid was full when we yielded; undo the deepest
                // placement and continue with its successor value.
                if let Some(value) = self.stack.pop() {
                    self.unplace_at(self.stack.len(), value);
                    self.next_value = value + 1;
                    self.cursor = Cursor::Searching;
                } else {
                    // No open cells: the puzzle itself was the one solution.
                    self.cursor = Cursor::Exhausted;
                    return None;
                }
            }
            Cursor::Searching => {}
        }

        loop {
            let depth = self.stack.len();
            if depth == self.open.len() {
                self.n_solutions += 1;
                self.cursor = Cursor::Yielded;
                return Some(self.order.restore(&self.working));
            }

            let (row, col) = self.open[depth];
            let mut value = self.next_value;
            loop {
                if usize::from(value) == SIZE {
                    // Candidates exhausted here: undo the parent placement
                    // and resume it at the next value.
                    let Some(previous) = self.stack.pop() else {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    };
                    self.unplace_at(self.stack.len(), previous);
                    self.stats.backtracks += 1;
                    self.next_value = previous + 1;
                    break;
                }

                self.stats.candidates += 1;
                if self
                    .avail
                    .is_open(usize::from(row), usize::from(col), value)
                {
                    self.working
                        .set(usize::from(row), usize::from(col), Some(value));
                    self.avail.cover(usize::from(row), usize::from(col), value);
                    self.stack.push(value);
                    self.stats.placements += 1;
                    self.next_value = 0;
                    break;
                }
                value += 1;
            }
        }
    }

    /// Removes the value placed at search depth `depth`.
    fn unplace_at(&mut self, depth: usize, value: u8) {
        let (row, col) = self.open[depth];
        self.working.set(usize::from(row), usize::from(col), None);
        self.avail
            .uncover(usize::from(row), usize::from(col), value);
    }
}

impl Iterator for Solver {
    type Item = Board;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    const CLASSIC: [[u8; SIZE]; SIZE] = [
        [5, 3, 0, 0, 7, 0, 0, 0, 0],
        [6, 0, 0, 1, 9, 5, 0, 0, 0],
        [0, 9, 8, 0, 0, 0, 0, 6, 0],
        [8, 0, 0, 0, 6, 0, 0, 0, 3],
        [4, 0, 0, 8, 0, 3, 0, 0, 1],
        [7, 0, 0, 0, 2, 0, 0, 0, 6],
        [0, 6, 0, 0, 0, 0, 2, 8, 0],
        [0, 0, 0, 4, 1, 9, 0, 0, 5],
        [0, 0, 0, 0, 8, 0, 0, 7, 9],
    ];

    const CLASSIC_SOLVED: [[u8; SIZE]; SIZE] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    /// Blanks `cells` out of the solved grid.
    fn blanked(cells: &[(usize, usize)]) -> Board {
        let mut board = Board::from_digits(CLASSIC_SOLVED);
        for &(row, col) in cells {
            board.set(row, col, None);
        }
        board
    }

    // Two cells per row, spanning two columns and two blocks, whose values
    // can be swapped without breaking any unit: blanking one set yields
    // exactly two completions, blanking both yields four.
    const SWAP_A: [(usize, usize); 4] = [(3, 5), (3, 8), (4, 5), (4, 8)];
    const SWAP_B: [(usize, usize); 4] = [(6, 3), (6, 8), (7, 3), (7, 8)];

    #[test]
    fn classic_puzzle_has_exactly_one_solution() {
        let puzzle = Board::from_digits(CLASSIC);
        assert_eq!(puzzle.clue_count(), 30);

        let mut solver = Solver::new(&puzzle).unwrap();
        let solutions = solver.all_solutions();

        assert_eq!(solutions.len(), 1);
        assert_eq!(solver.solution_count(), 1);
        assert_eq!(solutions[0], Board::from_digits(CLASSIC_SOLVED));
    }

    #[test]
    fn solutions_are_valid_and_keep_the_clues() {
        let puzzle = Board::from_digits(CLASSIC);
        let mut solver = Solver::new(&puzzle).unwrap();

        for solution in &mut solver {
            assert!(solution.is_valid_solution());
            assert!(solution.retains_clues_of(&puzzle));
        }
        assert_eq!(solver.solution_count(), 1);
    }

    #[test]
    fn complete_board_yields_itself_once() {
        let board = Board::from_digits(CLASSIC_SOLVED);
        let mut solver = Solver::new(&board).unwrap();

        assert_eq!(solver.next_solution(), Some(board));
        assert_eq!(solver.next_solution(), None);
        assert_eq!(solver.next_solution(), None);
        assert_eq!(solver.solution_count(), 1);
    }

    #[test]
    fn unavoidable_set_enumerates_both_completions() {
        let puzzle = blanked(&SWAP_A);
        let mut solver = Solver::new(&puzzle).unwrap();
        let solutions: FxHashSet<Board> = solver.by_ref().collect();

        assert_eq!(solutions.len(), 2);
        assert_eq!(solver.solution_count(), 2);
        assert!(solutions.contains(&Board::from_digits(CLASSIC_SOLVED)));
        for solution in &solutions {
            assert!(solution.is_valid_solution());
            assert!(solution.retains_clues_of(&puzzle));
        }
    }

    #[test]
    fn independent_sets_multiply_the_solution_count() {
        let cells: Vec<_> = SWAP_A.iter().chain(&SWAP_B).copied().collect();
        let puzzle = blanked(&cells);
        let mut solver = Solver::new(&puzzle).unwrap();
        let solutions: FxHashSet<Board> = solver.by_ref().collect();

        // No omissions and no duplicates: 2 x 2 independent swaps.
        assert_eq!(solutions.len(), 4);
        assert_eq!(solver.solution_count(), 4);
    }

    #[test]
    fn runs_are_idempotent() {
        let puzzle = blanked(&SWAP_A);
        let first: FxHashSet<Board> = Solver::new(&puzzle).unwrap().collect();
        let second: FxHashSet<Board> = Solver::new(&puzzle).unwrap().collect();

        assert_eq!(first, second);
    }

    #[test]
    fn duplicate_clue_in_a_row_fails_before_search() {
        let mut digits = [[0_u8; SIZE]; SIZE];
        digits[0][0] = 5;
        digits[0][3] = 5;
        let puzzle = Board::from_digits(digits);

        let err = Solver::new(&puzzle).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::Contradiction {
                row: 1,
                col: 4,
                value: 5
            }
        ));
    }

    #[test]
    fn duplicate_clue_in_a_column_reports_original_row() {
        let mut digits = [[0_u8; SIZE]; SIZE];
        digits[0][0] = 5;
        digits[3][0] = 5;
        let puzzle = Board::from_digits(digits);

        let err = Solver::new(&puzzle).unwrap_err();
        // Row 3 is visited second (tie broken by original index), so the
        // duplicate is pinned on it, reported 1-based in original order.
        assert!(matches!(
            err,
            PuzzleError::Contradiction {
                row: 4,
                col: 1,
                value: 5
            }
        ));
    }

    #[test]
    fn duplicate_clue_in_a_block_is_caught() {
        let mut digits = [[0_u8; SIZE]; SIZE];
        digits[0][0] = 7;
        digits[1][1] = 7;
        let puzzle = Board::from_digits(digits);

        let err = Solver::new(&puzzle).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::Contradiction {
                row: 2,
                col: 2,
                value: 7
            }
        ));
    }

    #[test]
    fn consistent_but_unsatisfiable_puzzle_yields_zero() {
        // Row 0 is missing only a 5, but column 0 already holds one: the
        // clues pass validation yet no completion exists.
        let mut digits = [[0_u8; SIZE]; SIZE];
        digits[0] = [0, 3, 4, 6, 7, 8, 9, 1, 2];
        digits[1][0] = 5;
        let puzzle = Board::from_digits(digits);

        let mut solver = Solver::new(&puzzle).unwrap();
        assert_eq!(solver.next_solution(), None);
        assert_eq!(solver.solution_count(), 0);
    }

    #[test]
    fn search_work_is_counted() {
        let puzzle = Board::from_digits(CLASSIC);
        let mut solver = Solver::new(&puzzle).unwrap();
        let _ = solver.all_solutions();

        let stats = solver.stats();
        assert!(stats.candidates >= stats.placements);
        assert!(stats.placements >= puzzle.empty_count());
        assert!(stats.backtracks > 0);
    }
}
