use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_solver::sudoku::board::Board;
use sudoku_solver::sudoku::solver::Solver;

const CLASSIC: [[u8; 9]; 9] = [
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

const CLASSIC_SOLVED: [[u8; 9]; 9] = [
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

/// The solved grid with two independent swappable quads blanked, giving a
/// puzzle with exactly four completions.
fn four_solution_puzzle() -> Board {
    let mut board = Board::from_digits(CLASSIC_SOLVED);
    for (row, col) in [
        (3, 5),
        (3, 8),
        (4, 5),
        (4, 8),
        (6, 3),
        (6, 8),
        (7, 3),
        (7, 8),
    ] {
        board.set(row, col, None);
    }
    board
}

fn bench_unique_solution(c: &mut Criterion) {
    let puzzle = Board::from_digits(CLASSIC);

    c.bench_function("solve_classic_30_clues", |b| {
        b.iter(|| {
            let mut solver = Solver::new(black_box(&puzzle)).unwrap();
            let solutions = solver.all_solutions();
            assert_eq!(solutions.len(), 1);
            black_box(solutions)
        });
    });
}

fn bench_full_enumeration(c: &mut Criterion) {
    let puzzle = four_solution_puzzle();

    c.bench_function("enumerate_four_solutions", |b| {
        b.iter(|| {
            let solver = Solver::new(black_box(&puzzle)).unwrap();
            assert_eq!(solver.count(), 4);
        });
    });
}

fn bench_encoding(c: &mut Criterion) {
    let puzzle = Board::from_digits(CLASSIC);

    c.bench_function("encode_session", |b| {
        b.iter(|| black_box(Solver::new(black_box(&puzzle)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_unique_solution,
    bench_full_enumeration,
    bench_encoding
);
criterion_main!(benches);
