use criterion::{black_box, criterion_group, criterion_main, Criterion};
use magnum_opus::{codec, perturbation, Grid, Solve, Solver};

const EASY: &str = "...2...633....54.1..1..398........9....538....3........263..5..5.37....847...1...";
const HARD: &str = "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..";

fn solve(c: &mut Criterion) {
    let easy = Grid::from_str_line(EASY).unwrap();
    let hard = Grid::from_str_line(HARD).unwrap();
    c.bench_function("solve_easy", |b| b.iter(|| Solver.solve(black_box(&easy))));
    c.bench_function("solve_hard", |b| b.iter(|| Solver.solve(black_box(&hard))));
    c.bench_function("solve_empty", |b| {
        b.iter(|| Solver.solve(black_box(&Grid::empty())))
    });
}

fn round_trip(c: &mut Criterion) {
    let solution = Solver.solve(&Grid::from_str_line(EASY).unwrap()).unwrap();
    let wire = codec::encode(&solution).unwrap();
    c.bench_function("decode", |b| b.iter(|| codec::decode(black_box(wire.as_bytes()))));
    c.bench_function("predict_apply_encode", |b| {
        b.iter(|| {
            let mut grid = solution;
            perturbation::apply(&mut grid, &perturbation::predict(black_box(1_726_000_000)));
            codec::encode(&grid)
        })
    });
}

criterion_group!(benches, solve, round_trip);
criterion_main!(benches);
