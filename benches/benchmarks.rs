use std::{sync::Arc, time::Duration};

use const_format::concatcp;
use criterion::{measurement::Measurement, BenchmarkGroup, Criterion};
use tossword::{
	cache::{LadderCache, SharedPathCache},
	dictionary::Dictionary,
	puzzle::{audit, Catalog},
	solver::Solver,
	word::Word
};

/// The path of the directory containing the dictionaries.
const DIR: &str = "dict";

/// The name of the dictionary.
const NAME: &str = "tossword";

/// The path to the text file.
const PATH_TXT: &str = concatcp!(DIR, "/", NAME, ".txt");

/// The path to the binary file.
const PATH_DICT: &str = concatcp!(DIR, "/", NAME, ".dict");

/// Benchmark reading a dictionary from a file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_read_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("read_from_file", |b| {
		b.iter(|| Dictionary::read_from_file(PATH_TXT).unwrap());
	});
}

/// Benchmark deserializing a dictionary from a file.
///
/// # Arguments
///
/// * `g` - The benchmark group.
fn bench_deserialize_from_file<M: Measurement>(g: &mut BenchmarkGroup<M>)
{
	g.bench_function("deserialize_from_file", |b| {
		b.iter(|| Dictionary::deserialize_from_file(PATH_DICT).unwrap());
	});
}

/// Benchmark solving the longest bundled puzzle, with and without a warm
/// cache.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `solver` - The solver.
fn bench_solve<M: Measurement>(g: &mut BenchmarkGroup<M>, solver: &Solver)
{
	let start = Word::new("music").unwrap();
	let target = Word::new("worth").unwrap();
	g.bench_function("solve", |b| {
		b.iter(|| {
			let ladder = solver.solve(&start, &target);
			assert_eq!(ladder.moves(), Some(7));
		});
	});
	let cache = SharedPathCache::new();
	g.bench_function("solve_cached", |b| {
		b.iter(|| {
			let ladder = solver.solve_cached(&cache, &start, &target);
			assert_eq!(ladder.moves(), Some(7));
		});
	});
	assert_eq!(cache.len(), 1);
}

/// Benchmark auditing the bundled catalog.
///
/// # Arguments
///
/// * `g` - The benchmark group.
/// * `solver` - The solver.
fn bench_audit<M: Measurement>(g: &mut BenchmarkGroup<M>, solver: &Solver)
{
	let catalog = Catalog::builtin(solver.dictionary());
	g.bench_function("audit", |b| {
		b.iter(|| {
			let reports = audit(solver, catalog.puzzles());
			assert!(reports.iter().all(|r| r.is_solvable()));
		});
	});
}

/// Run all benchmarks.
///
/// Besides timing the solver, the benchmarking ensures that
/// [`deserialize_from_file`](Dictionary::deserialize_from_file) is faster than
/// [`read_from_file`](Dictionary::read_from_file).
fn main()
{
	// Ensure that both the text and binary files exist.
	let dictionary = Arc::new(Dictionary::open(DIR, NAME).unwrap());
	let solver = Solver::new(dictionary);

	// Run the benchmarks.
	let mut criterion = Criterion::default().configure_from_args();
	let mut group = criterion.benchmark_group("benchmarks");
	group.measurement_time(Duration::from_secs(10));
	bench_read_from_file(&mut group);
	bench_deserialize_from_file(&mut group);
	bench_solve(&mut group, &solver);
	bench_audit(&mut group, &solver);
	group.finish();

	// Generate the final summary.
	criterion.final_summary();
}
