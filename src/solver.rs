//! # Solver
//!
//! Herein is the shortest-path solver for word ladders. The solver runs a
//! bidirectional breadth-first search over the [adjacency
//! oracle](AdjacencyOracle): one frontier grows from the start word, the
//! other from the target word, and the search stops as soon as the frontiers
//! meet.

use std::{mem, sync::Arc};

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::{
	adjacency::AdjacencyOracle,
	cache::LadderCache,
	dictionary::Dictionary,
	ladder::Ladder,
	word::Word
};

////////////////////////////////////////////////////////////////////////////////
//                                  Solver.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The default bound on the search depth of each side of the search.
pub const DEFAULT_MAX_DEPTH: usize = 15;

/// The word-ladder solver. The solver is immutable, so it can be cloned
/// cheaply and shared freely between sessions and threads.
#[derive(Clone, Debug)]
#[must_use]
pub struct Solver
{
	/// The adjacency oracle to search.
	oracle: AdjacencyOracle,

	/// The maximum number of levels that either side of the search may
	/// explore.
	max_depth: usize
}

impl Solver
{
	/// Construct a new solver for the given dictionary, using the
	/// [default](DEFAULT_MAX_DEPTH) depth bound.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary of valid words.
	///
	/// # Returns
	///
	/// A new solver.
	pub fn new(dictionary: Arc<Dictionary>) -> Self
	{
		Self {
			oracle: AdjacencyOracle::new(dictionary),
			max_depth: DEFAULT_MAX_DEPTH
		}
	}

	/// Replace the depth bound of each side of the search.
	///
	/// # Arguments
	///
	/// * `max_depth` - The maximum number of levels per side.
	///
	/// # Returns
	///
	/// The reconfigured solver.
	#[inline]
	pub fn with_max_depth(mut self, max_depth: usize) -> Self
	{
		self.max_depth = max_depth;
		self
	}

	/// Get the adjacency oracle.
	#[inline]
	pub fn oracle(&self) -> &AdjacencyOracle { &self.oracle }

	/// Get the dictionary.
	#[inline]
	#[must_use]
	pub fn dictionary(&self) -> &Dictionary { self.oracle.dictionary() }

	/// Get the depth bound of each side of the search.
	#[inline]
	#[must_use]
	pub fn max_depth(&self) -> usize { self.max_depth }

	/// Compute a shortest ladder from `start` to `target`.
	///
	/// Each side of the search keeps its own visited map, recording the
	/// predecessor of every discovered word, and its own frontier. Each round
	/// expands one full level of the smaller frontier that is still within the
	/// depth bound. The first discovered word that the other side has already
	/// visited is a meeting point, and because every level is expanded in
	/// full, the ladder through the first meeting point is a shortest one.
	///
	/// # Arguments
	///
	/// * `start` - The start word.
	/// * `target` - The target word.
	///
	/// # Returns
	///
	/// A shortest ladder, `[start]` if `start == target`, or an
	/// [empty](Ladder::unreachable) ladder if no ladder exists within the
	/// depth bound.
	pub fn solve(&self, start: &Word, target: &Word) -> Ladder
	{
		if start == target
		{
			return Ladder::single(*start)
		}
		let mut forward = Frontier::new(*start);
		let mut backward = Frontier::new(*target);
		loop
		{
			if forward.is_exhausted() || backward.is_exhausted()
			{
				debug!("unreachable (exhausted): {} → {}", start, target);
				return Ladder::unreachable()
			}
			let forward_open = forward.depth < self.max_depth;
			let backward_open = backward.depth < self.max_depth;
			let meeting = match (forward_open, backward_open)
			{
				(false, false) =>
				{
					debug!("unreachable (depth bound): {} → {}", start, target);
					return Ladder::unreachable()
				},
				(true, false) => forward.expand(&self.oracle, &backward),
				(false, true) => backward.expand(&self.oracle, &forward),
				(true, true) =>
				{
					if forward.width() <= backward.width()
					{
						forward.expand(&self.oracle, &backward)
					}
					else
					{
						backward.expand(&self.oracle, &forward)
					}
				}
			};
			if let Some(meeting) = meeting
			{
				let ladder = Self::join(&forward, &backward, meeting);
				debug!("solved: {} ({:?} moves)", ladder, ladder.moves());
				return ladder
			}
		}
	}

	/// Compute a shortest ladder from `start` to `target`, consulting the
	/// given cache first. The result is identical to [`solve`](Self::solve).
	///
	/// # Arguments
	///
	/// * `cache` - The ladder cache.
	/// * `start` - The start word.
	/// * `target` - The target word.
	///
	/// # Returns
	///
	/// A shortest ladder, or an [empty](Ladder::unreachable) ladder.
	pub fn solve_cached<C>(&self, cache: &C, start: &Word, target: &Word) -> Ladder
		where C: LadderCache + ?Sized
	{
		cache.get_or_compute(start, target, || self.solve(start, target))
	}

	/// Reconstruct the ladder through the meeting point: the forward half
	/// from the start to the meeting point, then the backward half from the
	/// meeting point to the target.
	fn join(forward: &Frontier, backward: &Frontier, meeting: Word) -> Ladder
	{
		let mut words = forward.trace(meeting);
		words.reverse();
		words.extend(backward.trace(meeting).into_iter().skip(1));
		Ladder::from_words(words)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Frontiers.                                 //
////////////////////////////////////////////////////////////////////////////////

/// One side of the bidirectional search.
#[derive(Debug)]
struct Frontier
{
	/// Every word discovered so far, mapped to the word it was discovered
	/// from. The origin maps to `None`.
	visited: FxHashMap<Word, Option<Word>>,

	/// The words discovered at the current depth, not yet expanded.
	current: Vec<Word>,

	/// The number of levels expanded so far.
	depth: usize
}

impl Frontier
{
	/// Construct a frontier rooted at the given word.
	fn new(origin: Word) -> Self
	{
		let mut visited = FxHashMap::default();
		visited.insert(origin, None);
		Self { visited, current: vec![origin], depth: 0 }
	}

	/// Check whether every reachable word has been expanded.
	#[inline]
	fn is_exhausted(&self) -> bool { self.current.is_empty() }

	/// Answer the number of words awaiting expansion.
	#[inline]
	fn width(&self) -> usize { self.current.len() }

	/// Expand every word of the current level, stopping early at the first
	/// newly discovered word that the opposite side has already visited.
	///
	/// # Arguments
	///
	/// * `oracle` - The adjacency oracle.
	/// * `opposite` - The other side of the search.
	///
	/// # Returns
	///
	/// The meeting point, if one was discovered.
	fn expand(
		&mut self,
		oracle: &AdjacencyOracle,
		opposite: &Frontier
	) -> Option<Word>
	{
		let level = mem::take(&mut self.current);
		self.depth += 1;
		trace!("expanding {} words at depth {}", level.len(), self.depth);
		for word in level
		{
			for neighbor in oracle.neighbors(&word)
			{
				if self.visited.contains_key(&neighbor)
				{
					continue
				}
				self.visited.insert(neighbor, Some(word));
				if opposite.visited.contains_key(&neighbor)
				{
					return Some(neighbor)
				}
				self.current.push(neighbor);
			}
		}
		None
	}

	/// Follow predecessors from the given word back to the origin.
	///
	/// # Returns
	///
	/// The words from `word` to the origin, inclusive.
	fn trace(&self, word: Word) -> Vec<Word>
	{
		let mut words = vec![word];
		let mut cursor = word;
		while let Some(Some(previous)) = self.visited.get(&cursor)
		{
			words.push(*previous);
			cursor = *previous;
		}
		words
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{collections::VecDeque, sync::Arc};

	use rustc_hash::FxHashMap;

	use crate::{
		cache::{LadderCache, PathCache},
		dictionary::Dictionary,
		ladder::Ladder,
		solver::Solver,
		word::Word
	};

	/// Parse a word, for brevity.
	fn w(text: &str) -> Word { Word::new(text).unwrap() }

	/// Construct a solver over the bundled dictionary.
	fn solver() -> Solver { Solver::new(Arc::new(Dictionary::embedded())) }

	/// Compute the length (in moves) of a shortest ladder by unidirectional
	/// breadth-first search over full dictionary scans.
	fn brute_force_moves(solver: &Solver, start: &Word, target: &Word)
		-> Option<usize>
	{
		let mut distance = FxHashMap::default();
		distance.insert(*start, 0usize);
		let mut queue = VecDeque::from([*start]);
		while let Some(word) = queue.pop_front()
		{
			let d = distance[&word];
			if word == *target
			{
				return Some(d)
			}
			for next in solver.oracle().neighbors_by_scan(&word)
			{
				if !distance.contains_key(&next)
				{
					distance.insert(next, d + 1);
					queue.push_back(next);
				}
			}
		}
		None
	}

	/// Check that a ladder runs from `start` to `target` by legal moves.
	fn assert_valid(solver: &Solver, ladder: &Ladder, start: &Word, target: &Word)
	{
		assert_eq!(ladder.first(), Some(start), "{}", ladder);
		assert_eq!(ladder.last(), Some(target), "{}", ladder);
		assert!(solver.oracle().is_valid_ladder(ladder), "{}", ladder);
	}

	/// Ensure that a word is a zero-move ladder to itself.
	#[test]
	fn test_degenerate()
	{
		let solver = solver();
		let ladder = solver.solve(&w("ocean"), &w("ocean"));
		assert_eq!(ladder, Ladder::single(w("ocean")));
		assert_eq!(ladder.moves(), Some(0));
	}

	/// Ensure the canonical CUMIN → DEPTH puzzle is solved in at most five
	/// moves by legal steps.
	#[test]
	fn test_cumin_to_depth()
	{
		let dictionary = Dictionary::from_words(
			["cumin", "mince", "medic", "edict", "tepid", "depth"]
				.iter().map(|t| w(t))
		);
		let solver = Solver::new(Arc::new(dictionary));
		let ladder = solver.solve(&w("cumin"), &w("depth"));
		assert!(!ladder.is_empty());
		assert!(ladder.len() <= 6);
		assert_valid(&solver, &ladder, &w("cumin"), &w("depth"));

		let solver = self::solver();
		let ladder = solver.solve(&w("cumin"), &w("depth"));
		assert_eq!(ladder.moves(), Some(5));
		assert_valid(&solver, &ladder, &w("cumin"), &w("depth"));
	}

	/// Ensure that the solver is optimal, comparing against brute force over
	/// a small synthetic dictionary for every ordered pair of words.
	#[test]
	fn test_optimal_small_dictionary()
	{
		let words = [
			"ocean", "alone", "alien", "elfin", "field", "acorn", "anode",
			"clean", "dance", "lance", "angel", "angle", "align", "glans",
			"glass", "grass", "storm", "store", "stare", "share", "shore",
			"spare", "space", "place", "plane", "plant", "giant", "night",
			"light", "might", "sight", "tight", "eight", "agent", "meant",
			"amend", "moist", "smith", "cedar", "acrid", "triad", "third",
			"girth", "cumin", "mince", "medic", "edict", "tepid", "depth",
			"denim", "pined", "crime", "timer", "their", "other", "worth",
			"horse", "morse", "miser", "mines", "brave", "grave", "grace",
			"chase", "reach", "beach", "chard", "chord", "crowd", "sword",
			"quack", "quilt"
		];
		let dictionary = Dictionary::from_words(words.iter().map(|t| w(t)));
		let solver = Solver::new(Arc::new(dictionary));
		let all = solver.dictionary().all().to_vec();
		for start in &all
		{
			for target in &all
			{
				let ladder = solver.solve(start, target);
				let expected = brute_force_moves(&solver, start, target);
				assert_eq!(ladder.moves(), expected, "{} → {}", start, target);
				if !ladder.is_empty()
				{
					assert_valid(&solver, &ladder, start, target);
				}
			}
		}
	}

	/// Ensure that optimality also holds against brute force on the bundled
	/// dictionary for the bundled puzzles.
	#[test]
	fn test_optimal_bundled_puzzles()
	{
		let solver = solver();
		let cases = [
			("storm", "light", 4),
			("games", "front", 5),
			("cedar", "light", 5),
			("bread", "honey", 4),
			("ocean", "field", 4),
			("space", "grace", 3),
			("brave", "grave", 1),
			("smile", "grime", 2),
			("dance", "light", 6),
			("music", "worth", 7)
		];
		for (start, target, moves) in cases
		{
			let (start, target) = (w(start), w(target));
			let ladder = solver.solve(&start, &target);
			assert_eq!(ladder.moves(), Some(moves), "{}", ladder);
			assert_eq!(
				brute_force_moves(&solver, &start, &target),
				Some(moves)
			);
			assert_valid(&solver, &ladder, &start, &target);
			// The reverse direction is equally short.
			let reverse = solver.solve(&target, &start);
			assert_eq!(reverse.moves(), Some(moves));
			assert_valid(&solver, &reverse, &target, &start);
		}
	}

	/// Ensure that disconnected words are reported as unreachable, and that a
	/// tight depth bound makes long ladders unreachable.
	#[test]
	fn test_unreachable()
	{
		let dictionary = Dictionary::from_words(
			["ocean", "alone", "alien", "elfin", "field", "quack", "quilt"]
				.iter().map(|t| w(t))
		);
		let solver = Solver::new(Arc::new(dictionary));
		assert!(solver.solve(&w("ocean"), &w("quack")).is_empty());
		assert!(solver.solve(&w("quilt"), &w("quack")).is_empty());
		assert_eq!(solver.solve(&w("ocean"), &w("field")).moves(), Some(4));

		// Two levels per side cover four moves, but one level per side
		// covers only two.
		let bounded = solver.clone().with_max_depth(2);
		assert_eq!(bounded.solve(&w("ocean"), &w("field")).moves(), Some(4));
		let bounded = solver.with_max_depth(1);
		assert!(bounded.solve(&w("ocean"), &w("field")).is_empty());
		assert_eq!(bounded.solve(&w("ocean"), &w("alien")).moves(), Some(2));
	}

	/// Ensure that routing through a cache changes nothing but the amount of
	/// work.
	#[test]
	fn test_cache_transparency()
	{
		let solver = solver();
		let cache = PathCache::new();
		for (start, target) in [("storm", "light"), ("cumin", "depth"), ("ocean", "field")]
		{
			let (start, target) = (w(start), w(target));
			let uncached = solver.solve(&start, &target);
			let first = solver.solve_cached(&cache, &start, &target);
			let second = solver.solve_cached(&cache, &start, &target);
			assert_eq!(uncached, first);
			assert_eq!(first, second);
		}
		assert_eq!(cache.len(), 3);
	}
}
