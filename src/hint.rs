//! # Hints
//!
//! The hint engine picks the *tossable* letter: the position of the current
//! word whose letter should be thrown away to reach the next word of an
//! optimal ladder.

use std::collections::BTreeSet;

use log::trace;

use crate::{
	cache::PathCache,
	solver::Solver,
	word::{Word, WORD_LENGTH}
};

/// Compute the hint positions for moving from `current` to `next`: the first
/// position whose letter occurs fewer times in `next` than in `current`, i.e.,
/// the first letter instance that the move removes. If there is none, which
/// only happens when `next` is not one move away, then the first position at
/// which the words differ. At most one position is ever answered.
///
/// # Arguments
///
/// * `current` - The word to highlight.
/// * `next` - The word to move toward.
///
/// # Returns
///
/// The hint positions, empty only if the words are identical.
#[must_use]
pub fn hint_positions(current: &Word, next: &Word) -> BTreeSet<usize>
{
	let (have, want) = (current.histogram(), next.histogram());
	let removed = (0 .. WORD_LENGTH).find(|&index| {
		let letter = current.letter(index);
		want.count(letter) < have.count(letter)
	});
	removed
		.or_else(|| {
			(0 .. WORD_LENGTH).find(|&index| current.letter(index) != next.letter(index))
		})
		.into_iter()
		.collect()
}

/// Compute the hint positions when no ladder is known, working directly
/// toward the target instead of toward an intermediate word.
///
/// # Arguments
///
/// * `current` - The word to highlight.
/// * `target` - The mystery word.
///
/// # Returns
///
/// The hint positions.
#[inline]
#[must_use]
pub fn fallback_positions(current: &Word, target: &Word) -> BTreeSet<usize>
{
	hint_positions(current, target)
}

/// Compute the tossable-letter hint for `current`, solving toward `target`
/// through the session cache. The hint itself is memoized in the same cache.
///
/// # Arguments
///
/// * `solver` - The solver.
/// * `cache` - The session cache.
/// * `current` - The word to highlight.
/// * `target` - The mystery word.
///
/// # Returns
///
/// The hint positions, empty if `current` is already the target.
pub fn tossable(
	solver: &Solver,
	cache: &PathCache,
	current: &Word,
	target: &Word
) -> BTreeSet<usize>
{
	cache.hint_or_compute(current, target, || {
		let ladder = solver.solve_cached(cache, current, target);
		let hint = match ladder.next()
		{
			Some(next) => hint_positions(current, next),
			None => fallback_positions(current, target)
		};
		trace!("tossable hint for {} toward {}: {:?}", current, target, hint);
		hint
	})
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{collections::BTreeSet, sync::Arc};

	use crate::{
		cache::{LadderCache, PathCache},
		dictionary::Dictionary,
		hint::{fallback_positions, hint_positions, tossable},
		solver::Solver,
		word::Word
	};

	/// Parse a word, for brevity.
	fn w(text: &str) -> Word { Word::new(text).unwrap() }

	/// Ensure that the removed letter is highlighted.
	#[test]
	fn test_hint_positions()
	{
		// M is tossed.
		assert_eq!(hint_positions(&w("storm"), &w("store")), BTreeSet::from([4]));
		// U is tossed; reordering does not matter.
		assert_eq!(hint_positions(&w("cumin"), &w("mince")), BTreeSet::from([1]));
		// C is tossed from OCEAN on the way to ALONE.
		assert_eq!(hint_positions(&w("ocean"), &w("alone")), BTreeSet::from([1]));
		// One of two E's is tossed; the first is highlighted.
		assert_eq!(hint_positions(&w("speed"), &w("spend")), BTreeSet::from([2]));
		// Pure anagrams remove nothing, so the first mismatch is answered.
		assert_eq!(hint_positions(&w("stare"), &w("tears")), BTreeSet::from([0]));
		// Identical words have nothing to toss.
		assert!(hint_positions(&w("ocean"), &w("ocean")).is_empty());
	}

	/// Ensure that the fallback works toward the target directly.
	#[test]
	fn test_fallback_positions()
	{
		assert_eq!(fallback_positions(&w("storm"), &w("light")), BTreeSet::from([0]));
		assert_eq!(fallback_positions(&w("ocean"), &w("field")), BTreeSet::from([0]));
		assert_eq!(fallback_positions(&w("alien"), &w("field")), BTreeSet::from([0]));
		assert_eq!(fallback_positions(&w("elfin"), &w("field")), BTreeSet::from([4]));
	}

	/// Ensure that the tossable hint follows an optimal ladder, and that it is
	/// memoized.
	#[test]
	fn test_tossable()
	{
		let dictionary = Dictionary::from_words(
			["ocean", "alone", "alien", "elfin", "field", "quack"]
				.iter().map(|t| w(t))
		);
		let solver = Solver::new(Arc::new(dictionary));
		let cache = PathCache::new();
		let hint = tossable(&solver, &cache, &w("ocean"), &w("field"));
		assert_eq!(hint, BTreeSet::from([1]));
		assert_eq!(cache.len(), 1);
		let hint = tossable(&solver, &cache, &w("alone"), &w("field"));
		// O is tossed for I, giving ALIEN.
		assert_eq!(hint, BTreeSet::from([2]));

		// No ladder exists, so the fallback applies.
		let hint = tossable(&solver, &cache, &w("quack"), &w("field"));
		assert_eq!(hint, BTreeSet::from([0]));

		// The target has nothing to toss.
		assert!(tossable(&solver, &cache, &w("field"), &w("field")).is_empty());
	}
}
