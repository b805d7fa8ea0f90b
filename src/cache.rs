//! # Path caches
//!
//! Memoization of solver results. A ladder between two words is a pure
//! function of the dictionary and the word pair, so a cache entry never goes
//! stale on its own; caches are cleared only because their key space belongs
//! to a particular puzzle. Keys are directional: `(A, B)` and `(B, A)` are
//! cached independently, since callers care which way the ladder runs.
//!
//! Two flavors are provided:
//!
//! * [`PathCache`], owned by a single session, which also memoizes hints and
//!   is cleared whenever the puzzle changes.
//! * [`SharedPathCache`], safe to share across threads and sessions, which
//!   only memoizes ladders and never needs clearing for correctness.

use std::{
	cell::RefCell,
	collections::BTreeSet,
	sync::{PoisonError, RwLock}
};

use log::trace;
use rustc_hash::FxHashMap;

use crate::{ladder::Ladder, word::Word};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// A memo of ladders keyed by `(from, to)`.
pub trait LadderCache
{
	/// Answer the cached ladder from `from` to `to`, computing and recording
	/// it first if necessary.
	///
	/// # Arguments
	///
	/// * `from` - The start of the ladder.
	/// * `to` - The end of the ladder.
	/// * `compute` - How to compute the ladder on a miss.
	///
	/// # Returns
	///
	/// The ladder, possibly [empty](Ladder::unreachable).
	fn get_or_compute<F>(&self, from: &Word, to: &Word, compute: F) -> Ladder
		where F: FnOnce() -> Ladder;

	/// Discard every entry.
	fn clear(&self);

	/// Answer the number of cached ladders.
	fn len(&self) -> usize;

	/// Check whether the cache holds no ladders.
	fn is_empty(&self) -> bool { self.len() == 0 }
}

////////////////////////////////////////////////////////////////////////////////
//                            Session-local cache.                            //
////////////////////////////////////////////////////////////////////////////////

/// The cache of a single session: ladders plus hint positions. Interior
/// mutability lets read-only session queries memoize; the cache is not
/// shareable across threads.
#[derive(Debug, Default)]
#[must_use]
pub struct PathCache
{
	/// Ladders, keyed by `(from, to)`.
	ladders: RefCell<FxHashMap<(Word, Word), Ladder>>,

	/// Hint positions, keyed by `(current, target)`.
	hints: RefCell<FxHashMap<(Word, Word), BTreeSet<usize>>>
}

impl PathCache
{
	/// Construct an empty cache. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Answer the cached hint positions for `current` toward `target`,
	/// computing and recording them first if necessary.
	///
	/// # Arguments
	///
	/// * `current` - The word whose letter should be highlighted.
	/// * `target` - The word being worked toward.
	/// * `compute` - How to compute the positions on a miss.
	///
	/// # Returns
	///
	/// The hint positions.
	pub fn hint_or_compute<F>(
		&self,
		current: &Word,
		target: &Word,
		compute: F
	) -> BTreeSet<usize>
		where F: FnOnce() -> BTreeSet<usize>
	{
		let key = (*current, *target);
		let cached = self.hints.borrow().get(&key).cloned();
		if let Some(hint) = cached
		{
			return hint
		}
		let hint = compute();
		self.hints.borrow_mut().insert(key, hint.clone());
		hint
	}

	/// Discard the memoized hints, but keep the ladders.
	pub fn clear_hints(&self)
	{
		self.hints.borrow_mut().clear();
	}
}

impl LadderCache for PathCache
{
	fn get_or_compute<F>(&self, from: &Word, to: &Word, compute: F) -> Ladder
		where F: FnOnce() -> Ladder
	{
		let key = (*from, *to);
		let cached = self.ladders.borrow().get(&key).cloned();
		if let Some(ladder) = cached
		{
			trace!("ladder cache hit: {} → {}", from, to);
			return ladder
		}
		// The borrow is released before computing, so `compute` may consult
		// the cache itself.
		let ladder = compute();
		self.ladders.borrow_mut().insert(key, ladder.clone());
		ladder
	}

	fn clear(&self)
	{
		self.ladders.borrow_mut().clear();
		self.hints.borrow_mut().clear();
	}

	fn len(&self) -> usize { self.ladders.borrow().len() }
}

////////////////////////////////////////////////////////////////////////////////
//                               Shared cache.                                //
////////////////////////////////////////////////////////////////////////////////

/// A ladder cache that may be shared across threads and sessions. Readers
/// proceed concurrently; the lock is never held while solving, so two threads
/// may occasionally compute the same ladder, and the second result simply
/// replaces an identical first.
#[derive(Debug, Default)]
#[must_use]
pub struct SharedPathCache
{
	/// Ladders, keyed by `(from, to)`.
	ladders: RwLock<FxHashMap<(Word, Word), Ladder>>
}

impl SharedPathCache
{
	/// Construct an empty cache. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self::default() }
}

impl LadderCache for SharedPathCache
{
	fn get_or_compute<F>(&self, from: &Word, to: &Word, compute: F) -> Ladder
		where F: FnOnce() -> Ladder
	{
		let key = (*from, *to);
		let cached = self.ladders.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&key)
			.cloned();
		if let Some(ladder) = cached
		{
			return ladder
		}
		let ladder = compute();
		self.ladders.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(key, ladder.clone());
		ladder
	}

	fn clear(&self)
	{
		self.ladders.write().unwrap_or_else(PoisonError::into_inner).clear();
	}

	fn len(&self) -> usize
	{
		self.ladders.read().unwrap_or_else(PoisonError::into_inner).len()
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
