//! # Adjacency
//!
//! Herein is the move rule of the puzzle and the oracle that answers which
//! dictionary words are one move apart. A move replaces exactly one letter
//! instance with a different letter; the remaining four letters may be
//! reordered freely. Equivalently, the letter multisets of the two words
//! differ by exactly one instance added and one instance removed.

use std::sync::Arc;

use log::trace;

use crate::{
	dictionary::Dictionary,
	ladder::Ladder,
	word::{Word, WORD_LENGTH}
};

////////////////////////////////////////////////////////////////////////////////
//                                 Move rule.                                 //
////////////////////////////////////////////////////////////////////////////////

/// Check whether `to` is one move away from `from`, without regard to the
/// dictionary. The relation is symmetric and irreflexive.
///
/// # Arguments
///
/// * `from` - The current word.
/// * `to` - The candidate successor.
///
/// # Returns
///
/// `true` if exactly one letter instance is added and exactly one removed.
#[inline]
#[must_use]
pub fn is_one_move_apart(from: &Word, to: &Word) -> bool
{
	let (added, removed) = from.histogram().changes_to(&to.histogram());
	added == 1 && removed == 1
}

////////////////////////////////////////////////////////////////////////////////
//                                  Oracle.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The adjacency oracle answers move validity and enumerates neighbors
/// against a shared, immutable [`Dictionary`].
#[derive(Clone, Debug)]
#[must_use]
pub struct AdjacencyOracle
{
	/// The dictionary of valid words.
	dictionary: Arc<Dictionary>
}

impl AdjacencyOracle
{
	/// Construct an oracle over the given dictionary.
	#[inline]
	pub fn new(dictionary: Arc<Dictionary>) -> Self { Self { dictionary } }

	/// Get the dictionary.
	#[inline]
	#[must_use]
	pub fn dictionary(&self) -> &Dictionary { &self.dictionary }

	/// Get a shared handle to the dictionary.
	#[inline]
	#[must_use]
	pub fn shared_dictionary(&self) -> Arc<Dictionary>
	{
		Arc::clone(&self.dictionary)
	}

	/// Check whether moving from `from` to `to` is legal. `to` must be a
	/// member of the dictionary; `from` is assumed to be valid already (it is
	/// either a root word or a previously accepted word) and is not checked.
	///
	/// # Arguments
	///
	/// * `from` - The current word.
	/// * `to` - The candidate successor.
	///
	/// # Returns
	///
	/// `true` if the move is legal, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_valid_move(&self, from: &Word, to: &Word) -> bool
	{
		self.dictionary.contains(to) && is_one_move_apart(from, to)
	}

	/// Check whether every step of the given ladder is a legal move. Empty
	/// and single-word ladders are trivially valid.
	#[must_use]
	pub fn is_valid_ladder(&self, ladder: &Ladder) -> bool
	{
		ladder.steps().all(|(from, to)| self.is_valid_move(from, to))
	}

	/// Enumerate the dictionary words one move away from `word`.
	///
	/// Rather than scanning the dictionary, substitute each of the other 25
	/// letters for each distinct letter of the word's anagram key, and look
	/// up the anagram class of every resulting multiset. Distinct
	/// (letter, substitute) pairs always yield distinct multisets, none of
	/// which is the word's own, so the result has no duplicates and never
	/// contains `word`.
	///
	/// # Arguments
	///
	/// * `word` - The word whose neighbors are wanted.
	///
	/// # Returns
	///
	/// The neighbors, in sorted order.
	#[must_use]
	pub fn neighbors(&self, word: &Word) -> Vec<Word>
	{
		let key = word.anagram_key();
		let letters = key.letters();
		let mut neighbors = Vec::new();
		for index in 0 .. WORD_LENGTH
		{
			// Removing either copy of a repeated letter is the same move.
			if index > 0 && letters[index] == letters[index - 1]
			{
				continue
			}
			for substitute in b'A' ..= b'Z'
			{
				if substitute == letters[index]
				{
					continue
				}
				let candidate = key.substitute(index, substitute);
				neighbors.extend_from_slice(self.dictionary.anagrams(&candidate));
			}
		}
		neighbors.sort_unstable();
		trace!("neighbors of {}: {}", word, neighbors.len());
		neighbors
	}

	/// Enumerate the dictionary words one move away from `word` by testing
	/// every word of the dictionary. This is the naive reference for
	/// [`neighbors`](Self::neighbors), and is only suitable for testing.
	///
	/// # Arguments
	///
	/// * `word` - The word whose neighbors are wanted.
	///
	/// # Returns
	///
	/// The neighbors, in sorted order.
	#[must_use]
	pub fn neighbors_by_scan(&self, word: &Word) -> Vec<Word>
	{
		self.dictionary.iter()
			.filter(|candidate| is_one_move_apart(word, candidate))
			.copied()
			.collect()
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
