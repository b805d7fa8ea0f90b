//! # Ladders
//!
//! A [`Ladder`] is the path of words produced by the solver: each consecutive
//! pair of words is a single move. An empty ladder is the proven absence of a
//! path within the search bound, not an error.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::word::Word;

////////////////////////////////////////////////////////////////////////////////
//                                  Ladders.                                  //
////////////////////////////////////////////////////////////////////////////////

/// An ordered sequence of words, each consecutive pair one move apart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct Ladder(Vec<Word>);

impl Ladder
{
	/// The empty ladder, denoting that no path exists within the search
	/// bound.
	#[inline]
	pub const fn unreachable() -> Self { Self(Vec::new()) }

	/// The ladder from a word to itself, comprising zero moves.
	#[inline]
	pub fn single(word: Word) -> Self { Self(vec![word]) }

	/// Construct a ladder from the given words. The caller is responsible for
	/// the words actually forming a ladder.
	#[inline]
	pub fn from_words(words: Vec<Word>) -> Self { Self(words) }

	/// Check if the ladder is empty, i.e., unreachable.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// Answer the number of words in the ladder.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.0.len() }

	/// Answer the number of moves in the ladder, or `None` if the ladder is
	/// empty.
	#[inline]
	#[must_use]
	pub fn moves(&self) -> Option<usize> { self.0.len().checked_sub(1) }

	/// Get the words of the ladder.
	#[inline]
	#[must_use]
	pub fn words(&self) -> &[Word] { &self.0 }

	/// Get the first word of the ladder.
	#[inline]
	#[must_use]
	pub fn first(&self) -> Option<&Word> { self.0.first() }

	/// Get the last word of the ladder.
	#[inline]
	#[must_use]
	pub fn last(&self) -> Option<&Word> { self.0.last() }

	/// Get the word that follows the first, i.e., the next move along an
	/// optimal route.
	#[inline]
	#[must_use]
	pub fn next(&self) -> Option<&Word> { self.0.get(1) }

	/// Get an iterator over the moves of the ladder, as pairs of words.
	#[inline]
	pub fn steps(&self) -> impl Iterator<Item = (&Word, &Word)> + '_
	{
		self.0.windows(2).map(|pair| (&pair[0], &pair[1]))
	}

	/// Describe each move of the ladder by the letters that it exchanges.
	#[must_use]
	pub fn changes(&self) -> Vec<LetterChange>
	{
		self.steps().map(|(from, to)| LetterChange::between(from, to)).collect()
	}
}

impl Display for Ladder
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		if self.is_empty()
		{
			return write!(f, "(unreachable)")
		}
		for (index, word) in self.0.iter().enumerate()
		{
			if index > 0
			{
				write!(f, " → ")?;
			}
			write!(f, "{}", word)?;
		}
		Ok(())
	}
}

impl From<Ladder> for Vec<Word>
{
	#[inline]
	fn from(ladder: Ladder) -> Self { ladder.0 }
}

////////////////////////////////////////////////////////////////////////////////
//                              Letter changes.                               //
////////////////////////////////////////////////////////////////////////////////

/// The letter instances exchanged by a move. For a legal move, each list
/// holds exactly one letter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct LetterChange
{
	/// The letters removed from the predecessor, alphabetically.
	pub removed: Vec<char>,

	/// The letters added to form the successor, alphabetically.
	pub added: Vec<char>
}

impl LetterChange
{
	/// Compute the letters exchanged between two words.
	pub fn between(from: &Word, to: &Word) -> Self
	{
		let (from, to) = (from.histogram(), to.histogram());
		Self {
			removed: from.removed_letters(&to),
			added: from.added_letters(&to)
		}
	}
}

impl Display for LetterChange
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		let removed = self.removed.iter().collect::<String>();
		let added = self.added.iter().collect::<String>();
		write!(f, "-{} +{}", removed, added)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
