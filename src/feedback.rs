//! # Letter feedback
//!
//! Per-letter scoring of a word against the mystery word, used to reveal the
//! mystery word progressively as the player closes in on it.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::word::{Word, ALPHABET_SIZE, WORD_LENGTH};

/// The state of a single letter of a scored word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LetterState
{
	/// The letter occupies the same position in the target.
	Correct,

	/// The letter occurs elsewhere in the target.
	Present,

	/// The letter does not occur in the target, or every occurrence is
	/// already accounted for.
	Absent
}

impl Display for LetterState
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		let symbol = match self
		{
			LetterState::Correct => '=',
			LetterState::Present => '~',
			LetterState::Absent => '.'
		};
		write!(f, "{}", symbol)
	}
}

/// Score `guess` against `target`. Exact matches are assigned first; the
/// remaining letters are then marked present, left to right, only while the
/// target still has unclaimed copies of them.
///
/// # Arguments
///
/// * `guess` - The word to score.
/// * `target` - The mystery word.
///
/// # Returns
///
/// The state of each letter of `guess`.
#[must_use]
pub fn score(guess: &Word, target: &Word) -> [LetterState; WORD_LENGTH]
{
	let mut states = [LetterState::Absent; WORD_LENGTH];
	let mut unclaimed = [0u8; ALPHABET_SIZE];
	for index in 0 .. WORD_LENGTH
	{
		let (g, t) = (guess.letters()[index], target.letters()[index]);
		if g == t
		{
			states[index] = LetterState::Correct;
		}
		else
		{
			unclaimed[(t - b'A') as usize] += 1;
		}
	}
	for index in 0 .. WORD_LENGTH
	{
		if states[index] == LetterState::Correct
		{
			continue
		}
		let slot = &mut unclaimed[(guess.letters()[index] - b'A') as usize];
		if *slot > 0
		{
			*slot -= 1;
			states[index] = LetterState::Present;
		}
	}
	states
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::{
		feedback::{score, LetterState::{self, *}},
		word::Word
	};

	/// Score two words given as text, for brevity.
	fn s(guess: &str, target: &str) -> [LetterState; 5]
	{
		score(&Word::new(guess).unwrap(), &Word::new(target).unwrap())
	}

	/// Ensure that exact, misplaced, and missing letters are told apart.
	#[test]
	fn test_score()
	{
		assert_eq!(s("field", "field"), [Correct; 5]);
		assert_eq!(s("elfin", "field"), [Present, Present, Present, Present, Absent]);
		assert_eq!(s("ocean", "field"), [Absent, Absent, Correct, Absent, Absent]);
	}

	/// Ensure that repeated letters never claim more copies than the target
	/// holds, and that exact matches take priority.
	#[test]
	fn test_score_repeated_letters()
	{
		// Only one E in the target, and it is matched exactly.
		assert_eq!(s("speed", "spend"), [Correct, Correct, Correct, Absent, Correct]);
		// One E in the target, claimed by the leftmost misplaced E.
		assert_eq!(s("eerie", "alien"), [Present, Absent, Absent, Present, Absent]);
		// The exact match consumes the only E.
		assert_eq!(s("geese", "field"), [Absent, Absent, Correct, Absent, Absent]);
	}

	/// Ensure the compact rendering.
	#[test]
	fn test_display()
	{
		let rendered = s("elfin", "field").iter()
			.map(ToString::to_string)
			.collect::<String>();
		assert_eq!(rendered, "~~~~.");
	}
}
