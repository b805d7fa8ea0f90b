//! # Words
//!
//! Herein are the fundamental value types of the engine: the five-letter
//! [`Word`], its [`AnagramKey`], and the transient [`LetterHistogram`] used
//! to compare the letter multisets of two words. Case normalization happens
//! exactly once, when a [`Word`] is constructed; everything downstream works
//! with canonical upper-case ASCII letters.

use std::{
	error::Error,
	fmt::{self, Debug, Display, Formatter},
	str::FromStr
};

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                                  Words.                                    //
////////////////////////////////////////////////////////////////////////////////

/// The number of letters in every word of the puzzle.
pub const WORD_LENGTH: usize = 5;

/// The number of letters in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// A five-letter word, canonicalized to upper case. Words are cheap to copy,
/// hash, and compare, so they are passed around by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[must_use]
pub struct Word([u8; WORD_LENGTH]);

impl Word
{
	/// Construct a word from the given text. The text must comprise exactly
	/// five ASCII letters, in any case.
	///
	/// # Arguments
	///
	/// * `text` - The text of the word.
	///
	/// # Returns
	///
	/// The canonical word.
	///
	/// # Errors
	///
	/// * [`WordError::InvalidLength`] if the text is not five characters long.
	/// * [`WordError::InvalidCharacter`] if the text contains anything other
	///   than ASCII letters.
	pub fn new(text: &str) -> Result<Self, WordError>
	{
		let length = text.chars().count();
		if length != WORD_LENGTH
		{
			return Err(WordError::InvalidLength(length))
		}
		let mut letters = [0u8; WORD_LENGTH];
		for (slot, c) in letters.iter_mut().zip(text.chars())
		{
			if !c.is_ascii_alphabetic()
			{
				return Err(WordError::InvalidCharacter(c))
			}
			*slot = c.to_ascii_uppercase() as u8;
		}
		Ok(Self(letters))
	}

	/// Get the letters of the word, as upper-case ASCII bytes.
	#[inline]
	#[must_use]
	pub const fn letters(&self) -> &[u8; WORD_LENGTH] { &self.0 }

	/// Get the letter at the specified position.
	///
	/// # Panics
	///
	/// If `index` is not less than [`WORD_LENGTH`].
	#[inline]
	#[must_use]
	pub fn letter(&self, index: usize) -> char { self.0[index] as char }

	/// Get the word as a string slice.
	#[inline]
	#[must_use]
	pub fn as_str(&self) -> &str
	{
		// Construction admits only ASCII letters, so this cannot fail.
		std::str::from_utf8(&self.0).unwrap_or_default()
	}

	/// Check whether the word contains the given letter anywhere. The letter
	/// is compared case-insensitively.
	#[inline]
	#[must_use]
	pub fn contains_letter(&self, letter: char) -> bool
	{
		let letter = letter.to_ascii_uppercase();
		self.0.iter().any(|&l| l as char == letter)
	}

	/// Compute the letter histogram of the word.
	#[inline]
	pub fn histogram(&self) -> LetterHistogram { LetterHistogram::from(self) }

	/// Compute the anagram key of the word, i.e., its letters in sorted
	/// order.
	#[inline]
	pub fn anagram_key(&self) -> AnagramKey
	{
		let mut letters = self.0;
		letters.sort_unstable();
		AnagramKey(letters)
	}
}

impl Display for Word
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

impl Debug for Word
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "Word({})", self.as_str())
	}
}

impl FromStr for Word
{
	type Err = WordError;

	#[inline]
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::new(s) }
}

impl TryFrom<String> for Word
{
	type Error = WordError;

	#[inline]
	fn try_from(value: String) -> Result<Self, Self::Error>
	{
		Self::new(&value)
	}
}

impl From<Word> for String
{
	#[inline]
	fn from(word: Word) -> Self { word.as_str().to_string() }
}

/// The complete enumeration of [`Word`] construction errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordError
{
	/// The text did not comprise exactly five characters. Carries the actual
	/// character count.
	InvalidLength(usize),

	/// The text contained a character that is not an ASCII letter.
	InvalidCharacter(char)
}

impl Display for WordError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::InvalidLength(length) => write!(
				f,
				"word must be exactly {} letters, got {}",
				WORD_LENGTH,
				length
			),
			Self::InvalidCharacter(c) =>
				write!(f, "word contains a non-letter: {:?}", c)
		}
	}
}

impl Error for WordError {}

////////////////////////////////////////////////////////////////////////////////
//                               Anagram keys.                                //
////////////////////////////////////////////////////////////////////////////////

/// The letters of a word in sorted order. Two words are anagrams of each
/// other iff their anagram keys are equal, so the key identifies the letter
/// multiset of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct AnagramKey([u8; WORD_LENGTH]);

impl AnagramKey
{
	/// Get the sorted letters of the key.
	#[inline]
	#[must_use]
	pub const fn letters(&self) -> &[u8; WORD_LENGTH] { &self.0 }

	/// Replace the letter at `index` with `letter`, answering the key of the
	/// resulting multiset.
	///
	/// # Arguments
	///
	/// * `index` - The position of the letter to replace.
	/// * `letter` - The replacement, as an upper-case ASCII byte.
	///
	/// # Returns
	///
	/// The key of the substituted multiset.
	#[inline]
	pub fn substitute(&self, index: usize, letter: u8) -> Self
	{
		let mut letters = self.0;
		letters[index] = letter;
		letters.sort_unstable();
		Self(letters)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                             Letter histograms.                             //
////////////////////////////////////////////////////////////////////////////////

/// Per-letter counts of a word. Only ever built transiently, to validate
/// moves and derive hints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct LetterHistogram([u8; ALPHABET_SIZE]);

impl LetterHistogram
{
	/// Get the count of the given letter. The letter is compared
	/// case-insensitively; non-letters always have a count of zero.
	#[inline]
	#[must_use]
	pub fn count(&self, letter: char) -> usize
	{
		if letter.is_ascii_alphabetic()
		{
			let index = letter.to_ascii_uppercase() as u8 - b'A';
			self.0[index as usize] as usize
		}
		else
		{
			0
		}
	}

	/// Compare this histogram against the histogram of a successor word.
	///
	/// # Arguments
	///
	/// * `to` - The histogram of the successor.
	///
	/// # Returns
	///
	/// A 2-tuple comprising the number of letter instances added and removed,
	/// respectively, when moving from `self` to `to`.
	#[must_use]
	pub fn changes_to(&self, to: &Self) -> (usize, usize)
	{
		self.0.iter().zip(to.0.iter()).fold(
			(0, 0),
			|(added, removed), (&from, &to)| (
				added + to.saturating_sub(from) as usize,
				removed + from.saturating_sub(to) as usize
			)
		)
	}

	/// Get the letter instances present in `to` but not in `self`, in
	/// alphabetical order.
	#[must_use]
	pub fn added_letters(&self, to: &Self) -> Vec<char>
	{
		Self::surplus(to, self)
	}

	/// Get the letter instances present in `self` but not in `to`, in
	/// alphabetical order.
	#[must_use]
	pub fn removed_letters(&self, to: &Self) -> Vec<char>
	{
		Self::surplus(self, to)
	}

	/// Get the letter instances of `minuend` in excess of `subtrahend`.
	fn surplus(minuend: &Self, subtrahend: &Self) -> Vec<char>
	{
		minuend.0.iter().zip(subtrahend.0.iter()).enumerate()
			.flat_map(|(index, (&a, &b))| {
				let letter = (b'A' + index as u8) as char;
				std::iter::repeat(letter).take(a.saturating_sub(b) as usize)
			})
			.collect()
	}
}

impl From<&Word> for LetterHistogram
{
	fn from(word: &Word) -> Self
	{
		let mut counts = [0u8; ALPHABET_SIZE];
		for &letter in word.letters()
		{
			counts[(letter - b'A') as usize] += 1;
		}
		Self(counts)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use crate::word::{Word, WordError};

	/// Ensure that construction canonicalizes case and rejects malformed
	/// text.
	#[test]
	fn test_new()
	{
		let word = Word::new("storm").unwrap();
		assert_eq!(word.as_str(), "STORM");
		assert_eq!(word, Word::new("StOrM").unwrap());
		assert_eq!(word.to_string(), "STORM");
		assert_eq!(Word::new("stor"), Err(WordError::InvalidLength(4)));
		assert_eq!(Word::new("stormy"), Err(WordError::InvalidLength(6)));
		assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
		assert_eq!(Word::new("st0rm"), Err(WordError::InvalidCharacter('0')));
		assert_eq!(Word::new("stör"), Err(WordError::InvalidLength(4)));
		assert_eq!(Word::new("störm"), Err(WordError::InvalidCharacter('ö')));
		assert_eq!("light".parse::<Word>().unwrap().letter(0), 'L');
	}

	/// Ensure that anagrams share a key and that substitution re-sorts.
	#[test]
	fn test_anagram_key()
	{
		let mince = Word::new("mince").unwrap();
		let cumin = Word::new("cumin").unwrap();
		assert_eq!(mince.anagram_key().letters(), b"CEIMN");
		assert_eq!(
			Word::new("stare").unwrap().anagram_key(),
			Word::new("tears").unwrap().anagram_key()
		);
		// CEIMN with E→U is CIMNU, the key of CUMIN.
		assert_eq!(
			mince.anagram_key().substitute(1, b'U'),
			cumin.anagram_key()
		);
	}

	/// Ensure that histograms count letter instances and report the letters
	/// exchanged between two words.
	#[test]
	fn test_histogram()
	{
		let storm = Word::new("storm").unwrap().histogram();
		let store = Word::new("store").unwrap().histogram();
		assert_eq!(storm.count('s'), 1);
		assert_eq!(storm.count('E'), 0);
		assert_eq!(storm.count('!'), 0);
		assert_eq!(storm.changes_to(&store), (1, 1));
		assert_eq!(storm.added_letters(&store), vec!['E']);
		assert_eq!(storm.removed_letters(&store), vec!['M']);
		assert_eq!(storm.changes_to(&storm), (0, 0));

		let speed = Word::new("speed").unwrap().histogram();
		assert_eq!(speed.count('E'), 2);
		let depth = Word::new("depth").unwrap().histogram();
		assert_eq!(speed.changes_to(&depth), (2, 2));
		assert_eq!(speed.removed_letters(&depth), vec!['E', 'S']);
		assert_eq!(speed.added_letters(&depth), vec!['H', 'T']);
	}

	/// Ensure that words serialize as their canonical text.
	#[test]
	fn test_serde()
	{
		let word = Word::new("ocean").unwrap();
		let json = serde_json::to_string(&word).unwrap();
		assert_eq!(json, "\"OCEAN\"");
		let back: Word = serde_json::from_str("\"field\"").unwrap();
		assert_eq!(back, Word::new("FIELD").unwrap());
		assert!(serde_json::from_str::<Word>("\"fields\"").is_err());
	}
}
