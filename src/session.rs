//! # Sessions
//!
//! Herein is the state machine of a single puzzle session. A session starts
//! out [`NotStarted`](SessionState::NotStarted), enters
//! [`InProgress`](SessionState::InProgress) when a puzzle is chosen, and ends
//! in [`Won`](SessionState::Won) once the mystery word is submitted. Rejected
//! guesses never change the session.

use std::{
	collections::BTreeSet,
	error::Error,
	fmt::{self, Display, Formatter}
};

use log::debug;
use serde::Serialize;

use crate::{
	cache::{LadderCache, PathCache},
	clues::Clues,
	feedback::{score, LetterState},
	hint,
	ladder::Ladder,
	puzzle::Puzzle,
	solver::Solver,
	word::{Word, WordError, WORD_LENGTH}
};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// The state of a [`Session`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SessionState
{
	/// No puzzle has been chosen yet.
	NotStarted,

	/// A puzzle is being played.
	InProgress,

	/// The mystery word has been reached. No further guesses are accepted.
	Won
}

/// A serializable copy of the observable state of a started [`Session`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot
{
	/// The root word of the puzzle.
	pub root: Word,

	/// The mystery word of the puzzle.
	pub mystery: Word,

	/// The accepted guesses, oldest first.
	pub attempts: Vec<Word>,

	/// The state of the session.
	pub state: SessionState
}

/// A puzzle session: the chosen puzzle, the accepted guesses, and the caches
/// that answer the derived queries.
#[derive(Debug)]
#[must_use]
pub struct Session
{
	/// The solver, which also owns the dictionary.
	solver: Solver,

	/// The session-local ladder and hint cache. Cleared when the puzzle
	/// changes; hints are also cleared after every accepted guess.
	cache: PathCache,

	/// The clues, if any.
	clues: Option<Clues>,

	/// Whether hints and clues are withheld.
	hard_mode: bool,

	/// The current puzzle, if one has been chosen.
	puzzle: Option<Puzzle>,

	/// The accepted guesses, oldest first. Append-only within a puzzle.
	attempts: Vec<Word>,

	/// Whether the mystery word has been reached. Sticky within a puzzle.
	won: bool
}

impl Session
{
	/// Construct a session that has not yet started.
	///
	/// # Arguments
	///
	/// * `solver` - The solver, which determines the dictionary.
	///
	/// # Returns
	///
	/// A new session.
	pub fn new(solver: Solver) -> Self
	{
		Self {
			solver,
			cache: PathCache::new(),
			clues: None,
			hard_mode: false,
			puzzle: None,
			attempts: Vec::new(),
			won: false
		}
	}

	/// Enable or disable hard mode, in which hints and clues are withheld.
	#[inline]
	pub fn with_hard_mode(mut self, hard_mode: bool) -> Self
	{
		self.hard_mode = hard_mode;
		self
	}

	/// Supply clues for the words of the dictionary.
	#[inline]
	pub fn with_clues(mut self, clues: Clues) -> Self
	{
		self.clues = Some(clues);
		self
	}

	/// Start the given puzzle, discarding any progress on the previous one.
	///
	/// # Arguments
	///
	/// * `puzzle` - The puzzle to play.
	pub fn start(&mut self, puzzle: Puzzle)
	{
		debug!("starting puzzle: {}", puzzle);
		self.puzzle = Some(puzzle);
		self.attempts.clear();
		self.won = false;
		self.cache.clear();
	}

	/// Get the solver.
	#[inline]
	pub fn solver(&self) -> &Solver { &self.solver }

	/// Get the current puzzle, if any.
	#[inline]
	#[must_use]
	pub fn puzzle(&self) -> Option<&Puzzle> { self.puzzle.as_ref() }

	/// Get the accepted guesses, oldest first.
	#[inline]
	#[must_use]
	pub fn attempts(&self) -> &[Word] { &self.attempts }

	/// Check whether hard mode is enabled.
	#[inline]
	#[must_use]
	pub fn is_hard_mode(&self) -> bool { self.hard_mode }

	/// Answer the state of the session.
	#[must_use]
	pub fn state(&self) -> SessionState
	{
		match (&self.puzzle, self.won)
		{
			(None, _) => SessionState::NotStarted,
			(Some(_), false) => SessionState::InProgress,
			(Some(_), true) => SessionState::Won
		}
	}

	/// Check whether the mystery word has been reached.
	#[inline]
	#[must_use]
	pub fn is_won(&self) -> bool { self.won }

	/// Get the word from which the next guess must be one move away: the
	/// latest accepted guess, or the root word if there is none yet.
	#[must_use]
	pub fn last_word(&self) -> Option<&Word>
	{
		let puzzle = self.puzzle.as_ref()?;
		Some(self.attempts.last().unwrap_or(puzzle.root()))
	}

	/// Capture the observable state of the session.
	///
	/// # Returns
	///
	/// The snapshot, or `None` if no puzzle has been chosen.
	#[must_use]
	pub fn snapshot(&self) -> Option<SessionSnapshot>
	{
		let puzzle = self.puzzle.as_ref()?;
		Some(SessionSnapshot {
			root: *puzzle.root(),
			mystery: *puzzle.mystery(),
			attempts: self.attempts.clone(),
			state: self.state()
		})
	}

	/// Submit a guess. The guess is rejected, and the session is left exactly
	/// as it was, if any of the following hold, checked in this order:
	///
	/// 1. No puzzle has been chosen.
	/// 2. The puzzle is already won.
	/// 3. The guess is not exactly five characters long.
	/// 4. The guess is not a dictionary word.
	/// 5. The guess is not one move away from the [last
	///    word](Self::last_word).
	///
	/// Otherwise the guess is appended to the attempts, and the session is
	/// won if the guess is the mystery word.
	///
	/// # Arguments
	///
	/// * `guess` - The guess, in any case.
	///
	/// # Returns
	///
	/// A snapshot of the session after accepting the guess.
	///
	/// # Errors
	///
	/// The [reason](GuessError) that the guess was rejected.
	pub fn submit_guess(&mut self, guess: &str) -> Result<SessionSnapshot, GuessError>
	{
		let puzzle = self.puzzle.ok_or(GuessError::NoPuzzle)?;
		if self.won
		{
			return Err(GuessError::AlreadyWon)
		}
		let word = match Word::new(guess)
		{
			Ok(word) => word,
			Err(WordError::InvalidLength(length)) =>
				return Err(GuessError::InvalidLength(length)),
			Err(WordError::InvalidCharacter(_)) =>
				return Err(GuessError::NotInDictionary(guess.to_string()))
		};
		if !self.solver.dictionary().contains(&word)
		{
			return Err(GuessError::NotInDictionary(guess.to_string()))
		}
		let from = *self.attempts.last().unwrap_or(puzzle.root());
		if !self.solver.oracle().is_valid_move(&from, &word)
		{
			return Err(GuessError::InvalidMove { from, to: word })
		}
		self.attempts.push(word);
		self.cache.clear_hints();
		if word == *puzzle.mystery()
		{
			self.won = true;
			debug!("won in {} moves: {}", self.attempts.len(), puzzle);
		}
		else
		{
			debug!("accepted: {} → {}", from, word);
		}
		Ok(SessionSnapshot {
			root: *puzzle.root(),
			mystery: *puzzle.mystery(),
			attempts: self.attempts.clone(),
			state: self.state()
		})
	}

	/// Estimate the number of moves still needed: the length of an optimal
	/// ladder from the last word to the mystery word.
	///
	/// # Returns
	///
	/// The number of moves, or `None` if no puzzle has been chosen or the
	/// mystery word is unreachable from the last word.
	#[must_use]
	pub fn remaining_steps_estimate(&self) -> Option<usize>
	{
		self.remaining_solution().moves()
	}

	/// Answer the letters of the mystery word that occur anywhere in any
	/// accepted guess. Positions are not considered.
	#[must_use]
	pub fn found_letters(&self) -> BTreeSet<char>
	{
		let Some(puzzle) = &self.puzzle else { return BTreeSet::new() };
		puzzle.mystery().letters().iter()
			.map(|&letter| letter as char)
			.filter(|&letter| {
				self.attempts.iter().any(|attempt| attempt.contains_letter(letter))
			})
			.collect()
	}

	/// Answer the positions of the mystery word that some accepted guess
	/// matches exactly.
	#[must_use]
	pub fn revealed_positions(&self) -> BTreeSet<usize>
	{
		let Some(puzzle) = &self.puzzle else { return BTreeSet::new() };
		let mystery = puzzle.mystery();
		(0 .. WORD_LENGTH)
			.filter(|&index| {
				self.attempts.iter()
					.any(|attempt| attempt.letter(index) == mystery.letter(index))
			})
			.collect()
	}

	/// Score the given word against the mystery word.
	///
	/// # Returns
	///
	/// The state of each letter, or `None` if no puzzle has been chosen.
	#[must_use]
	pub fn feedback(&self, word: &Word) -> Option<[LetterState; WORD_LENGTH]>
	{
		self.puzzle.as_ref().map(|puzzle| score(word, puzzle.mystery()))
	}

	/// Compute an optimal ladder from the root word to the mystery word.
	///
	/// # Returns
	///
	/// The ladder, which is empty if no puzzle has been chosen or the puzzle
	/// is unsolvable.
	pub fn solution(&self) -> Ladder
	{
		match &self.puzzle
		{
			Some(puzzle) => self.solver.solve_cached(
				&self.cache,
				puzzle.root(),
				puzzle.mystery()
			),
			None => Ladder::unreachable()
		}
	}

	/// Compute an optimal ladder from the last word to the mystery word.
	///
	/// # Returns
	///
	/// The ladder, which is empty if no puzzle has been chosen or the mystery
	/// word is unreachable from the last word.
	pub fn remaining_solution(&self) -> Ladder
	{
		match (self.last_word(), &self.puzzle)
		{
			(Some(last), Some(puzzle)) =>
				self.solver.solve_cached(&self.cache, last, puzzle.mystery()),
			_ => Ladder::unreachable()
		}
	}

	/// Compute the tossable-letter hint for the last word.
	///
	/// # Returns
	///
	/// The positions of the last word to highlight. Empty in hard mode, once
	/// the puzzle is won, and before a puzzle is chosen.
	#[must_use]
	pub fn tossable_hint(&self) -> BTreeSet<usize>
	{
		if self.hard_mode || self.won
		{
			return BTreeSet::new()
		}
		match (self.last_word(), &self.puzzle)
		{
			(Some(last), Some(puzzle)) => hint::tossable(
				&self.solver,
				&self.cache,
				last,
				puzzle.mystery()
			),
			_ => BTreeSet::new()
		}
	}

	/// Get the clue of the next word along an optimal ladder from the last
	/// word.
	///
	/// # Returns
	///
	/// The clue, or `None` in hard mode, without clues, once won, or when the
	/// next word has no clue.
	#[must_use]
	pub fn next_clue(&self) -> Option<&str>
	{
		if self.hard_mode || self.won
		{
			return None
		}
		let clues = self.clues.as_ref()?;
		let ladder = self.remaining_solution();
		clues.get(ladder.next()?)
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of reasons for rejecting a guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessError
{
	/// No puzzle has been chosen.
	NoPuzzle,

	/// The puzzle has already been won.
	AlreadyWon,

	/// The guess was not five characters long. Carries the actual character
	/// count.
	InvalidLength(usize),

	/// The guess was not a dictionary word. Carries the guess as submitted.
	NotInDictionary(String),

	/// The guess was not one move away from the previous word.
	InvalidMove
	{
		/// The previous word.
		from: Word,

		/// The rejected guess.
		to: Word
	}
}

impl Display for GuessError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::NoPuzzle => write!(f, "no puzzle has been chosen"),
			Self::AlreadyWon => write!(f, "the puzzle is already solved"),
			Self::InvalidLength(length) => write!(
				f,
				"guess must be {} letters, not {}",
				WORD_LENGTH,
				length
			),
			Self::NotInDictionary(guess) =>
				write!(f, "not in dictionary: {}", guess.to_uppercase()),
			Self::InvalidMove { from, to } => write!(
				f,
				"{} must toss exactly one letter of {} and add one",
				to,
				from
			)
		}
	}
}

impl Error for GuessError {}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
