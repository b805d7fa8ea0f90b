//! # Puzzles
//!
//! Herein are puzzles, the catalog from which they are chosen, and the
//! authoring-time audit that proves every puzzle of a catalog solvable
//! against a particular dictionary. The audit is the only parallel operation
//! of the engine.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	fs::File,
	io::{self, BufReader},
	path::Path,
	str::FromStr
};

use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
	cache::SharedPathCache,
	dictionary::Dictionary,
	ladder::Ladder,
	solver::Solver,
	word::{Word, WordError}
};

////////////////////////////////////////////////////////////////////////////////
//                                  Puzzles.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The bundled puzzle catalog.
const BUILTIN_PUZZLES: &str = include_str!("../dict/puzzles.json");

/// The author's rating of a puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty
{
	/// A short ladder through common words.
	Easy,

	/// A long ladder, or one through uncommon words.
	Hard
}

impl Display for Difficulty
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Difficulty::Easy => write!(f, "easy"),
			Difficulty::Hard => write!(f, "hard")
		}
	}
}

impl FromStr for Difficulty
{
	type Err = PuzzleError;

	fn from_str(s: &str) -> Result<Self, Self::Err>
	{
		match s.to_ascii_lowercase().as_str()
		{
			"easy" => Ok(Difficulty::Easy),
			"hard" => Ok(Difficulty::Hard),
			_ => Err(PuzzleError::UnknownDifficulty(s.to_string()))
		}
	}
}

/// A puzzle: transform the root word into the mystery word. Both words are
/// members of the dictionary against which the puzzle was constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[must_use]
pub struct Puzzle
{
	/// The word that the player starts from.
	root: Word,

	/// The word that the player must reach.
	mystery: Word,

	/// The author's rating, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	difficulty: Option<Difficulty>
}

impl Puzzle
{
	/// Construct a puzzle, validating both words against the dictionary.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary.
	/// * `root` - The start word.
	/// * `mystery` - The mystery word.
	///
	/// # Returns
	///
	/// The requested puzzle.
	///
	/// # Errors
	///
	/// * If either word is malformed, [`PuzzleError::InvalidWord`].
	/// * If either word is not a dictionary member,
	///   [`PuzzleError::NotInDictionary`].
	/// * If the words are the same, [`PuzzleError::Trivial`].
	pub fn new(
		dictionary: &Dictionary,
		root: &str,
		mystery: &str
	) -> Result<Self, PuzzleError>
	{
		let root = Word::new(root)?;
		let mystery = Word::new(mystery)?;
		for word in [root, mystery]
		{
			if !dictionary.contains(&word)
			{
				return Err(PuzzleError::NotInDictionary(word))
			}
		}
		if root == mystery
		{
			return Err(PuzzleError::Trivial(root))
		}
		Ok(Self { root, mystery, difficulty: None })
	}

	/// Attach a difficulty rating.
	#[inline]
	pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self
	{
		self.difficulty = Some(difficulty);
		self
	}

	/// Get the root word.
	#[inline]
	#[must_use]
	pub fn root(&self) -> &Word { &self.root }

	/// Get the mystery word.
	#[inline]
	#[must_use]
	pub fn mystery(&self) -> &Word { &self.mystery }

	/// Get the difficulty rating, if any.
	#[inline]
	#[must_use]
	pub fn difficulty(&self) -> Option<Difficulty> { self.difficulty }
}

impl Display for Puzzle
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		write!(f, "{} → {}", self.root, self.mystery)?;
		if let Some(difficulty) = self.difficulty
		{
			write!(f, " ({})", difficulty)?;
		}
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Catalogs.                                  //
////////////////////////////////////////////////////////////////////////////////

/// A row of a catalog file. Unrecognized fields are ignored.
#[derive(Deserialize)]
struct CatalogRow
{
	root: String,
	mystery: String,
	#[serde(default)]
	difficulty: Option<Difficulty>
}

/// An ordered collection of puzzles, all validated against the same
/// dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Catalog
{
	/// The puzzles, in catalog order.
	puzzles: Vec<Puzzle>
}

impl Catalog
{
	/// Construct a catalog from the given puzzles.
	#[inline]
	pub fn from_puzzles(puzzles: Vec<Puzzle>) -> Self { Self { puzzles } }

	/// Construct the bundled catalog, keeping only the puzzles that are valid
	/// for the given dictionary.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary.
	///
	/// # Returns
	///
	/// The bundled catalog.
	pub fn builtin(dictionary: &Dictionary) -> Self
	{
		match serde_json::from_str::<Vec<CatalogRow>>(BUILTIN_PUZZLES)
		{
			Ok(rows) => Self::from_rows(dictionary, rows, true)
				.unwrap_or_default(),
			Err(e) =>
			{
				warn!("bundled catalog is malformed: {}", e);
				Self::default()
			}
		}
	}

	/// Parse a catalog from JSON text: an array of objects with `root`,
	/// `mystery`, and optionally `difficulty` fields.
	///
	/// # Arguments
	///
	/// * `dictionary` - The dictionary.
	/// * `text` - The JSON text.
	///
	/// # Returns
	///
	/// The catalog.
	///
	/// # Errors
	///
	/// * If the text is malformed, [`PuzzleError::Json`].
	/// * If any row does not make a valid puzzle, the reason why.
	pub fn from_json(dictionary: &Dictionary, text: &str)
		-> Result<Self, PuzzleError>
	{
		let rows: Vec<CatalogRow> = serde_json::from_str(text)?;
		Self::from_rows(dictionary, rows, false)
	}

	/// Read a catalog from a JSON file, in the format accepted by
	/// [`from_json`](Self::from_json).
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	/// * `dictionary` - The dictionary.
	///
	/// # Returns
	///
	/// The catalog.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, [`PuzzleError::Io`].
	/// * If the file is malformed, [`PuzzleError::Json`].
	/// * If any row does not make a valid puzzle, the reason why.
	pub fn read_from_file<T: AsRef<Path>>(
		path: T,
		dictionary: &Dictionary
	) -> Result<Self, PuzzleError>
	{
		let path = path.as_ref();
		trace!("reading catalog: {}", path.display());
		let file = File::open(path)?;
		let rows: Vec<CatalogRow> =
			serde_json::from_reader(BufReader::new(file))?;
		Self::from_rows(dictionary, rows, false)
	}

	/// Answer the number of puzzles.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.puzzles.len() }

	/// Check whether the catalog is empty.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.puzzles.is_empty() }

	/// Get the puzzles, in catalog order.
	#[inline]
	#[must_use]
	pub fn puzzles(&self) -> &[Puzzle] { &self.puzzles }

	/// Get the puzzle at the given position, if any.
	#[inline]
	#[must_use]
	pub fn get(&self, index: usize) -> Option<&Puzzle> { self.puzzles.get(index) }

	/// Keep only the puzzles of the given difficulty. Unrated puzzles are
	/// discarded.
	pub fn filter(&self, difficulty: Difficulty) -> Self
	{
		Self {
			puzzles: self.puzzles.iter()
				.filter(|puzzle| puzzle.difficulty == Some(difficulty))
				.copied()
				.collect()
		}
	}

	/// Validate the given rows. If `lenient`, invalid rows are skipped with a
	/// warning; otherwise the first invalid row is an error.
	fn from_rows(
		dictionary: &Dictionary,
		rows: Vec<CatalogRow>,
		lenient: bool
	) -> Result<Self, PuzzleError>
	{
		let mut puzzles = Vec::with_capacity(rows.len());
		for row in rows
		{
			match Puzzle::new(dictionary, &row.root, &row.mystery)
			{
				Ok(puzzle) => puzzles.push(match row.difficulty
				{
					Some(difficulty) => puzzle.with_difficulty(difficulty),
					None => puzzle
				}),
				Err(e) if lenient =>
					warn!("skipping puzzle {} → {}: {}", row.root, row.mystery, e),
				Err(e) => return Err(e)
			}
		}
		Ok(Self { puzzles })
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                  Audits.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The outcome of auditing a single puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[must_use]
pub struct AuditReport
{
	/// The audited puzzle.
	pub puzzle: Puzzle,

	/// An optimal ladder from the root to the mystery word, or an empty
	/// ladder if the puzzle is unsolvable within the search bound.
	pub ladder: Ladder
}

impl AuditReport
{
	/// Check whether the puzzle can be solved.
	#[inline]
	#[must_use]
	pub fn is_solvable(&self) -> bool { !self.ladder.is_empty() }

	/// Answer the number of moves of an optimal solution, if any.
	#[inline]
	#[must_use]
	pub fn moves(&self) -> Option<usize> { self.ladder.moves() }
}

impl Display for AuditReport
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self.moves()
		{
			Some(moves) =>
				write!(f, "{}: {} moves: {}", self.puzzle, moves, self.ladder),
			None => write!(f, "{}: UNSOLVABLE", self.puzzle)
		}
	}
}

/// Solve every given puzzle, in parallel, sharing solutions through a
/// [`SharedPathCache`]. Reports are answered in the order of the puzzles.
///
/// # Arguments
///
/// * `solver` - The solver.
/// * `puzzles` - The puzzles to audit.
///
/// # Returns
///
/// One report per puzzle.
pub fn audit(solver: &Solver, puzzles: &[Puzzle]) -> Vec<AuditReport>
{
	let cache = SharedPathCache::new();
	let reports = puzzles
		.par_iter()
		.map(|puzzle| {
			let ladder = solver.solve_cached(&cache, puzzle.root(), puzzle.mystery());
			AuditReport { puzzle: *puzzle, ladder }
		})
		.collect::<Vec<_>>();
	let unsolvable = reports.iter().filter(|r| !r.is_solvable()).count();
	debug!("audited {} puzzles: {} unsolvable", reports.len(), unsolvable);
	reports
}

////////////////////////////////////////////////////////////////////////////////
//                                  Errors.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of puzzle and catalog errors.
#[derive(Debug)]
pub enum PuzzleError
{
	/// A word of the puzzle was malformed.
	InvalidWord(WordError),

	/// A word of the puzzle was not a dictionary member.
	NotInDictionary(Word),

	/// The root and mystery words were the same.
	Trivial(Word),

	/// A difficulty rating was not recognized.
	UnknownDifficulty(String),

	/// The catalog could not be opened or read.
	Io(io::Error),

	/// The catalog was malformed.
	Json(serde_json::Error)
}

impl Display for PuzzleError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::InvalidWord(e) => write!(f, "invalid puzzle word: {}", e),
			Self::NotInDictionary(word) =>
				write!(f, "not in dictionary: {}", word),
			Self::Trivial(word) =>
				write!(f, "root and mystery are both {}", word),
			Self::UnknownDifficulty(s) =>
				write!(f, "unknown difficulty: {:?} (expected easy or hard)", s),
			Self::Io(e) => write!(f, "catalog I/O failed: {}", e),
			Self::Json(e) => write!(f, "invalid catalog: {}", e)
		}
	}
}

impl Error for PuzzleError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::InvalidWord(e) => Some(e),
			Self::Io(e) => Some(e),
			Self::Json(e) => Some(e),
			_ => None
		}
	}
}

impl From<WordError> for PuzzleError
{
	fn from(e: WordError) -> Self { Self::InvalidWord(e) }
}

impl From<io::Error> for PuzzleError
{
	fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<serde_json::Error> for PuzzleError
{
	fn from(e: serde_json::Error) -> Self { Self::Json(e) }
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{io::Write, sync::Arc};

	use tempfile::NamedTempFile;

	use crate::{
		dictionary::Dictionary,
		puzzle::{audit, Catalog, Difficulty, Puzzle, PuzzleError},
		solver::Solver,
		word::Word
	};

	/// Parse a word, for brevity.
	fn w(text: &str) -> Word { Word::new(text).unwrap() }

	/// Ensure that puzzles are validated against the dictionary.
	#[test]
	fn test_new()
	{
		let dictionary = Dictionary::embedded();
		let puzzle = Puzzle::new(&dictionary, "ocean", "FIELD").unwrap();
		assert_eq!(puzzle.root(), &w("ocean"));
		assert_eq!(puzzle.mystery(), &w("field"));
		assert_eq!(puzzle.difficulty(), None);
		assert_eq!(puzzle.to_string(), "OCEAN → FIELD");
		let puzzle = puzzle.with_difficulty(Difficulty::Easy);
		assert_eq!(puzzle.to_string(), "OCEAN → FIELD (easy)");

		assert!(matches!(
			Puzzle::new(&dictionary, "ocean", "fields"),
			Err(PuzzleError::InvalidWord(_))
		));
		assert!(matches!(
			Puzzle::new(&dictionary, "stork", "field"),
			Err(PuzzleError::NotInDictionary(word)) if word == w("stork")
		));
		assert!(matches!(
			Puzzle::new(&dictionary, "ocean", "ocean"),
			Err(PuzzleError::Trivial(_))
		));
	}

	/// Ensure that difficulties parse without regard to case.
	#[test]
	fn test_difficulty()
	{
		assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
		assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
		assert!(matches!(
			"medium".parse::<Difficulty>(),
			Err(PuzzleError::UnknownDifficulty(_))
		));
	}

	/// Ensure that the bundled catalog is complete and filterable.
	#[test]
	fn test_builtin()
	{
		let dictionary = Dictionary::embedded();
		let catalog = Catalog::builtin(&dictionary);
		assert_eq!(catalog.len(), 18);
		assert_eq!(catalog.get(0).unwrap().root(), &w("storm"));
		assert_eq!(catalog.filter(Difficulty::Easy).len(), 13);
		assert_eq!(catalog.filter(Difficulty::Hard).len(), 5);
	}

	/// Ensure that catalog files are read strictly, ignoring extra fields.
	#[test]
	fn test_read_from_file()
	{
		let dictionary = Dictionary::embedded();
		let mut file = NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"[
				{{"root": "ocean", "mystery": "field", "date": "2024-09-18"}},
				{{"root": "brave", "mystery": "grave", "difficulty": "easy"}}
			]"#
		).unwrap();
		let catalog = Catalog::read_from_file(file.path(), &dictionary).unwrap();
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.puzzles()[0].difficulty(), None);
		assert_eq!(catalog.puzzles()[1].difficulty(), Some(Difficulty::Easy));
		assert!(catalog.filter(Difficulty::Hard).is_empty());

		let bad = Catalog::from_json(
			&dictionary,
			r#"[{"root": "ocean", "mystery": "stork"}]"#
		);
		assert!(matches!(bad, Err(PuzzleError::NotInDictionary(_))));
		let bad = Catalog::from_json(&dictionary, r#"{"root": "ocean"}"#);
		assert!(matches!(bad, Err(PuzzleError::Json(_))));
	}

	/// Ensure that every bundled puzzle is solvable, and that unsolvable
	/// puzzles are reported rather than hidden.
	#[test]
	fn test_audit()
	{
		let dictionary = Arc::new(Dictionary::embedded());
		let catalog = Catalog::builtin(&dictionary);
		let solver = Solver::new(Arc::clone(&dictionary));
		let reports = audit(&solver, catalog.puzzles());
		assert_eq!(reports.len(), catalog.len());
		for (report, puzzle) in reports.iter().zip(catalog.puzzles())
		{
			assert_eq!(&report.puzzle, puzzle);
			assert!(report.is_solvable(), "{}", report);
			assert!(solver.oracle().is_valid_ladder(&report.ladder));
		}
		assert_eq!(reports[0].moves(), Some(4));

		let island = Dictionary::from_words(
			["ocean", "alone", "quack"].iter().map(|t| w(t))
		);
		let solver = Solver::new(Arc::new(island.clone()));
		let puzzles = [
			Puzzle::new(&island, "ocean", "alone").unwrap(),
			Puzzle::new(&island, "ocean", "quack").unwrap()
		];
		let reports = audit(&solver, &puzzles);
		assert!(reports[0].is_solvable());
		assert!(!reports[1].is_solvable());
		assert_eq!(reports[1].to_string(), "OCEAN → QUACK: UNSOLVABLE");
	}
}
