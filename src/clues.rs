//! # Clues
//!
//! Optional one-word clues for dictionary words. The session offers the clue
//! of the next word along an optimal ladder as a gentle hint.

use std::{
	collections::BTreeMap,
	error::Error,
	fmt::{self, Display, Formatter},
	fs::File,
	io::{self, BufReader},
	path::Path
};

use log::{trace, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::word::Word;

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// The bundled clue list.
const EMBEDDED_CLUES: &str = include_str!("../dict/clues.json");

/// A mapping from words to their clues.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct Clues
{
	/// The clues, keyed by word.
	clues: FxHashMap<Word, String>
}

/// The accepted layouts of a clue file: either a bare object, or an object
/// nested under `clues`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClueFile
{
	/// `{ "clues": { "word": "clue", ... } }`
	Wrapped { clues: BTreeMap<String, String> },

	/// `{ "word": "clue", ... }`
	Bare(BTreeMap<String, String>)
}

impl ClueFile
{
	/// Discard the layout, keeping only the entries.
	fn into_entries(self) -> BTreeMap<String, String>
	{
		match self
		{
			ClueFile::Wrapped { clues } => clues,
			ClueFile::Bare(clues) => clues
		}
	}
}

impl Clues
{
	/// Construct an empty clue list. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Construct the bundled clue list.
	pub fn embedded() -> Self
	{
		// The bundled list is verified by `test_embedded`.
		Self::from_json(EMBEDDED_CLUES).unwrap_or_default()
	}

	/// Parse a clue list from JSON text.
	///
	/// # Arguments
	///
	/// * `text` - The JSON text.
	///
	/// # Returns
	///
	/// The clue list. Entries whose keys are not valid words are skipped.
	///
	/// # Errors
	///
	/// [`CluesError::Json`] if the text is not a JSON object of strings,
	/// either bare or nested under `clues`.
	pub fn from_json(text: &str) -> Result<Self, CluesError>
	{
		let file: ClueFile = serde_json::from_str(text)?;
		Ok(Self::from_entries(file.into_entries()))
	}

	/// Read a clue list from a JSON file.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// The clue list. Entries whose keys are not valid words are skipped.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, [`CluesError::Io`].
	/// * If the file is malformed, [`CluesError::Json`].
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, CluesError>
	{
		let path = path.as_ref();
		trace!("reading clues: {}", path.display());
		let file = File::open(path)?;
		let file: ClueFile = serde_json::from_reader(BufReader::new(file))?;
		Ok(Self::from_entries(file.into_entries()))
	}

	/// Answer the number of clues.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.clues.len() }

	/// Check whether there are no clues.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.clues.is_empty() }

	/// Get the clue for the given word, if any.
	#[inline]
	#[must_use]
	pub fn get(&self, word: &Word) -> Option<&str>
	{
		self.clues.get(word).map(String::as_str)
	}

	/// Normalize the keys of the given entries, skipping invalid ones.
	fn from_entries(entries: BTreeMap<String, String>) -> Self
	{
		let mut clues = FxHashMap::default();
		for (key, clue) in entries
		{
			match Word::new(&key)
			{
				Ok(word) =>
				{
					clues.insert(word, clue);
				},
				Err(e) => warn!("skipping clue for {:?}: {}", key, e)
			}
		}
		Self { clues }
	}
}

/// The complete enumeration of [`Clues`] loading errors.
#[derive(Debug)]
pub enum CluesError
{
	/// The clue file could not be opened or read.
	Io(io::Error),

	/// The clue file was malformed.
	Json(serde_json::Error)
}

impl Display for CluesError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Io(e) => write!(f, "clue file I/O failed: {}", e),
			Self::Json(e) => write!(f, "invalid clue file: {}", e)
		}
	}
}

impl Error for CluesError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::Io(e) => Some(e),
			Self::Json(e) => Some(e)
		}
	}
}

impl From<io::Error> for CluesError
{
	fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<serde_json::Error> for CluesError
{
	fn from(e: serde_json::Error) -> Self { Self::Json(e) }
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
