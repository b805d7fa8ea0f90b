//! # Dictionary
//!
//! Herein is support for dictionary construction and loading. All runtime
//! operations are performed against a [`Dictionary`], which is an immutable
//! set of five-letter [words](Word) together with an index of its anagram
//! classes. The anagram index is what makes neighbor enumeration cheap: the
//! words one move away from a given word are exactly the members of a small
//! number of anagram classes.

use std::{
	error::Error,
	fmt::{self, Display, Formatter},
	fs::File,
	io::{self, BufRead, BufReader, Read, Write},
	path::Path
};

use log::{trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::word::{AnagramKey, Word};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// The bundled word list.
const EMBEDDED_WORDS: &str = include_str!("../dict/tossword.txt");

/// A dictionary is a set of unique [words](Word). Iteration order is sorted,
/// and therefore reproducible. Only the word list is serialized; the lookup
/// indices are rebuilt on deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Word>", into = "Vec<Word>")]
#[must_use]
pub struct Dictionary
{
	/// The words, sorted and deduplicated.
	words: Vec<Word>,

	/// The words, for constant-time membership tests.
	index: FxHashSet<Word>,

	/// The anagram classes, keyed by sorted letters. Each class is sorted.
	anagrams: FxHashMap<AnagramKey, Vec<Word>>
}

impl Dictionary
{
	/// Construct an empty dictionary. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Construct a dictionary from the given words. Duplicates are discarded.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the dictionary.
	pub fn from_words<I: IntoIterator<Item = Word>>(words: I) -> Self
	{
		let mut dictionary = Self::new();
		dictionary.extend(words);
		dictionary
	}

	/// Construct a dictionary from the bundled word list.
	pub fn embedded() -> Self { Self::from_text(EMBEDDED_WORDS) }

	/// Check if the dictionary is empty.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.words.is_empty() }

	/// Answer the number of words in the dictionary.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.words.len() }

	/// Check if the dictionary contains the given word.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the dictionary contains the word, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn contains(&self, word: &Word) -> bool { self.index.contains(word) }

	/// Check if the dictionary contains the given text, case-insensitively.
	/// Text that is not a well-formed [word](Word) is never contained.
	#[inline]
	#[must_use]
	pub fn contains_str(&self, text: &str) -> bool
	{
		Word::new(text).map(|word| self.contains(&word)).unwrap_or(false)
	}

	/// Get an iterator over the words, in sorted order.
	#[inline]
	pub fn iter(&self) -> impl Iterator<Item = &Word> + '_ { self.words.iter() }

	/// Get all words, in sorted order.
	#[inline]
	#[must_use]
	pub fn all(&self) -> &[Word] { &self.words }

	/// Get the anagram class with the given key. The class is sorted, and
	/// empty if no word of the dictionary has that letter multiset.
	#[inline]
	#[must_use]
	pub fn anagrams(&self, key: &AnagramKey) -> &[Word]
	{
		self.anagrams.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Populate the dictionary with the given words. Entries that are not
	/// well-formed five-letter words are skipped.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the dictionary.
	pub fn populate<T: AsRef<str>>(&mut self, words: &[T])
	{
		let words = words.iter()
			.filter_map(|text| {
				let text = text.as_ref().trim();
				Word::new(text)
					.map_err(|e| warn!("Skipping {:?}: {}", text, e))
					.ok()
			})
			.collect::<Vec<_>>();
		self.extend(words);
	}

	/// Parse a dictionary from text containing one word per line. Blank lines
	/// and lines starting with `#` are ignored; malformed lines are skipped.
	///
	/// # Arguments
	///
	/// * `text` - The word list.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the text.
	pub fn from_text(text: &str) -> Self
	{
		let lines = text.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty() && !line.starts_with('#'))
			.collect::<Vec<_>>();
		let mut dictionary = Self::new();
		dictionary.populate(&lines);
		dictionary
	}

	/// Open a dictionary with the given name. Only the specified directory will
	/// be searched. `name` denotes the dictionary file, sans the extension. If
	/// a binary dictionary (`<name>.dict`) exists _and_ is newer than the text
	/// file (`<name>.txt`), it will be read; otherwise, a text file will be
	/// read and a binary dictionary will be created (to optimize future reads).
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the dictionary file.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, [`DictionaryError::Io`].
	/// * If the binary file contains invalid data,
	///   [`DictionaryError::InvalidData`].
	/// * If no words could be loaded, [`DictionaryError::Empty`].
	pub fn open<T: AsRef<Path>>(
		dir: T,
		name: &str
	) -> Result<Self, DictionaryError>
	{
		let dict_path = dir.as_ref().join(format!("{}.dict", name));
		let txt_path = dir.as_ref().join(format!("{}.txt", name));
		// Use the binary dictionary only if it's newer than the text
		// dictionary. Any I/O error along the way means falling back to the
		// text file; the `metadata` call fails if the binary file is absent.
		let binary_is_fresh = dict_path
			.metadata()
			.and_then(|m| m.modified())
			.and_then(|dict_time| {
				txt_path
					.metadata()
					.and_then(|n| n.modified())
					.map(|txt_time| dict_time > txt_time)
			})
			.unwrap_or(false);
		let dictionary = if binary_is_fresh
		{
			let dictionary = Self::deserialize_from_file(&dict_path)?;
			trace!("Read binary dictionary: {}", dict_path.display());
			dictionary
		}
		else
		{
			let dictionary = Self::read_from_file(&txt_path)?;
			trace!("Read text dictionary: {}", txt_path.display());
			match dictionary.serialize_to_file(&dict_path)
			{
				Ok(_) =>
				{
					trace!("Wrote binary dictionary: {}", dict_path.display())
				},
				Err(e) => warn!(
					"Failed to write binary dictionary: {}: {}",
					dict_path.display(),
					e
				)
			}
			dictionary
		};
		dictionary.non_empty()
	}

	/// Construct a dictionary from the contents of the given file. Each line
	/// in the file is considered a single word.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, [`DictionaryError::Io`].
	/// * If the file yields no words, [`DictionaryError::Empty`].
	pub fn read_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, DictionaryError>
	{
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let mut lines = Vec::new();
		for line in reader.lines()
		{
			let line = line?;
			let line = line.trim();
			if !line.is_empty() && !line.starts_with('#')
			{
				lines.push(line.to_string());
			}
		}
		let mut dictionary = Self::new();
		dictionary.populate(&lines);
		dictionary.non_empty()
	}

	/// Construct a dictionary from a file containing a JSON array of words.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A dictionary containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, [`DictionaryError::Io`].
	/// * If the file is not a JSON array of strings, [`DictionaryError::Json`].
	/// * If the file yields no words, [`DictionaryError::Empty`].
	pub fn read_from_json<T: AsRef<Path>>(
		path: T
	) -> Result<Self, DictionaryError>
	{
		let file = File::open(path)?;
		let words: Vec<String> = serde_json::from_reader(BufReader::new(file))?;
		let mut dictionary = Self::new();
		dictionary.populate(&words);
		dictionary.non_empty()
	}

	/// Deserialize a dictionary from the given file. The file must contain a
	/// serialized dictionary in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A dictionary deserialized from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, [`DictionaryError::Io`].
	/// * If the file contains invalid data, [`DictionaryError::InvalidData`].
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, DictionaryError>
	{
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;
		let dictionary = bincode::deserialize(&content)
			.map_err(|e| DictionaryError::InvalidData(e.to_string()))?;
		Ok(dictionary)
	}

	/// Serialize the dictionary to the given file. The dictionary is serialized
	/// in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or written, [`DictionaryError::Io`].
	/// * If serialization fails, [`DictionaryError::InvalidData`].
	pub fn serialize_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), DictionaryError>
	{
		let mut file = File::create(path)?;
		let content = bincode::serialize(self)
			.map_err(|e| DictionaryError::InvalidData(e.to_string()))?;
		file.write_all(&content)?;
		Ok(())
	}

	/// Add the given words, then rebuild the sorted word list and the
	/// anagram index.
	fn extend<I: IntoIterator<Item = Word>>(&mut self, words: I)
	{
		let before = self.index.len();
		self.index.extend(words);
		if self.index.len() == before
		{
			return
		}
		self.words = self.index.iter().copied().collect();
		self.words.sort_unstable();
		self.anagrams.clear();
		// The words are sorted, so every class is built in sorted order.
		for word in &self.words
		{
			self.anagrams.entry(word.anagram_key()).or_default().push(*word);
		}
	}

	/// Reject an empty dictionary. No puzzle can be played without words.
	fn non_empty(self) -> Result<Self, DictionaryError>
	{
		if self.is_empty() { Err(DictionaryError::Empty) }
		else { Ok(self) }
	}
}

impl From<Vec<Word>> for Dictionary
{
	fn from(words: Vec<Word>) -> Self { Self::from_words(words) }
}

impl From<Dictionary> for Vec<Word>
{
	fn from(dictionary: Dictionary) -> Self { dictionary.words }
}

/// The complete enumeration of [`Dictionary`] loading errors. Any of them is
/// fatal to an application, since no puzzle can be played without a
/// dictionary.
#[derive(Debug)]
pub enum DictionaryError
{
	/// The word list could not be opened, read, or written.
	Io(io::Error),

	/// The binary dictionary could not be encoded or decoded.
	InvalidData(String),

	/// The JSON word list was malformed.
	Json(serde_json::Error),

	/// The word list contained no valid words.
	Empty
}

impl Display for DictionaryError
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Io(e) => write!(f, "dictionary I/O failed: {}", e),
			Self::InvalidData(e) => write!(f, "invalid binary dictionary: {}", e),
			Self::Json(e) => write!(f, "invalid JSON word list: {}", e),
			Self::Empty => write!(f, "dictionary contains no valid words")
		}
	}
}

impl Error for DictionaryError
{
	fn source(&self) -> Option<&(dyn Error + 'static)>
	{
		match self
		{
			Self::Io(e) => Some(e),
			Self::Json(e) => Some(e),
			_ => None
		}
	}
}

impl From<io::Error> for DictionaryError
{
	fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<serde_json::Error> for DictionaryError
{
	fn from(e: serde_json::Error) -> Self { Self::Json(e) }
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::{fs, io::Write};

	use crate::{
		dictionary::{Dictionary, DictionaryError},
		word::Word
	};
	use tempfile::{NamedTempFile, TempDir};

	/// The path to the dictionary file.
	#[inline]
	#[must_use]
	const fn test_path() -> &'static str { "dict/tossword.txt" }

	/// Test basic functionality of [`Dictionary`]:
	///
	/// * [`Dictionary::new`]
	/// * [`Dictionary::is_empty`]
	/// * [`Dictionary::populate`]
	/// * [`Dictionary::contains`]
	/// * [`Dictionary::contains_str`]
	#[test]
	fn test_populate()
	{
		let mut dictionary = Dictionary::new();
		assert!(dictionary.is_empty());
		assert!(!dictionary.contains_str("storm"));
		dictionary.populate(&["storm", "STORE", "Storm", "tooLong", "b4dly"]);
		assert_eq!(dictionary.len(), 2);
		assert!(dictionary.contains(&Word::new("STORM").unwrap()));
		assert!(dictionary.contains_str("store"));
		assert!(dictionary.contains_str("StOrE"));
		assert!(!dictionary.contains_str("stare"));
		assert!(!dictionary.contains_str("tooLong"));
	}

	/// Ensure that iteration is sorted and that anagram classes are indexed.
	#[test]
	fn test_iteration_and_anagrams()
	{
		let dictionary = Dictionary::from_words(
			["tears", "stare", "rates", "cumin", "stare"].iter()
				.map(|w| Word::new(w).unwrap())
		);
		let words = dictionary.iter().map(Word::to_string).collect::<Vec<_>>();
		assert_eq!(words, vec!["CUMIN", "RATES", "STARE", "TEARS"]);
		let key = Word::new("aster").unwrap().anagram_key();
		let class = dictionary.anagrams(&key).iter()
			.map(Word::to_string)
			.collect::<Vec<_>>();
		assert_eq!(class, vec!["RATES", "STARE", "TEARS"]);
		let missing = Word::new("light").unwrap().anagram_key();
		assert!(dictionary.anagrams(&missing).is_empty());
	}

	/// Test reading a dictionary from a file:
	///
	/// * [`Dictionary::read_from_file`]
	#[test]
	fn test_read_from_file()
	{
		let dictionary = Dictionary::read_from_file(test_path()).unwrap();
		assert!(!dictionary.is_empty());
		// These words had better be in the dictionary…
		assert!(dictionary.contains_str("ocean"));
		assert!(dictionary.contains_str("field"));
		assert!(dictionary.contains_str("cumin"));
		assert!(dictionary.contains_str("depth"));
		assert_eq!(dictionary, Dictionary::embedded());
	}

	/// Ensure that comments and blank lines are ignored and that an empty
	/// word list is fatal.
	#[test]
	fn test_read_from_file_edge_cases()
	{
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "# comment\n\n  ocean  \nfield\nnope").unwrap();
		let dictionary = Dictionary::read_from_file(file.path()).unwrap();
		assert_eq!(dictionary.len(), 2);

		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "# nothing here\n\n").unwrap();
		assert!(matches!(
			Dictionary::read_from_file(file.path()),
			Err(DictionaryError::Empty)
		));

		assert!(matches!(
			Dictionary::read_from_file("dict/does-not-exist.txt"),
			Err(DictionaryError::Io(_))
		));
	}

	/// Test reading a dictionary from a JSON array:
	///
	/// * [`Dictionary::read_from_json`]
	#[test]
	fn test_read_from_json()
	{
		let mut file = NamedTempFile::new().unwrap();
		write!(file, r#"["storm", "STORE", "store"]"#).unwrap();
		let dictionary = Dictionary::read_from_json(file.path()).unwrap();
		assert_eq!(dictionary.len(), 2);

		let mut file = NamedTempFile::new().unwrap();
		write!(file, r#"{{"storm": 1}}"#).unwrap();
		assert!(matches!(
			Dictionary::read_from_json(file.path()),
			Err(DictionaryError::Json(_))
		));
	}

	/// Test serializing and deserializing a dictionary:
	///
	/// * [`Dictionary::serialize_to_file`]
	/// * [`Dictionary::deserialize_from_file`]
	#[test]
	fn test_serialize_to_file()
	{
		let dictionary = Dictionary::read_from_file(test_path()).unwrap();
		let file = NamedTempFile::new().unwrap();
		dictionary.serialize_to_file(file.path()).unwrap();
		let deserialized =
			Dictionary::deserialize_from_file(file.path()).unwrap();
		assert_eq!(dictionary, deserialized);
		// The anagram index must be rebuilt, not merely the word list.
		let key = Word::new("ocean").unwrap().anagram_key();
		assert_eq!(
			dictionary.anagrams(&key),
			deserialized.anagrams(&key)
		);
	}

	/// Test opening a dictionary, which writes the binary cache on first use
	/// and reads it thereafter:
	///
	/// * [`Dictionary::open`]
	#[test]
	fn test_open()
	{
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("mini.txt"), "ocean\nalone\nfield\n").unwrap();
		let first = Dictionary::open(dir.path(), "mini").unwrap();
		assert!(dir.path().join("mini.dict").exists());
		let second = Dictionary::open(dir.path(), "mini").unwrap();
		assert_eq!(first, second);
		assert_eq!(second.len(), 3);

		fs::write(dir.path().join("void.txt"), "\n").unwrap();
		assert!(matches!(
			Dictionary::open(dir.path(), "void"),
			Err(DictionaryError::Empty)
		));
		assert!(matches!(
			Dictionary::open(dir.path(), "absent"),
			Err(DictionaryError::Io(_))
		));
	}
}
