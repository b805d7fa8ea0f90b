//! # Tossword
//!
//! Tossword is a word-ladder puzzle: transform the root word into the mystery
//! word by tossing one letter and adding another at each move, rearranging
//! the rest as needed, and passing only through dictionary words.
//!
//! This program hosts the puzzle engine. Via command line options, the user
//! chooses the dictionary and the search bound. Then the user can solve
//! arbitrary ladders, explore the neighbors of a word, audit a puzzle catalog
//! for solvability, or play a puzzle in a text-based user interface (TUI).

mod app;
mod tui;

use std::{process, sync::Arc};

use clap::{Parser, Subcommand};
use log::{debug, trace};

use app::App;
use tossword::{
	clues::Clues,
	dictionary::Dictionary,
	puzzle::{audit, Catalog, Difficulty, Puzzle},
	session::Session,
	solver::{Solver, DEFAULT_MAX_DEPTH},
	word::Word
};
use tui::tui;

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for solving and playing Tossword puzzles.
#[derive(Clone, Debug, Parser)]
#[command(version = "1.0", author = "Todd L Smith")]
struct Opts
{
	/// The path to the directory containing the dictionary files.
	#[arg(short = 'd', long, default_value = "dict")]
	directory: String,

	/// The name of the dictionary. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "tossword")]
	dictionary: String,

	/// The maximum number of moves that each side of the bidirectional search
	/// may explore.
	#[arg(short = 'm', long, default_value_t = DEFAULT_MAX_DEPTH)]
	max_depth: usize,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just generate the binary dictionary and exit.
	Generate,

	/// Print a shortest ladder between two words.
	Solve {
		/// The start word.
		start: String,

		/// The target word.
		target: String
	},

	/// Print the dictionary words one move away from a word.
	Neighbors {
		/// The word.
		word: String
	},

	/// Verify that every puzzle of a catalog can be solved, printing an
	/// optimal ladder for each.
	Audit {
		/// The catalog file, a JSON array of puzzles. The bundled catalog is
		/// used if omitted.
		#[arg(short = 'c', long)]
		catalog: Option<String>,

		/// Audit only the puzzles of this difficulty (easy or hard).
		#[arg(short = 'l', long)]
		difficulty: Option<Difficulty>
	},

	/// Open the text-based user interface (TUI) for playing a puzzle. The
	/// accepted guesses will be written to standard output.
	Play {
		/// The root word. Requires a mystery word.
		#[arg(short = 'r', long, requires = "mystery", conflicts_with = "puzzle")]
		root: Option<String>,

		/// The mystery word. Requires a root word.
		#[arg(short = 'y', long, requires = "root", conflicts_with = "puzzle")]
		mystery: Option<String>,

		/// The number of the bundled puzzle to play, starting from 1.
		#[arg(short = 'p', long)]
		puzzle: Option<usize>,

		/// Withhold hints and clues.
		#[arg(long)]
		hard: bool,

		/// The clue file, a JSON object mapping words to clues. The bundled
		/// clues are used if omitted.
		#[arg(short = 'c', long)]
		clues: Option<String>,

		/// Suppress emission of the guesses to standard output.
		#[arg(short = 'q', long)]
		quiet: bool
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
fn main()
{
	env_logger::init();

	// Parse the command line options.
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	// Open the dictionary, creating the binary dictionary if necessary.
	let dictionary = Dictionary::open(&opts.directory, &opts.dictionary)
		.unwrap_or_else(|e|
			panic!("Failed to open dictionary: {}/{}.dict or {0}/{1}.txt: {}",
				opts.directory,
				opts.dictionary,
				e
			)
		);
	let dictionary = Arc::new(dictionary);
	let solver = Solver::new(Arc::clone(&dictionary))
		.with_max_depth(opts.max_depth);

	// Execute the appropriate subcommand.
	match opts.command
	{
		Command::Generate =>
		{
			trace!("Exiting after generating binary dictionary");
		},
		Command::Solve { start, target } =>
			print_ladder(&solver, &parse_word(&start), &parse_word(&target)),
		Command::Neighbors { word } =>
		{
			for neighbor in solver.oracle().neighbors(&parse_word(&word))
			{
				println!("{}", neighbor);
			}
		},
		Command::Audit { catalog, difficulty } =>
		{
			let catalog = match catalog
			{
				Some(path) => Catalog::read_from_file(&path, &dictionary)
					.unwrap_or_else(|e|
						panic!("Failed to read catalog: {}: {}", path, e)
					),
				None => Catalog::builtin(&dictionary)
			};
			let catalog = match difficulty
			{
				Some(difficulty) => catalog.filter(difficulty),
				None => catalog
			};
			if !print_audit(&solver, &catalog)
			{
				process::exit(1);
			}
		},
		Command::Play { root, mystery, puzzle, hard, clues, quiet } =>
		{
			let puzzle = choose_puzzle(&dictionary, root, mystery, puzzle);
			let clues = match clues
			{
				Some(path) => Clues::read_from_file(&path)
					.unwrap_or_else(|e|
						panic!("Failed to read clues: {}: {}", path, e)
					),
				None => Clues::embedded()
			};
			let mut session = Session::new(solver)
				.with_hard_mode(hard)
				.with_clues(clues);
			session.start(puzzle);
			trace!("Opening TUI");
			let attempts = tui(|terminal| App::new(session).run(terminal))
				.unwrap_or_else(|e| panic!("Failed to drive TUI: {}", e));
			if !quiet
			{
				print_attempts(&puzzle, attempts);
			}
		}
	}
}

/// Parse a word supplied on the command line.
///
/// # Arguments
///
/// * `text` - The text of the word.
///
/// # Returns
///
/// The word.
///
/// # Panics
///
/// If the text is not a valid word.
fn parse_word(text: &str) -> Word
{
	Word::new(text)
		.unwrap_or_else(|e| panic!("Invalid word: {}: {}", text, e))
}

/// Choose the puzzle to play: the explicit root and mystery words, if given;
/// otherwise the requested bundled puzzle; otherwise the first bundled
/// puzzle.
///
/// # Arguments
///
/// * `dictionary` - The dictionary.
/// * `root` - The root word, if given.
/// * `mystery` - The mystery word, if given.
/// * `number` - The number of the bundled puzzle, starting from 1, if given.
///
/// # Returns
///
/// The puzzle.
///
/// # Panics
///
/// If the chosen puzzle does not exist or is invalid.
fn choose_puzzle(
	dictionary: &Dictionary,
	root: Option<String>,
	mystery: Option<String>,
	number: Option<usize>
) -> Puzzle
{
	if let (Some(root), Some(mystery)) = (root, mystery)
	{
		return Puzzle::new(dictionary, &root, &mystery)
			.unwrap_or_else(|e| panic!("Invalid puzzle: {}", e))
	}
	let catalog = Catalog::builtin(dictionary);
	let number = number.unwrap_or(1);
	number.checked_sub(1)
		.and_then(|index| catalog.get(index))
		.copied()
		.unwrap_or_else(||
			panic!("No such puzzle: {} (1 to {})", number, catalog.len())
		)
}

/// Print a shortest ladder between two words, one word per line, annotating
/// each move with the letters tossed and added.
///
/// # Arguments
///
/// * `solver` - The solver.
/// * `start` - The start word.
/// * `target` - The target word.
fn print_ladder(solver: &Solver, start: &Word, target: &Word)
{
	let ladder = solver.solve(start, target);
	let Some(first) = ladder.first() else {
		println!(
			"No ladder from {} to {} within {} moves per side",
			start,
			target,
			solver.max_depth()
		);
		return
	};
	println!("{}", first);
	for ((_, to), change) in ladder.steps().zip(ladder.changes())
	{
		println!("{}  {}", to, change);
	}
	if let Some(moves) = ladder.moves()
	{
		println!("{} moves", moves);
	}
}

/// Audit every puzzle of the catalog, printing one line per puzzle.
///
/// # Arguments
///
/// * `solver` - The solver.
/// * `catalog` - The catalog.
///
/// # Returns
///
/// `true` if every puzzle is solvable, `false` otherwise.
fn print_audit(solver: &Solver, catalog: &Catalog) -> bool
{
	let reports = audit(solver, catalog.puzzles());
	for report in &reports
	{
		println!("{}", report);
	}
	let unsolvable = reports.iter().filter(|r| !r.is_solvable()).count();
	println!("{} puzzles, {} unsolvable", reports.len(), unsolvable);
	unsolvable == 0
}

/// Print the accepted guesses to standard output, preceded by the root word.
///
/// # Arguments
///
/// * `puzzle` - The puzzle that was played.
/// * `attempts` - The accepted guesses, oldest first.
fn print_attempts(puzzle: &Puzzle, attempts: Vec<Word>)
{
	println!("{}", puzzle.root());
	for word in attempts
	{
		println!("{}", word);
	}
}
