//! # Application
//!
//! The application state and logic, including the text-based user interface
//! (TUI) for playing a single puzzle.

use std::{collections::BTreeSet, io, time::Duration};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind};
use fixedstr::str8;
use log::trace;
use ratatui::{
	buffer::Buffer,
	layout::{Constraint, Direction, Layout, Rect},
	style::{Color, Style, Stylize},
	text::{Line, Span},
	widgets::{Block, BorderType, List, Paragraph, Widget, Wrap},
	Frame
};
use tossword::{
	feedback::LetterState,
	session::{Session, SessionState},
	word::{Word, WORD_LENGTH}
};

use crate::tui::Tui;

////////////////////////////////////////////////////////////////////////////////
//                                Application.                                //
////////////////////////////////////////////////////////////////////////////////

/// The application state.
#[must_use]
pub struct App
{
	/// Whether the application is running, and what it is showing.
	state: ExecutionState,

	/// The puzzle session. Must already be started.
	session: Session,

	/// The guess being typed, in upper case.
	input: str8,

	/// The outcome of the most recent submission, if any.
	message: Option<Message>
}

// Public interface.
impl App
{
	/// Create a new application state.
	///
	/// # Arguments
	///
	/// * `session` - The puzzle session, already started.
	///
	/// # Returns
	///
	/// The new application state.
	#[inline]
	pub fn new(session: Session) -> Self
	{
		let state = match session.state()
		{
			SessionState::Won => ExecutionState::Finished,
			_ => ExecutionState::Playing { show_solution: false }
		};
		Self {
			state,
			session,
			input: str8::default(),
			message: None
		}
	}

	/// Run the application. This amounts to:
	///
	/// * Rendering the application frame.
	/// * Processing events.
	///
	/// # Arguments
	///
	/// * `tui` - The text-based user interface (TUI).
	///
	/// # Returns
	///
	/// The accepted guesses, oldest first.
	///
	/// # Errors
	///
	/// Any error that occurs while running the application.
	pub fn run(mut self, tui: &mut Tui) -> io::Result<Vec<Word>>
	{
		while self.is_running()
		{
			tui.draw(|frame| self.render_frame(frame))?;
			self.process_event()?;
		}
		match self.state
		{
			ExecutionState::Exiting { attempts } => Ok(attempts),
			_ => Ok(vec![])
		}
	}

	/// Check if the application is running.
	///
	/// # Returns
	///
	/// `true` if the application is running, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool
	{
		!matches!(self.state, ExecutionState::Exiting { .. })
	}
}

// Private implementation details.
impl App
{
	/// Append a character to the guess, saturating at the word length.
	///
	/// # Arguments
	///
	/// * `c` - The character to append.
	///
	/// # Panics
	///
	/// If the character is not an ASCII letter.
	fn append(&mut self, c: char)
	{
		assert!(c.is_ascii_alphabetic());
		if self.input.len() < WORD_LENGTH
		{
			self.input.push_char(c.to_ascii_uppercase());
		}
	}

	/// Delete the last character of the guess. If the guess is empty, do
	/// nothing.
	fn delete(&mut self)
	{
		self.input.truncate(self.input.len().saturating_sub(1));
	}

	/// Submit the guess. An accepted guess clears the input; a rejected one
	/// is left in place for correction.
	fn submit(&mut self)
	{
		match self.session.submit_guess(self.input.as_str())
		{
			Ok(snapshot) =>
			{
				self.input.clear();
				if snapshot.state == SessionState::Won
				{
					self.message = Some(Message::Info(format!(
						"Solved in {} moves!",
						snapshot.attempts.len()
					)));
					self.state = ExecutionState::Finished;
				}
				else
				{
					self.message = None;
				}
			},
			Err(e) =>
			{
				trace!("rejected: {}", e);
				self.message = Some(Message::Error(e.to_string()));
			}
		}
	}

	/// Show or hide the full solution.
	fn toggle_solution(&mut self)
	{
		if let ExecutionState::Playing { ref mut show_solution } = self.state
		{
			*show_solution = !*show_solution;
		}
	}

	/// Render the application frame.
	///
	/// # Arguments
	///
	/// * `frame` - The target frame.
	fn render_frame(&self, frame: &mut Frame)
	{
		frame.render_widget(self, frame.area());
	}

	/// Render the board: the root word, every accepted guess, the guess in
	/// progress, and the partially revealed mystery word.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `playing` - Whether guesses are still being accepted.
	fn render_board(&self, area: Rect, buf: &mut Buffer, playing: bool)
	{
		let mut block = Block::bordered()
			.border_style(Style::default().fg(Color::White))
			.title_top(Line::from("Tossword").centered())
			.title_top(Line::from("⎋ – exit".yellow().bold()).left_aligned());
		if playing
		{
			block = block
				.title_top(Line::from("↵ – submit".green().bold()).right_aligned())
				.title_bottom(
					Line::from(
						"A-Z - type ⌫ - delete ⇥ - solution".cyan()
					).centered()
				);
		}
		let Some(puzzle) = self.session.puzzle() else {
			block.render(area, buf);
			return
		};
		let hint = self.session.tossable_hint();
		let no_hint = BTreeSet::new();
		let last = self.session.attempts().len();
		let mut lines = vec![Line::default()];
		let root_hint = if last == 0 { &hint } else { &no_hint };
		lines.push(word_line(
			puzzle.root(),
			self.session.feedback(puzzle.root()),
			root_hint
		));
		for (index, attempt) in self.session.attempts().iter().enumerate()
		{
			let attempt_hint =
				if index + 1 == last { &hint } else { &no_hint };
			lines.push(word_line(
				attempt,
				self.session.feedback(attempt),
				attempt_hint
			));
		}
		if playing
		{
			lines.push(input_line(self.input.as_str()));
		}
		lines.push(Line::default());
		lines.push(mystery_line(
			puzzle.mystery(),
			&self.session.revealed_positions(),
			!playing
		));
		Paragraph::new(lines)
			.block(block)
			.centered()
			.render(area, buf);
	}

	/// Render the side panel: the progress, the clue, the most recent message,
	/// and optionally the full solution.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `show_solution` - Whether to show the full solution.
	fn render_panel(&self, area: Rect, buf: &mut Buffer, show_solution: bool)
	{
		let panel = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Length(9), Constraint::Min(0)])
			.split(area);
		let remaining = match self.session.remaining_steps_estimate()
		{
			Some(moves) => moves.to_string(),
			None => "?".to_string()
		};
		let found = self.session.found_letters().iter()
			.map(char::to_string)
			.collect::<Vec<_>>()
			.join(" ");
		let mut lines = vec![
			Line::from(vec![
				"Moves: ".bold(),
				Span::raw(self.session.attempts().len().to_string())
			]),
			Line::from(vec!["Remaining: ".bold(), Span::raw(remaining)]),
			Line::from(vec!["Found: ".bold(), Span::raw(found)])
		];
		if let Some(clue) = self.session.next_clue()
		{
			lines.push(Line::from(vec![
				"Clue: ".bold(),
				Span::raw(format!("\"{}\"", clue)).italic()
			]));
		}
		match &self.message
		{
			Some(Message::Info(text)) =>
				lines.push(Line::from(text.as_str().green().bold())),
			Some(Message::Error(text)) =>
				lines.push(Line::from(text.as_str().red())),
			None => {}
		}
		Paragraph::new(lines)
			.block(
				Block::bordered()
					.border_type(BorderType::Rounded)
					.title_top(Line::from("Status").centered())
			)
			.wrap(Wrap { trim: true })
			.render(panel[0], buf);
		let block = Block::bordered()
			.border_type(BorderType::Rounded)
			.title_top(Line::from("Solution").centered());
		if show_solution
		{
			let ladder = self.session.solution();
			let mut items = Vec::with_capacity(ladder.len());
			if let Some(first) = ladder.first()
			{
				items.push(Line::from(first.to_string()));
			}
			for ((_, to), change) in ladder.steps().zip(ladder.changes())
			{
				items.push(Line::from(vec![
					Span::raw(to.to_string()),
					Span::raw(format!("  {}", change)).cyan()
				]));
			}
			if items.is_empty()
			{
				items.push(Line::from("(unsolvable)".red()));
			}
			List::new(items)
				.block(block)
				.style(Style::default().fg(Color::White))
				.render(panel[1], buf);
		}
		else
		{
			Paragraph::new("⇥ to reveal".dark_gray())
				.block(block)
				.centered()
				.render(panel[1], buf);
		}
	}

	/// Render the complete UI.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `playing` - Whether guesses are still being accepted.
	/// * `show_solution` - Whether to show the full solution.
	fn render_all(
		&self,
		area: Rect,
		buf: &mut Buffer,
		playing: bool,
		show_solution: bool
	) {
		let outer = Layout::default()
			.direction(Direction::Horizontal)
			.margin(1)
			.constraints([Constraint::Percentage(100), Constraint::Min(32)])
			.split(area);
		self.render_board(outer[0], buf, playing);
		self.render_panel(outer[1], buf, show_solution);
	}

	/// Process events. Block for only a quarter second at a time.
	///
	/// # Errors
	///
	/// Any error that occurs while processing events.
	fn process_event(&mut self) -> io::Result<()>
	{
		if poll(Duration::from_millis(250))?
		{
			match read()?
			{
				Event::Key(event) if event.kind == KeyEventKind::Press =>
					self.process_key_event(event),
				_ => {}
			}
		}
		Ok(())
	}

	/// Process a key event.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event(&mut self, event: KeyEvent)
	{
		match self.state
		{
			ExecutionState::Playing { .. } =>
				self.process_key_event_playing(event),
			ExecutionState::Finished =>
				self.process_key_event_finished(event),
			ExecutionState::Exiting { .. } => {}
		}
	}

	/// Process a key event while [playing](ExecutionState::Playing):
	///
	/// * Escape - Exit the application.
	/// * Enter - Submit the guess.
	/// * Tab - Show or hide the full solution.
	/// * Backspace - Delete the last character of the guess.
	/// * A-Z - Append the corresponding character to the guess.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_playing(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.exit(),
			KeyCode::Enter => self.submit(),
			KeyCode::Tab => self.toggle_solution(),
			KeyCode::Backspace => self.delete(),
			KeyCode::Char(c) if c.is_ascii_alphabetic() => self.append(c),
			_ => {}
		}
	}

	/// Process a key event once the puzzle is [solved](ExecutionState::Finished):
	///
	/// * Escape - Exit the application.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_finished(&mut self, event: KeyEvent)
	{
		if let KeyCode::Esc = event.code {
			self.exit()
		}
	}

	/// Mark the application for exit. The application will exit after the next
	/// iteration of the main loop.
	fn exit(&mut self)
	{
		self.state = ExecutionState::Exiting {
			attempts: self.session.attempts().to_vec()
		};
	}
}

impl Widget for &App
{
	fn render(self, area: Rect, buf: &mut Buffer)
	{
		match self.state
		{
			ExecutionState::Playing { show_solution } =>
				self.render_all(area, buf, true, show_solution),
			ExecutionState::Finished => self.render_all(area, buf, false, true),
			ExecutionState::Exiting { .. } => {}
		}
	}
}

/// The execution state of the application.
#[derive(Clone, Debug)]
enum ExecutionState
{
	/// The player is entering guesses.
	Playing {
		/// Whether the full solution is shown.
		show_solution: bool
	},

	/// The puzzle is solved, and the player is admiring the result.
	Finished,

	/// The application is exiting.
	Exiting {
		/// The accepted guesses, oldest first.
		attempts: Vec<Word>
	}
}

/// The outcome of a submission, as shown in the side panel.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Message
{
	/// Good news.
	Info(String),

	/// A rejected guess.
	Error(String)
}

////////////////////////////////////////////////////////////////////////////////
//                                  Widgets.                                  //
////////////////////////////////////////////////////////////////////////////////

/// Render a word as a row of letter tiles, colored by feedback, with the
/// hinted positions marked for tossing.
///
/// # Arguments
///
/// * `word` - The word.
/// * `states` - The feedback for each letter, if known.
/// * `hint` - The positions to mark as tossable.
///
/// # Returns
///
/// The rendered row.
fn word_line(
	word: &Word,
	states: Option<[LetterState; WORD_LENGTH]>,
	hint: &BTreeSet<usize>
) -> Line<'static>
{
	let tiles = (0 .. WORD_LENGTH)
		.map(|index| {
			let style = match states.map(|states| states[index])
			{
				Some(LetterState::Correct) =>
					Style::default().fg(Color::Black).bg(Color::Green),
				Some(LetterState::Present) =>
					Style::default().fg(Color::Black).bg(Color::Yellow),
				_ => Style::default().fg(Color::White).bg(Color::DarkGray)
			};
			let style =
				if hint.contains(&index) { style.bg(Color::Red).bold() }
				else { style };
			Span::styled(format!(" {} ", word.letter(index)), style)
		})
		.collect::<Vec<_>>();
	Line::from(tiles)
}

/// Render the guess in progress, padding the empty positions.
///
/// # Arguments
///
/// * `input` - The guess typed so far.
///
/// # Returns
///
/// The rendered row.
fn input_line(input: &str) -> Line<'static>
{
	let mut letters = input.chars();
	let tiles = (0 .. WORD_LENGTH)
		.map(|_| {
			let letter = letters.next().unwrap_or('_');
			Span::styled(
				format!(" {} ", letter),
				Style::default().fg(Color::Black).bg(Color::Cyan)
			)
		})
		.collect::<Vec<_>>();
	Line::from(tiles)
}

/// Render the mystery word, revealing only the given positions unless the
/// whole word should be revealed.
///
/// # Arguments
///
/// * `mystery` - The mystery word.
/// * `revealed` - The positions to reveal.
/// * `all` - Whether to reveal every position.
///
/// # Returns
///
/// The rendered row.
fn mystery_line(mystery: &Word, revealed: &BTreeSet<usize>, all: bool)
	-> Line<'static>
{
	let tiles = (0 .. WORD_LENGTH)
		.map(|index| {
			if all || revealed.contains(&index)
			{
				Span::styled(
					format!(" {} ", mystery.letter(index)),
					Style::default().fg(Color::Black).bg(Color::Green)
				)
			}
			else
			{
				Span::styled(
					" ? ",
					Style::default().fg(Color::White).bg(Color::Blue)
				)
			}
		})
		.collect::<Vec<_>>();
	Line::from(tiles)
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
