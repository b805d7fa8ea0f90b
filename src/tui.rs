//! # Text-based user interface (TUI)
//!
//! Terminal setup and teardown for the game board. The terminal must be
//! returned to cooked mode on the main screen however the board exits,
//! including by panic.

use std::{
	io::{self, stdout, Stdout},
	panic,
	sync::{Arc, Mutex, PoisonError},
	thread
};

use crossterm::{
	execute,
	terminal::{
		disable_raw_mode, enable_raw_mode,
		EnterAlternateScreen, LeaveAlternateScreen
	}
};
use log::trace;
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};

////////////////////////////////////////////////////////////////////////////////
//                         Text-based user interface.                         //
////////////////////////////////////////////////////////////////////////////////

/// The text-based user interface (TUI) type.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run `f` against a freshly initialized terminal, then restore the terminal.
/// While `f` runs, a panic on the calling thread also restores the terminal
/// before the previous panic hook reports it; panics on other threads are
/// reported unchanged.
///
/// # Arguments
///
/// * `f` - The function to apply to the TUI.
///
/// # Returns
///
/// The result of applying `f` to the TUI.
///
/// # Errors
///
/// Any error that occurs while initializing, driving, or restoring the TUI.
pub fn tui<F, T>(f: F) -> io::Result<T>
	where F: FnOnce(&mut Tui) -> io::Result<T>
{
	let previous = Arc::new(Mutex::new(Some(panic::take_hook())));
	let hook = Arc::clone(&previous);
	let owner = thread::current().id();
	panic::set_hook(Box::new(move |info| {
		if thread::current().id() == owner
		{
			// Already panicking, so a failure to restore is moot.
			let _ = tui_restore();
		}
		// The previous hook stays installed in the cell, since it may be
		// invoked again by a panic on another thread.
		let guard = hook.lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(previous) = guard.as_ref()
		{
			previous(info);
		}
	}));
	trace!("entering the alternate screen");
	// Initialization may fail partway, so restore unconditionally.
	let result = tui_init().and_then(|mut terminal| f(&mut terminal));
	let restored = previous.lock()
		.unwrap_or_else(PoisonError::into_inner)
		.take();
	if let Some(previous) = restored
	{
		panic::set_hook(previous);
	}
	trace!("leaving the alternate screen");
	tui_restore()?;
	result
}

/// Switch to the alternate screen in raw mode.
///
/// # Returns
///
/// The initialized TUI.
///
/// # Errors
///
/// Any error that occurs while initializing the TUI.
fn tui_init() -> io::Result<Tui>
{
	let mut stdout = stdout();
	execute!(stdout, EnterAlternateScreen)?;
	enable_raw_mode()?;
	Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave the alternate screen and raw mode, and show the cursor again.
///
/// # Errors
///
/// Any error that occurs while restoring the terminal.
fn tui_restore() -> io::Result<()>
{
	let mut stdout = stdout();
	execute!(stdout, LeaveAlternateScreen)?;
	disable_raw_mode()?;
	CrosstermBackend::new(stdout).show_cursor()
}
