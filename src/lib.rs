//! # Tossword
//!
//! Tossword is a word-ladder puzzle. The player transforms a five-letter root
//! word into a five-letter mystery word, one move at a time. Each move tosses
//! exactly one letter of the previous word and adds exactly one letter; the
//! remaining letters may be rearranged freely. Every intermediate word must be
//! a dictionary word.
//!
//! This crate is the puzzle engine: the [dictionary](dictionary), the
//! [move rule](adjacency), the [shortest-path solver](solver) and its
//! [caches](cache), the [hint engine](hint), and the [session](session) state
//! machine that validates guesses. Around the engine are the [puzzle
//! catalog](puzzle), [clues](clues), and [letter feedback](feedback) used by
//! the terminal front end.

pub mod adjacency;
pub mod cache;
pub mod clues;
pub mod dictionary;
pub mod feedback;
pub mod hint;
pub mod ladder;
pub mod puzzle;
pub mod session;
pub mod solver;
pub mod word;
