//! Extraction engine for daily-puzzle share texts.
//!
//! Turns the messages players paste into a group chat ("Wordle 1,705 4/6",
//! "#travle #647 +0 (Perfect)") into structured `(game, puzzle_number,
//! score)` records, and maps raw scores onto a shared 0-100 scale so results
//! from different games can be compared. Everything in this crate is pure
//! and synchronous; persistence and HTTP live in the server crate.

pub mod dates;
pub mod games;
pub mod parsers;
pub mod scoring;
