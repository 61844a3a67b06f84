//! Share-text parsers: one lightweight regex-based parser per game, plus
//! the dispatcher that fans a pasted message out to all of them.
//!
//! Every parser is a pure `fn(&str) -> Option<ParsedScore>`. It anchors on
//! its game's share header, reads the score from the window between the
//! header and the next blank line, and returns `None` for anything it does
//! not recognize. Malformed input is never an error, just a non-match.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::games::Game;

/// One recognized game result extracted from a share text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedScore {
    pub game: Game,
    /// The publisher's daily puzzle index; empty for games that don't share one.
    pub puzzle_number: String,
    /// Raw score in the game's own units (guesses, mistakes, points).
    pub score: i64,
}

type ParserFn = fn(&str) -> Option<ParsedScore>;

/// Ordered parser registry. Registration order is also the output order of
/// [`parse_all`] when a single text contains several games.
pub const PARSERS: &[(Game, ParserFn)] = &[
    (Game::Travle, parse_travle),
    (Game::Connections, parse_connections),
    (Game::Wordle, parse_wordle),
    (Game::GuessTheMovie, parse_guess_the_movie),
    (Game::GuessTheGame, parse_guess_the_game),
    (Game::FoodGuessr, parse_foodguessr),
    (Game::TimeGuessr, parse_timeguessr),
];

/// Run every registered parser over `text` and collect the matches, in
/// registry order. A panicking parser is logged and treated as a non-match
/// so one bad pattern cannot take down a whole submission.
pub fn parse_all(text: &str) -> Vec<ParsedScore> {
    let mut results = Vec::new();
    for (game, parser) in PARSERS {
        match catch_unwind(AssertUnwindSafe(|| parser(text))) {
            Ok(Some(parsed)) => results.push(parsed),
            Ok(None) => {}
            Err(_) => tracing::warn!("{} parser panicked on submitted text", game.name()),
        }
    }
    results
}

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Scan window for one game's block: the text after `start`, cut at the
/// first blank line so a parser never reads into the next game's share.
fn window_after(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    match BLANK_LINE_RE.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    }
}

/// Parse an integer that may carry comma or space thousands separators,
/// e.g. "11,000", "11 000" or "1 705".
fn parse_separated_int(raw: &str) -> Option<i64> {
    let digits: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    digits.parse().ok()
}

// ---------------------------------------------------------------------------
// Travle
// ---------------------------------------------------------------------------

static TRAVLE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#travle\s+#(\d+)").unwrap());
static TRAVLE_PERFECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s+\+?\d*\s*\(Perfect\)").unwrap());
static TRAVLE_SCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+([+-]?\d+)").unwrap());

/// Travle shares "#travle #647 +2" where the signed number counts extra
/// guesses. A "(Perfect)" marker wins over any numeric token and scores -1,
/// one step better than "+0".
pub fn parse_travle(text: &str) -> Option<ParsedScore> {
    let caps = TRAVLE_HEADER_RE.captures(text)?;
    let window = window_after(text, caps.get(0)?.end());

    let score = if TRAVLE_PERFECT_RE.is_match(window) {
        -1
    } else {
        TRAVLE_SCORE_RE.captures(window)?[1].parse().ok()?
    };

    Some(ParsedScore {
        game: Game::Travle,
        puzzle_number: caps[1].to_string(),
        score,
    })
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

static CONNECTIONS_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Connections\s+Puzzle\s+#(\d+)").unwrap());

const CONNECTIONS_PALETTE: [char; 4] = ['🟪', '🟩', '🟨', '🟦'];
/// A clean solve is 4 rows; anything past 7 rows is a corrupt grid and
/// scores the maximum 4 mistakes.
const CONNECTIONS_MAX_ROWS: usize = 7;

/// Connections shares a grid of colored rows; each row of four mixed colors
/// is one mistake. No grid after the header means no match.
pub fn parse_connections(text: &str) -> Option<ParsedScore> {
    let caps = CONNECTIONS_HEADER_RE.captures(text)?;
    let window = window_after(text, caps.get(0)?.end());

    let squares: Vec<char> = window
        .chars()
        .filter(|c| CONNECTIONS_PALETTE.contains(c))
        .collect();
    if squares.is_empty() {
        return None;
    }

    let rows: Vec<&[char]> = squares.chunks(4).collect();
    let mut mistakes = rows
        .iter()
        .filter(|row| row.len() == 4 && row.iter().any(|c| *c != row[0]))
        .count() as i64;
    if rows.len() > CONNECTIONS_MAX_ROWS {
        mistakes = 4;
    }

    Some(ParsedScore {
        game: Game::Connections,
        puzzle_number: caps[1].to_string(),
        score: mistakes,
    })
}

// ---------------------------------------------------------------------------
// Wordle
// ---------------------------------------------------------------------------

static WORDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Wordle\s+([\d\s,]+?)\s+([X\d])/6").unwrap());

/// Wordle shares "Wordle 1,705 4/6"; "X/6" is a failed puzzle and scores 7.
/// The puzzle index keeps whatever thousands separators stripped out.
pub fn parse_wordle(text: &str) -> Option<ParsedScore> {
    let caps = WORDLE_RE.captures(text)?;

    let puzzle_number: String = caps[1]
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    let slot = &caps[2];
    let score = if slot.eq_ignore_ascii_case("X") {
        7
    } else {
        slot.parse().ok()?
    };

    Some(ParsedScore {
        game: Game::Wordle,
        puzzle_number,
        score,
    })
}

// ---------------------------------------------------------------------------
// GuessTheMovie / GuessTheGame
// ---------------------------------------------------------------------------

static GUESS_THE_MOVIE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#GuessTheMovie\s+#(\d+)").unwrap());
static GUESS_THE_GAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#GuessTheGame\s+#(\d+)").unwrap());

/// Both guess-the-frame games share a row of red/green squares. The score is
/// the 1-based position of the first green among the game's palette, or 7
/// when every guess failed (including shares with no squares at all).
fn first_green_position(window: &str, palette: &[char]) -> i64 {
    let squares: Vec<char> = window.chars().filter(|c| palette.contains(c)).collect();
    match squares.iter().position(|c| *c == '🟩') {
        Some(idx) => idx as i64 + 1,
        None => 7,
    }
}

pub fn parse_guess_the_movie(text: &str) -> Option<ParsedScore> {
    let caps = GUESS_THE_MOVIE_RE.captures(text)?;
    let window = window_after(text, caps.get(0)?.end());

    Some(ParsedScore {
        game: Game::GuessTheMovie,
        puzzle_number: caps[1].to_string(),
        score: first_green_position(window, &['🟥', '🟩', '⬜']),
    })
}

/// Same scheme as GuessTheMovie, but the palette includes the yellow
/// "close guess" square, which still counts as a used slot.
pub fn parse_guess_the_game(text: &str) -> Option<ParsedScore> {
    let caps = GUESS_THE_GAME_RE.captures(text)?;
    let window = window_after(text, caps.get(0)?.end());

    Some(ParsedScore {
        game: Game::GuessTheGame,
        puzzle_number: caps[1].to_string(),
        score: first_green_position(window, &['🟥', '🟨', '🟩', '⬜']),
    })
}

// ---------------------------------------------------------------------------
// FoodGuessr
// ---------------------------------------------------------------------------

static FOODGUESSR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)I got ([\d\s,]+?) on the FoodGuessr").unwrap());

/// FoodGuessr shares a sentence, "I got 11,000 on the FoodGuessr", with no
/// public puzzle index.
pub fn parse_foodguessr(text: &str) -> Option<ParsedScore> {
    let caps = FOODGUESSR_RE.captures(text)?;

    Some(ParsedScore {
        game: Game::FoodGuessr,
        puzzle_number: String::new(),
        score: parse_separated_int(&caps[1])?,
    })
}

// ---------------------------------------------------------------------------
// TimeGuessr
// ---------------------------------------------------------------------------

static TIMEGUESSR_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)TimeGuessr\s+#(\d+)").unwrap());
static TIMEGUESSR_SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+([\d\s,]+?)/[\d\s,]+").unwrap());

/// TimeGuessr shares "TimeGuessr #812 45,155/50,000"; only the numerator is
/// the score, the denominator is the fixed maximum.
pub fn parse_timeguessr(text: &str) -> Option<ParsedScore> {
    let caps = TIMEGUESSR_HEADER_RE.captures(text)?;
    let window = window_after(text, caps.get(0)?.end());
    let score_caps = TIMEGUESSR_SCORE_RE.captures(window)?;

    Some(ParsedScore {
        game: Game::TimeGuessr,
        puzzle_number: caps[1].to_string(),
        score: parse_separated_int(&score_caps[1])?,
    })
}
