//! Normalization of raw per-game scores onto a shared 0-100 scale, so a
//! Wordle 3/6 and a 40k TimeGuessr round can sit on the same chart.

use crate::games::Game;

/// Neutral midpoint returned for game names the engine does not know.
/// Stored rows outlive parser changes, so reads must tolerate them.
const UNKNOWN_GAME_SCORE: f64 = 50.0;

/// Map a raw score onto 0-100 where 100 is the best possible result for the
/// game. Raw values outside the game's declared range are clamped, never
/// rejected.
pub fn normalize(game: Game, raw: f64) -> f64 {
    let spec = game.spec();
    if spec.max == spec.min {
        return 100.0;
    }
    let clamped = raw.clamp(spec.min, spec.max);
    if spec.lower_is_better {
        100.0 * (spec.max - clamped) / (spec.max - spec.min)
    } else {
        100.0 * (clamped - spec.min) / (spec.max - spec.min)
    }
}

/// Normalize a score read back from storage, where the game is a free-form
/// string column. Unknown names score the neutral midpoint.
pub fn normalize_score(game: &str, raw: f64) -> f64 {
    match Game::from_name(game) {
        Some(game) => normalize(game, raw),
        None => UNKNOWN_GAME_SCORE,
    }
}
