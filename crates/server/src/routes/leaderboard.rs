use std::collections::BTreeMap;

use axum::{extract::Query, Extension, Json};
use chrono::{Datelike, Days, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;

use guessr_core::{games::Game, scoring};

use crate::db::scores::{self, ScoreRow};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub week_offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScoreEntry {
    pub date: NaiveDate,
    pub score: f64,
    pub won: bool,
    pub normalized: f64,
}

#[derive(Debug, Serialize)]
pub struct PlayerStanding {
    pub username: String,
    pub wins: i64,
    pub games_played: i64,
    pub scores: Vec<ScoreEntry>,
}

#[derive(Debug, Serialize)]
pub struct GameStanding {
    pub game: String,
    pub leader: Option<String>,
    pub leader_wins: i64,
    pub players: Vec<PlayerStanding>,
}

/// GET /api/leaderboard?week_offset=N
///
/// Wins per game over one Monday-to-Sunday week. `week_offset` shifts whole
/// weeks relative to the current one (negative = past).
pub async fn weekly_leaderboard(
    Extension(pool): Extension<PgPool>,
    Query(q): Query<LeaderboardQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let offset = Duration::try_weeks(q.week_offset.unwrap_or(0))
        .ok_or_else(|| AppError::BadRequest("Invalid week offset".into()))?;

    let today = Local::now().date_naive();
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let week_start = monday
        .checked_add_signed(offset)
        .ok_or_else(|| AppError::BadRequest("Invalid week offset".into()))?;
    let week_end = week_start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| AppError::BadRequest("Invalid week offset".into()))?;

    let rows = scores::get_scores_between(&pool, week_start, week_end).await?;
    let leaderboard = build_weekly_standings(&rows);

    Ok(Json(json!({
        "week_start": week_start,
        "week_end": week_end,
        "leaderboard": leaderboard,
    })))
}

#[derive(Default)]
struct PlayerAcc {
    wins: i64,
    scores: Vec<ScoreEntry>,
}

/// Fold one week's rows into per-game standings. For each (game, day) the
/// best raw score wins; ties all win; a day with a single player awards no
/// win. Players are ranked by wins, then games played, then username.
pub fn build_weekly_standings(rows: &[ScoreRow]) -> Vec<GameStanding> {
    // (game, day) → everyone who played that day
    let mut days: BTreeMap<(&str, NaiveDate), Vec<&ScoreRow>> = BTreeMap::new();
    for row in rows {
        days.entry((row.game.as_str(), row.play_date))
            .or_default()
            .push(row);
    }

    // game → username → accumulated wins and score entries
    let mut standings: BTreeMap<&str, BTreeMap<&str, PlayerAcc>> = BTreeMap::new();

    for (&(game, date), entries) in &days {
        let lower_is_better = Game::from_name(game)
            .map(Game::lower_is_better)
            .unwrap_or(false);
        let best = if lower_is_better {
            entries
                .iter()
                .map(|e| e.score_value)
                .fold(f64::INFINITY, f64::min)
        } else {
            entries
                .iter()
                .map(|e| e.score_value)
                .fold(f64::NEG_INFINITY, f64::max)
        };
        let contested = entries.len() > 1;

        for entry in entries {
            let won = contested && entry.score_value == best;
            let acc = standings
                .entry(game)
                .or_default()
                .entry(entry.username.as_str())
                .or_default();
            if won {
                acc.wins += 1;
            }
            let normalized = scoring::normalize_score(game, entry.score_value);
            // days iterates date-ascending, so each player's score list
            // arrives already in calendar order.
            acc.scores.push(ScoreEntry {
                date,
                score: entry.score_value,
                won,
                normalized: (normalized * 10.0).round() / 10.0,
            });
        }
    }

    standings
        .into_iter()
        .map(|(game, players)| {
            let mut players: Vec<PlayerStanding> = players
                .into_iter()
                .map(|(username, acc)| PlayerStanding {
                    username: username.to_string(),
                    wins: acc.wins,
                    games_played: acc.scores.len() as i64,
                    scores: acc.scores,
                })
                .collect();
            // Stable sort on top of the map's username order, so full ties
            // stay alphabetical.
            players.sort_by(|a, b| {
                b.wins
                    .cmp(&a.wins)
                    .then(b.games_played.cmp(&a.games_played))
            });

            GameStanding {
                game: game.to_string(),
                leader: players.first().map(|p| p.username.clone()),
                leader_wins: players.first().map(|p| p.wins).unwrap_or(0),
                players,
            }
        })
        .collect()
}
