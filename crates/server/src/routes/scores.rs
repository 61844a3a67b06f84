use axum::{extract::Query, Extension, Json};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;

use guessr_core::{dates, parsers, scoring};

use crate::db::scores;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct ParseRequest {
    pub username: Option<String>,
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct ScoresQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct DeleteRequest {
    pub username: Option<String>,
    pub game: Option<String>,
    pub date: Option<NaiveDate>,
}

/// POST /api/parse
///
/// Takes a pasted share text, extracts every recognized game score from it
/// and stores each under the inferred play date. Duplicates (same player,
/// game and day) are reported as warnings without blocking the rest.
pub async fn submit_scores(
    Extension(pool): Extension<PgPool>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let username = req.username.unwrap_or_default().trim().to_lowercase();
    let text = req.text.unwrap_or_default();

    if username.is_empty() {
        return Err(AppError::BadRequest("Username required".into()));
    }
    if text.is_empty() {
        return Err(AppError::BadRequest("No text provided".into()));
    }

    // One inferred date covers every game found in this text.
    let play_date = dates::extract_play_date(&text).unwrap_or_else(|| Local::now().date_naive());

    let results = parsers::parse_all(&text);
    if results.is_empty() {
        return Err(AppError::BadRequest(
            "Could not parse any game scores from the text".into(),
        ));
    }

    let mut saved = Vec::new();
    let mut errors = Vec::new();

    for parsed in &results {
        let inserted = scores::insert_score(
            &pool,
            &username,
            parsed.game.name(),
            &parsed.puzzle_number,
            parsed.score as f64,
            &text,
            play_date,
        )
        .await?;

        if inserted {
            saved.push(json!({
                "game": parsed.game.name(),
                "number": parsed.puzzle_number,
                "score": parsed.score,
                "date": play_date,
            }));
        } else {
            errors.push(format!(
                "{}: already submitted for {}",
                parsed.game.name(),
                play_date
            ));
        }
    }

    Ok(Json(json!({ "saved": saved, "errors": errors, "date": play_date })))
}

/// GET /api/scores?date=YYYY-MM-DD
///
/// Everyone's scores for one day (today when the date is omitted).
pub async fn get_scores(
    Extension(pool): Extension<PgPool>,
    Query(q): Query<ScoresQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let date = q.date.unwrap_or_else(|| Local::now().date_naive());
    let rows = scores::get_scores_by_date(&pool, date).await?;

    let list: Vec<JsonValue> = rows
        .iter()
        .map(|r| {
            let normalized = scoring::normalize_score(&r.game, r.score_value);
            json!({
                "username": r.username,
                "game": r.game,
                "game_number": r.game_number,
                "score_value": r.score_value,
                "play_date": r.play_date,
                "normalized": (normalized * 10.0).round() / 10.0,
            })
        })
        .collect();

    Ok(Json(JsonValue::Array(list)))
}

/// POST /api/delete: remove one stored score so it can be resubmitted.
pub async fn delete_score(
    Extension(pool): Extension<PgPool>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let username = req.username.unwrap_or_default().trim().to_lowercase();
    let game = req.game.unwrap_or_default();
    let date = match req.date {
        Some(d) => d,
        None => return Err(AppError::BadRequest("Missing fields".into())),
    };
    if username.is_empty() || game.is_empty() {
        return Err(AppError::BadRequest("Missing fields".into()));
    }

    scores::delete_score(&pool, &username, &game, date).await?;

    Ok(Json(json!({ "ok": true })))
}
