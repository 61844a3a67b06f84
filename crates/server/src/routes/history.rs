use axum::{extract::Query, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use sqlx::PgPool;

use guessr_core::scoring;

use crate::db::scores;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub username: Option<String>,
}

/// GET /api/history?username=...
///
/// One player's full submission history, newest first. An unknown or
/// missing username is just an empty list.
pub async fn get_history(
    Extension(pool): Extension<PgPool>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let username = q.username.unwrap_or_default().trim().to_lowercase();
    if username.is_empty() {
        return Ok(Json(json!([])));
    }

    let rows = scores::get_user_history(&pool, &username).await?;

    let list: Vec<JsonValue> = rows
        .iter()
        .map(|r| {
            let normalized = scoring::normalize_score(&r.game, r.score_value);
            json!({
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
