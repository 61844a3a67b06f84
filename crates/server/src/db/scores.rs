use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::AppError;

/// A stored score as read back for listings and the leaderboard.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct ScoreRow {
    pub username: String,
    pub game: String,
    pub game_number: String,
    pub score_value: f64,
    pub play_date: NaiveDate,
}

/// Insert a score under the one-per-(player, game, day) constraint.
/// Returns false when that day was already recorded; the conflict check and
/// insert are a single statement, so concurrent submits cannot both win.
pub async fn insert_score(
    pool: &PgPool,
    username: &str,
    game: &str,
    game_number: &str,
    score_value: f64,
    raw_text: &str,
    play_date: NaiveDate,
) -> Result<bool, AppError> {
    let inserted: Option<(i64,)> = sqlx::query_as(
        r#"INSERT INTO scores (username, game, game_number, score_value, raw_text, play_date)
           VALUES ($1, $2, $3, $4, $5, $6)
           ON CONFLICT (username, game, play_date) DO NOTHING
           RETURNING id"#,
    )
    .bind(username)
    .bind(game)
    .bind(game_number)
    .bind(score_value)
    .bind(raw_text)
    .bind(play_date)
    .fetch_optional(pool)
    .await
    .map_err(AppError::Sqlx)?;

    Ok(inserted.is_some())
}

pub async fn get_scores_by_date(
    pool: &PgPool,
    date: NaiveDate,
) -> Result<Vec<ScoreRow>, AppError> {
    sqlx::query_as(
        r#"SELECT username, game, game_number, score_value, play_date
           FROM scores
           WHERE play_date = $1
           ORDER BY game, username"#,
    )
    .bind(date)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)
}

/// All scores inside an inclusive date range, used for the weekly leaderboard.
pub async fn get_scores_between(
    pool: &PgPool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ScoreRow>, AppError> {
    sqlx::query_as(
        r#"SELECT username, game, game_number, score_value, play_date
           FROM scores
           WHERE play_date BETWEEN $1 AND $2
           ORDER BY game, play_date, username"#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)
}

pub async fn get_user_history(pool: &PgPool, username: &str) -> Result<Vec<ScoreRow>, AppError> {
    sqlx::query_as(
        r#"SELECT username, game, game_number, score_value, play_date
           FROM scores
           WHERE username = $1
           ORDER BY play_date DESC, game"#,
    )
    .bind(username)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)
}

/// Delete one stored score. Deleting a row that does not exist is not an
/// error, so deletes are idempotent.
pub async fn delete_score(
    pool: &PgPool,
    username: &str,
    game: &str,
    play_date: NaiveDate,
) -> Result<(), AppError> {
    sqlx::query(
        r#"DELETE FROM scores
           WHERE username = $1 AND game = $2 AND play_date = $3"#,
    )
    .bind(username)
    .bind(game)
    .bind(play_date)
    .execute(pool)
    .await
    .map_err(AppError::Sqlx)?;

    Ok(())
}
