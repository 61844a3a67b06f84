use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run the full Postgres schema migration inline.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Submitted scores: one row per player, game, and calendar day
CREATE TABLE IF NOT EXISTS scores (
    id          BIGSERIAL PRIMARY KEY,
    username    TEXT NOT NULL,
    game        TEXT NOT NULL,
    game_number TEXT NOT NULL DEFAULT '',
    score_value DOUBLE PRECISION NOT NULL,
    raw_text    TEXT,
    play_date   DATE NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (username, game, play_date)
);

CREATE INDEX IF NOT EXISTS idx_scores_play_date ON scores (play_date);
CREATE INDEX IF NOT EXISTS idx_scores_username  ON scores (username);
CREATE INDEX IF NOT EXISTS idx_scores_game      ON scores (game);
"#;
