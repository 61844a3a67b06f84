//! Integration tests for the score-tracking endpoints.
//!
//! These talk to a live server on localhost:5000 backed by Postgres, so
//! they are all #[ignore]d. Start the stack and run them with
//! `cargo test -- --ignored`.

mod common;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Submit a share text for a user and return the response.
async fn submit(client: &reqwest::Client, username: &str, text: &str) -> reqwest::Response {
    client
        .post(common::url("/api/parse"))
        .json(&json!({
            "username": username,
            "text": text,
        }))
        .send()
        .await
        .expect("Failed to send parse request")
}

/// A Wordle share pinned to a specific play date via the date line the
/// parser recognizes, e.g. "Wednesday, Feb 18, 2026".
fn wordle_share(date: NaiveDate, guesses: &str) -> String {
    format!(
        "{}\n\nWordle 1,705 {}/6\n\n⬛🟨⬛⬛⬛\n🟩🟩🟩🟩🟩",
        date.format("%A, %b %d, %Y"),
        guesses
    )
}

/// The Monday of the week containing `date`.
fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A single share saves one score with game, number, score, and date.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn submit_single_share() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();

    let resp = submit(&client, &username, &wordle_share(date, "4")).await;
    assert_eq!(resp.status(), 200, "Submission should succeed");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["saved"][0]["game"], "Wordle");
    assert_eq!(body["saved"][0]["number"], "1705");
    assert_eq!(body["saved"][0]["score"], 4);
    assert_eq!(body["saved"][0]["date"], "2026-03-04");
    assert_eq!(body["errors"].as_array().unwrap().len(), 0);
}

/// Submitting the same game twice for one day reports a per-game error.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn duplicate_submission_reports_an_error() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let text = wordle_share(date, "4");

    let resp = submit(&client, &username, &text).await;
    assert_eq!(resp.status(), 200);

    let resp = submit(&client, &username, &text).await;
    assert_eq!(resp.status(), 200, "Duplicates are reported, not rejected");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["saved"].as_array().unwrap().len(), 0);
    assert!(
        body["errors"][0]
            .as_str()
            .unwrap()
            .contains("already submitted"),
        "Error should mention the duplicate: got {:?}",
        body["errors"][0]
    );
}

/// Usernames are normalized to lowercase, so case variants collide.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn usernames_are_case_insensitive() {
    let client = common::client();
    let suffix = common::unique_suffix();
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let text = wordle_share(date, "4");

    let resp = submit(&client, &format!("Player_{suffix}"), &text).await;
    assert_eq!(resp.status(), 200);

    let resp = submit(&client, &format!("player_{suffix}"), &text).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["saved"].as_array().unwrap().len(), 0);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
}

/// One message holding several shares saves a score per game.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn multi_game_share_saves_each_game() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());
    let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();

    let text = format!(
        "{}\n\n#travle #647 +2\n\nWordle 1,705 3/6",
        date.format("%A, %b %d, %Y")
    );
    let resp = submit(&client, &username, &text).await;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let saved = body["saved"].as_array().unwrap();
    assert_eq!(saved.len(), 2, "Both games should be saved");
    assert_eq!(saved[0]["game"], "Travle");
    assert_eq!(saved[1]["game"], "Wordle");
}

#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn missing_username_is_rejected() {
    let client = common::client();
    let resp = client
        .post(common::url("/api/parse"))
        .json(&json!({ "text": "Wordle 1,705 4/6" }))
        .send()
        .await
        .expect("Failed to send parse request");
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Username required");
}

#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn missing_text_is_rejected() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());

    let resp = client
        .post(common::url("/api/parse"))
        .json(&json!({ "username": username }))
        .send()
        .await
        .expect("Failed to send parse request");
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No text provided");
}

#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn unparseable_text_is_rejected() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());

    let resp = submit(&client, &username, "just chatting, no scores here").await;
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Could not parse any game scores from the text"
    );
}

// ---------------------------------------------------------------------------
// Reads and deletion
// ---------------------------------------------------------------------------

/// Scores for a day come back with a 0-100 normalized value attached.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn scores_by_date_include_normalization() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());
    let date = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();

    let resp = submit(&client, &username, &wordle_share(date, "1")).await;
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(common::url("/api/scores"))
        .query(&[("date", "2026-03-06")])
        .send()
        .await
        .expect("Failed to send scores request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let entry = body
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["username"] == username)
        .expect("Submitted score should be listed for its date");
    assert_eq!(entry["game"], "Wordle");
    assert_eq!(entry["score_value"], 1.0);
    assert_eq!(entry["normalized"], 100.0, "A hole-in-one Wordle is a perfect score");
}

/// History returns one row per submission, newest first.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn history_lists_scores_newest_first() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());
    let earlier = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let later = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();

    submit(&client, &username, &wordle_share(earlier, "5")).await;
    submit(&client, &username, &wordle_share(later, "2")).await;

    let resp = client
        .get(common::url("/api/history"))
        .query(&[("username", username.as_str())])
        .send()
        .await
        .expect("Failed to send history request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["play_date"], "2026-03-03");
    assert_eq!(rows[1]["play_date"], "2026-03-02");
}

/// History for an unknown or blank username is an empty list, not an error.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn history_without_username_is_empty() {
    let client = common::client();
    let resp = client
        .get(common::url("/api/history"))
        .send()
        .await
        .expect("Failed to send history request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

/// Deleting a score frees the (user, game, day) slot for resubmission.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn delete_then_resubmit_succeeds() {
    let client = common::client();
    let username = format!("player_{}", common::unique_suffix());
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    let text = wordle_share(date, "4");

    let resp = submit(&client, &username, &text).await;
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(common::url("/api/delete"))
        .json(&json!({
            "username": username,
            "game": "Wordle",
            "date": "2026-03-04",
        }))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let resp = submit(&client, &username, &text).await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["saved"].as_array().unwrap().len(),
        1,
        "Slot should be free again after deletion"
    );
}

#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn delete_with_missing_fields_is_rejected() {
    let client = common::client();
    let resp = client
        .post(common::url("/api/delete"))
        .json(&json!({ "username": "someone" }))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing fields");
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// Two players in one past week: the better Wordle takes the day, and the
/// requested week's bounds run Monday through Sunday.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn weekly_leaderboard_ranks_players() {
    let client = common::client();
    let suffix = common::unique_suffix();
    let winner = format!("winner_{suffix}");
    let loser = format!("loser_{suffix}");

    // Pin the scores to a week far in the past, picked per-run to keep
    // concurrent test data out of each other's weeks.
    let weeks_back = 100 + suffix.parse::<i64>().unwrap() % 400;
    let today = Local::now().date_naive();
    let week_start = monday_of(today) - Duration::weeks(weeks_back);
    let played = week_start + Duration::days(2);

    submit(&client, &winner, &wordle_share(played, "2")).await;
    submit(&client, &loser, &wordle_share(played, "5")).await;

    let resp = client
        .get(common::url("/api/leaderboard"))
        .query(&[("week_offset", (-weeks_back).to_string().as_str())])
        .send()
        .await
        .expect("Failed to send leaderboard request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["week_start"], week_start.to_string());
    assert_eq!(
        body["week_end"],
        (week_start + Duration::days(6)).to_string()
    );

    let wordle = body["leaderboard"]
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["game"] == "Wordle")
        .expect("Wordle should have standings for the week");
    let players = wordle["players"].as_array().unwrap();

    let winner_row = players
        .iter()
        .find(|p| p["username"] == winner)
        .expect("Winner should appear in the standings");
    let loser_row = players
        .iter()
        .find(|p| p["username"] == loser)
        .expect("Loser should appear in the standings");

    assert_eq!(winner_row["wins"], 1, "Lower Wordle score takes the day");
    assert_eq!(loser_row["wins"], 0);
    assert_eq!(winner_row["scores"][0]["won"], true);
    assert_eq!(loser_row["scores"][0]["won"], false);
}

/// A week_offset too large to represent is a 400, not a crash.
#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn absurd_week_offset_is_rejected() {
    let client = common::client();
    let resp = client
        .get(common::url("/api/leaderboard"))
        .query(&[("week_offset", i64::MAX.to_string().as_str())])
        .send()
        .await
        .expect("Failed to send leaderboard request");
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid week offset");
}

// ---------------------------------------------------------------------------
// Service endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn health_reports_database_status() {
    let client = common::client();
    let resp = client
        .get(common::url("/health"))
        .send()
        .await
        .expect("Failed to send health request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
}

#[tokio::test]
#[ignore = "requires a running server on localhost:5000"]
async fn version_is_reported() {
    let client = common::client();
    let resp = client
        .get(common::url("/api/version"))
        .send()
        .await
        .expect("Failed to send version request");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert!(body["version"].is_string());
}
