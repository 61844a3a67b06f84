pub mod health;
pub mod history;
pub mod leaderboard;
pub mod scores;
