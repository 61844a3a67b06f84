pub mod pool;
pub mod scores;
