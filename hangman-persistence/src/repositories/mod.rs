pub mod leaderboard_repository;

pub use leaderboard_repository::{LEADERBOARD_KEY, LeaderboardRepository};
