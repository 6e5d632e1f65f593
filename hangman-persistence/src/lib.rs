pub mod repositories;
pub mod store;

pub use repositories::{LEADERBOARD_KEY, LeaderboardRepository};
pub use store::{FileStore, KeyValueStore, MemoryStore};
