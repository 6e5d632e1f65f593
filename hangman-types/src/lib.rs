pub mod errors;
pub mod leaderboard;
pub mod messages;
pub mod round;

// Re-export all types
pub use errors::*;
pub use leaderboard::*;
pub use messages::*;
pub use round::*;

pub type SessionId = uuid::Uuid;
pub type RoundId = uuid::Uuid;
