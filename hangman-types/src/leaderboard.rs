use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One persisted winning score. The field names are the stored JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreEntry {
    pub score: u32,
    /// Milliseconds since the Unix epoch when the score was recorded
    #[ts(type = "number")]
    pub timestamp: i64,
    /// Local, human readable form of `timestamp`
    pub date: String,
}

/// A score entry together with its position on the board (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub entry: ScoreEntry,
}
