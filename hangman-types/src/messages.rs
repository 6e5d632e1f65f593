use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameError, LeaderboardEntry, RoundView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    ListCategories,
    StartRound { category: String },
    GuessLetter { letter: String },
    FetchLeaderboard,
    Heartbeat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    Categories { categories: Vec<String> },
    RoundUpdate { round: RoundView },
    RoundOver {
        round: RoundView,
        message: String,
        score: Option<u32>,
        leaderboard_saved: bool,
    },
    Leaderboard { entries: Vec<LeaderboardEntry> },
    Error { error: GameError },
}

impl From<GameError> for ServerMessage {
    fn from(error: GameError) -> Self {
        ServerMessage::Error { error }
    }
}
