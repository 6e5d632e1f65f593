use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::store::{KeyValueStore, MemoryStore};
use hangman_types::{LeaderboardEntry, ScoreEntry};

/// Storage key holding the whole leaderboard as one JSON array
pub const LEADERBOARD_KEY: &str = "hangman_leaderboard";

// Matches the en-US `toLocaleString()` form, e.g. "3/14/2025, 9:26:53 PM"
const DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Winning scores, highest first. Every write is a read-modify-write of the
/// whole list, serialized by `write_lock`.
pub struct LeaderboardRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl LeaderboardRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub async fn record_score(&self, score: u32) -> Result<ScoreEntry> {
        self.record_score_at(score, Local::now()).await
    }

    /// Append a score recorded at `recorded_at` and write the re-sorted list back
    pub async fn record_score_at(&self, score: u32, recorded_at: DateTime<Local>) -> Result<ScoreEntry> {
        let _guard = self.write_lock.lock().await;

        // A read failure aborts the write rather than clobbering scores we could not see
        let raw = self
            .store
            .get(LEADERBOARD_KEY)
            .await
            .context("Failed to read leaderboard")?;
        let mut scores = raw.as_deref().map(parse_scores).unwrap_or_default();

        let entry = ScoreEntry {
            score,
            timestamp: recorded_at.timestamp_millis(),
            date: recorded_at.format(DISPLAY_DATE_FORMAT).to_string(),
        };
        scores.push(entry.clone());
        sort_scores(&mut scores);

        let json = serde_json::to_string(&scores)?;
        self.store
            .put(LEADERBOARD_KEY, &json)
            .await
            .context("Failed to write leaderboard")?;

        info!("Recorded score {} ({} entries on the leaderboard)", score, scores.len());
        Ok(entry)
    }

    /// All scores, highest first. Missing, unreadable or corrupt data reads as empty.
    pub async fn list_scores(&self) -> Vec<ScoreEntry> {
        match self.store.get(LEADERBOARD_KEY).await {
            Ok(Some(raw)) => {
                let mut scores = parse_scores(&raw);
                sort_scores(&mut scores);
                scores
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Failed to read leaderboard, showing it empty: {:#}", err);
                Vec::new()
            }
        }
    }

    /// The first `limit` scores with their 1-based rank
    pub async fn top_scores(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.list_scores()
            .await
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, entry)| LeaderboardEntry {
                rank: (index + 1) as u32,
                entry,
            })
            .collect()
    }
}

fn parse_scores(raw: &str) -> Vec<ScoreEntry> {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        warn!("Leaderboard data is corrupt, treating it as empty: {}", err);
        Vec::new()
    })
}

/// Highest score first; equal scores keep their recorded order
fn sort_scores(scores: &mut [ScoreEntry]) {
    scores.sort_by(|a, b| b.score.cmp(&a.score));
}
