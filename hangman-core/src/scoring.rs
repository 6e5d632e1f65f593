/// Wrong guesses allowed before the round is lost
pub const MAX_WRONG_GUESSES: u32 = 6;
/// Length of the countdown for one round
pub const ROUND_SECONDS: u32 = 90;

const POINTS_PER_SPARE_GUESS: u32 = 100;
const POINTS_PER_SECOND_LEFT: u32 = 10;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Score for a won round: unused wrong guesses and leftover seconds both count
    pub fn round_score(wrong_guess_count: u32, remaining_seconds: u32) -> u32 {
        let spare_guesses = MAX_WRONG_GUESSES.saturating_sub(wrong_guess_count);
        spare_guesses * POINTS_PER_SPARE_GUESS + remaining_seconds * POINTS_PER_SECOND_LEFT
    }
}
