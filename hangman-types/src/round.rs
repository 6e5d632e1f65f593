use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
    TimedOut,
}

impl RoundStatus {
    /// Won, Lost and TimedOut end the round for good
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundStatus::Won | RoundStatus::Lost | RoundStatus::TimedOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum KeyState {
    Neutral,   // Not guessed yet
    Correct,   // Green - letter is in the word
    Incorrect, // Red - letter is not in the word
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KeyView {
    pub letter: char,
    pub state: KeyState,
    pub disabled: bool,
}

/// Pieces of the gallows drawing, in the order they are revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FigurePart {
    Base,
    Pole,
    TopBeam,
    Rope,
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl FigurePart {
    pub const ALL: [FigurePart; 10] = [
        FigurePart::Base,
        FigurePart::Pole,
        FigurePart::TopBeam,
        FigurePart::Rope,
        FigurePart::Head,
        FigurePart::Body,
        FigurePart::LeftArm,
        FigurePart::RightArm,
        FigurePart::LeftLeg,
        FigurePart::RightLeg,
    ];
}

/// Everything the page needs to draw a round. The target word is withheld
/// until the round is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundView {
    pub category: String,
    pub masked_word: String, // e.g. "C _ T"
    pub word_length: u32,
    pub guessed_letters: Vec<char>,
    pub wrong_guess_count: u32,
    pub max_wrong_guesses: u32,
    pub remaining_seconds: u32,
    pub status: RoundStatus,
    pub keyboard: Vec<KeyView>,
    pub figure: Vec<FigurePart>,
    pub revealed_word: Option<String>,
    pub score: Option<u32>,
}
