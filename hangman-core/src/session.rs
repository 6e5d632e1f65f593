use hangman_types::{GameError, RoundId, RoundStatus, RoundView, SessionId};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{GuessOutcome, Letter, Round, TickOutcome, WordCatalog};

#[derive(Debug)]
struct ActiveRound {
    id: RoundId,
    round: Round,
}

/// One player's game: the word catalog plus the round being played.
/// Each round gets a fresh [`RoundId`] so callbacks scheduled for an older
/// round can be told apart.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    catalog: Arc<WordCatalog>,
    current: Option<ActiveRound>,
}

impl GameSession {
    pub fn new(catalog: Arc<WordCatalog>) -> Self {
        Self::with_id(Uuid::new_v4(), catalog)
    }

    pub fn with_id(id: SessionId, catalog: Arc<WordCatalog>) -> Self {
        Self {
            id,
            catalog,
            current: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    /// Replace the current round with a new one. On error the current round
    /// is left as it was.
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        category: &str,
        rng: &mut R,
    ) -> Result<RoundId, GameError> {
        let round = Round::start(&self.catalog, category, rng)?;
        let id = Uuid::new_v4();

        info!("Session {} started round {} in category '{}'", self.id, id, category);
        debug!("Round {} target word: {}", id, round.target_word());

        self.current = Some(ActiveRound { id, round });
        Ok(id)
    }

    pub fn guess_letter(&mut self, letter: Letter) -> Result<GuessOutcome, GameError> {
        let active = self.current.as_mut().ok_or(GameError::NoActiveRound)?;
        let outcome = active.round.guess_letter(letter);

        match outcome {
            GuessOutcome::Won { score } => {
                info!("Session {} won round {} with score {}", self.id, active.id, score)
            }
            GuessOutcome::Lost => info!("Session {} lost round {}", self.id, active.id),
            _ => {}
        }

        Ok(outcome)
    }

    /// Advance the countdown of `round_id`. Ticks for any round other than
    /// the current one are ignored.
    pub fn tick(&mut self, round_id: RoundId) -> TickOutcome {
        match self.current.as_mut() {
            Some(active) if active.id == round_id => {
                let outcome = active.round.tick();
                if outcome == TickOutcome::TimedOut {
                    info!("Session {} ran out of time in round {}", self.id, active.id);
                }
                outcome
            }
            _ => TickOutcome::Ignored,
        }
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref().map(|active| &active.round)
    }

    pub fn current_round_id(&self) -> Option<RoundId> {
        self.current.as_ref().map(|active| active.id)
    }

    /// Status of the current round, `NotStarted` before the first one
    pub fn status(&self) -> RoundStatus {
        self.current_round()
            .map(Round::status)
            .unwrap_or(RoundStatus::NotStarted)
    }

    pub fn view(&self) -> Option<RoundView> {
        self.current_round().map(RoundView::from)
    }
}
