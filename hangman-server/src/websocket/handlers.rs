use tracing::{info, warn};

use crate::session_manager::SessionHandle;
use hangman_types::{ClientMessage, GameError, ServerMessage, SessionId};

#[derive(Clone)]
pub struct MessageHandler {
    session: SessionHandle,
}

impl MessageHandler {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    pub async fn handle_message(&self, message: ClientMessage) {
        match message {
            ClientMessage::ListCategories => self.handle_list_categories().await,
            ClientMessage::StartRound { category } => self.handle_start_round(category).await,
            ClientMessage::GuessLetter { letter } => self.handle_guess_letter(letter).await,
            ClientMessage::FetchLeaderboard => self.session.send_leaderboard().await,
            ClientMessage::Heartbeat => self.session.heartbeat().await,
        }
    }

    async fn handle_list_categories(&self) {
        let categories = self.session.categories().await;
        self.session
            .send_message(ServerMessage::Categories { categories });
    }

    async fn handle_start_round(&self, category: String) {
        info!(
            "Session {} starting a round in '{}'",
            self.session.id(),
            category
        );

        if let Err(e) = self.session.start_round(&category).await {
            self.send_error(e);
        }
    }

    async fn handle_guess_letter(&self, letter: String) {
        if let Err(e) = self.session.guess_letter(&letter).await {
            self.send_error(e);
        }
    }

    pub fn send_error(&self, error: GameError) {
        warn!("Session {}: {}", self.session.id(), error);
        self.session.send_message(ServerMessage::from(error));
    }
}
