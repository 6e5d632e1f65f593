use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, mpsc, watch};
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use hangman_core::{GameSession, GuessOutcome, Letter, TickOutcome, WordCatalog, outcome_message};
use hangman_persistence::LeaderboardRepository;
use hangman_types::{GameError, RoundId, RoundStatus, RoundView, ServerMessage, SessionId};

/// Real-time cadence of the round countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct SessionState {
    game: GameSession,
    ticker: Option<AbortHandle>,
    last_activity: Instant,
}

impl SessionState {
    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }
}

struct SessionInner {
    id: SessionId,
    state: Mutex<SessionState>,
    outbox: mpsc::UnboundedSender<ServerMessage>,
    closed: watch::Sender<bool>,
    leaderboard: Arc<LeaderboardRepository>,
    tick_interval: Duration,
}

/// One connected player. Guesses and timer ticks both go through the session
/// lock, so a round is only ever changed by one of them at a time.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<SessionInner>,
}

impl SessionHandle {
    fn new(
        game: GameSession,
        outbox: mpsc::UnboundedSender<ServerMessage>,
        leaderboard: Arc<LeaderboardRepository>,
        tick_interval: Duration,
    ) -> Self {
        let (closed, _) = watch::channel(false);
        let inner = SessionInner {
            id: game.id(),
            state: Mutex::new(SessionState {
                game,
                ticker: None,
                last_activity: Instant::now(),
            }),
            outbox,
            closed,
            leaderboard,
            tick_interval,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn id(&self) -> SessionId {
        self.inner.id
    }

    pub fn send_message(&self, message: ServerMessage) {
        if self.inner.outbox.send(message).is_err() {
            debug!("Session {} outbox closed, dropping message", self.inner.id);
        }
    }

    pub async fn categories(&self) -> Vec<String> {
        let mut state = self.inner.state.lock().await;
        state.update_activity();
        state.game.catalog().category_names()
    }

    /// Start a new round in `category`. The previous round's ticker is
    /// cancelled; on error nothing changes.
    pub async fn start_round(&self, category: &str) -> Result<RoundView, GameError> {
        let mut state = self.inner.state.lock().await;
        state.update_activity();

        let round_id = {
            let mut rng = rand::thread_rng();
            state.game.start_round(category, &mut rng)?
        };

        state.stop_ticker();
        state.ticker = Some(self.spawn_ticker(round_id));

        let view = state.game.view().ok_or(GameError::NoActiveRound)?;
        self.send_message(ServerMessage::RoundUpdate {
            round: view.clone(),
        });
        Ok(view)
    }

    pub async fn guess_letter(&self, input: &str) -> Result<GuessOutcome, GameError> {
        let letter = Letter::parse(input)?;

        let mut state = self.inner.state.lock().await;
        state.update_activity();

        let outcome = state.game.guess_letter(letter)?;
        if outcome.ends_round() {
            state.stop_ticker();
            self.finish_round(&state).await;
        } else if let Some(round) = state.game.view() {
            self.send_message(ServerMessage::RoundUpdate { round });
        }

        Ok(outcome)
    }

    /// Handle one timer tick for `round_id`. Returns whether the ticker
    /// should keep running.
    async fn tick(&self, round_id: RoundId) -> bool {
        let mut state = self.inner.state.lock().await;

        match state.game.tick(round_id) {
            TickOutcome::Ignored => false,
            TickOutcome::Counting { .. } => {
                if let Some(round) = state.game.view() {
                    self.send_message(ServerMessage::RoundUpdate { round });
                }
                true
            }
            TickOutcome::TimedOut => {
                // This task is the ticker, it ends by returning
                state.ticker = None;
                self.finish_round(&state).await;
                false
            }
        }
    }

    fn spawn_ticker(&self, round_id: RoundId) -> AbortHandle {
        let session = Arc::downgrade(&self.inner);
        let period = self.inner.tick_interval;

        tokio::spawn(run_ticker(session, round_id, period)).abort_handle()
    }

    /// Persist a winning score and tell the page how the round ended
    async fn finish_round(&self, state: &SessionState) {
        let Some(round) = state.game.current_round() else {
            return;
        };

        let score = round.score();
        let leaderboard_saved = match (round.status(), score) {
            (RoundStatus::Won, Some(score)) => {
                match self.inner.leaderboard.record_score(score).await {
                    Ok(_) => true,
                    Err(err) => {
                        warn!(
                            "Session {} could not save score {}: {:#}",
                            self.inner.id, score, err
                        );
                        false
                    }
                }
            }
            _ => false,
        };

        info!(
            "Session {} finished a round: {:?}",
            self.inner.id,
            round.status()
        );

        self.send_message(ServerMessage::RoundOver {
            round: RoundView::from(round),
            message: outcome_message(round).unwrap_or_default(),
            score,
            leaderboard_saved,
        });
    }

    pub async fn send_leaderboard(&self) {
        {
            let mut state = self.inner.state.lock().await;
            state.update_activity();
        }

        let entries = self.inner.leaderboard.top_scores(usize::MAX).await;
        self.send_message(ServerMessage::Leaderboard { entries });
    }

    pub async fn heartbeat(&self) {
        let mut state = self.inner.state.lock().await;
        state.update_activity();
    }

    pub async fn current_view(&self) -> Option<RoundView> {
        let state = self.inner.state.lock().await;
        state.game.view()
    }

    pub async fn has_ticker(&self) -> bool {
        let state = self.inner.state.lock().await;
        state.ticker.is_some()
    }

    pub async fn is_idle(&self, timeout: Duration) -> bool {
        let state = self.inner.state.lock().await;
        state.last_activity.elapsed() > timeout
    }

    /// Cancel any running ticker and tell the connection to hang up.
    /// The session takes no further ticks.
    pub async fn close(&self) {
        let mut state = self.inner.state.lock().await;
        state.stop_ticker();
        self.inner.closed.send_replace(true);
    }

    /// Resolves once the session has been closed
    pub async fn closed(&self) {
        let mut closed = self.inner.closed.subscribe();
        // The sender lives in `inner`, which `self` keeps alive
        let _ = closed.wait_for(|closed| *closed).await;
    }
}

async fn run_ticker(session: Weak<SessionInner>, round_id: RoundId, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);

    loop {
        interval.tick().await;

        let Some(inner) = session.upgrade() else {
            break;
        };
        if !(SessionHandle { inner }).tick(round_id).await {
            break;
        }
    }

    debug!("Ticker for round {} stopped", round_id);
}

pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    catalog: Arc<WordCatalog>,
    leaderboard: Arc<LeaderboardRepository>,
    tick_interval: Duration,
}

impl SessionManager {
    pub fn new(catalog: Arc<WordCatalog>, leaderboard: Arc<LeaderboardRepository>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            catalog,
            leaderboard,
            tick_interval: TICK_INTERVAL,
        }
    }

    /// Use a shorter countdown cadence, for tests
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn leaderboard(&self) -> &Arc<LeaderboardRepository> {
        &self.leaderboard
    }

    /// Register a new session. Everything it wants to tell the page arrives on the returned receiver.
    pub async fn create_session(&self) -> (SessionHandle, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let game = GameSession::new(self.catalog.clone());
        let session = SessionHandle::new(game, sender, self.leaderboard.clone(), self.tick_interval);

        {
            let mut sessions = self.sessions.write().await;
            sessions.insert(session.id(), session.clone());
        }

        info!("Created session {}", session.id());
        (session, receiver)
    }

    pub async fn get_session(&self, id: SessionId) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(&id).cloned()
    }

    pub async fn remove_session(&self, id: SessionId) {
        let session = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(&id)
        };

        if let Some(session) = session {
            session.close().await;
            info!("Removed session {}", id);
        }
    }

    /// Close and forget sessions with no activity for `timeout`. Their
    /// connections are hung up.
    pub async fn cleanup_idle_sessions(&self, timeout: Duration) {
        let sessions: Vec<SessionHandle> = {
            let sessions = self.sessions.read().await;
            sessions.values().cloned().collect()
        };

        let mut idle = Vec::new();
        for session in sessions {
            if session.is_idle(timeout).await {
                idle.push(session.id());
            }
        }

        for id in idle {
            self.remove_session(id).await;
            info!("Removed idle session {}", id);
        }
    }

    pub async fn active_sessions_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}
