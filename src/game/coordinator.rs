//! Per-client game coordinator
//!
//! A [`GameCoordinator`] is one participant's view of one game. It reads the
//! shared document only through its subscription, plans every change with the
//! [`RoundEngine`] and writes it back through the [`DocumentStore`]. Nothing
//! it does mutates local state that is not also written to the store.
//!
//! Shared transitions are guarded writes. When the store rejects one because
//! another client got there first, the coordinator treats it as a no-op.

use super::document::{GameDocument, GameMode, GameSettings, GameStatus, PlayerDocument};
use super::scoreboard::{ScoreboardEntry, scoreboard};
use super::update::{Guard, Update};
use super::{GameCode, PlayerId};
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::core::{Evaluation, KeyboardStatus, Word};
use crate::error::{AdmissionError, Error, GuessError, Result, SettingsError, StoreError};
use crate::round::{PlayerProgress, RoundClock, RoundEngine};
use crate::store::{Delivery, DocumentStore, Subscription};
use crate::wordlists::Dictionary;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Join code draws before giving up on finding a free one
const CODE_ATTEMPTS: usize = 8;

/// Shared, read-only engine inputs
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub config: Arc<EngineConfig>,
    pub dictionary: Arc<Dictionary>,
    pub clock: Arc<dyn Clock>,
}

impl EngineContext {
    #[must_use]
    pub fn new(config: EngineConfig, dictionary: Dictionary, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            dictionary: Arc::new(dictionary),
            clock,
        }
    }

    #[must_use]
    pub fn engine(&self) -> RoundEngine<'_> {
        RoundEngine::new(&self.config, &self.dictionary)
    }
}

/// What the submitting client learns immediately about its own guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReceipt {
    pub guess: Word,
    pub evaluation: Evaluation,
    pub progress: PlayerProgress,
}

/// A written guess not yet seen back through the subscription
#[derive(Debug, Clone, Copy)]
struct PendingGuess {
    round: u32,
    guesses: usize,
}

impl PendingGuess {
    fn is_reflected(self, document: &GameDocument, player: &PlayerId) -> bool {
        document.current_round != self.round
            || document.status != GameStatus::Playing
            || document
                .player(player)
                .is_none_or(|p| p.guesses.len() >= self.guesses)
    }
}

#[derive(Debug)]
struct Session {
    code: GameCode,
    subscription: Subscription,
    latest: Arc<GameDocument>,
    pending: Option<PendingGuess>,
}

#[derive(Debug)]
pub struct GameCoordinator<S> {
    store: S,
    context: EngineContext,
    player_id: PlayerId,
    nickname: String,
    session: Option<Session>,
}

impl<S: DocumentStore> GameCoordinator<S> {
    /// A client with a fresh random identity
    #[must_use]
    pub fn new(store: S, context: EngineContext, nickname: impl Into<String>) -> Self {
        Self::with_player_id(store, context, PlayerId::random(), nickname)
    }

    /// A client with a known identity, e.g. one reconnecting to a game
    #[must_use]
    pub fn with_player_id(
        store: S,
        context: EngineContext,
        player_id: PlayerId,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            store,
            context,
            player_id,
            nickname: nickname.into(),
            session: None,
        }
    }

    /// Open a multiplayer lobby with this client as host
    ///
    /// # Errors
    /// Invalid settings or nickname, an empty secret source, store failures,
    /// or `CodeExhausted` if no free join code was found.
    #[instrument(skip_all, fields(player = %self.player_id))]
    pub fn create_game(&mut self, settings: GameSettings) -> Result<GameCode> {
        self.open(GameSettings {
            mode: GameMode::Multiplayer,
            ..settings
        })
    }

    /// Create a single-player game and start its first round
    ///
    /// # Errors
    /// Same as [`create_game`](Self::create_game).
    #[instrument(skip_all, fields(player = %self.player_id))]
    pub fn start_solo(&mut self, settings: GameSettings) -> Result<GameCode> {
        let code = self.open(GameSettings {
            mode: GameMode::Solo,
            ..settings
        })?;
        self.start_game()?;
        Ok(code)
    }

    /// Join the lobby behind `code` (case-insensitive)
    ///
    /// A client already seated in the game reattaches without writing.
    ///
    /// # Errors
    /// `AdmissionError` for unknown, started or full games and bad nicknames.
    #[instrument(skip_all, fields(player = %self.player_id, code = input))]
    pub fn join_game(&mut self, input: &str) -> Result<()> {
        let code = GameCode::parse(input);
        let nickname = self.checked_nickname()?;
        let document = self
            .store
            .get(&code)?
            .ok_or_else(|| AdmissionError::NotFound(code.clone()))?;

        if document.player(&self.player_id).is_some() {
            self.attach(code.clone())?;
            info!(%code, "rejoined game");
            return Ok(());
        }

        if document.status != GameStatus::Waiting {
            return Err(AdmissionError::AlreadyStarted(code).into());
        }
        let max = self.context.config.max_players;
        if document.players.len() >= max {
            return Err(AdmissionError::GameFull { max }.into());
        }

        let player = PlayerDocument::new(self.player_id.clone(), nickname, document.next_seat());
        let updates = [
            Update::Require(Guard::Phase {
                status: GameStatus::Waiting,
                round: document.current_round,
            }),
            Update::Require(Guard::OpenSeat { max }),
            Update::AddPlayer(player),
        ];
        match self.store.update(&code, &updates) {
            Ok(()) => {}
            Err(StoreError::GuardFailed(Guard::OpenSeat { max })) => {
                return Err(AdmissionError::GameFull { max }.into());
            }
            Err(StoreError::GuardFailed(_)) => {
                return Err(AdmissionError::AlreadyStarted(code).into());
            }
            Err(err) => return Err(err.into()),
        }
        self.attach(code.clone())?;
        info!(%code, players = document.players.len() + 1, "joined game");
        Ok(())
    }

    /// Change round count or time limit while in the lobby; secrets are redrawn
    ///
    /// Ignored for non-hosts and once the game has started.
    ///
    /// # Errors
    /// Invalid settings, an empty secret source, or store failures.
    #[instrument(skip_all, fields(player = %self.player_id))]
    pub fn update_settings(&mut self, settings: GameSettings) -> Result<()> {
        self.observe()?;
        let session = self.session()?;
        let code = session.code.clone();
        let document = Arc::clone(&session.latest);

        if !document.is_host(&self.player_id) {
            debug!(%code, "ignoring settings change from non-host");
            return Ok(());
        }
        if document.status != GameStatus::Waiting {
            debug!(%code, status = ?document.status, "settings are locked");
            return Ok(());
        }

        let settings = GameSettings {
            mode: document.settings.mode,
            ..settings
        };
        settings.validate()?;
        let secrets = self.draw_secrets(settings.rounds)?;

        let updates = [
            Update::Require(Guard::Phase {
                status: GameStatus::Waiting,
                round: document.current_round,
            }),
            Update::Settings(settings),
            Update::SecretWords(secrets),
        ];
        if self.write(&code, &updates)? {
            info!(
                %code,
                rounds = settings.rounds,
                time_limit = settings.time_limit,
                "settings updated"
            );
        }
        self.observe()
    }

    /// Start round 1; only the host may, and only once
    ///
    /// # Errors
    /// Store failures, or `GameVanished` if the document is gone.
    #[instrument(skip_all, fields(player = %self.player_id))]
    pub fn start_game(&mut self) -> Result<()> {
        self.observe()?;
        let session = self.session()?;
        let code = session.code.clone();

        if !session.latest.is_host(&self.player_id) {
            debug!(%code, "ignoring start from non-host");
            return Ok(());
        }

        let document = self.fresh(&code)?;
        match self.context.engine().start(&document) {
            Some(updates) => {
                if self.write(&code, &updates)? {
                    info!(%code, players = document.players.len(), "game started");
                }
                self.observe()
            }
            None => {
                debug!(%code, status = ?document.status, "game already started");
                Ok(())
            }
        }
    }

    /// Submit a guess for the current round
    ///
    /// # Errors
    /// `GuessError` for rejected guesses (state unchanged, except that a guess
    /// after the local timer ran out also records the timeout), `NoActiveGame`,
    /// or store failures.
    #[instrument(skip_all, fields(player = %self.player_id))]
    pub fn submit_guess(&mut self, input: &str) -> Result<GuessReceipt> {
        self.observe()?;
        let session = self.session()?;
        if session.pending.is_some() {
            return Err(GuessError::SubmissionPending.into());
        }
        let code = session.code.clone();
        let document = Arc::clone(&session.latest);

        let finished = document
            .player(&self.player_id)
            .is_some_and(|p| p.round_finished);
        if document.status == GameStatus::Playing && finished {
            return Err(GuessError::AlreadyFinished.into());
        }

        if self.round_expired(&document) {
            if self.expire(&code, &document)? {
                self.sync()?;
            }
            return Err(GuessError::TimeUp.into());
        }

        let submitted = self
            .context
            .engine()
            .submit(&document, &self.player_id, input)?;
        if !self.write(&code, &submitted.updates)? {
            self.observe()?;
            return Err(GuessError::RoundNotActive.into());
        }

        if let Some(session) = self.session.as_mut() {
            let before = document.player(&self.player_id).map_or(0, |p| p.guesses.len());
            session.pending = Some(PendingGuess {
                round: document.current_round,
                guesses: before + 1,
            });
        }

        debug!(
            %code,
            guess = %submitted.guess,
            evaluation = %submitted.evaluation,
            "guess accepted"
        );
        if let PlayerProgress::Finished(result) = submitted.progress {
            info!(
                %code,
                round = result.round,
                won = result.won,
                score = result.score,
                "finished round"
            );
        }

        self.sync()?;
        Ok(GuessReceipt {
            guess: submitted.guess,
            evaluation: submitted.evaluation,
            progress: submitted.progress,
        })
    }

    /// Timer tick: whole seconds left in the round, if one is running
    ///
    /// At zero an unfinished player is finished with score 0.
    ///
    /// # Errors
    /// Store failures or `GameVanished`.
    pub fn tick(&mut self) -> Result<Option<i64>> {
        self.sync()?;
        let Some(session) = &self.session else {
            return Ok(None);
        };
        let Some(clock) = RoundClock::for_document(&session.latest) else {
            return Ok(None);
        };

        let remaining = clock.remaining_secs(self.context.clock.now());
        if remaining == 0 && session.pending.is_none() {
            let code = session.code.clone();
            let document = Arc::clone(&session.latest);
            if self.expire(&code, &document)? {
                self.sync()?;
            }
        }
        Ok(Some(remaining))
    }

    /// Move from `RoundOver` to the next round, or to `GameOver` after the last
    ///
    /// Ignored for non-hosts and when the round is not over, so a duplicate
    /// request is harmless.
    ///
    /// # Errors
    /// Store failures or `GameVanished`.
    #[instrument(skip_all, fields(player = %self.player_id))]
    pub fn advance_round(&mut self) -> Result<()> {
        self.observe()?;
        let session = self.session()?;
        let code = session.code.clone();

        if !session.latest.is_host(&self.player_id) {
            debug!(%code, "ignoring advance from non-host");
            return Ok(());
        }

        let document = self.fresh(&code)?;
        match self.context.engine().advance(&document) {
            Some(updates) => {
                self.write(&code, &updates)?;
                self.observe()?;
                self.announce();
            }
            None => debug!(
                %code,
                status = ?document.status,
                "round not over, advance ignored"
            ),
        }
        Ok(())
    }

    /// Absorb the latest delivery and react to it
    ///
    /// Writes `RoundOver` once every player has finished; solo games then
    /// advance on their own.
    ///
    /// # Errors
    /// `GameVanished` if the document was removed (the session is dropped),
    /// or store failures.
    pub fn sync(&mut self) -> Result<()> {
        self.observe()?;
        let Some(session) = &self.session else {
            return Ok(());
        };
        let code = session.code.clone();
        let document = Arc::clone(&session.latest);

        if let Some(updates) = self.context.engine().conclude(&document) {
            if self.write(&code, &updates)? {
                info!(%code, round = document.current_round, "round over");
            }
            self.observe()?;
        }

        let Some(session) = &self.session else {
            return Ok(());
        };
        let document = Arc::clone(&session.latest);
        if document.settings.mode == GameMode::Solo {
            if let Some(updates) = self.context.engine().advance(&document) {
                self.write(&code, &updates)?;
                self.observe()?;
                self.announce();
            }
        }
        Ok(())
    }

    /// Stop observing the game; writes already made stand
    pub fn leave(&mut self) {
        if let Some(session) = self.session.take() {
            info!(code = %session.code, player = %self.player_id, "left game");
        }
    }

    #[must_use]
    pub const fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    #[must_use]
    pub const fn context(&self) -> &EngineContext {
        &self.context
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn code(&self) -> Option<&GameCode> {
        self.session.as_ref().map(|s| &s.code)
    }

    /// The latest document this client has observed
    #[must_use]
    pub fn document(&self) -> Option<&GameDocument> {
        self.session.as_ref().map(|s| s.latest.as_ref())
    }

    #[must_use]
    pub fn is_host(&self) -> bool {
        self.document().is_some_and(|d| d.is_host(&self.player_id))
    }

    #[must_use]
    pub fn scoreboard(&self) -> Vec<ScoreboardEntry> {
        self.document().map(scoreboard).unwrap_or_default()
    }

    /// Letter status over this client's guesses in the current round
    #[must_use]
    pub fn keyboard(&self) -> KeyboardStatus {
        self.document()
            .map(|d| self.context.engine().keyboard(d, &self.player_id))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn evaluations(&self) -> Vec<(Word, Evaluation)> {
        self.document()
            .map(|d| self.context.engine().evaluations(d, &self.player_id))
            .unwrap_or_default()
    }

    /// Seconds left by this client's clock, without side effects
    #[must_use]
    pub fn remaining_secs(&self) -> Option<i64> {
        let clock = RoundClock::for_document(self.document()?)?;
        Some(clock.remaining_secs(self.context.clock.now()))
    }

    /// Whether a guess would currently be accepted for submission
    #[must_use]
    pub fn can_submit(&self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let document = &session.latest;

        session.pending.is_none()
            && document.status == GameStatus::Playing
            && !self.round_expired(document)
            && document.player(&self.player_id).is_some_and(|p| {
                !p.round_finished && p.guesses.len() < self.context.config.max_guesses
            })
    }

    fn open(&mut self, settings: GameSettings) -> Result<GameCode> {
        settings.validate()?;
        let nickname = self.checked_nickname()?;
        let secrets = self.draw_secrets(settings.rounds)?;
        self.leave();

        let host = PlayerDocument::new(self.player_id.clone(), nickname, 0);
        let mut rng = rand::rng();

        for _ in 0..CODE_ATTEMPTS {
            let code = GameCode::generate(self.context.config.code_length, &mut rng);
            let document = GameDocument::new(code.clone(), host.clone(), settings, secrets.clone());

            match self.store.create(&code, document) {
                Ok(()) => {
                    self.attach(code.clone())?;
                    info!(
                        %code,
                        mode = ?settings.mode,
                        rounds = settings.rounds,
                        time_limit = settings.time_limit,
                        "game created"
                    );
                    return Ok(code);
                }
                Err(StoreError::AlreadyExists(_)) => debug!(%code, "join code taken, retrying"),
                Err(err) => return Err(err.into()),
            }
        }

        Err(Error::CodeExhausted)
    }

    fn attach(&mut self, code: GameCode) -> Result<()> {
        let subscription = self.store.subscribe(&code)?;
        let latest = subscription
            .current()
            .ok_or_else(|| Error::GameVanished(code.clone()))?;

        self.session = Some(Session {
            code,
            subscription,
            latest,
            pending: None,
        });
        Ok(())
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::NoActiveGame)
    }

    /// Pull the newest delivery into `latest` without reacting to it
    fn observe(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        match session.subscription.poll() {
            Delivery::Unchanged => {}
            Delivery::Changed(document) => session.latest = document,
            Delivery::Vanished => {
                let code = session.code.clone();
                self.session = None;
                warn!(%code, "game document vanished, session dropped");
                return Err(Error::GameVanished(code));
            }
        }

        if session
            .pending
            .is_some_and(|pending| pending.is_reflected(&session.latest, &self.player_id))
        {
            session.pending = None;
        }
        Ok(())
    }

    /// Read the document straight from the store, bypassing the subscription
    fn fresh(&mut self, code: &GameCode) -> Result<GameDocument> {
        if let Some(document) = self.store.get(code)? {
            return Ok(document);
        }

        self.session = None;
        warn!(%code, "game document vanished, session dropped");
        Err(Error::GameVanished(code.clone()))
    }

    fn round_expired(&self, document: &GameDocument) -> bool {
        RoundClock::for_document(document)
            .is_some_and(|clock| clock.is_expired(self.context.clock.now()))
    }

    /// Commit a guarded batch; false when the store rejected it as stale
    fn write(&self, code: &GameCode, updates: &[Update]) -> Result<bool> {
        match self.store.update(code, updates) {
            Ok(()) => Ok(true),
            Err(StoreError::GuardFailed(guard)) => {
                debug!(%code, %guard, "stale write rejected");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Record a timeout for this player; false if there was nothing to record
    fn expire(&self, code: &GameCode, document: &GameDocument) -> Result<bool> {
        let Some((result, updates)) = self.context.engine().expire(document, &self.player_id)
        else {
            return Ok(false);
        };

        if !self.write(code, &updates)? {
            return Ok(false);
        }
        info!(%code, round = result.round, guesses = result.guesses_used, "time up");
        Ok(true)
    }

    fn announce(&self) {
        let Some(session) = &self.session else {
            return;
        };
        let document = &session.latest;

        match document.status {
            GameStatus::Playing => info!(
                code = %session.code,
                round = document.current_round,
                "round started"
            ),
            GameStatus::GameOver => info!(code = %session.code, "game over"),
            _ => {}
        }
    }

    fn checked_nickname(&self) -> Result<String, AdmissionError> {
        let max = self.context.config.nickname_max_len;
        let nickname = self.nickname.trim();
        let len = nickname.chars().count();

        if len == 0 || len > max {
            return Err(AdmissionError::InvalidNickname { max });
        }
        Ok(nickname.to_owned())
    }

    fn draw_secrets(&self, rounds: u32) -> Result<Vec<String>, SettingsError> {
        let count = usize::try_from(rounds).unwrap_or(usize::MAX);
        let secrets = self.context.dictionary.secrets().draw_secrets(count);

        if secrets.is_empty() {
            return Err(SettingsError::NoSecrets);
        }
        Ok(secrets.iter().map(|w| w.text().to_owned()).collect())
    }
}
