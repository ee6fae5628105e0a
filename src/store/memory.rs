//! In-process document store

use super::{DocumentStore, Subscription};
use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;
use crate::game::{GameCode, GameDocument, Update, apply_all};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, trace};

#[derive(Debug)]
struct Slot {
    document: GameDocument,
    sender: watch::Sender<Option<Arc<GameDocument>>>,
}

impl Slot {
    fn publish(&self) {
        self.sender.send_replace(Some(Arc::new(self.document.clone())));
    }
}

/// Store shared by every client in the process
///
/// Clones are handles onto the same documents. Each committed batch bumps the
/// document's `revision` and stamps `roundStartTime` writes with the store's
/// clock.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    games: Arc<Mutex<FxHashMap<GameCode, Slot>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            games: Arc::default(),
            clock,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games().is_empty()
    }

    fn games(&self) -> MutexGuard<'_, FxHashMap<GameCode, Slot>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl DocumentStore for MemoryStore {
    fn create(&self, code: &GameCode, mut document: GameDocument) -> Result<(), StoreError> {
        let mut games = self.games();
        if games.contains_key(code) {
            return Err(StoreError::AlreadyExists(code.clone()));
        }

        document.revision = 1;
        let (sender, _) = watch::channel(Some(Arc::new(document.clone())));
        games.insert(code.clone(), Slot { document, sender });
        debug!(%code, "document created");
        Ok(())
    }

    fn get(&self, code: &GameCode) -> Result<Option<GameDocument>, StoreError> {
        Ok(self.games().get(code).map(|slot| slot.document.clone()))
    }

    fn update(&self, code: &GameCode, updates: &[Update]) -> Result<(), StoreError> {
        let mut games = self.games();
        let slot = games
            .get_mut(code)
            .ok_or_else(|| StoreError::NotFound(code.clone()))?;

        if updates.is_empty() {
            return Ok(());
        }

        apply_all(&mut slot.document, updates, self.clock.now())?;
        slot.document.revision += 1;
        slot.publish();

        trace!(
            %code,
            revision = slot.document.revision,
            paths = ?updates.iter().map(Update::path).collect::<Vec<_>>(),
            "batch committed"
        );
        Ok(())
    }

    fn subscribe(&self, code: &GameCode) -> Result<Subscription, StoreError> {
        let games = self.games();
        let slot = games.get(code).ok_or_else(|| StoreError::NotFound(code.clone()))?;
        Ok(Subscription::new(code.clone(), slot.sender.subscribe()))
    }

    fn remove(&self, code: &GameCode) -> Result<(), StoreError> {
        let slot = self
            .games()
            .remove(code)
            .ok_or_else(|| StoreError::NotFound(code.clone()))?;

        slot.sender.send_replace(None);
        debug!(%code, "document removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::game::{
        GameMode, GameSettings, GameStatus, Guard, PlayerDocument, PlayerField, PlayerId,
    };
    use crate::store::Delivery;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    fn code() -> GameCode {
        GameCode::parse("MEM001")
    }

    fn document() -> GameDocument {
        let host = PlayerDocument::new(PlayerId::new("host"), "Ada", 0);
        let mut doc = GameDocument::new(
            code(),
            host,
            GameSettings {
                rounds: 1,
                time_limit: 60,
                mode: GameMode::Multiplayer,
            },
            vec!["crane".into()],
        );
        let guest = PlayerDocument::new(PlayerId::new("guest"), "Bo", 1);
        doc.players.insert(guest.id.clone(), guest);
        doc
    }

    fn store() -> (MemoryStore, ManualClock) {
        let clock = ManualClock::default();
        (MemoryStore::new(Arc::new(clock.clone())), clock)
    }

    fn guesses(id: &str, words: &[&str]) -> Update {
        Update::Player(
            PlayerId::new(id),
            PlayerField::Guesses(words.iter().map(|w| (*w).to_owned()).collect()),
        )
    }

    #[test]
    fn create_then_get() {
        let (store, _) = store();
        store.create(&code(), document()).unwrap();

        let stored = store.get(&code()).unwrap().unwrap();
        assert_eq!(stored.revision, 1);
        assert_eq!(stored.players.len(), 2);
        assert_eq!(store.get(&GameCode::parse("NOPE00")).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let (store, _) = store();
        store.create(&code(), document()).unwrap();
        assert_eq!(
            store.create(&code(), document()),
            Err(StoreError::AlreadyExists(code()))
        );
    }

    #[test]
    fn updates_bump_revision_and_use_store_time() {
        let (store, clock) = store();
        store.create(&code(), document()).unwrap();
        clock.advance(TimeDelta::seconds(42));

        store
            .update(
                &code(),
                &[Update::Status(GameStatus::Playing), Update::StartRoundClock],
            )
            .unwrap();

        let stored = store.get(&code()).unwrap().unwrap();
        assert_eq!(stored.revision, 2);
        assert_eq!(stored.status, GameStatus::Playing);
        assert_eq!(stored.round_start_time, Some(clock.now()));
    }

    #[test]
    fn failed_batches_commit_nothing() {
        let (store, _) = store();
        store.create(&code(), document()).unwrap();

        let err = store
            .update(
                &code(),
                &[
                    Update::Status(GameStatus::Playing),
                    guesses("ghost", &["slate"]),
                ],
            )
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownPlayer(PlayerId::new("ghost")));

        let stored = store.get(&code()).unwrap().unwrap();
        assert_eq!(stored.status, GameStatus::Waiting);
        assert_eq!(stored.revision, 1);
    }

    #[test]
    fn stale_guarded_batch_is_not_published() {
        let (store, _) = store();
        store.create(&code(), document()).unwrap();
        let mut subscription = store.subscribe(&code()).unwrap();
        let guard = Guard::Phase {
            status: GameStatus::Playing,
            round: 1,
        };

        assert_eq!(
            store.update(
                &code(),
                &[Update::Require(guard), Update::Status(GameStatus::RoundOver)]
            ),
            Err(StoreError::GuardFailed(guard))
        );
        assert_eq!(store.get(&code()).unwrap().unwrap().revision, 1);
        assert_eq!(subscription.poll(), Delivery::Unchanged);
    }

    #[test]
    fn writes_from_two_handles_merge() {
        let (store, _) = store();
        let other = store.clone();
        store.create(&code(), document()).unwrap();

        store.update(&code(), &[guesses("host", &["slate"])]).unwrap();
        other.update(&code(), &[guesses("guest", &["crane"])]).unwrap();

        let stored = store.get(&code()).unwrap().unwrap();
        assert_eq!(stored.player(&PlayerId::new("host")).unwrap().guesses, ["slate"]);
        assert_eq!(stored.player(&PlayerId::new("guest")).unwrap().guesses, ["crane"]);
    }

    #[test]
    fn subscription_sees_merged_document() {
        let (store, _) = store();
        store.create(&code(), document()).unwrap();
        let mut subscription = store.subscribe(&code()).unwrap();

        assert_eq!(subscription.current().unwrap().revision, 1);
        assert_eq!(subscription.poll(), Delivery::Unchanged);

        store.update(&code(), &[guesses("host", &["slate"])]).unwrap();
        store.update(&code(), &[guesses("guest", &["crane"])]).unwrap();

        // intermediate states may be skipped; the latest one is delivered
        let Delivery::Changed(seen) = subscription.poll() else {
            panic!("expected a delivery");
        };
        assert_eq!(seen.revision, 3);
        assert_eq!(seen.player(&PlayerId::new("host")).unwrap().guesses, ["slate"]);
        assert_eq!(subscription.poll(), Delivery::Unchanged);
    }

    #[test]
    fn removal_reaches_subscribers() {
        let (store, _) = store();
        store.create(&code(), document()).unwrap();
        let mut subscription = store.subscribe(&code()).unwrap();

        store.remove(&code()).unwrap();
        assert_eq!(subscription.poll(), Delivery::Vanished);
        assert!(store.is_empty());
        assert_eq!(store.remove(&code()), Err(StoreError::NotFound(code())));
        assert_eq!(
            store.update(&code(), &[Update::CurrentRound(2)]),
            Err(StoreError::NotFound(code()))
        );
    }

    #[tokio::test]
    async fn next_waits_for_a_change() {
        let (store, _) = store();
        store.create(&code(), document()).unwrap();
        let mut subscription = store.subscribe(&code()).unwrap();

        store.update(&code(), &[Update::Status(GameStatus::Playing)]).unwrap();
        let Delivery::Changed(seen) = subscription.next().await else {
            panic!("expected a delivery");
        };
        assert_eq!(seen.status, GameStatus::Playing);

        store.remove(&code()).unwrap();
        assert_eq!(subscription.next().await, Delivery::Vanished);
    }
}
