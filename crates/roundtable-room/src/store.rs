//! Room store: creates, tracks, and expires rooms.
//!
//! # Concurrency
//!
//! Every operation takes one store-wide `Mutex` for its whole duration
//! and runs to completion without awaiting. Room counts are small and
//! operations happen at human speed, so a single lock is plenty. It also
//! makes the multi-room scans consistent and the start-game
//! check-then-deal sequence atomic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use roundtable_roles::{GameInformation, RoomConfiguration};

use crate::{
    RefreshHub, RefreshListener, RefreshReason, Room, RoomError, RoomId, RoomStatus, StoreConfig,
};

/// Everything guarded by the store lock.
#[derive(Default)]
struct StoreInner {
    /// Active rooms, keyed by room ID.
    rooms: HashMap<RoomId, Room>,

    /// Creation counter, used to order listings newest-first.
    next_seq: u64,
}

/// Thread-safe registry of all rooms.
///
/// The single source of truth for which rooms exist and who sits in
/// which room. A player can be in at most ONE room at a time; joins
/// enforce it and [`room_for_player`](Self::room_for_player) reports any
/// breach instead of papering over it.
pub struct RoomStore {
    inner: Mutex<StoreInner>,
    config: StoreConfig,
    refresh: RefreshHub,
}

impl RoomStore {
    /// Creates a new, empty room store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            config,
            refresh: RefreshHub::new(),
        }
    }

    /// Acquires the store lock.
    ///
    /// Every mutation is computed in full before it's written, so the
    /// guarded data is still consistent after a panic elsewhere and a
    /// poisoned lock can be recovered.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("room store lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -- Room registry -----------------------------------------------------

    /// Creates a new room with the default configuration and no players.
    pub fn create_room(&self, creator: &str) -> RoomId {
        let mut inner = self.lock();
        let room_id = RoomId::new();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .rooms
            .insert(room_id, Room::new(room_id, creator.to_string(), seq));
        tracing::info!(%room_id, creator, "room created");
        room_id
    }

    /// Returns a snapshot of a room.
    pub fn get_room(&self, room_id: RoomId) -> Result<Room, RoomError> {
        self.lock()
            .rooms
            .get(&room_id)
            .cloned()
            .ok_or(RoomError::NotFound(room_id))
    }

    /// Finds the room a player is sitting in.
    ///
    /// Returns `Ok(None)` for an empty name or a player in no room.
    ///
    /// # Errors
    /// [`RoomError::InvariantViolation`] if the player turns up in more
    /// than one room.
    pub fn room_for_player(&self, name: &str) -> Result<Option<Room>, RoomError> {
        if name.is_empty() {
            return Ok(None);
        }

        let inner = self.lock();
        let mut found = inner.rooms.values().filter(|room| room.contains(name));
        let first = found.next();
        let extra: Vec<RoomId> = found.map(Room::id).collect();

        match (first, extra.is_empty()) {
            (None, _) => Ok(None),
            (Some(room), true) => Ok(Some(room.clone())),
            (Some(room), false) => {
                tracing::error!(
                    player = name,
                    room_id = %room.id(),
                    others = ?extra,
                    "player found in multiple rooms"
                );
                Err(RoomError::InvariantViolation(format!(
                    "player {name} is in {} rooms",
                    extra.len() + 1
                )))
            }
        }
    }

    /// Listing entries for every room, newest first.
    pub fn list_descriptions(&self) -> Vec<RoomStatus> {
        let inner = self.lock();
        let mut rooms: Vec<&Room> = inner.rooms.values().collect();
        rooms.sort_by(|a, b| b.seq.cmp(&a.seq));
        rooms.into_iter().map(Room::status).collect()
    }

    /// Removes every room older than the configured timeout.
    ///
    /// Returns `true` if anything was removed. Meant to be called
    /// periodically; publishing the refresh is up to the caller.
    pub fn check_expiration(&self) -> bool {
        let timeout = self.config.room_timeout;
        let mut inner = self.lock();
        let before = inner.rooms.len();

        inner.rooms.retain(|room_id, room| {
            let age = room.age();
            if age > timeout {
                tracing::info!(
                    %room_id,
                    age_secs = age.as_secs(),
                    players = room.player_count(),
                    "room expired"
                );
                false
            } else {
                true
            }
        });

        let removed = before - inner.rooms.len();
        tracing::debug!(removed, remaining = inner.rooms.len(), "expiration sweep");
        removed > 0
    }

    /// Returns the number of rooms.
    pub fn room_count(&self) -> usize {
        self.lock().rooms.len()
    }

    /// Lists all room IDs.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.lock().rooms.keys().copied().collect()
    }

    // -- Membership ----------------------------------------------------------

    /// Adds a player to a room.
    ///
    /// Enforces the "one room at a time" invariant.
    pub fn join_room(&self, room_id: RoomId, name: &str) -> Result<(), RoomError> {
        if name.trim().is_empty() {
            return Err(RoomError::InvalidPlayerName);
        }

        let mut inner = self.lock();
        if !inner.rooms.contains_key(&room_id) {
            return Err(RoomError::NotFound(room_id));
        }
        if let Some(current) = inner
            .rooms
            .values()
            .find(|room| room.id() != room_id && room.contains(name))
        {
            return Err(RoomError::InvalidState(format!(
                "player {} is already in room {}",
                name,
                current.id()
            )));
        }

        let room = inner
            .rooms
            .get_mut(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        room.add_player(name)?;
        tracing::info!(
            %room_id,
            player = name,
            players = room.player_count(),
            "player joined"
        );
        Ok(())
    }

    /// Removes a player from a room that hasn't started yet.
    pub fn leave_room(&self, room_id: RoomId, name: &str) -> Result<(), RoomError> {
        let mut inner = self.lock();
        let room = inner
            .rooms
            .get_mut(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        room.remove_player(name)?;
        tracing::info!(
            %room_id,
            player = name,
            players = room.player_count(),
            "player left"
        );
        Ok(())
    }

    /// Replaces a room's configuration before the game starts.
    pub fn update_config(
        &self,
        room_id: RoomId,
        config: RoomConfiguration,
    ) -> Result<(), RoomError> {
        let mut inner = self.lock();
        let room = inner
            .rooms
            .get_mut(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        room.set_config(config)?;
        tracing::debug!(%room_id, config = ?room.config(), "room reconfigured");
        Ok(())
    }

    // -- Game start ----------------------------------------------------------

    /// Starts the game in a room: deals roles and activates it.
    ///
    /// The whole check-deal-activate sequence runs under the store lock,
    /// so two racing starts can't both succeed. Publishes a
    /// [`RefreshReason::GameStarted`] refresh on success.
    ///
    /// # Errors
    /// - [`RoomError::NotFound`]: unknown room
    /// - [`RoomError::InvalidState`]: already started, or no players
    /// - [`RoomError::InvariantViolation`]: role pool doesn't fit the table
    pub fn start_game(&self, room_id: RoomId) -> Result<(), RoomError> {
        {
            let mut inner = self.lock();
            let room = inner
                .rooms
                .get_mut(&room_id)
                .ok_or(RoomError::NotFound(room_id))?;
            room.start_game(&mut rand::rng())?;
            tracing::info!(%room_id, players = room.player_count(), "game started");
        }

        self.refresh.notify(RefreshReason::GameStarted(room_id));
        Ok(())
    }

    /// Returns one player's role and knowledge for a started game.
    pub fn game_information(
        &self,
        room_id: RoomId,
        name: &str,
    ) -> Result<GameInformation, RoomError> {
        let inner = self.lock();
        let room = inner
            .rooms
            .get(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        if !room.is_active() {
            return Err(RoomError::InvalidState(format!(
                "room {room_id} has not started"
            )));
        }
        room.assignments()
            .get(name)
            .cloned()
            .ok_or_else(|| RoomError::NotInRoom(name.to_string(), room_id))
    }

    // -- Refresh -------------------------------------------------------------

    /// Registers a listener for refresh notifications.
    pub fn subscribe(&self) -> RefreshListener {
        self.refresh.subscribe()
    }

    /// The store's refresh hub, for publishing sweeps or forced refreshes.
    pub fn refresh(&self) -> &RefreshHub {
        &self.refresh
    }
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

// =========================================================================
// Tests
// =========================================================================
