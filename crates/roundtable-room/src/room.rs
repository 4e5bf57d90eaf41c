//! Rooms: one game table each.
//!
//! A room is created empty and inactive. While inactive, players come
//! and go and the configuration can change. Starting the game deals
//! roles to the current players, freezes the player set, and flips the
//! room to active for good.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use roundtable_roles::{GameInformation, RolePool, RoomConfiguration, assign_roles};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use crate::RoomError;

// ---------------------------------------------------------------------------
// RoomId
// ---------------------------------------------------------------------------

/// Opaque unique identifier for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(Uuid);

impl RoomId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RoomId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// Read-only listing entry for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatus {
    pub id: RoomId,
    /// `"(<players>/<num_players> players)"`
    pub status: String,
    /// `"<creator>'s Room"`
    pub name: String,
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// One game table.
///
/// Values handed out by the store are snapshots; mutating a room goes
/// through [`RoomStore`](crate::RoomStore).
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    creator: String,
    created_at: Instant,
    /// Store-local creation order, newest has the highest value.
    pub(crate) seq: u64,
    active: bool,
    config: RoomConfiguration,
    players: BTreeSet<String>,
    /// Empty until the game starts. Keyed by exactly the players present
    /// at start.
    assignments: BTreeMap<String, GameInformation>,
}

impl Room {
    pub(crate) fn new(id: RoomId, creator: String, seq: u64) -> Self {
        Self {
            id,
            creator,
            created_at: Instant::now(),
            seq,
            active: false,
            config: RoomConfiguration::default(),
            players: BTreeSet::new(),
            assignments: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Time elapsed since creation.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.created_at)
    }

    /// `true` once the game has started. Never goes back to `false`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &RoomConfiguration {
        &self.config
    }

    pub fn players(&self) -> &BTreeSet<String> {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.contains(name)
    }

    pub fn assignments(&self) -> &BTreeMap<String, GameInformation> {
        &self.assignments
    }

    /// The listing projection of this room.
    pub fn status(&self) -> RoomStatus {
        RoomStatus {
            id: self.id,
            status: format!(
                "({}/{} players)",
                self.players.len(),
                self.config.num_players
            ),
            name: format!("{}'s Room", self.creator),
        }
    }

    // -- Mutation (store only) ---------------------------------------------

    pub(crate) fn add_player(&mut self, name: &str) -> Result<(), RoomError> {
        if self.active {
            return Err(RoomError::InvalidState(format!(
                "room {} has already started",
                self.id
            )));
        }
        if self.players.contains(name) {
            return Err(RoomError::AlreadyInRoom(name.to_string(), self.id));
        }
        if self.players.len() >= self.config.num_players {
            return Err(RoomError::RoomFull(self.id));
        }
        self.players.insert(name.to_string());
        Ok(())
    }

    pub(crate) fn remove_player(&mut self, name: &str) -> Result<(), RoomError> {
        if self.active {
            return Err(RoomError::InvalidState(format!(
                "players cannot leave room {} after the game started",
                self.id
            )));
        }
        if !self.players.remove(name) {
            return Err(RoomError::NotInRoom(name.to_string(), self.id));
        }
        Ok(())
    }

    pub(crate) fn set_config(&mut self, config: RoomConfiguration) -> Result<(), RoomError> {
        if self.active {
            return Err(RoomError::InvalidState(format!(
                "room {} cannot be reconfigured after the game started",
                self.id
            )));
        }
        if !config.has_valid_seat_count() {
            return Err(RoomError::InvalidState(format!(
                "room {} cannot seat {} players (1 to {} allowed)",
                self.id,
                config.num_players,
                RoomConfiguration::MAX_PLAYERS
            )));
        }
        if config.num_players < self.players.len() {
            return Err(RoomError::InvalidState(format!(
                "room {} has {} players, cannot set player count to {}",
                self.id,
                self.players.len(),
                config.num_players
            )));
        }
        self.config = config;
        Ok(())
    }

    /// Deals roles and activates the room.
    ///
    /// The room is only touched once the deal has succeeded, so a failed
    /// start leaves it exactly as it was.
    pub(crate) fn start_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), RoomError> {
        if self.active {
            return Err(RoomError::InvalidState(format!(
                "room {} has already started",
                self.id
            )));
        }
        if self.players.is_empty() {
            return Err(RoomError::InvalidState(format!(
                "room {} has no players",
                self.id
            )));
        }

        if self.players.len() != self.config.num_players {
            tracing::error!(
                room_id = %self.id,
                players = self.players.len(),
                seats = self.config.num_players,
                "player count does not match configured seats"
            );
            return Err(RoomError::InvariantViolation(format!(
                "room {} is configured for {} players but has {}",
                self.id,
                self.config.num_players,
                self.players.len()
            )));
        }

        let pool = RolePool::build(&self.config);
        let assignments = assign_roles(&self.players, pool, rng)
            .map_err(|e| RoomError::InvariantViolation(format!("room {}: {e}", self.id)))?;

        self.assignments = assignments;
        self.active = true;
        Ok(())
    }
}
