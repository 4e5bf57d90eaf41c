//! Per-room game configuration.

use serde::{Deserialize, Serialize};

/// Game settings chosen by the room owner before the game starts.
///
/// Every field has a default, so a partially filled config from the
/// presentation layer deserializes into something playable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfiguration {
    /// Target number of players. Drives the evil quota and the pool size.
    pub num_players: usize,

    pub has_merlin: bool,
    pub has_percival: bool,
    pub has_mordred: bool,
    pub has_morganna: bool,
    pub has_assassin: bool,
    pub has_oberon: bool,

    /// Reserved for the Lady of the Lake variant. Stored and round-tripped
    /// but not consumed by role assignment.
    pub lake_shows_roles: bool,
}

impl Default for RoomConfiguration {
    fn default() -> Self {
        Self {
            num_players: 7,
            has_merlin: true,
            has_percival: true,
            has_mordred: true,
            has_morganna: true,
            has_assassin: true,
            has_oberon: false,
            lake_shows_roles: false,
        }
    }
}

impl RoomConfiguration {
    /// Largest table a room can be configured for.
    pub const MAX_PLAYERS: usize = 12;

    /// Whether `num_players` is a seat count a room can actually hold.
    pub fn has_valid_seat_count(&self) -> bool {
        (1..=Self::MAX_PLAYERS).contains(&self.num_players)
    }

    /// Number of evil seats for the configured player count.
    ///
    /// ```text
    /// players  < 7   → 2
    /// players  7..10 → 3
    /// players >= 10  → 4
    /// ```
    pub fn evil_quota(&self) -> usize {
        match self.num_players {
            0..7 => 2,
            7..10 => 3,
            _ => 4,
        }
    }
}
