//! Error types for the room layer.

use crate::RoomId;

/// Errors that can occur during room operations.
///
/// None of these are transient. They are returned to the immediate
/// caller, which turns them into something a player can read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist (never created, or already expired).
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// Store data contradicts itself, e.g. a player sitting in two
    /// rooms at once or a role pool that doesn't fit the table.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The room is in a state that doesn't allow this operation.
    /// For example, joining or restarting a room whose game has begun.
    #[error("invalid room state for this operation: {0}")]
    InvalidState(String),

    /// Every seat in the room is taken.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The player is already in this room.
    #[error("player {0} already in room {1}")]
    AlreadyInRoom(String, RoomId),

    /// The player is not in this room.
    #[error("player {0} not in room {1}")]
    NotInRoom(String, RoomId),

    /// Player display names must contain something besides whitespace.
    #[error("player name must not be empty")]
    InvalidPlayerName,
}
