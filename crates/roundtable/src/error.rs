//! Unified error type for Roundtable.

use roundtable_roles::AssignmentError;
use roundtable_room::RoomError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RoundtableError {
    /// A room-level error (not found, full, invalid state, invariant).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Dealing roles directly through the engine failed.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    /// The background sweeper task panicked or was cancelled.
    #[error("expiration sweeper stopped abnormally: {0}")]
    Sweeper(#[from] tokio::task::JoinError),
}
