//! Error types for role assignment.

/// Errors that can occur while dealing roles.
///
/// Both variants mean the inputs were internally inconsistent. They are
/// not user-facing validation failures; the room layer reports them as
/// invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// The pool built from the configuration doesn't hold exactly one
    /// role per player.
    #[error("role pool holds {pool} roles but there are {players} players")]
    PoolSizeMismatch { pool: usize, players: usize },

    /// There was nobody to deal to.
    #[error("cannot assign roles to an empty player set")]
    NoPlayers,
}
