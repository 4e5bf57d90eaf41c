//! Role assignment for Roundtable.
//!
//! Given a room's configuration and its finalized player set, this crate
//! builds the role pool, deals one role to every player, and works out
//! what each player is allowed to know about the others.
//!
//! # Key types
//!
//! - [`RoomConfiguration`]: player count and special-role toggles
//! - [`RolePool`]: the multiset of roles to deal, built from a config
//! - [`Role`] / [`Alignment`]: who a player is and which side they're on
//! - [`GameInformation`]: one player's role plus their disclosure statements
//! - [`assign_roles`]: the entry point that does all of the above
//!
//! # Flow
//!
//! ```text
//! RoomConfiguration → RolePool::build → assign_roles(players, pool, rng)
//!                                             │
//!                           deal (without replacement) → disclose
//! ```

mod assign;
mod config;
mod error;
mod knowledge;
mod pool;
mod role;

pub use assign::{GameInformation, assign_roles};
pub use config::RoomConfiguration;
pub use error::AssignmentError;
pub use knowledge::{Disclosure, disclose};
pub use pool::RolePool;
pub use role::{Alignment, Role};
