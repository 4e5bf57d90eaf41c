//! Room lifecycle management for Roundtable.
//!
//! All rooms live in a single [`RoomStore`] behind one store-wide lock.
//! Rooms are created empty, filled by players joining, started exactly
//! once, and removed only when they age past the store's timeout.
//!
//! # Key types
//!
//! - [`RoomStore`]: creates rooms, routes players, runs the expiration sweep
//! - [`Room`]: one game table: creator, config, players, assignments
//! - [`RoomStatus`]: the listing projection of a room
//! - [`StoreConfig`]: room timeout and other store settings
//! - [`RefreshHub`] / [`RefreshListener`]: "something changed" fan-out

mod config;
mod error;
mod refresh;
mod room;
mod store;

pub use config::StoreConfig;
pub use error::RoomError;
pub use refresh::{Refresh, RefreshHub, RefreshListener, RefreshReason};
pub use room::{Room, RoomId, RoomStatus};
pub use store::RoomStore;

pub use roundtable_roles::{GameInformation, Role, RoomConfiguration};
