//! Role pool construction.

use crate::{Role, RoomConfiguration};

/// The roles to be dealt for one game, one entry per seat.
///
/// Built deterministically from a [`RoomConfiguration`]: evil specials
/// first, padded with generic evil up to the quota, then good specials,
/// padded with generic good up to the player count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePool {
    roles: Vec<Role>,
}

impl RolePool {
    /// Builds the pool for a configuration.
    ///
    /// If the enabled evil specials already meet or exceed the quota, no
    /// generic evil is added and the evil side ends up larger than the
    /// quota. Likewise the pool can end up larger than `num_players` when
    /// too many specials are enabled for a small table; [`assign_roles`]
    /// rejects that case.
    ///
    /// Generic good padding stops at [`RoomConfiguration::MAX_PLAYERS`],
    /// so an oversized config yields a short pool instead of an unbounded
    /// allocation. The size check in [`assign_roles`] then rejects it.
    ///
    /// [`assign_roles`]: crate::assign_roles
    pub fn build(config: &RoomConfiguration) -> Self {
        let quota = config.evil_quota();
        let target = config.num_players.min(RoomConfiguration::MAX_PLAYERS);
        let mut roles = Vec::with_capacity(target.max(quota));

        let evil_specials = [
            (config.has_assassin, Role::Assassin),
            (config.has_mordred, Role::Mordred),
            (config.has_morganna, Role::Morganna),
            (config.has_oberon, Role::Oberon),
        ];
        roles.extend(
            evil_specials
                .into_iter()
                .filter_map(|(enabled, role)| enabled.then_some(role)),
        );
        while roles.len() < quota {
            roles.push(Role::GenericEvil);
        }

        let good_specials = [
            (config.has_merlin, Role::Merlin),
            (config.has_percival, Role::Percival),
        ];
        roles.extend(
            good_specials
                .into_iter()
                .filter_map(|(enabled, role)| enabled.then_some(role)),
        );
        while roles.len() < target {
            roles.push(Role::GenericGood);
        }

        Self { roles }
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Number of evil roles in the pool (Oberon included).
    pub fn evil_count(&self) -> usize {
        self.roles.iter().filter(|r| r.is_evil()).count()
    }

    /// How many copies of `role` the pool holds.
    pub fn count(&self, role: Role) -> usize {
        self.roles.iter().filter(|r| **r == role).count()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub(crate) fn into_roles(self) -> Vec<Role> {
        self.roles
    }
}

impl From<Vec<Role>> for RolePool {
    fn from(roles: Vec<Role>) -> Self {
        Self { roles }
    }
}
