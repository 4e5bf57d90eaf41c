//! Dealing roles to players.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{AssignmentError, Role, RolePool, disclose};

/// What one player learns when the game starts: their own role and a
/// list of statements about other players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInformation {
    pub role: Role,
    pub knowledge: Vec<String>,
}

/// Deals `pool` to `players` and computes each player's knowledge.
///
/// Every player draws uniformly from the roles still left in the pool,
/// so the result is a uniformly random bijection between players and
/// pool slots. The pool must hold exactly one role per player.
///
/// # Errors
/// - [`AssignmentError::NoPlayers`] if `players` is empty
/// - [`AssignmentError::PoolSizeMismatch`] if the sizes differ
pub fn assign_roles<R: Rng + ?Sized>(
    players: &BTreeSet<String>,
    pool: RolePool,
    rng: &mut R,
) -> Result<BTreeMap<String, GameInformation>, AssignmentError> {
    if players.is_empty() {
        return Err(AssignmentError::NoPlayers);
    }
    if pool.len() != players.len() {
        tracing::error!(
            pool = pool.len(),
            players = players.len(),
            "role pool does not match player count"
        );
        return Err(AssignmentError::PoolSizeMismatch {
            pool: pool.len(),
            players: players.len(),
        });
    }

    let mut remaining = pool.into_roles();
    let mut dealt = BTreeMap::new();
    for name in players {
        let index = rng.random_range(0..remaining.len());
        // Order of the remaining roles doesn't matter, only membership.
        dealt.insert(name.clone(), remaining.swap_remove(index));
    }
    debug_assert!(remaining.is_empty());

    let mut knowledge = disclose(&dealt);
    let assignments = dealt
        .into_iter()
        .map(|(name, role)| {
            let knowledge = knowledge.remove(&name).unwrap_or_default();
            (name, GameInformation { role, knowledge })
        })
        .collect();

    tracing::debug!(players = players.len(), "roles assigned");
    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::RoomConfiguration;

    fn players(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_assign_roles_consumes_whole_pool() {
        let names = players(&["a", "b", "c", "d", "e", "f", "g"]);
        let pool = RolePool::build(&RoomConfiguration::default());
        let mut expected: Vec<Role> = pool.roles().to_vec();

        let assignments =
            assign_roles(&names, pool, &mut StdRng::seed_from_u64(7)).expect("sizes match");

        assert_eq!(assignments.len(), 7);
        assert!(names.iter().all(|n| assignments.contains_key(n)));
        let mut dealt: Vec<Role> = assignments.values().map(|info| info.role).collect();
        dealt.sort();
        expected.sort();
        assert_eq!(dealt, expected);
    }

    #[test]
    fn test_assign_roles_is_reproducible_with_same_seed() {
        let names = players(&["a", "b", "c", "d", "e", "f", "g"]);
        let config = RoomConfiguration::default();
        let first = assign_roles(
            &names,
            RolePool::build(&config),
            &mut StdRng::seed_from_u64(42),
        );
        let second = assign_roles(
            &names,
            RolePool::build(&config),
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_assign_roles_size_mismatch_is_rejected() {
        let names = players(&["a", "b", "c"]);
        let pool = RolePool::build(&RoomConfiguration::default());
        let err = assign_roles(&names, pool, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(
            err,
            AssignmentError::PoolSizeMismatch {
                pool: 7,
                players: 3
            }
        );
    }

    #[test]
    fn test_assign_roles_empty_players_is_rejected() {
        let pool = RolePool::from(Vec::new());
        let err =
            assign_roles(&BTreeSet::new(), pool, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err, AssignmentError::NoPlayers);
    }

    #[test]
    fn test_assign_roles_explicit_pool_attaches_knowledge() {
        let names = players(&["merlin-player", "minion"]);
        let pool = RolePool::from(vec![Role::Merlin, Role::GenericEvil]);
        let assignments =
            assign_roles(&names, pool, &mut StdRng::seed_from_u64(3)).expect("sizes match");

        let (merlin, minion) = if assignments["merlin-player"].role == Role::Merlin {
            ("merlin-player", "minion")
        } else {
            ("minion", "merlin-player")
        };
        assert_eq!(
            assignments[merlin].knowledge,
            vec![format!("{minion} is evil.")]
        );
        assert!(assignments[minion].knowledge.is_empty());
    }
}
