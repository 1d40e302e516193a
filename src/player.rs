//! The local player's role cards.

#[cfg(test)]
#[path = "player_test.rs"]
mod player_test;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// An action a role card allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Explore,
    North,
    East,
    South,
    West,
}

/// The local player's current roles and the pool future assignments are
/// drawn from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub role_pool: Vec<Vec<Role>>,
}

impl Player {
    #[must_use]
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles, role_pool: Vec::new() }
    }

    #[must_use]
    pub fn with_role_pool(mut self, pool: Vec<Vec<Role>>) -> Self {
        self.role_pool = pool;
        self
    }

    /// A player with no roles only watches.
    #[must_use]
    pub fn is_spectator(&self) -> bool {
        self.roles.is_empty()
    }

    #[must_use]
    pub fn can_explore(&self) -> bool {
        self.roles.contains(&Role::Explore)
    }

    /// Shuffle the pool of future role assignments.
    pub fn shuffle_role_pool(&mut self) {
        self.role_pool.shuffle(&mut rand::rng());
    }
}
