//! Game configuration parsed from environment variables or JSON.
//!
//! Out-of-range values are clamped rather than rejected; only an unknown
//! ruleset name is an error.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{DEFAULT_CAMERA_SPEED, DEFAULT_CELL_SIZE, DEFAULT_TILE_SIZE, MAX_SCENARIO, MIN_TILE_SIZE};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown ruleset '{0}' (expected 'basic' or 'extended')")]
    UnknownRuleset(String),
}

/// Which set of board effects is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    /// Articles are carried by each hero; exits need a stolen article.
    Basic,
    /// Phased game: all heroes on their articles opens the escape phase;
    /// crystals and cameras are active.
    #[default]
    Extended,
}

impl FromStr for Ruleset {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "extended" => Ok(Self::Extended),
            other => Err(ConfigError::UnknownRuleset(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ruleset: Ruleset,
    #[serde(deserialize_with = "deserialize_scenario")]
    pub scenario: u8,
    pub cell_size: f64,
    pub camera_speed: f64,
    pub pause_on_clock_invert: bool,
    /// Lets any player place tiles regardless of roles.
    pub debug: bool,
    #[serde(deserialize_with = "deserialize_tile_size")]
    pub tile_size: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::Extended,
            scenario: 1,
            cell_size: DEFAULT_CELL_SIZE,
            camera_speed: DEFAULT_CAMERA_SPEED,
            pause_on_clock_invert: false,
            debug: false,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl GameConfig {
    /// Build config from environment variables.
    ///
    /// - `MAZE_RULESET`: `extended` (default) or `basic`
    /// - `MAZE_SCENARIO`: default 1, clamped to `1..=7`
    /// - `MAZE_CELL_SIZE`: default 40
    /// - `MAZE_CAMERA_SPEED`: default 10
    /// - `MAZE_PAUSE_ON_INVERT`: default false
    /// - `MAZE_DEBUG`: default false
    /// - `MAZE_TILE_SIZE`: default 4, at least 2
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRuleset`] for an unrecognized ruleset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownRuleset`] for an unrecognized ruleset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ruleset = match lookup("MAZE_RULESET") {
            Some(raw) => raw.parse()?,
            None => defaults.ruleset,
        };

        Ok(Self {
            ruleset,
            scenario: clamp_scenario(parse_or(&lookup, "MAZE_SCENARIO", i64::from(defaults.scenario))),
            cell_size: parse_or(&lookup, "MAZE_CELL_SIZE", defaults.cell_size),
            camera_speed: parse_or(&lookup, "MAZE_CAMERA_SPEED", defaults.camera_speed),
            pause_on_clock_invert: parse_or(&lookup, "MAZE_PAUSE_ON_INVERT", defaults.pause_on_clock_invert),
            debug: parse_or(&lookup, "MAZE_DEBUG", defaults.debug),
            tile_size: parse_or(&lookup, "MAZE_TILE_SIZE", defaults.tile_size).max(MIN_TILE_SIZE),
        })
    }

    /// Copy with the scenario tier clamped into the supported range.
    #[must_use]
    pub fn with_scenario(mut self, scenario: i64) -> Self {
        self.scenario = clamp_scenario(scenario);
        self
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Clamp a scenario tier into `1..=MAX_SCENARIO`.
#[must_use]
pub fn clamp_scenario(raw: i64) -> u8 {
    u8::try_from(raw.clamp(1, i64::from(MAX_SCENARIO))).unwrap_or(1)
}

fn deserialize_scenario<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_scenario)
}

fn deserialize_tile_size<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    i32::deserialize(deserializer).map(|size| size.max(MIN_TILE_SIZE))
}
