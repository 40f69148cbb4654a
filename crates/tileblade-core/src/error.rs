//! Error types for configuration loading and player actions.
//!
//! Configuration errors are fatal at load time and are surfaced to whoever
//! loads the tables. Action errors are non-fatal: the requested action is
//! rejected and the simulation state is left untouched.

use std::path::PathBuf;

use thiserror::Error;

use crate::actor::EnemyKind;
use crate::entity::EntityId;

/// Errors raised while loading or validating a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid JSON for the expected schema.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// No stat entry for an enemy kind.
    #[error("missing stats for enemy kind `{0}`")]
    MissingEnemy(EnemyKind),

    /// The weapon catalogue is empty.
    #[error("weapon table is empty")]
    NoWeapons,

    /// The spell catalogue is empty.
    #[error("spell table is empty")]
    NoSpells,

    /// Two catalogue entries share a name.
    #[error("duplicate {table} entry `{name}`")]
    DuplicateEntry {
        /// Table containing the duplicate (`"weapon"` or `"spell"`)
        table: &'static str,
        /// The repeated name
        name: String,
    },

    /// A numeric field is outside its valid range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// Why the value was rejected
        reason: &'static str,
    },
}

/// Errors returned when a requested action is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// A spell was cast without enough energy. Nothing was consumed.
    #[error("not enough energy: {required} required, {available} available")]
    InsufficientEnergy {
        /// Energy cost of the spell
        required: f32,
        /// Energy the caster had
        available: f32,
    },

    /// The referenced entity does not exist (or is not of the expected kind).
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for player actions.
pub type ActionResult<T> = Result<T, ActionError>;
