use std::path::PathBuf;

use crate::rules::{Cell, PlayerId};

/// Errors that can occur when building a board from jump tables.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell {0} jumps to itself")]
    SelfLoop(Cell),

    #[error("jump {from} -> {to} touches the start cell")]
    TouchesStart { from: Cell, to: Cell },

    #[error("snake {head} -> {tail} does not go down")]
    SnakeNotDescending { head: Cell, tail: Cell },

    #[error("ladder {foot} -> {top} does not go up")]
    LadderNotAscending { foot: Cell, top: Cell },

    #[error("cell {0} is both a snake head and a ladder foot")]
    Overlap(Cell),
}

/// Errors returned by the game session when an action does not fit its phase.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("player count must be 2, 3 or 4 (got {0})")]
    InvalidPlayerCount(usize),

    #[error("a turn is already in progress")]
    NotAwaitingRoll,

    #[error("no turn is in progress")]
    NoTurnInProgress,

    #[error("the game is over, {0} won")]
    GameOver(PlayerId),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
