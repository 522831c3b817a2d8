//! Engine error type.
//!
//! The engine does no I/O during play, so the only recoverable failures
//! are bad input at the edges: a direction name that doesn't parse, or a
//! configuration that can't be loaded. Caller misuse inside the engine
//! (sampling a full board, double-occupying a cell) panics instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown direction {0:?} (expected left, right, up or down)")]
    InvalidDirection(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
