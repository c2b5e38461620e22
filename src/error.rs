//! Error types.
//!
//! Argument and configuration problems are reported as [`TspError`] values.
//! Broken permutation invariants are programming errors and surface as
//! `debug_assert!` failures instead.

use thiserror::Error;

/// Errors produced by the distance model, the genetic operators and the
/// configuration layer.
#[derive(Debug, Error)]
pub enum TspError {
    /// An order is not a permutation of `0..n`, has the wrong length, or two
    /// chromosomes being recombined do not share a distance model.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The input cannot produce a meaningful fitness value (zero-length tour,
    /// fewer than two cities).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A [`GaConfig`](crate::ga::GaConfig) parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed city coordinate text.
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TspError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TspError>;
