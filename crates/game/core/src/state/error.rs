//! State management errors.
//!
//! Errors related to roster construction and capacity limits.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur while adding units to a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// A unit asked for more velocity slots than the engine supports.
    #[error("unit '{name}' requests {requested} velocity slots (max: {max})")]
    TooManySlots {
        name: String,
        requested: usize,
        max: usize,
    },

    /// A unit asked for no velocity slots at all.
    #[error("unit '{name}' needs at least one velocity slot")]
    NoSlots { name: String },

    /// Speed range with `min > max`.
    #[error("unit '{name}' has invalid speed range {min}..={max}")]
    InvalidSpeed { name: String, min: u32, max: u32 },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManySlots { .. } => "STATE_TOO_MANY_SLOTS",
            Self::NoSlots { .. } => "STATE_NO_SLOTS",
            Self::InvalidSpeed { .. } => "STATE_INVALID_SPEED",
        }
    }
}
