//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from battle setup and session driving so clients can bubble
//! them up with consistent context.
use clash_core::{ErrorSeverity, GameError, Side, StateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{side} plan provider not set")]
    ProviderNotSet { side: Side },

    #[error("roster is empty")]
    EmptyRoster,

    #[error("failed to spawn unit")]
    Spawn(#[from] StateError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ProviderNotSet { .. } | Self::EmptyRoster => ErrorSeverity::Validation,
            Self::Spawn(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            Self::EmptyRoster => "RUNTIME_EMPTY_ROSTER",
            Self::Spawn(_) => "RUNTIME_SPAWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_errors_keep_their_severity() {
        let err = RuntimeError::from(StateError::NoSlots {
            name: "Roland".into(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "RUNTIME_SPAWN");
        assert_eq!(
            RuntimeError::ProviderNotSet { side: Side::Enemy }.to_string(),
            "enemy plan provider not set"
        );
    }
}
