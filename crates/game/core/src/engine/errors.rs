//! Error types for planning input.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CardId, SlotId, UnitId};

/// Reasons a commitment (or a withdrawal) is rejected.
///
/// A rejected request leaves the battle state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommitError {
    #[error("{slot} does not exist")]
    UnknownSlot { slot: SlotId },

    #[error("{slot} has no rolled priority this round")]
    NotRolled { slot: SlotId },

    #[error("{slot} already holds a card")]
    AlreadyCommitted { slot: SlotId },

    #[error("{slot} holds no card")]
    NothingCommitted { slot: SlotId },

    #[error("unit {unit} is dead")]
    OwnerDead { unit: UnitId },

    #[error("unit {unit} is incapacitated")]
    OwnerIncapacitated { unit: UnitId },

    #[error("{card} is not in the hand of unit {unit}")]
    CardNotInHand { unit: UnitId, card: CardId },

    #[error("unit {unit} needs {cost} light but has {available}")]
    NotEnoughLight {
        unit: UnitId,
        cost: u32,
        available: u32,
    },

    #[error("target {target} does not exist")]
    UnknownTarget { target: SlotId },

    #[error("{slot} cannot target {target} on its own side")]
    SameSide { slot: SlotId, target: SlotId },

    #[error("hand of unit {unit} is full")]
    HandFull { unit: UnitId },
}

impl GameError for CommitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughLight { .. } => ErrorSeverity::Recoverable,
            Self::UnknownSlot { .. }
            | Self::NotRolled { .. }
            | Self::AlreadyCommitted { .. }
            | Self::NothingCommitted { .. }
            | Self::OwnerDead { .. }
            | Self::OwnerIncapacitated { .. }
            | Self::CardNotInHand { .. }
            | Self::UnknownTarget { .. }
            | Self::SameSide { .. }
            | Self::HandFull { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSlot { .. } => "COMMIT_UNKNOWN_SLOT",
            Self::NotRolled { .. } => "COMMIT_NOT_ROLLED",
            Self::AlreadyCommitted { .. } => "COMMIT_ALREADY_COMMITTED",
            Self::NothingCommitted { .. } => "COMMIT_NOTHING_COMMITTED",
            Self::OwnerDead { .. } => "COMMIT_OWNER_DEAD",
            Self::OwnerIncapacitated { .. } => "COMMIT_OWNER_INCAPACITATED",
            Self::CardNotInHand { .. } => "COMMIT_CARD_NOT_IN_HAND",
            Self::NotEnoughLight { .. } => "COMMIT_NOT_ENOUGH_LIGHT",
            Self::UnknownTarget { .. } => "COMMIT_UNKNOWN_TARGET",
            Self::SameSide { .. } => "COMMIT_SAME_SIDE",
            Self::HandFull { .. } => "COMMIT_HAND_FULL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_light_is_recoverable() {
        let short = CommitError::NotEnoughLight {
            unit: UnitId(0),
            cost: 2,
            available: 1,
        };
        assert!(short.severity().is_recoverable());
        assert_eq!(short.error_code(), "COMMIT_NOT_ENOUGH_LIGHT");

        let same_side = CommitError::SameSide {
            slot: SlotId(0),
            target: SlotId(1),
        };
        assert_eq!(same_side.severity(), ErrorSeverity::Validation);
        assert_eq!(same_side.error_code(), "COMMIT_SAME_SIDE");
    }
}
