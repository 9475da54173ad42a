//! Dice: the atomic sub-actions a card is made of.

use crate::env::{RngOracle, compute_seed, context};
use crate::error::{ErrorSeverity, GameError};

/// Concrete kind of a die.
///
/// The three attack kinds share the [`DiceClass::Attack`] interaction rules
/// but are looked up separately in resistance tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DiceKind {
    Slash,
    Pierce,
    Blunt,
    Guard,
    Evade,
}

impl DiceKind {
    /// Interaction class used by the clash matrix.
    pub const fn class(self) -> DiceClass {
        match self {
            Self::Slash | Self::Pierce | Self::Blunt => DiceClass::Attack,
            Self::Guard => DiceClass::Guard,
            Self::Evade => DiceClass::Evade,
        }
    }

    #[inline]
    pub const fn is_attack(self) -> bool {
        matches!(self.class(), DiceClass::Attack)
    }
}

/// Closed tag set the interaction matrix is defined over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiceClass {
    Attack,
    Guard,
    Evade,
}

/// Errors raised when constructing dice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("invalid die range {min}..={max}")]
    InvalidRange { min: u32, max: u32 },
}

impl GameError for DiceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "DICE_INVALID_RANGE",
        }
    }
}

/// One die of a card: a declared value range, a kind and the last rolled value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dice {
    min: u32,
    max: u32,
    kind: DiceKind,
    value: Option<u32>,
}

impl Dice {
    pub fn new(kind: DiceKind, min: u32, max: u32) -> Result<Self, DiceError> {
        if min > max {
            return Err(DiceError::InvalidRange { min, max });
        }
        Ok(Self {
            min,
            max,
            kind,
            value: None,
        })
    }

    #[inline]
    pub fn kind(&self) -> DiceKind {
        self.kind
    }

    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Last rolled value, `None` until the die has been rolled this round.
    #[inline]
    pub fn value(&self) -> Option<u32> {
        self.value
    }

    /// Rolls a fresh uniform value in `[min, max]` and stores it.
    pub fn roll(
        &mut self,
        rng: &(impl RngOracle + ?Sized),
        battle_seed: u64,
        nonce: u64,
        owner: u32,
    ) -> u32 {
        let seed = compute_seed(battle_seed, nonce, owner, context::DIE_ROLL);
        let value = rng.range(seed, self.min, self.max);
        self.value = Some(value);
        value
    }

    /// Forgets the rolled value.
    pub fn reset(&mut self) {
        self.value = None;
    }
}
