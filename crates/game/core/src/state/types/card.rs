//! Cards: an ordered list of dice plus a light cost.

use arrayvec::ArrayVec;

use super::{CardId, Dice};
use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};

/// Bounded dice list of a single card.
pub type CardDice = ArrayVec<Dice, { BattleConfig::MAX_DICE_PER_CARD }>;

/// Errors raised when constructing cards.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("card '{name}' has no dice")]
    NoDice { name: String },

    #[error("card '{name}' has {count} dice (maximum {max})")]
    TooManyDice {
        name: String,
        count: usize,
        max: usize,
    },
}

impl GameError for CardError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoDice { .. } => "CARD_NO_DICE",
            Self::TooManyDice { .. } => "CARD_TOO_MANY_DICE",
        }
    }
}

/// A playable action card.
///
/// While a card sits in a hand or draw pile it is owned by the deck. Playing it
/// moves it into a velocity slot; it is never copied out of the hand.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// Instance id. Assigned by the deck when the copy is created.
    pub id: CardId,
    pub name: String,
    /// Light required to play the card.
    pub cost: u32,
    dice: CardDice,
}

impl Card {
    pub fn new(
        name: impl Into<String>,
        cost: u32,
        dice: impl IntoIterator<Item = Dice>,
    ) -> Result<Self, CardError> {
        let name = name.into();
        let dice: Vec<Dice> = dice.into_iter().collect();

        if dice.is_empty() {
            return Err(CardError::NoDice { name });
        }
        if dice.len() > BattleConfig::MAX_DICE_PER_CARD {
            return Err(CardError::TooManyDice {
                name,
                count: dice.len(),
                max: BattleConfig::MAX_DICE_PER_CARD,
            });
        }

        Ok(Self {
            id: CardId::default(),
            name,
            cost,
            dice: dice.into_iter().collect(),
        })
    }

    #[inline]
    pub fn dice(&self) -> &[Dice] {
        &self.dice
    }

    #[inline]
    pub fn die_mut(&mut self, index: usize) -> Option<&mut Dice> {
        self.dice.get_mut(index)
    }

    /// Number of dice on the card.
    #[inline]
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Clears every rolled value. Called whenever the card is drawn.
    pub fn reset_dice(&mut self) {
        self.dice.iter_mut().for_each(Dice::reset);
    }

    /// Returns a copy with the given instance id and unrolled dice.
    pub(crate) fn instantiate(&self, id: CardId) -> Self {
        let mut copy = self.clone();
        copy.id = id;
        copy.reset_dice();
        copy
    }
}
