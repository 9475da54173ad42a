pub mod card;
pub mod common;
pub mod deck;
pub mod dice;
pub mod slot;
pub mod unit;

pub use card::{Card, CardDice, CardError};
pub use common::{CardId, ResourceMeter, Side, SlotId, UnitId};
pub use deck::{Deck, DrawReport};
pub use dice::{Dice, DiceClass, DiceError, DiceKind};
pub use slot::VelocitySlot;
pub use unit::{SpeedRange, Unit, UnitSpec};
