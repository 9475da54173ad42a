//! Combat resolution rules.
//!
//! Pure, side-effect free building blocks used by the engine:
//!
//! - [`clash::evaluate`]: pairs committed slots into clashes and one-sided attacks
//! - [`exchange::resolve_exchange`]: the dice-versus-dice interaction matrix
//! - [`damage`]: resistance scaling of incoming damage

pub mod clash;
pub mod damage;
pub mod exchange;

pub use clash::{ClashInfo, ClashKind, evaluate};
pub use damage::{Pool, Resistance, ResistanceTable, Resistances};
pub use exchange::{Advance, Effect, Exchange, PairSide, RolledDie, resolve_exchange};
