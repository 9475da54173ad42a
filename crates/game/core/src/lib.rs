//! Deterministic clash resolution shared by every front end.
//!
//! `clash-core` defines the canonical battle rules: the data model (dice,
//! cards, decks, units, velocity slots), the clash evaluator, the dice
//! interaction matrix and the step-driven resolver. It performs no I/O and
//! draws all randomness from a seeded [`env::RngOracle`], so a battle replays
//! exactly from its seed and commitments. Round lifecycle and planning input
//! flow through [`engine::BattleEngine`]; resolution through
//! [`engine::Resolver`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use combat::{
    Advance, ClashInfo, ClashKind, Effect, Exchange, PairSide, Pool, Resistance, ResistanceTable,
    Resistances, RolledDie, evaluate, resolve_exchange,
};
pub use config::BattleConfig;
pub use engine::{
    BattleEngine, BattleEvent, BattleOutcome, CommitError, ResolvePhase, Resolver, ResolverPair,
    RoundReport, StepOutcome, StepPlan, StepResult, outcome,
};
pub use env::{PcgRng, RngOracle, ScriptedRng, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    BattleState, Card, CardError, CardId, Deck, Dice, DiceClass, DiceError, DiceKind, DrawReport,
    ResourceMeter, Side, SlotId, SlotSummary, SpeedRange, StateError, Unit, UnitId, UnitSpec,
    UnitSummary, VelocitySlot,
};
