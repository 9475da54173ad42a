//! Runtime orchestration for clash battles.
//!
//! This crate wires the pure [`clash_core`] engine to the outside world: plan
//! providers choose each side's commitments, event sinks receive resolution
//! events, and [`BattleSession`] walks the round phases.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the battle driver and its builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] holds the bundled plan providers
//! - [`events`] provides event sinks and the in-memory event log
pub mod api;
pub mod events;
pub mod providers;
pub mod session;

pub use api::{Commitment, IdlePlanner, PlanProvider, Result, RuntimeError};
pub use events::{EventLog, EventSink, EventTotals, TracingSink};
pub use providers::{RandomPlanner, ScriptedPlanner};
pub use session::{BattleSession, RunSummary, SessionBuilder, SessionPhase, SessionStep};
