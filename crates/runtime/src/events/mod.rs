//! Event sinks for battle events.
//!
//! The session publishes every [`clash_core::BattleEvent`] emitted during
//! resolution to one [`EventSink`]. Sinks are presentation plumbing: dropping
//! events never changes the battle.

mod sink;

pub use sink::{EventLog, EventSink, EventTotals, TracingSink};
