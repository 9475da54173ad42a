//! External collaborators the engine reads from.
//!
//! The only environment the resolver needs is randomness, supplied through the
//! [`RngOracle`] trait so callers can swap the default PCG generator for a
//! scripted one in tests or replays.
mod rng;

pub use rng::{PcgRng, RngOracle, ScriptedRng, compute_seed, context};
