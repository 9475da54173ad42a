//! Plan provider implementations for different side behaviors.

pub mod random;
pub mod scripted;

pub use random::RandomPlanner;
pub use scripted::ScriptedPlanner;
