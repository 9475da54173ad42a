//! Data-driven battle content and loaders.
//!
//! This crate houses the card pools, rosters and battle configuration that
//! seed a [`clash_core::BattleState`]:
//! - Built-in sample cards and a duel roster (always available)
//! - Card pools (data-driven via RON)
//! - Rosters referencing cards by name (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! Content is consumed when a battle is set up and never appears in battle
//! state beyond the card templates copied into each deck.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::{duel_roster, sample_cards};

#[cfg(feature = "loaders")]
pub use loaders::{
    CardLoader, CardSpec, ConfigLoader, ContentFactory, LoadResult, RosterLoader, UnitEntry,
};
