//! Content factory for loading a whole battle setup from a data directory.

use std::path::{Path, PathBuf};

use clash_core::{BattleConfig, Card, UnitSpec};

use crate::loaders::{CardLoader, ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── cards.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the card pool from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<Vec<Card>> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load the roster from `roster.ron`, resolving decks against `cards.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<UnitSpec>> {
        let cards = self.load_cards()?;
        RosterLoader::load(&self.data_dir.join("roster.ron"), &cards)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
