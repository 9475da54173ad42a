//! Battle content selection.

use anyhow::Result;
use clash_content::{CardLoader, ConfigLoader, RosterLoader, duel_roster, sample_cards};
use clash_core::{BattleConfig, UnitSpec};

use crate::config::ClientConfig;

/// Everything needed to spawn a battle.
#[derive(Clone, Debug)]
pub struct BattleSetup {
    pub config: BattleConfig,
    pub roster: Vec<UnitSpec>,
}

impl BattleSetup {
    /// Loads the configured files, falling back to built-in content for
    /// anything not set.
    pub fn load(client: &ClientConfig) -> Result<Self> {
        let config = match &client.config {
            Some(path) => ConfigLoader::load(path)?,
            None => BattleConfig::default(),
        };

        let cards = match &client.cards {
            Some(path) => CardLoader::load(path)?,
            None => sample_cards(),
        };

        let roster = match &client.roster {
            Some(path) => RosterLoader::load(path, &cards)?,
            None if client.cards.is_some() => {
                anyhow::bail!("CLASH_CARDS is set but CLASH_ROSTER is not")
            }
            None => duel_roster(),
        };
        if roster.is_empty() {
            anyhow::bail!("roster has no units");
        }

        tracing::debug!(
            units = roster.len(),
            cards = cards.len(),
            "battle content loaded"
        );
        Ok(Self { config, roster })
    }
}
