//! Roster loader.
//!
//! Rosters reference cards by name; the loader resolves each name against a
//! card pool loaded beforehand.

use std::path::Path;

use anyhow::Context;
use clash_core::{Card, ResistanceTable, Resistances, Side, UnitSpec};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Unit definition as written in RON files.
///
/// ```ron
/// (
///     name: "Roland",
///     side: Ally,
///     speed: (1, 6),
///     hp_resist: (slash: Resist),
///     deck: ["Cut", "Cut", "Brace"],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitEntry {
    pub name: String,
    pub side: Side,
    #[serde(default = "UnitEntry::default_hp")]
    pub hp: u32,
    #[serde(default = "UnitEntry::default_composure")]
    pub composure: u32,
    #[serde(default = "UnitEntry::default_light")]
    pub light: u32,
    #[serde(default = "UnitEntry::default_speed")]
    pub speed: (u32, u32),
    #[serde(default)]
    pub hp_resist: ResistanceTable,
    #[serde(default)]
    pub composure_resist: ResistanceTable,
    #[serde(default = "UnitEntry::default_slots")]
    pub slots: usize,
    /// Card names; a name listed twice puts two copies in the pool.
    pub deck: Vec<String>,
}

impl UnitEntry {
    fn default_hp() -> u32 {
        30
    }

    fn default_composure() -> u32 {
        10
    }

    fn default_light() -> u32 {
        3
    }

    fn default_speed() -> (u32, u32) {
        (1, 6)
    }

    fn default_slots() -> usize {
        1
    }

    /// Resolves the deck against `cards` and builds the spawn blueprint.
    pub fn resolve(&self, cards: &[Card]) -> LoadResult<UnitSpec> {
        let mut pool = Vec::with_capacity(self.deck.len());
        for name in &self.deck {
            let card = cards
                .iter()
                .find(|card| &card.name == name)
                .ok_or_else(|| {
                    anyhow::anyhow!("Unit '{}' references unknown card '{}'", self.name, name)
                })?;
            pool.push(card.clone());
        }

        Ok(UnitSpec::new(self.name.clone(), self.side)
            .hp(self.hp)
            .composure(self.composure)
            .light(self.light)
            .speed(self.speed.0, self.speed.1)
            .resistances(Resistances {
                hp: self.hp_resist,
                composure: self.composure_resist,
            })
            .slots(self.slots)
            .pool(pool))
    }
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file, resolving decks against `cards`.
    ///
    /// RON format: `Vec<UnitEntry>`, in roster (spawn) order.
    pub fn load(path: &Path, cards: &[Card]) -> LoadResult<Vec<UnitSpec>> {
        let content = read_file(path)?;
        Self::parse(&content, cards)
            .with_context(|| format!("Failed to load roster from {}", path.display()))
    }

    /// Parse a roster from RON text.
    pub fn parse(content: &str, cards: &[Card]) -> LoadResult<Vec<UnitSpec>> {
        let entries: Vec<UnitEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        entries.iter().map(|entry| entry.resolve(cards)).collect()
    }
}
