//! Card pool loader.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use clash_core::{Card, Dice, DiceKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Card definition as written in RON files.
///
/// ```ron
/// (name: "Cut", cost: 1, dice: [(Slash, 1, 6)])
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSpec {
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    /// `(kind, min, max)` per die, in resolution order.
    pub dice: Vec<(DiceKind, u32, u32)>,
}

impl CardSpec {
    /// Validates the definition and builds the card template.
    pub fn build(&self) -> LoadResult<Card> {
        let mut dice = Vec::with_capacity(self.dice.len());
        for (index, &(kind, min, max)) in self.dice.iter().enumerate() {
            let die = Dice::new(kind, min, max)
                .with_context(|| format!("Invalid die {} on card '{}'", index, self.name))?;
            dice.push(die);
        }
        Card::new(self.name.clone(), self.cost, dice)
            .with_context(|| format!("Invalid card '{}'", self.name))
    }
}

/// Loader for card pools from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load a card pool from a RON file.
    ///
    /// RON format: `Vec<CardSpec>`. Card names must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<Card>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to load cards from {}", path.display()))
    }

    /// Parse a card pool from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<Card>> {
        let specs: Vec<CardSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card pool RON: {}", e))?;

        let mut names = HashSet::new();
        let mut cards = Vec::with_capacity(specs.len());
        for spec in &specs {
            if !names.insert(spec.name.as_str()) {
                anyhow::bail!("Duplicate card name '{}'", spec.name);
            }
            cards.push(spec.build()?);
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_card_pool() {
        let cards = CardLoader::parse(
            r#"[
                (name: "Cut", cost: 1, dice: [(Slash, 1, 6)]),
                (name: "Sidestep", dice: [(Evade, 1, 6)]),
            ]"#,
        )
        .expect("valid pool");

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Cut");
        assert_eq!(cards[0].dice()[0].kind(), DiceKind::Slash);
        assert_eq!(cards[1].cost, 0);
    }

    #[test]
    fn rejects_inverted_die() {
        let err = CardLoader::parse(r#"[(name: "Broken", dice: [(Guard, 5, 2)])]"#).unwrap_err();
        assert!(format!("{err:#}").contains("Broken"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = CardLoader::parse(
            r#"[(name: "Cut", dice: [(Slash, 1, 6)]), (name: "Cut", dice: [(Pierce, 1, 6)])]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn rejects_empty_card() {
        assert!(CardLoader::parse(r#"[(name: "Nothing", dice: [])]"#).is_err());
    }
}
