//! Battle configuration loader.

use std::path::Path;

use clash_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`BattleConfig::default`].
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.hand_limit == 0 {
            anyhow::bail!("hand_limit must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("hand_limit = 5\nattacks_stagger = true\n").unwrap();
        assert_eq!(config.hand_limit, 5);
        assert!(config.attacks_stagger);
        assert_eq!(config.opening_hand, BattleConfig::DEFAULT_OPENING_HAND);
        assert_eq!(config.light_regen, BattleConfig::DEFAULT_LIGHT_REGEN);
    }

    #[test]
    fn empty_hand_limit_is_rejected() {
        assert!(ConfigLoader::parse("hand_limit = 0").is_err());
    }
}
