//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// How the event feed is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventFormat {
    /// One human-readable line per event.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for EventFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown event format '{other}'")),
        }
    }
}

/// Headless client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Battle seed; random when unset.
    pub seed: Option<u64>,
    pub max_rounds: u32,
    /// Card pool RON file; built-in sample cards when unset.
    pub cards: Option<PathBuf>,
    /// Roster RON file; built-in duel roster when unset.
    pub roster: Option<PathBuf>,
    /// Battle configuration TOML file; defaults when unset.
    pub config: Option<PathBuf>,
    pub event_format: EventFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            cards: None,
            roster: None,
            config: None,
            event_format: EventFormat::default(),
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_MAX_ROUNDS: u32 = 50;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CLASH_SEED` - Battle seed (default: random)
    /// - `CLASH_MAX_ROUNDS` - Round limit (default: 50)
    /// - `CLASH_CARDS` - Card pool RON file
    /// - `CLASH_ROSTER` - Roster RON file
    /// - `CLASH_CONFIG` - Battle configuration TOML file
    /// - `CLASH_EVENT_FORMAT` - `text` or `json` (default: text)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    /// Unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.seed = parse(&lookup, "CLASH_SEED");
        if let Some(rounds) = parse::<u32>(&lookup, "CLASH_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }
        config.cards = lookup("CLASH_CARDS").map(PathBuf::from);
        config.roster = lookup("CLASH_ROSTER").map(PathBuf::from);
        config.config = lookup("CLASH_CONFIG").map(PathBuf::from);
        if let Some(format) = parse(&lookup, "CLASH_EVENT_FORMAT") {
            config.event_format = format;
        }

        config
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}
