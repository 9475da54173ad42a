//! Headless battle client.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ ClientConfig (environment)
//!   ├─→ BattleSetup (content files or built-in content)
//!   └─→ BattleSession (runtime) ──► EventPrinter (stdout)
//! ```
//!
//! Both sides are auto-played by the random planner, so a run is fully
//! determined by the seed and the content.

pub mod config;
pub mod logging;
pub mod printer;
pub mod setup;

pub use config::{ClientConfig, EventFormat};
pub use printer::EventPrinter;
pub use setup::BattleSetup;

use std::io::Write;

use anyhow::{Context, Result};
use clash_runtime::{BattleSession, RandomPlanner, RunSummary, TracingSink};

/// Top-level client container.
pub struct Client {
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs one auto-played battle, writing the event feed to `out`.
    pub fn run<W: Write + Send + 'static>(&self, out: W) -> Result<RunSummary> {
        let setup = BattleSetup::load(&self.config).context("Failed to load battle content")?;
        let names: Vec<String> = setup.roster.iter().map(|spec| spec.name.clone()).collect();
        let printer = EventPrinter::new(out, self.config.event_format, names);

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut session = BattleSession::builder()
            .config(setup.config)
            .roster(setup.roster)
            .sink((printer, TracingSink))
            .seed(seed)
            .ally_planner(RandomPlanner::new(seed))
            .enemy_planner(RandomPlanner::new(seed.wrapping_add(1)))
            .build()
            .context("Failed to start battle session")?;

        tracing::info!(
            seed,
            max_rounds = self.config.max_rounds,
            "Starting battle"
        );
        let summary = session.run(self.config.max_rounds);
        tracing::info!("Battle finished: {}", summary);
        Ok(summary)
    }
}
