//! Clash client binary.
//!
//! Main entry point: loads `.env`, reads [`ClientConfig`] from the
//! environment, installs logging and runs one auto-played battle, printing
//! the event feed to stdout.
//!
//! # Examples
//!
//! ```bash
//! CLASH_SEED=7 CLASH_EVENT_FORMAT=json cargo run -p clash-client
//! ```

use anyhow::Result;
use clash_client::{Client, ClientConfig, EventFormat, logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    logging::setup_logging()?;

    tracing::debug!(?config, "Client configuration loaded");
    let format = config.event_format;
    let summary = Client::new(config).run(std::io::stdout())?;

    match format {
        EventFormat::Text => println!("{summary}"),
        EventFormat::Json => println!("{}", serde_json::to_string(&summary)?),
    }
    Ok(())
}
