//! Event feed written to stdout.

use std::io::Write;

use clash_core::BattleEvent;
use clash_runtime::EventSink;

use crate::config::EventFormat;

/// Writes one line per battle event.
pub struct EventPrinter<W: Write + Send> {
    out: W,
    format: EventFormat,
    names: Vec<String>,
}

impl<W: Write + Send> EventPrinter<W> {
    /// `names` lists unit names in roster order, for the text format.
    pub fn new(out: W, format: EventFormat, names: impl IntoIterator<Item = String>) -> Self {
        Self {
            out,
            format,
            names: names.into_iter().collect(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&self, event: &BattleEvent) -> Option<String> {
        match self.format {
            EventFormat::Text => {
                let name = self
                    .names
                    .get(event.unit().0 as usize)
                    .map_or("?", String::as_str);
                Some(format!("[{name}] {event}"))
            }
            EventFormat::Json => match serde_json::to_string(event) {
                Ok(json) => Some(json),
                Err(err) => {
                    tracing::warn!("Failed to encode event: {}", err);
                    None
                }
            },
        }
    }
}

impl<W: Write + Send> EventSink for EventPrinter<W> {
    fn publish(&mut self, event: &BattleEvent) {
        let Some(line) = self.line(event) else {
            return;
        };
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!("Failed to write event: {}", err);
        }
    }
}
