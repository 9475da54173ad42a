use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use clash_client::{Client, ClientConfig, EventFormat};

/// Clonable in-memory writer.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock").clone();
        String::from_utf8(bytes).expect("utf-8 output")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn seeded(seed: u64) -> ClientConfig {
    ClientConfig {
        seed: Some(seed),
        max_rounds: 30,
        ..ClientConfig::default()
    }
}

#[test]
fn builtin_duel_prints_text_feed() {
    let out = SharedBuf::default();
    let summary = Client::new(seeded(11)).run(out.clone()).expect("battle runs");

    assert!(summary.rounds >= 1);
    let feed = out.contents();
    for line in feed.lines() {
        assert!(line.starts_with("[Roland]") || line.starts_with("[Angelica]"), "{line}");
    }
}

#[test]
fn json_feed_is_one_object_per_line() {
    let out = SharedBuf::default();
    let config = ClientConfig {
        event_format: EventFormat::Json,
        ..seeded(12)
    };
    Client::new(config).run(out.clone()).expect("battle runs");

    for line in out.contents().lines() {
        let value: serde_json::Value = serde_json::from_str(line).expect("json line");
        assert!(value["event"].is_string());
    }
}

#[test]
fn same_seed_same_feed() {
    let a = SharedBuf::default();
    let b = SharedBuf::default();
    let first = Client::new(seeded(13)).run(a.clone()).expect("battle runs");
    let second = Client::new(seeded(13)).run(b.clone()).expect("battle runs");

    assert_eq!(first, second);
    assert_eq!(a.contents(), b.contents());
}

#[test]
fn unseeded_run_replays_from_its_summary_seed() {
    let a = SharedBuf::default();
    let b = SharedBuf::default();
    let unseeded = ClientConfig {
        max_rounds: 30,
        ..ClientConfig::default()
    };
    let first = Client::new(unseeded).run(a.clone()).expect("battle runs");
    let replay = Client::new(seeded(first.seed)).run(b.clone()).expect("battle runs");

    assert_eq!(first, replay);
    assert_eq!(a.contents(), b.contents());
}

#[test]
fn content_files_are_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cards = dir.path().join("cards.ron");
    let roster = dir.path().join("roster.ron");
    let config = dir.path().join("config.toml");
    fs::write(
        &cards,
        r#"[
            (name: "Smash", cost: 0, dice: [(Blunt, 4, 4)]),
            (name: "Heavy", cost: 1, dice: [(Blunt, 9, 9)]),
        ]"#,
    )
    .expect("write");
    // the dummy never has light to play its card
    fs::write(
        &roster,
        r#"[
            (name: "Hero", side: Ally, hp: 8, deck: ["Smash"]),
            (name: "Dummy", side: Enemy, hp: 8, light: 0, deck: ["Heavy"]),
        ]"#,
    )
    .expect("write");
    fs::write(&config, "opening_hand = 1\n").expect("write");

    let out = SharedBuf::default();
    let summary = Client::new(ClientConfig {
        cards: Some(cards),
        roster: Some(roster),
        config: Some(config),
        ..seeded(1)
    })
    .run(out.clone())
    .expect("battle runs");

    assert_eq!(
        summary.outcome,
        Some(clash_core::BattleOutcome::Victory(clash_core::Side::Ally))
    );
    assert!(out.contents().contains("[Dummy]"));
}

#[test]
fn cards_without_roster_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cards = dir.path().join("cards.ron");
    fs::write(&cards, r#"[(name: "Smash", dice: [(Blunt, 1, 4)])]"#).expect("write");

    let result = Client::new(ClientConfig {
        cards: Some(cards),
        ..seeded(1)
    })
    .run(SharedBuf::default());
    assert!(result.is_err());
}
