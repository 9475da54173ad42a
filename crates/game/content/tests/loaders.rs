//! Loader tests against the shipped data directory and temporary fixtures.

use std::fs;
use std::path::PathBuf;

use clash_content::{CardLoader, ConfigLoader, ContentFactory, RosterLoader, sample_cards};
use clash_core::{BattleConfig, BattleState, Side};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_cards_match_builtin_pool() {
    let loaded = CardLoader::load(&data_dir().join("cards.ron")).expect("shipped cards");
    assert_eq!(loaded, sample_cards());
}

#[test]
fn shipped_content_spawns_a_battle() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().expect("config");
    let roster = factory.load_roster().expect("roster");

    assert_eq!(config, BattleConfig::default());
    assert_eq!(roster.len(), 2);

    let mut state = BattleState::new(1);
    for spec in roster {
        state.spawn(spec, &config).expect("spawn");
    }
    assert_eq!(state.side_units(Side::Ally).count(), 1);
    assert_eq!(state.side_units(Side::Enemy).count(), 1);
}

#[test]
fn fixture_directory_round_trips_through_factory() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("cards.ron"),
        r#"[(name: "Jab", cost: 0, dice: [(Pierce, 1, 3)])]"#,
    )
    .expect("write cards");
    fs::write(
        dir.path().join("roster.ron"),
        r#"[
            (name: "A", side: Ally, slots: 2, deck: ["Jab", "Jab"]),
            (name: "B", side: Enemy, light: 5, deck: ["Jab"]),
        ]"#,
    )
    .expect("write roster");
    fs::write(dir.path().join("config.toml"), "draw_per_round = 2\n").expect("write config");

    let factory = ContentFactory::new(dir.path());
    let roster = factory.load_roster().expect("roster");
    assert_eq!(roster[0].slot_count, 2);
    assert_eq!(roster[0].pool.len(), 2);
    assert_eq!(roster[1].max_light, 5);
    assert_eq!(factory.load_config().expect("config").draw_per_round, 2);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.ron");
    let err = RosterLoader::load(&path, &sample_cards()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.ron"));
}

#[test]
fn malformed_toml_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "hand_limit = \"many\"").expect("write config");
    assert!(ConfigLoader::load(&path).is_err());
}
