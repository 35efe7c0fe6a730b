//! Session lifecycle: determinism, stepped resolution, snapshots, catalogs

use match3::core::{
    EngineConfig, EngineError, GameSession, GameSnapshot, ItemCatalog, ResolveMode,
    SelectionResult,
};
use match3::types::{ItemFamily, SessionState};

fn play_hinted(session: &mut GameSession, moves: usize) {
    for _ in 0..moves {
        if session.state() != SessionState::Playing {
            return;
        }
        let (a, b) = session.hint().unwrap();
        session.select_cell(a.x, a.y).unwrap();
        session.select_cell(b.x, b.y).unwrap();
    }
}

#[test]
fn test_same_seed_same_game() {
    let config = EngineConfig::default().with_seed(2024);
    let mut first = GameSession::initialize(config.clone(), ItemCatalog::standard()).unwrap();
    let mut second = GameSession::initialize(config, ItemCatalog::standard()).unwrap();
    assert_eq!(first.current_state(), second.current_state());

    play_hinted(&mut first, 6);
    play_hinted(&mut second, 6);
    assert_eq!(first.current_state(), second.current_state());
}

#[test]
fn test_different_seeds_differ() {
    let a = GameSession::initialize(EngineConfig::default().with_seed(1), ItemCatalog::standard())
        .unwrap();
    let b = GameSession::initialize(EngineConfig::default().with_seed(2), ItemCatalog::standard())
        .unwrap();
    assert_ne!(a.grid(), b.grid());
}

#[test]
fn test_stepped_matches_immediate() {
    let base = EngineConfig::default().with_seed(77);
    let mut immediate = GameSession::initialize(base.clone(), ItemCatalog::standard()).unwrap();
    let mut stepped = GameSession::initialize(
        base.with_resolve_mode(ResolveMode::Stepped),
        ItemCatalog::standard(),
    )
    .unwrap();

    let (a, b) = immediate.hint().unwrap();
    assert_eq!(stepped.hint(), Some((a, b)));

    immediate.select_cell(a.x, a.y).unwrap();
    let expected = match immediate.select_cell(b.x, b.y).unwrap() {
        SelectionResult::Resolved(events) => events,
        other => panic!("expected resolved swap, got {:?}", other),
    };

    stepped.select_cell(a.x, a.y).unwrap();
    assert_eq!(stepped.select_cell(b.x, b.y).unwrap(), SelectionResult::Resolving);
    let mut events = Vec::new();
    while let Some(event) = stepped.advance().unwrap() {
        assert_eq!(stepped.select_cell(0, 0).unwrap(), SelectionResult::RejectedBusy);
        events.push(event);
    }

    assert_eq!(events, expected);
    assert_eq!(stepped.current_state(), immediate.current_state());
}

#[test]
fn test_snapshot_json_round_trips_through_serde() {
    let session =
        GameSession::initialize(EngineConfig::default().with_size(5, 4), ItemCatalog::standard())
            .unwrap();

    let json = session.current_state().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["width"], 5);
    assert_eq!(value["height"], 4);
    assert_eq!(value["cells"].as_array().unwrap().len(), 20);
    assert_eq!(value["moves_remaining"], 20);
    assert_eq!(value["state"], "Playing");
    assert_eq!(value["resolving"], false);
}

#[test]
fn test_snapshot_into_tracks_session() {
    let mut session =
        GameSession::initialize(EngineConfig::default().with_seed(8), ItemCatalog::standard())
            .unwrap();
    let mut snap = GameSnapshot::default();

    session.snapshot_into(&mut snap);
    assert_eq!(snap.cells.len(), 64);
    assert!(snap
        .cells
        .iter()
        .all(|cell| cell.family == ItemFamily::Ordinary));

    play_hinted(&mut session, 1);
    session.snapshot_into(&mut snap);
    assert_eq!(snap.moves_remaining, session.moves_remaining());
    assert_eq!(snap.score, session.score());
    assert_eq!(snap, session.current_state());
}

#[test]
fn test_custom_catalog_from_json() {
    let json = r#"{
        "items": [
            {"family": "Ordinary", "name": "ruby", "score_value": 7},
            {"family": "Ordinary", "name": "sapphire", "score_value": 7},
            {"family": "Ordinary", "name": "emerald", "score_value": 7},
            {"family": "FourPiece", "name": "ruby_FourPiece", "score_value": 14},
            {"family": "FourPiece", "name": "sapphire_FourPiece", "score_value": 14},
            {"family": "FourPiece", "name": "emerald_FourPiece", "score_value": 14},
            {"family": "DoubleThree", "name": "ruby_DoubleThree", "score_value": 14},
            {"family": "DoubleThree", "name": "sapphire_DoubleThree", "score_value": 14},
            {"family": "DoubleThree", "name": "emerald_DoubleThree", "score_value": 14},
            {"family": "Universal", "name": "prism", "score_value": 40}
        ]
    }"#;
    let catalog = ItemCatalog::from_json(json).unwrap();
    let config = EngineConfig {
        goal_score: u32::MAX,
        ..EngineConfig::default().with_seed(3)
    };
    let mut session = GameSession::initialize(config, catalog).unwrap();

    assert!(session
        .grid()
        .item_names()
        .iter()
        .all(|name| ["ruby", "sapphire", "emerald"].contains(name)));
    play_hinted(&mut session, 3);
    assert_eq!(session.moves_remaining(), 17);
}

#[test]
fn test_unsolvable_catalog_fails_before_play() {
    let json = r#"{"items": [
        {"family": "Ordinary", "name": "ash", "score_value": 1},
        {"family": "Universal", "name": "prism", "score_value": 40}
    ]}"#;
    let catalog = ItemCatalog::from_json(json).unwrap();
    let result = GameSession::initialize(EngineConfig::default(), catalog);
    assert!(matches!(result, Err(EngineError::UnsolvableCatalog { .. })));
}

#[test]
fn test_config_errors_surface() {
    let config = EngineConfig {
        move_budget: 0,
        ..EngineConfig::default()
    };
    let result = GameSession::initialize(config, ItemCatalog::standard());
    assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
}
