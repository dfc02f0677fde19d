//! Best-score persistence across sessions, backed by the JSON file store.

use flappy::core::config::GameConfig;
use flappy::core::constants::{BEST_SCORE_KEY, LAST_UPDATE_KEY, STORAGE_VERSION};
use flappy::rules::{FrameInput, RulesEngine};
use flappy::{JsonFileStore, KeyValueStore};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;

fn temp_storage(name: &str) -> PathBuf {
    let path = std::env::temp_dir()
        .join(format!("flappy_it_{}_{}", std::process::id(), name))
        .join("storage.json");
    fs::remove_file(&path).ok();
    path
}

/// Play one session until `target` pipes are passed, then crash.
fn play_session(path: &PathBuf, target: u32, seed: u64) -> u32 {
    let mut engine = RulesEngine::new(GameConfig::default(), JsonFileStore::new(path.clone()))
        .expect("default config is valid");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let best_at_start = engine.best_score_at_start();
    let mut pipes = engine.start_run(&mut rng);
    let frame = FrameInput {
        bird_top: 200.0,
        bird_bottom: 240.0,
    };
    while engine.score() < target {
        for pipe in pipes.iter_mut() {
            pipe.x -= 10.0;
        }
        engine.on_frame(frame, &mut pipes, &mut rng);
    }
    engine.on_collision();
    best_at_start
}

#[test]
fn test_best_score_carries_over_between_sessions() {
    let path = temp_storage("sessions");

    assert_eq!(play_session(&path, 4, 1), 0);
    assert_eq!(play_session(&path, 2, 2), 4);
    // The shorter run did not lower the record
    assert_eq!(play_session(&path, 9, 3), 4);
    assert_eq!(play_session(&path, 0, 4), 9);

    fs::remove_file(&path).ok();
}

#[test]
fn test_outdated_marker_resets_stored_best() {
    let path = temp_storage("outdated");
    let mut store = JsonFileStore::new(path.clone());
    store.write_integer(BEST_SCORE_KEY, 120).unwrap();
    store.write_integer(LAST_UPDATE_KEY, STORAGE_VERSION - 1).unwrap();

    let engine = RulesEngine::new(GameConfig::default(), JsonFileStore::new(path.clone())).unwrap();
    assert_eq!(engine.best_score_at_start(), 0);

    let reopened = JsonFileStore::new(path.clone());
    assert_eq!(reopened.read_integer(BEST_SCORE_KEY).unwrap(), None);
    assert_eq!(
        reopened.read_integer(LAST_UPDATE_KEY).unwrap(),
        Some(STORAGE_VERSION)
    );

    fs::remove_file(&path).ok();
}

#[test]
fn test_corrupt_storage_is_not_fatal() {
    let path = temp_storage("corrupt");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{{{{ definitely not json").unwrap();

    // Reads degrade to "no best score"; the run still plays and records
    assert_eq!(play_session(&path, 2, 9), 0);
    let store = JsonFileStore::new(path.clone());
    assert_eq!(store.read_integer(BEST_SCORE_KEY).unwrap(), Some(2));

    fs::remove_file(&path).ok();
}
