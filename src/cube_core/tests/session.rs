use cube_core::{
    Angle, Axis, CubeError, Game, Move, MoveEngine, SessionData, SessionStore,
};

fn store() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("saves").join("session.toml"));
    (dir, store)
}

#[test_log::test]
fn round_trip_through_a_file() {
    let moves = [
        Move::new(Axis::X, 0, Angle::Clockwise),
        Move::new(Axis::Y, 2, Angle::CounterClockwise),
        Move::new(Axis::Z, 1, Angle::Clockwise),
    ];

    let mut engine = MoveEngine::new(3).unwrap();
    for m in moves {
        engine.apply(m, true, true).unwrap();
    }

    let (_dir, store) = store();
    assert!(!store.exists());
    let data = SessionData {
        dimension: 3,
        elapsed_seconds: 83.25,
        moves: engine.history().log().to_vec(),
    };
    store.save(&data).unwrap();
    assert!(store.exists());

    let loaded = store.load().unwrap().expect("a save was written");
    assert_eq!(loaded, data);
    assert_eq!(loaded.elapsed_seconds.to_bits(), 83.25_f64.to_bits());

    let rebuilt = SessionStore::rebuild(&loaded).unwrap();
    assert_eq!(rebuilt.grid().snapshot(), engine.grid().snapshot());
    assert_eq!(rebuilt.history().log(), &moves);
    assert!(!rebuilt.history().can_undo());
    assert!(!rebuilt.history().can_redo());
    assert!(!rebuilt.solved());
}

#[test_log::test]
fn missing_save_is_not_an_error() {
    let (_dir, store) = store();
    assert!(store.load().unwrap().is_none());
    assert!(!store.delete().unwrap());
}

#[test_log::test]
fn garbage_is_a_format_error() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "this is not a save").unwrap();
    assert!(matches!(store.load(), Err(CubeError::Format(_))));
}

#[test_log::test]
fn unwritable_location_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    // A regular file stands where the parent directory should be
    let store = SessionStore::new(blocker.join("session.toml"));
    let data = SessionData {
        dimension: 2,
        elapsed_seconds: 0.0,
        moves: vec![],
    };
    assert!(matches!(store.save(&data), Err(CubeError::Io(_))));
}

#[test_log::test]
fn unreadable_save_is_an_io_error() {
    let (_dir, store) = store();
    // A directory where the save file should be
    std::fs::create_dir_all(store.path()).unwrap();

    assert!(matches!(store.load(), Err(CubeError::Io(_))));
}

#[test_log::test]
fn resumed_game_keeps_playing() {
    let (_dir, store) = store();
    let mut game = Game::new_with_rng(3, 12, &mut fastrand::Rng::with_seed(3)).unwrap();
    game.user_move(Move::new(Axis::Y, 0, Angle::Clockwise))
        .unwrap();
    game.undo().unwrap();
    game.redo().unwrap();
    game.user_move(Move::new(Axis::Z, 1, Angle::Zero)).unwrap();
    game.save(&store).unwrap();

    let data = store.load().unwrap().unwrap();
    assert_eq!(data.moves.len(), 12 + 4);

    let mut resumed = Game::resume(&data).unwrap();
    assert_eq!(
        resumed.engine().grid().snapshot(),
        game.engine().grid().snapshot()
    );
    assert_eq!(resumed.undo(), None);

    resumed
        .user_move(Move::new(Axis::X, 2, Angle::CounterClockwise))
        .unwrap();
    assert_eq!(resumed.session_data().moves.len(), data.moves.len() + 1);

    // Saving again overwrites
    resumed.save(&store).unwrap();
    assert_eq!(store.load().unwrap().unwrap(), resumed.session_data());
    assert!(store.delete().unwrap());
    assert!(!store.exists());
}
