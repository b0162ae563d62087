//! Integration tests for the persistence contract on both backends.

use tempfile::TempDir;
use yuletide_core::games::{ArcadeLoop, CandyCaneInput, CandyCaneStack};
use yuletide_core::storage::{SCORES_KEY, SETTINGS_KEY};
use yuletide_core::{
    GameKind, GiftPlanner, KeyValueStore, MemoryStore, PreferenceStore, Preferences, SqliteStore,
    ThemeId,
};

#[test]
fn test_partial_save_keeps_other_fields() {
    let prefs = PreferenceStore::new(MemoryStore::new());
    prefs.save(&Preferences {
        selected_theme: Some("aurora".into()),
        music_volume: Some(30),
        ..Preferences::default()
    });
    prefs.save(&Preferences {
        snow_intensity: Some(70),
        ..Preferences::default()
    });

    let loaded = prefs.load();
    assert_eq!(loaded.snow_intensity, Some(70));
    assert_eq!(loaded.music_volume, Some(30));
    assert_eq!(loaded.theme(), ThemeId::Aurora);
}

#[test]
fn test_settings_blob_uses_camel_case_keys() {
    let prefs = PreferenceStore::new(MemoryStore::new());
    prefs.save(&Preferences::default().with_snow_intensity(73));
    let raw = prefs.backend().get(SETTINGS_KEY).unwrap().unwrap();
    assert_eq!(raw, r#"{"snowIntensity":70}"#);
}

#[test]
fn test_scores_only_ratchet_up() {
    let prefs = PreferenceStore::new(MemoryStore::new());
    assert_eq!(prefs.save_score(GameKind::CatchSnowflakes, 50), Some(0));
    assert_eq!(prefs.save_score(GameKind::CatchSnowflakes, 30), None);
    assert_eq!(prefs.load_scores().catch_snowflakes, 50);
    assert_eq!(prefs.save_score(GameKind::SnowmanBuilder, 3), None);
}

#[test]
fn test_sqlite_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("yuletide.db");

    {
        let prefs = PreferenceStore::new(SqliteStore::open_at(&path).unwrap());
        prefs.save(&Preferences {
            selected_year: Some(2027),
            ..Preferences::default()
        });
        let planner = GiftPlanner::new(&prefs);
        planner.add("Sled", "Robin").unwrap();

        let mut game = ArcadeLoop::with_seed(CandyCaneStack::new(), 7);
        game.start();
        game.send(CandyCaneInput::Drop);
        game.advance(20 * 60);
        game.send(CandyCaneInput::Drop);
        assert!(game.submit_best(&prefs).is_some());
    }

    let prefs = PreferenceStore::new(SqliteStore::open_at(&path).unwrap());
    assert_eq!(prefs.load().selected_year, Some(2027));
    assert_eq!(GiftPlanner::new(&prefs).list()[0].name, "Sled");
    assert_eq!(prefs.load_scores().candy_cane_stack, 100);
}

#[test]
fn test_corrupt_blobs_fall_back_to_defaults() {
    let store = MemoryStore::new();
    store.set(SETTINGS_KEY, "not json").unwrap();
    store.set(SCORES_KEY, "[1,2,3]").unwrap();
    let prefs = PreferenceStore::new(store);

    assert_eq!(prefs.load(), Preferences::default());
    assert_eq!(prefs.load_scores().memory_gif, 0);

    // Writing over a corrupt snapshot starts from an empty record.
    prefs.save(&Preferences {
        language: Some("de".into()),
        ..Preferences::default()
    });
    assert_eq!(prefs.load().language.as_deref(), Some("de"));
}
