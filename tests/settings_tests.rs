//! Settings & Storage Tests
//!
//! Tests for:
//! - MemoryStore get/put/delete/list
//! - ViewerSettings defaults, partial documents and persistence
//! - ViewerSession applying and snapshotting settings

use anyhow::Result;

use rigview::comparison::ComparisonLayout;
use rigview::errors::RigviewError;
use rigview::scene::MaterialPreset;
use rigview::settings::SETTINGS_KEY;
use rigview::{AssetStore, MemoryStore, ViewerSession, ViewerSettings};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// MemoryStore
// ============================================================================

#[test]
fn store_put_get_delete() -> Result<()> {
    let store = MemoryStore::new();
    store.put("b", vec![2])?;
    store.put("a", vec![1])?;

    assert_eq!(store.get("a")?, vec![1]);
    assert_eq!(store.list()?, vec!["a".to_string(), "b".to_string()]);
    assert!(store.contains("b")?);

    assert!(store.delete("a")?);
    assert!(!store.delete("a")?);
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn store_missing_key_is_not_found() {
    let store = MemoryStore::new();
    match store.get("nope") {
        Err(RigviewError::AssetNotFound(key)) => assert_eq!(key, "nope"),
        other => panic!("expected AssetNotFound, got {other:?}"),
    }
}

// ============================================================================
// ViewerSettings
// ============================================================================

#[test]
fn settings_default_when_store_is_empty() -> Result<()> {
    init_logger();
    let store = MemoryStore::new();
    let settings = ViewerSettings::load(&store)?;
    assert_eq!(settings, ViewerSettings::default());
    assert!(settings.sync_playback);
    assert!(!settings.sync_camera);
    assert!(settings.loop_enabled);
    Ok(())
}

#[test]
fn settings_missing_keys_fall_back_to_defaults() -> Result<()> {
    let settings = ViewerSettings::from_json(br#"{ "playback_speed": 0.5, "layout": "overlay" }"#)?;
    assert!((settings.playback_speed - 0.5).abs() < f32::EPSILON);
    assert_eq!(settings.layout, ComparisonLayout::Overlay);
    assert!(settings.loop_enabled);
    assert!(settings.sync_playback);
    assert_eq!(settings.material_preset, MaterialPreset::Textured);
    Ok(())
}

#[test]
fn settings_invalid_speed_is_replaced() -> Result<()> {
    init_logger();
    let settings = ViewerSettings::from_json(br#"{ "playback_speed": -3.0 }"#)?;
    assert!((settings.playback_speed - 1.0).abs() < f32::EPSILON);
    Ok(())
}

#[test]
fn settings_malformed_json_is_an_error() {
    let err = ViewerSettings::from_json(b"{ not json").unwrap_err();
    assert!(matches!(err, RigviewError::JsonError(_)));
}

#[test]
fn settings_round_trip_through_store() -> Result<()> {
    let store = MemoryStore::new();
    let settings = ViewerSettings {
        playback_speed: 1.75,
        loop_enabled: false,
        sync_playback: false,
        sync_camera: true,
        layout: ComparisonLayout::Horizontal,
        material_preset: MaterialPreset::XRay,
    };
    settings.save(&store)?;
    assert!(store.contains(SETTINGS_KEY)?);

    let loaded = ViewerSettings::load(&store)?;
    assert_eq!(loaded, settings);

    let raw = String::from_utf8(store.get(SETTINGS_KEY)?)?;
    assert!(raw.contains(r#""material_preset":"xray""#), "{raw}");
    Ok(())
}

// ============================================================================
// ViewerSession <-> settings
// ============================================================================

#[test]
fn session_applies_and_snapshots_settings() {
    let settings = ViewerSettings {
        playback_speed: 0.75,
        loop_enabled: false,
        sync_playback: false,
        sync_camera: true,
        layout: ComparisonLayout::Overlay,
        material_preset: MaterialPreset::Clay,
    };
    let session = ViewerSession::from_settings(&settings);

    assert!((session.controller().speed() - 0.75).abs() < f32::EPSILON);
    assert!(!session.controller().loop_enabled());
    assert!(!session.coordinator().sync_playback());
    assert!(session.coordinator().camera_bridge().is_attached());
    assert_eq!(session.coordinator().layout(), ComparisonLayout::Overlay);
    assert_eq!(session.settings(), settings);
}

#[test]
fn session_changes_are_persisted() -> Result<()> {
    let store = MemoryStore::new();
    let mut session = ViewerSession::from_settings(&ViewerSettings::load(&store)?);
    session.set_speed(2.0);
    session.set_loop(false);
    session.set_material_preset(MaterialPreset::Wireframe);
    session.coordinator_mut().set_layout(ComparisonLayout::Horizontal);
    session.settings().save(&store)?;

    let reloaded = ViewerSettings::load(&store)?;
    assert!((reloaded.playback_speed - 2.0).abs() < f32::EPSILON);
    assert!(!reloaded.loop_enabled);
    assert_eq!(reloaded.material_preset, MaterialPreset::Wireframe);
    assert_eq!(reloaded.layout, ComparisonLayout::Horizontal);
    Ok(())
}
