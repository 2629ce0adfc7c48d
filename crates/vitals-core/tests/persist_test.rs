use vitals_core::errors::StorageError;
use vitals_core::models::HealthState;
use vitals_core::persist;

#[test]
fn write_then_read_returns_same_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("health.json");
    let state = HealthState::new(chrono::Utc::now());

    persist::write_json(&path, &state).unwrap();
    let back: HealthState = persist::read_json(&path).unwrap().unwrap();
    assert_eq!(back, state);
    assert!(!dir.path().join("nested").join("health.json.tmp").exists());
}

#[test]
fn read_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let missing: Option<HealthState> = persist::read_json(&dir.path().join("nope.json")).unwrap();
    assert!(missing.is_none());
}

#[test]
fn corrupt_file_is_a_serialization_error_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("health.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = persist::read_json::<HealthState>(&path).unwrap_err();
    assert!(matches!(err, StorageError::Serialization { .. }));

    let state = persist::load_or_else(&path, || HealthState::new(chrono::Utc::now()));
    assert_eq!(state.score, 100);
}
