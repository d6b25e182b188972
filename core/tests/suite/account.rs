use cyclesync_config::CycleSyncConfig;
use cyclesync_core::{AccountSnapshot, AppState, CoreError, FileAccountStorage};
use cyclesync_types::{DataSharing, PartnerId, Relationship, UserId, ValidationError};

use crate::common::{alex, app, at, date};

#[test]
fn export_includes_partners_and_consent_history() {
    let mut app = app();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.set_cycle(id, date(2025, 8, 10), 28).unwrap();
    app.grant_consent(id, at(2025, 8, 2)).unwrap();

    let snapshot = app.export_all(alex().id, at(2025, 8, 20)).unwrap();
    assert_eq!(snapshot.user, alex());
    assert_eq!(snapshot.partners.len(), 1);
    assert_eq!(snapshot.consent_log.len(), 2);

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["partners"][0]["cycle"]["lastPeriodStart"], "2025-08-10");
    assert_eq!(json["partners"][0]["cycle"]["cycleLength"], 28);
    assert_eq!(json["partners"][0]["consent"]["status"], "granted");
    assert_eq!(json["consentLog"][1]["event"]["type"], "granted");
}

#[test]
fn export_for_another_user_is_not_found() {
    let app = app();
    assert!(matches!(
        app.export_all(UserId::new(2), at(2025, 8, 20)),
        Err(CoreError::UserNotFound(_))
    ));
}

#[test]
fn export_restore_round_trip_keeps_ids() {
    let mut app = app();
    let sarah = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.add_partner("Sam", Relationship::Friend, at(2025, 8, 1))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let storage = FileAccountStorage::new(dir.path());
    let path = app.export_to(&storage, alex().id, at(2025, 8, 20)).unwrap();

    let raw = std::fs::read_to_string(path).unwrap();
    let snapshot = AccountSnapshot::from_json(&raw).unwrap();
    let mut restored = AppState::restore(snapshot, &CycleSyncConfig::default()).unwrap();

    assert_eq!(restored.partners().list(), app.partners().list());
    assert_eq!(restored.consent_log().len(), 2);
    assert!(restored.partners().get(sarah).is_ok());
    let next = restored
        .add_partner("Mia", Relationship::Colleague, at(2025, 8, 21))
        .unwrap();
    assert!(app.partners().get(next).is_err());
}

#[test]
fn delete_account_clears_everything() {
    let mut app = app();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.set_data_sharing(id, DataSharing::all(), at(2025, 8, 1))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let storage = FileAccountStorage::new(dir.path());
    let path = app.export_to(&storage, alex().id, at(2025, 8, 20)).unwrap();

    assert!(matches!(
        app.delete_account(&storage, UserId::new(9)),
        Err(CoreError::UserNotFound(_))
    ));
    assert!(path.exists());

    app.delete_account(&storage, alex().id).unwrap();
    assert!(!path.exists());
    assert!(app.partners().is_empty());
    assert!(app.consent_log().is_empty());
}

#[test]
fn consent_logging_can_be_disabled_by_config() {
    let config = CycleSyncConfig::parse("[privacy]\nconsent_logging = false").unwrap();
    let mut app = AppState::with_config(alex(), &config).unwrap();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.grant_consent(id, at(2025, 8, 2)).unwrap();

    assert!(app.partners().get(id).unwrap().consent_granted());
    assert!(app.consent_log().is_empty());
}

#[test]
fn configured_default_cycle_length_applies_to_new_starts() {
    let config = CycleSyncConfig::parse("[cycle]\ndefault_length = 32").unwrap();
    let mut app = AppState::with_config(alex(), &config).unwrap();
    let id = app
        .add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    app.set_cycle_start(id, date(2025, 8, 10)).unwrap();

    let profile = app.partners().get(id).unwrap().cycle().unwrap();
    assert_eq!(profile.length.days(), 32);
}

#[test]
fn out_of_range_default_cycle_length_is_rejected() {
    let config = CycleSyncConfig::parse("[cycle]\ndefault_length = 60").unwrap();
    let err = AppState::with_config(alex(), &config).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn restore_rejects_snapshot_with_repeated_partner_id() {
    let mut app = app();
    app.add_partner("Sarah", Relationship::Partner, at(2025, 8, 1))
        .unwrap();
    let mut snapshot = app.export_all(alex().id, at(2025, 8, 20)).unwrap();
    snapshot.partners.push(snapshot.partners[0].clone());

    let err = AppState::restore(snapshot, &CycleSyncConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::DuplicatePartnerId(id)) if id == PartnerId::new(1)
    ));
}
