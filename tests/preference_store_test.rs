use chainview_ops_rs::persistence::preferences::{
    ActiveSession, AlertThreshold, AppSettings, PreferenceStore, SecurityEvent, SecurityEventKind,
    SecuritySettings, UserProfile,
};
use chrono::Utc;
use std::fs;

fn create_test_store() -> (PreferenceStore, String) {
    let path = format!("/tmp/test_prefs_{}.redb", uuid::Uuid::new_v4());
    let store = PreferenceStore::open(&path).expect("Failed to create PreferenceStore");
    (store, path)
}

fn defer_delete(path: &str) {
    // Best effort cleanup; /tmp handles the rest.
    let _ = fs::remove_file(path);
}

#[test]
fn test_defaults_when_nothing_saved() {
    let (store, path) = create_test_store();

    let profile = store.load_profile().expect("load");
    assert_eq!(profile, UserProfile::default());
    assert_eq!(profile.name, "Supply Chain Manager");

    let security = store.load_security_settings().expect("load");
    assert_eq!(security, SecuritySettings::default());
    assert!(security.two_factor_enabled);
    assert_eq!(security.session_timeout, 30);

    let app = store.load_app_settings().expect("load");
    assert_eq!(app, AppSettings::default());
    assert_eq!(app.refresh_interval, 5);
    assert_eq!(app.alert_threshold, AlertThreshold::Medium);

    assert!(store.load_security_events().expect("load").is_empty());
    assert!(store.load_sessions().expect("load").is_empty());

    defer_delete(&path);
}

#[test]
fn test_profile_round_trip() {
    let (store, path) = create_test_store();

    let mut profile = UserProfile::default();
    profile.name = "Logistics Coordinator".to_string();
    profile.email = "coordinator@company.com".to_string();
    profile.skills.push("Customs Compliance".to_string());

    store.save_profile(&profile).expect("save");
    let loaded = store.load_profile().expect("load");
    assert_eq!(loaded, profile);

    defer_delete(&path);
}

#[test]
fn test_app_settings_round_trip_overrides_defaults() {
    let (store, path) = create_test_store();

    let mut settings = AppSettings::default();
    settings.auto_refresh = false;
    settings.alert_threshold = AlertThreshold::High;
    settings.compact_mode = true;

    store.save_app_settings(&settings).expect("save");
    let loaded = store.load_app_settings().expect("load");
    assert!(!loaded.auto_refresh);
    assert_eq!(loaded.alert_threshold, AlertThreshold::High);
    assert!(loaded.compact_mode);

    defer_delete(&path);
}

#[test]
fn test_security_events_are_newest_first() {
    let (store, path) = create_test_store();

    store
        .record_security_event(SecurityEvent {
            id: 1,
            kind: SecurityEventKind::Login,
            description: "Successful login from New York, NY".to_string(),
            timestamp: Utc::now(),
            ip: "192.168.1.100".to_string(),
            location: Some("New York, NY".to_string()),
            device: Some("Chrome on Windows".to_string()),
        })
        .expect("record");
    store
        .record_security_event(SecurityEvent {
            id: 2,
            kind: SecurityEventKind::PasswordChange,
            description: "Password changed successfully".to_string(),
            timestamp: Utc::now(),
            ip: "192.168.1.100".to_string(),
            location: None,
            device: None,
        })
        .expect("record");

    let events = store.load_security_events().expect("load");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, 2, "latest event first");
    assert_eq!(events[1].kind, SecurityEventKind::Login);

    defer_delete(&path);
}

#[test]
fn test_revoke_session_spares_current() {
    let (store, path) = create_test_store();

    let sessions = vec![
        ActiveSession {
            id: "current".to_string(),
            device: "Chrome on Windows".to_string(),
            location: "New York, NY".to_string(),
            last_active: Utc::now(),
            current: true,
        },
        ActiveSession {
            id: "mobile".to_string(),
            device: "iPhone • iOS App".to_string(),
            location: "New York, NY".to_string(),
            last_active: Utc::now(),
            current: false,
        },
    ];
    store.save_sessions(&sessions).expect("save");

    assert!(store.revoke_session("mobile").expect("revoke"));
    let remaining = store.load_sessions().expect("load");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "current");

    // Current session is not revocable.
    assert!(!store.revoke_session("current").expect("revoke"));
    assert_eq!(store.load_sessions().expect("load").len(), 1);

    defer_delete(&path);
}
