use crate::persistence::redb_store::{RedbStore, StoreError};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// Keys match the browser dashboard's localStorage keys one to one.
const KEY_PROFILE: &str = "userProfile";
const KEY_SECURITY: &str = "securitySettings";
const KEY_APP: &str = "appSettings";
const KEY_SECURITY_EVENTS: &str = "securityEvents";
const KEY_SESSIONS: &str = "activeSessions";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub department: String,
    pub role: String,
    pub join_date: String,
    pub avatar: String,
    pub bio: String,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Supply Chain Manager".to_string(),
            email: "manager@company.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "New York, NY".to_string(),
            department: "Supply Chain Operations".to_string(),
            role: "Senior Manager".to_string(),
            join_date: "2022-03-15".to_string(),
            avatar: "👨‍💼".to_string(),
            bio: "Experienced supply chain professional with 8+ years in logistics optimization and team leadership.".to_string(),
            skills: vec![
                "Supply Chain Management".to_string(),
                "Logistics".to_string(),
                "Data Analysis".to_string(),
                "Team Leadership".to_string(),
                "Process Optimization".to_string(),
            ],
            certifications: vec![
                "CSCP - Certified Supply Chain Professional".to_string(),
                "PMP - Project Management Professional".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub two_factor_enabled: bool,
    pub password_last_changed: DateTime<Utc>,
    pub login_notifications: bool,
    /// Minutes of inactivity before the session expires.
    pub session_timeout: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_enabled: true,
            password_last_changed: Utc.with_ymd_and_hms(2025, 1, 10, 14, 22, 0).unwrap(),
            login_notifications: true,
            session_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MapStyle {
    #[serde(rename = "dark")]
    Dark,
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "satellite")]
    Satellite,
    #[serde(rename = "terrain")]
    Terrain,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertThreshold {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub notifications: bool,
    pub auto_refresh: bool,
    pub refresh_interval: u32,
    pub map_style: MapStyle,
    pub language: String,
    pub timezone: String,
    pub data_retention: u32,
    pub sound_enabled: bool,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub alert_threshold: AlertThreshold,
    pub compact_mode: bool,
    pub show_tooltips: bool,
    pub animations_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notifications: true,
            auto_refresh: true,
            refresh_interval: 5,
            map_style: MapStyle::Dark,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            data_retention: 30,
            sound_enabled: true,
            email_notifications: true,
            push_notifications: true,
            alert_threshold: AlertThreshold::Medium,
            compact_mode: false,
            show_tooltips: true,
            animations_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SecurityEventKind {
    #[serde(rename = "login")]
    Login,
    #[serde(rename = "password_change")]
    PasswordChange,
    #[serde(rename = "failed_login")]
    FailedLogin,
    #[serde(rename = "2fa_enabled")]
    TwoFactorEnabled,
    #[serde(rename = "session_revoked")]
    SessionRevoked,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityEvent {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: SecurityEventKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub id: String,
    pub device: String,
    pub location: String,
    pub last_active: DateTime<Utc>,
    pub current: bool,
}

/// Typed facade over the redb key-value store. Reads fall back to hard-coded
/// defaults when a key has never been written; writes happen only on explicit
/// save actions.
pub struct PreferenceStore {
    store: RedbStore,
}

impl PreferenceStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self {
            store: RedbStore::new(path)?,
        })
    }

    fn load_or<T: for<'de> Deserialize<'de>>(
        &self,
        key: &str,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, StoreError> {
        match self.store.get_json(key)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(fallback()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.store.put_json(key, &serde_json::to_value(value)?)?;
        info!(key = %key, "Preferences saved");
        Ok(())
    }

    pub fn load_profile(&self) -> Result<UserProfile, StoreError> {
        self.load_or(KEY_PROFILE, UserProfile::default)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.save(KEY_PROFILE, profile)
    }

    pub fn load_security_settings(&self) -> Result<SecuritySettings, StoreError> {
        self.load_or(KEY_SECURITY, SecuritySettings::default)
    }

    pub fn save_security_settings(&self, settings: &SecuritySettings) -> Result<(), StoreError> {
        self.save(KEY_SECURITY, settings)
    }

    pub fn load_app_settings(&self) -> Result<AppSettings, StoreError> {
        self.load_or(KEY_APP, AppSettings::default)
    }

    pub fn save_app_settings(&self, settings: &AppSettings) -> Result<(), StoreError> {
        self.save(KEY_APP, settings)
    }

    pub fn load_security_events(&self) -> Result<Vec<SecurityEvent>, StoreError> {
        self.load_or(KEY_SECURITY_EVENTS, Vec::new)
    }

    /// Append a security event (newest first, like the dashboard renders it).
    pub fn record_security_event(&self, event: SecurityEvent) -> Result<(), StoreError> {
        let mut events = self.load_security_events()?;
        events.insert(0, event);
        self.save(KEY_SECURITY_EVENTS, &events)
    }

    pub fn load_sessions(&self) -> Result<Vec<ActiveSession>, StoreError> {
        self.load_or(KEY_SESSIONS, Vec::new)
    }

    pub fn save_sessions(&self, sessions: &[ActiveSession]) -> Result<(), StoreError> {
        self.save(KEY_SESSIONS, &sessions)
    }

    /// Remove a session by id. The current session is not revocable; returns
    /// whether anything was removed.
    pub fn revoke_session(&self, session_id: &str) -> Result<bool, StoreError> {
        let mut sessions = self.load_sessions()?;
        let before = sessions.len();
        sessions.retain(|s| s.current || s.id != session_id);
        let removed = sessions.len() != before;
        if removed {
            self.save(KEY_SESSIONS, &sessions)?;
        }
        Ok(removed)
    }
}
