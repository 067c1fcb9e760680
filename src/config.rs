use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    pub feed: Option<FeedConfig>,
    pub presence: Option<PresenceConfig>,
    pub store: Option<StoreConfig>,
}

/// Data-feed simulator knobs. Defaults mirror the dashboard's original
/// constants: 3s tick, ±10 stock jitter, 30% alert chance, 10-entry cap.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FeedConfig {
    pub tick_ms: Option<u64>,
    pub stock_jitter: Option<i64>,
    pub alert_probability: Option<f64>,
    pub critical_probability: Option<f64>,
    pub max_alerts: Option<usize>,
    pub notification_ttl_ms: Option<i64>,
}

impl FeedConfig {
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms.unwrap_or(3_000)
    }

    pub fn stock_jitter(&self) -> i64 {
        self.stock_jitter.unwrap_or(10)
    }

    pub fn alert_probability(&self) -> f64 {
        self.alert_probability.unwrap_or(0.3)
    }

    pub fn critical_probability(&self) -> f64 {
        self.critical_probability.unwrap_or(0.3)
    }

    pub fn max_alerts(&self) -> usize {
        self.max_alerts.unwrap_or(10)
    }

    pub fn notification_ttl_ms(&self) -> i64 {
        self.notification_ttl_ms.unwrap_or(5_000)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PresenceConfig {
    pub tick_ms: Option<u64>,
    pub active_probability: Option<f64>,
}

impl PresenceConfig {
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms.unwrap_or(5_000)
    }

    pub fn active_probability(&self) -> f64 {
        self.active_probability.unwrap_or(0.7)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    pub path: Option<String>,
}

impl StoreConfig {
    pub fn path(&self) -> String {
        self.path
            .clone()
            .unwrap_or_else(|| "chainview_prefs.redb".to_string())
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let home = env::var("HOME").unwrap_or_else(|_| ".".into());

        let s = Config::builder()
            // 1. Global config from ~/.chainview/config.json
            .add_source(File::with_name(&format!("{}/.chainview/config", home)).required(false))
            // 2. Project config from config/config.json
            .add_source(File::with_name("config/config").required(false))
            // 3. Local overrides (not checked in)
            .add_source(File::with_name("config/local").required(false))
            // 4. Environment overrides, e.g. CHAINVIEW_FEED__TICK_MS
            .add_source(Environment::with_prefix("CHAINVIEW").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn feed(&self) -> FeedConfig {
        self.feed.clone().unwrap_or_default()
    }

    pub fn presence(&self) -> PresenceConfig {
        self.presence.clone().unwrap_or_default()
    }

    pub fn store(&self) -> StoreConfig {
        self.store.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_defaults() {
        let feed = FeedConfig::default();
        assert_eq!(feed.tick_ms(), 3_000);
        assert_eq!(feed.stock_jitter(), 10);
        assert_eq!(feed.alert_probability(), 0.3);
        assert_eq!(feed.max_alerts(), 10);
    }

    #[test]
    fn test_presence_defaults() {
        let presence = PresenceConfig::default();
        assert_eq!(presence.tick_ms(), 5_000);
        assert_eq!(presence.active_probability(), 0.7);
    }

    #[test]
    fn test_settings_accessors_tolerate_missing_sections() {
        let settings = Settings::default();
        assert_eq!(settings.feed().max_alerts(), 10);
        assert_eq!(settings.store().path(), "chainview_prefs.redb");
    }
}
