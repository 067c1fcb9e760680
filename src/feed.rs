use crate::config::FeedConfig;
use crate::context::RandomSource;
use crate::model::{InventoryItem, Severity};
use std::sync::Arc;

/// One sampled data-feed tick, ready to be applied to the state container.
#[derive(Debug, Clone, Default)]
pub struct FeedTick {
    pub stock_deltas: Vec<StockDelta>,
    pub new_alert: Option<AlertDraft>,
}

#[derive(Debug, Clone)]
pub struct StockDelta {
    pub item_id: String,
    pub delta: i64,
}

/// Alert content without identity or timestamp; the state container assigns
/// both when it applies the tick.
#[derive(Debug, Clone)]
pub struct AlertDraft {
    pub severity: Severity,
    pub message: String,
    pub location: Option<String>,
}

/// Where feed ticks come from. The simulated source below is the only
/// implementation in this repo; a real feed can be swapped in without
/// touching the state container or the runtime.
pub trait DataSource: Send + Sync {
    fn next_tick(&self, inventory: &[InventoryItem]) -> FeedTick;
}

const CANNED_MESSAGES: &[&str] = &[
    "System detected potential supply chain optimization opportunity",
    "Carrier capacity tightening on primary lane",
    "Customs clearance backlog reported at port of entry",
    "Demand forecast deviation exceeds planning tolerance",
];

/// Randomized stand-in for a live feed: per item a signed uniform delta in
/// [-jitter, jitter), plus an alert with fixed probability per tick.
pub struct SimulatedDataSource {
    rng: Arc<dyn RandomSource>,
    stock_jitter: i64,
    alert_probability: f64,
    critical_probability: f64,
}

impl SimulatedDataSource {
    pub fn new(rng: Arc<dyn RandomSource>, config: &FeedConfig) -> Self {
        Self {
            rng,
            stock_jitter: config.stock_jitter(),
            alert_probability: config.alert_probability(),
            critical_probability: config.critical_probability(),
        }
    }
}

impl DataSource for SimulatedDataSource {
    fn next_tick(&self, inventory: &[InventoryItem]) -> FeedTick {
        let span = (self.stock_jitter * 2) as f64;
        let stock_deltas = inventory
            .iter()
            .map(|item| StockDelta {
                item_id: item.id.clone(),
                delta: (self.rng.next_f64() * span).floor() as i64 - self.stock_jitter,
            })
            .collect();

        let new_alert = if self.rng.next_f64() < self.alert_probability {
            let severity = if self.rng.next_f64() < self.critical_probability {
                Severity::Critical
            } else {
                Severity::Info
            };
            let idx = (self.rng.next_f64() * CANNED_MESSAGES.len() as f64) as usize;
            let message = CANNED_MESSAGES[idx.min(CANNED_MESSAGES.len() - 1)];
            Some(AlertDraft {
                severity,
                message: message.to_string(),
                location: None,
            })
        } else {
            None
        };

        FeedTick {
            stock_deltas,
            new_alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SeededRandomSource;
    use crate::model::Trend;
    use chrono::Utc;

    fn item(id: &str, stock: i64) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            name: "Widget".to_string(),
            location: "Test Warehouse".to_string(),
            current_stock: stock,
            min_threshold: 10,
            max_capacity: 1000,
            category: "Test".to_string(),
            last_updated: Utc::now(),
            trend: Trend::Stable,
        }
    }

    #[test]
    fn deltas_stay_within_jitter_bounds() {
        let rng = Arc::new(SeededRandomSource::new(7));
        let source = SimulatedDataSource::new(rng, &FeedConfig::default());
        let inventory = vec![item("INV001", 100), item("INV002", 50)];

        for _ in 0..500 {
            let tick = source.next_tick(&inventory);
            assert_eq!(tick.stock_deltas.len(), 2);
            for d in &tick.stock_deltas {
                assert!(d.delta >= -10 && d.delta < 10, "delta {} out of range", d.delta);
            }
        }
    }

    #[test]
    fn alert_probability_one_always_synthesizes() {
        let rng = Arc::new(SeededRandomSource::new(7));
        let config = FeedConfig {
            alert_probability: Some(1.0),
            ..Default::default()
        };
        let source = SimulatedDataSource::new(rng, &config);

        for _ in 0..50 {
            let tick = source.next_tick(&[]);
            assert!(tick.new_alert.is_some());
        }
    }

    #[test]
    fn alert_probability_zero_never_synthesizes() {
        let rng = Arc::new(SeededRandomSource::new(7));
        let config = FeedConfig {
            alert_probability: Some(0.0),
            ..Default::default()
        };
        let source = SimulatedDataSource::new(rng, &config);

        for _ in 0..50 {
            assert!(source.next_tick(&[]).new_alert.is_none());
        }
    }
}
