use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationKind {
    #[serde(rename = "warehouse")]
    Warehouse,
    #[serde(rename = "supplier")]
    Supplier,
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "distribution")]
    Distribution,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShipmentStatus {
    #[serde(rename = "in-transit")]
    InTransit,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "delayed")]
    Delayed,
    #[serde(rename = "pending")]
    Pending,
}

/// A shipment between two supply-chain locations.
///
/// Shipments are created when the feed is seeded and never transition in the
/// simulated feed; only inventory and alerts mutate per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    pub status: ShipmentStatus,
    pub cargo: String,
    pub estimated_arrival: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<Location>,
    pub value: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Trend {
    #[serde(rename = "up")]
    Up,
    #[serde(rename = "down")]
    Down,
    #[serde(rename = "stable")]
    Stable,
}

/// Stock record for one item at one location.
///
/// Invariant: `current_stock >= 0`, enforced by clamping in the state container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub location: String,
    pub current_stock: i64,
    pub min_threshold: i64,
    pub max_capacity: i64,
    pub category: String,
    pub last_updated: DateTime<Utc>,
    pub trend: Trend,
}

impl InventoryItem {
    pub fn is_below_threshold(&self) -> bool {
        self.current_stock < self.min_threshold
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    #[serde(rename = "critical")]
    Critical,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "info")]
    Info,
}

/// Persistent alert record. The `resolved` flag on the stored record stays
/// false; resolution lives in the state container's resolved set and is merged
/// into the view at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub resolved: bool,
}

/// Ephemeral cursor position as viewport percentages, both axes in [0, 100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResults {
    pub cost_impact: Decimal,
    pub time_impact: i64,
    pub risk_level: RiskLevel,
}

impl ScenarioResults {
    /// Summary for a freshly created scenario: nothing computed yet.
    pub fn zeroed() -> Self {
        Self {
            cost_impact: Decimal::ZERO,
            time_impact: 0,
            risk_level: RiskLevel::Low,
        }
    }
}

/// What-if workspace entry. Created on demand by a user action; never updated
/// or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, Value>,
    pub results: ScenarioResults,
    pub collaborators: Vec<User>,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationKind {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "info")]
    Info,
}

/// Transient toast, distinct from the persistent alert list. Removed by user
/// dismissal or by ttl expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Everything a state mutation can report to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OpsEvent {
    InventoryUpdated(InventoryItem),
    AlertRaised(Alert),
    AlertResolved(String),
    PresenceChanged(User),
    ScenarioCreated(Scenario),
    NotificationPushed(Notification),
    NotificationDismissed(String),
    NotificationExpired(String),
}
