use crate::context::OpsContext;
use crate::feed::FeedTick;
use crate::model::{
    Alert, InventoryItem, Notification, NotificationKind, OpsEvent, Scenario, ScenarioResults,
    Shipment, Trend, User,
};
use crate::presence::PresenceTick;
use crate::validation::{self, FieldError};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

/// Seed payload for a fresh state container.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub shipments: Vec<Shipment>,
    pub inventory: Vec<InventoryItem>,
    pub alerts: Vec<Alert>,
    pub users: Vec<User>,
    pub current_user: Option<User>,
    pub scenarios: Vec<Scenario>,
}

/// Owned container for all dashboard state.
///
/// Every mutation goes through one explicit entry point and returns the
/// `OpsEvent`s it produced, so the runtime can fan them out to subscribers.
/// Nothing in here draws randomness or reads the wall clock directly; ticks
/// arrive pre-sampled from the feed/presence sources and time comes from the
/// context.
pub struct OpsState {
    shipments: Vec<Shipment>,
    inventory: Vec<InventoryItem>,
    // Newest first, capped at max_alerts.
    alerts: Vec<Alert>,
    resolved: HashSet<String>,
    users: Vec<User>,
    current_user: User,
    // Newest first.
    scenarios: Vec<Scenario>,
    notifications: Vec<Notification>,
    max_alerts: usize,
    ctx: Arc<OpsContext>,
}

impl OpsState {
    pub fn new(ctx: Arc<OpsContext>, max_alerts: usize, seed: SeedData) -> Self {
        let current_user = seed.current_user.unwrap_or_else(|| User {
            id: "user-1".to_string(),
            name: "Supply Chain Manager".to_string(),
            avatar: "👨‍💼".to_string(),
            color: "#0EA5E9".to_string(),
            active: true,
            cursor: None,
        });

        let mut alerts = seed.alerts;
        alerts.truncate(max_alerts);

        info!(
            shipments = seed.shipments.len(),
            inventory = seed.inventory.len(),
            alerts = alerts.len(),
            users = seed.users.len(),
            "State container seeded"
        );

        Self {
            shipments: seed.shipments,
            inventory: seed.inventory,
            alerts,
            resolved: HashSet::new(),
            users: seed.users,
            current_user,
            scenarios: seed.scenarios,
            notifications: Vec::new(),
            max_alerts,
            ctx,
        }
    }

    // --- Feed tick ---

    /// Apply one data-feed tick: bounded stock deltas (clamped at zero) and at
    /// most one synthesized alert, prepended and capped at `max_alerts`.
    pub fn apply_feed_tick(&mut self, tick: FeedTick) -> Vec<OpsEvent> {
        let mut events = Vec::new();
        let now = self.ctx.time.now();

        for delta in &tick.stock_deltas {
            let Some(item) = self.inventory.iter_mut().find(|i| i.id == delta.item_id) else {
                warn!(item_id = %delta.item_id, "Stock delta for unknown inventory item - skipped");
                continue;
            };

            item.current_stock = (item.current_stock + delta.delta).max(0);
            item.trend = match delta.delta {
                d if d > 0 => Trend::Up,
                d if d < 0 => Trend::Down,
                _ => Trend::Stable,
            };
            item.last_updated = now;
            events.push(OpsEvent::InventoryUpdated(item.clone()));
        }

        if let Some(draft) = tick.new_alert {
            let alert = Alert {
                id: self.ctx.id.next_id("AL"),
                severity: draft.severity,
                message: draft.message,
                timestamp: now,
                location: draft.location,
                resolved: false,
            };
            info!(alert_id = %alert.id, severity = ?alert.severity, "Alert synthesized");
            self.alerts.insert(0, alert.clone());
            self.alerts.truncate(self.max_alerts);
            events.push(OpsEvent::AlertRaised(alert));
        }

        events
    }

    // --- Presence tick ---

    /// Apply one presence tick. Each sampled user gets its active flag
    /// overwritten; the cursor is set when active and cleared otherwise.
    /// The current user is never resampled.
    pub fn apply_presence_tick(&mut self, tick: PresenceTick) -> Vec<OpsEvent> {
        let mut events = Vec::new();

        for update in &tick.updates {
            if update.user_id == self.current_user.id {
                continue;
            }
            let Some(user) = self.users.iter_mut().find(|u| u.id == update.user_id) else {
                continue;
            };
            user.active = update.active;
            user.cursor = if update.active { update.cursor } else { None };
            events.push(OpsEvent::PresenceChanged(user.clone()));
        }

        events
    }

    // --- Alert resolution ---

    /// Record an alert id as resolved. The underlying record is untouched;
    /// `alerts_view` merges the set at read time. Ids not currently in the
    /// alert list are accepted (the list is capped, the set is not).
    pub fn resolve_alert(&mut self, alert_id: &str) -> Option<OpsEvent> {
        if !self.resolved.insert(alert_id.to_string()) {
            return None;
        }
        info!(alert_id = %alert_id, "Alert resolved");
        Some(OpsEvent::AlertResolved(alert_id.to_string()))
    }

    /// The alert list with the resolved set merged in, newest first.
    pub fn alerts_view(&self) -> Vec<Alert> {
        self.alerts
            .iter()
            .map(|a| {
                let mut merged = a.clone();
                merged.resolved = a.resolved || self.resolved.contains(&a.id);
                merged
            })
            .collect()
    }

    pub fn unresolved_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| !a.resolved && !self.resolved.contains(&a.id))
            .count()
    }

    // --- Scenarios ---

    /// Synthesize a scenario from a name and description: timestamp-derived
    /// id, empty parameters, zeroed results, the acting user as the sole
    /// collaborator. Prepended to the list.
    pub fn create_scenario(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<(Scenario, OpsEvent), FieldError> {
        validation::validate_scenario(name, description)?;

        let scenario = Scenario {
            id: self.ctx.id.next_id("SC"),
            name: name.to_string(),
            description: description.to_string(),
            parameters: BTreeMap::new(),
            results: ScenarioResults::zeroed(),
            collaborators: vec![self.current_user.clone()],
            last_modified: self.ctx.time.now(),
        };

        info!(scenario_id = %scenario.id, name = %scenario.name, "Scenario created");
        self.scenarios.insert(0, scenario.clone());
        Ok((scenario.clone(), OpsEvent::ScenarioCreated(scenario)))
    }

    // --- Notifications (toasts) ---

    pub fn push_notification(
        &mut self,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> (Notification, OpsEvent) {
        let notification = Notification {
            id: self.ctx.id.next_token(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            created_at: self.ctx.time.now(),
        };
        self.notifications.push(notification.clone());
        (
            notification.clone(),
            OpsEvent::NotificationPushed(notification),
        )
    }

    /// Remove exactly the entry with the given id, preserving the order of
    /// the rest.
    pub fn dismiss_notification(&mut self, id: &str) -> Option<OpsEvent> {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        if self.notifications.len() == before {
            warn!(notification_id = %id, "Dismiss for unknown notification");
            return None;
        }
        Some(OpsEvent::NotificationDismissed(id.to_string()))
    }

    /// Drop toasts older than `ttl_ms`.
    pub fn expire_notifications(&mut self, ttl_ms: i64) -> Vec<OpsEvent> {
        let cutoff = self.ctx.time.now_millis() - ttl_ms;
        let mut events = Vec::new();
        self.notifications.retain(|n| {
            if n.created_at.timestamp_millis() < cutoff {
                events.push(OpsEvent::NotificationExpired(n.id.clone()));
                false
            } else {
                true
            }
        });
        events
    }

    // --- Read accessors ---

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn current_user(&self) -> &User {
        &self.current_user
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}
