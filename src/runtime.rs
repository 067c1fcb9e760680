use crate::config::{FeedConfig, PresenceConfig};
use crate::feed::DataSource;
use crate::model::{Notification, NotificationKind, OpsEvent, Scenario};
use crate::presence::PresenceSource;
use crate::state::OpsState;
use crate::validation::FieldError;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::info;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Drives the state container: two independent, uncoordinated interval tasks
/// (data feed and presence) plus pass-through entry points for user actions.
/// Every produced `OpsEvent` is fanned out on a broadcast channel.
pub struct OpsRuntime {
    state: Arc<RwLock<OpsState>>,
    events: broadcast::Sender<OpsEvent>,
    data_source: Arc<dyn DataSource>,
    presence_source: Arc<dyn PresenceSource>,
    feed_config: FeedConfig,
    presence_config: PresenceConfig,
    handles: Vec<JoinHandle<()>>,
}

impl OpsRuntime {
    pub fn new(
        state: OpsState,
        data_source: Arc<dyn DataSource>,
        presence_source: Arc<dyn PresenceSource>,
        feed_config: FeedConfig,
        presence_config: PresenceConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(state)),
            events,
            data_source,
            presence_source,
            feed_config,
            presence_config,
            handles: Vec::new(),
        }
    }

    /// Shared handle to the state container, for read access.
    pub fn state(&self) -> Arc<RwLock<OpsState>> {
        self.state.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OpsEvent> {
        self.events.subscribe()
    }

    /// Spawn the two simulator loops. Idempotent start is not supported;
    /// callers own the lifecycle.
    pub fn start(&mut self) {
        let data_tick = Duration::from_millis(self.feed_config.tick_ms());
        let presence_tick = Duration::from_millis(self.presence_config.tick_ms());
        let notification_ttl = self.feed_config.notification_ttl_ms();

        info!(
            data_tick_ms = data_tick.as_millis() as u64,
            presence_tick_ms = presence_tick.as_millis() as u64,
            "Starting simulators"
        );

        // Data feed loop: stock walk + alert synthesis + toast expiry.
        let state = self.state.clone();
        let events = self.events.clone();
        let source = self.data_source.clone();
        self.handles.push(tokio::spawn(async move {
            let mut interval = tokio::time::interval(data_tick);
            interval.tick().await; // immediate first fire, skip
            loop {
                interval.tick().await;
                let produced = {
                    let mut guard = state.write();
                    let tick = source.next_tick(guard.inventory());
                    let mut produced = guard.apply_feed_tick(tick);
                    produced.extend(guard.expire_notifications(notification_ttl));
                    produced
                };
                broadcast_all(&events, produced);
            }
        }));

        // Presence loop, independent of the data loop by design.
        let state = self.state.clone();
        let events = self.events.clone();
        let source = self.presence_source.clone();
        self.handles.push(tokio::spawn(async move {
            let mut interval = tokio::time::interval(presence_tick);
            interval.tick().await;
            loop {
                interval.tick().await;
                let produced = {
                    let mut guard = state.write();
                    let tick = source.next_tick(guard.users());
                    guard.apply_presence_tick(tick)
                };
                broadcast_all(&events, produced);
            }
        }));
    }

    /// Tear down both simulator loops (the owning view unmounted).
    pub fn shutdown(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("Simulators stopped");
    }

    // --- User actions ---

    pub fn resolve_alert(&self, alert_id: &str) {
        let event = self.state.write().resolve_alert(alert_id);
        if let Some(event) = event {
            broadcast_all(&self.events, vec![event]);
        }
    }

    pub fn create_scenario(&self, name: &str, description: &str) -> Result<Scenario, FieldError> {
        let (scenario, event) = self.state.write().create_scenario(name, description)?;
        broadcast_all(&self.events, vec![event]);
        Ok(scenario)
    }

    pub fn push_notification(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> Notification {
        let (notification, event) = self.state.write().push_notification(kind, title, message);
        broadcast_all(&self.events, vec![event]);
        notification
    }

    pub fn dismiss_notification(&self, id: &str) {
        let event = self.state.write().dismiss_notification(id);
        if let Some(event) = event {
            broadcast_all(&self.events, vec![event]);
        }
    }
}

impl Drop for OpsRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn broadcast_all(sender: &broadcast::Sender<OpsEvent>, events: Vec<OpsEvent>) {
    for event in events {
        // Send only fails when there are no subscribers; that is fine.
        let _ = sender.send(event);
    }
}
