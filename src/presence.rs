use crate::config::PresenceConfig;
use crate::context::RandomSource;
use crate::model::{Cursor, User};
use std::sync::Arc;

/// One sampled presence tick: a fresh active flag (and cursor, when active)
/// for every known collaborator.
#[derive(Debug, Clone, Default)]
pub struct PresenceTick {
    pub updates: Vec<PresenceUpdate>,
}

#[derive(Debug, Clone)]
pub struct PresenceUpdate {
    pub user_id: String,
    pub active: bool,
    pub cursor: Option<Cursor>,
}

/// Where presence ticks come from. Independent of the data feed; the two
/// timers are uncoordinated by design.
pub trait PresenceSource: Send + Sync {
    fn next_tick(&self, users: &[User]) -> PresenceTick;
}

/// Randomized stand-in for real multi-user presence: each user is active with
/// a fixed probability, and active users get a cursor uniform in [0,100] on
/// both axes.
pub struct SimulatedPresenceSource {
    rng: Arc<dyn RandomSource>,
    active_probability: f64,
}

impl SimulatedPresenceSource {
    pub fn new(rng: Arc<dyn RandomSource>, config: &PresenceConfig) -> Self {
        Self {
            rng,
            active_probability: config.active_probability(),
        }
    }
}

impl PresenceSource for SimulatedPresenceSource {
    fn next_tick(&self, users: &[User]) -> PresenceTick {
        let updates = users
            .iter()
            .map(|user| {
                let active = self.rng.next_f64() < self.active_probability;
                let cursor = active.then(|| Cursor {
                    x: self.rng.next_f64() * 100.0,
                    y: self.rng.next_f64() * 100.0,
                });
                PresenceUpdate {
                    user_id: user.id.clone(),
                    active,
                    cursor,
                }
            })
            .collect();

        PresenceTick { updates }
    }
}
