use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use uuid::Uuid;

/// Trait for providing the current time.
/// Decouples logic from `Utc::now()` to enable deterministic replay.
pub trait TimeProvider: Send + Sync {
    fn now_millis(&self) -> i64;
    fn now(&self) -> DateTime<Utc>;
}

/// Trait for generating entity identifiers.
///
/// `next_id` yields timestamp-derived ids like `AL1736951400000` (the shape
/// the dashboard wire format uses); `next_token` yields an opaque id for
/// toasts.
pub trait IdProvider: Send + Sync {
    fn next_id(&self, prefix: &str) -> String;
    fn next_token(&self) -> String;
}

/// Trait for sampling uniform randomness in [0, 1).
/// The feed and presence simulators draw through this so tests can seed them.
pub trait RandomSource: Send + Sync {
    fn next_f64(&self) -> f64;
}

/// Context holding the providers. Passed down to the state container and
/// the simulators.
#[derive(Clone)]
pub struct OpsContext {
    pub time: Arc<dyn TimeProvider>,
    pub id: Arc<dyn IdProvider>,
    pub rng: Arc<dyn RandomSource>,
}

impl OpsContext {
    pub fn new_system() -> Self {
        Self {
            time: Arc::new(SystemTimeProvider),
            id: Arc::new(TimestampIdProvider::new()),
            rng: Arc::new(ThreadRandomSource),
        }
    }

    pub fn new_deterministic(start_time_ms: i64, seed: u64) -> Self {
        Self {
            time: Arc::new(SteppedTimeProvider::new(start_time_ms)),
            id: Arc::new(SequentialIdProvider::new()),
            rng: Arc::new(SeededRandomSource::new(seed)),
        }
    }
}

// --- Live implementations ---

pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Ids of the form `{prefix}{millis}`. The atomic counter disambiguates
/// multiple ids minted within the same millisecond.
pub struct TimestampIdProvider {
    counter: AtomicU64,
}

impl TimestampIdProvider {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for TimestampIdProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdProvider for TimestampIdProvider {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}{}{:03}", prefix, Utc::now().timestamp_millis(), n % 1000)
    }

    fn next_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

// --- Deterministic implementations ---

pub struct SteppedTimeProvider {
    current_time_ms: AtomicI64,
}

impl SteppedTimeProvider {
    pub fn new(start_time_ms: i64) -> Self {
        Self {
            current_time_ms: AtomicI64::new(start_time_ms),
        }
    }

    pub fn advance(&self, duration_ms: i64) {
        self.current_time_ms.fetch_add(duration_ms, Ordering::SeqCst);
    }
}

impl TimeProvider for SteppedTimeProvider {
    fn now_millis(&self) -> i64 {
        self.current_time_ms.load(Ordering::SeqCst)
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_millis()).unwrap_or_default()
    }
}

pub struct SequentialIdProvider {
    counter: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIdProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}{:06}", prefix, n)
    }

    fn next_token(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("00000000-0000-0000-0000-{:012x}", n)
    }
}

pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_f64(&self) -> f64 {
        self.rng.lock().r#gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_prefixed_and_unique() {
        let ids = SequentialIdProvider::new();
        let a = ids.next_id("SC");
        let b = ids.next_id("SC");
        assert!(a.starts_with("SC"));
        assert_ne!(a, b);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let a = SeededRandomSource::new(42);
        let b = SeededRandomSource::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn stepped_time_advances() {
        let t = SteppedTimeProvider::new(1_000);
        assert_eq!(t.now_millis(), 1_000);
        t.advance(3_000);
        assert_eq!(t.now_millis(), 4_000);
    }
}
