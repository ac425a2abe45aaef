//! Time provider abstraction for testable time-dependent logic
//!
//! Key events carry millisecond timestamps relative to the start of a scanning
//! session. [`SessionClock`] produces those timestamps from a [`TimeProvider`].

#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::time::Duration;
use std::time::Instant;

/// Abstraction over system time for testable time-dependent logic
pub trait TimeProvider: Send + Sync {
    /// Get the current monotonic time (for measuring intervals)
    fn now(&self) -> Instant;
}

/// Production time provider using actual system time
#[derive(Default, Clone)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Millisecond clock anchored at the start of a scanning session
pub struct SessionClock<P: TimeProvider = SystemTimeProvider> {
    provider: P,
    origin: Instant,
}

impl SessionClock<SystemTimeProvider> {
    pub fn system() -> Self {
        Self::with_provider(SystemTimeProvider)
    }
}

impl<P: TimeProvider> SessionClock<P> {
    pub fn with_provider(provider: P) -> Self {
        let origin = provider.now();
        Self { provider, origin }
    }

    /// Milliseconds elapsed since the clock was created
    pub fn now_ms(&self) -> u64 {
        let elapsed = self.provider.now().saturating_duration_since(self.origin);
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Mock time provider for deterministic testing
#[derive(Clone)]
#[cfg(test)]
pub struct MockTimeProvider {
    current_instant: Arc<Mutex<Instant>>,
}

#[cfg(test)]
impl MockTimeProvider {
    pub fn new() -> Self {
        Self {
            current_instant: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Advance monotonic time by the given duration
    pub fn advance_time(&self, duration: Duration) {
        let mut instant = self.current_instant.lock().unwrap();
        *instant += duration;
    }
}

#[cfg(test)]
impl TimeProvider for MockTimeProvider {
    fn now(&self) -> Instant {
        *self.current_instant.lock().unwrap()
    }
}
