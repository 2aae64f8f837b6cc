//! Single-flight request spacing.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// A source of time that can also wait.
///
/// Production code uses [`TokioClock`]; tests substitute a clock they
/// control so spacing can be checked without real delays.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// The tokio runtime clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Spaces out requests so that no two start within `min_interval`.
///
/// Callers queue on an internal lock in arrival order; a caller that arrives
/// too early waits for its slot rather than being rejected. The limiter
/// owns its "last request" instant, so separate limiters are independent.
#[derive(Debug)]
pub struct RateLimiter<C = TokioClock> {
    clock: C,
    min_interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter<TokioClock> {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, TokioClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(min_interval: Duration, clock: C) -> Self {
        Self {
            clock,
            min_interval,
            last: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request may start, and claim that slot.
    pub async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = self.clock.now();
            if ready_at > now {
                let wait = ready_at - now;
                debug!(wait_ms = wait.as_millis() as u64, "waiting for geocoder slot");
                self.clock.sleep(wait).await;
            }
        }
        *last = Some(self.clock.now());
    }
}
