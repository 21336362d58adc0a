//! Fixed-interval request pacing.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Default spacing between lookup requests (10 requests per second).
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Hands out request slots at least `interval` apart.
///
/// Slots are reserved in the order `acquire` is first polled, so a batch
/// whose futures are polled in row order gets the schedule
/// `start, start + interval, start + 2 * interval, ...` no matter how many
/// rows it has. Idle time is not banked: after a pause the next slot is
/// "now", never a burst of catch-up slots.
#[derive(Debug)]
pub struct RequestPacer {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestPacer {
    /// Create a pacer with a fixed interval between slots.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Create a pacer allowing at most `rate` requests per second.
    pub fn per_second(rate: u32) -> Self {
        Self::new(Duration::from_secs(1) / rate.max(1))
    }

    /// The interval between slots.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Reserve the next slot without waiting for it.
    pub fn reserve(&self) -> Instant {
        let now = Instant::now();
        let mut next = self.next_slot.lock();
        let slot = match *next {
            Some(at) if at > now => at,
            _ => now,
        };
        *next = Some(slot + self.interval);
        slot
    }

    /// Reserve the next slot and wait until it arrives.
    pub async fn acquire(&self) -> Instant {
        let slot = self.reserve();
        tokio::time::sleep_until(slot).await;
        slot
    }
}

impl Default for RequestPacer {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_INTERVAL)
    }
}
