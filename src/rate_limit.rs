use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Source of time for the limiter and the retry loop.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimits {
    /// Requests allowed inside `short_window`.
    pub per_second: usize,
    /// Requests allowed inside `window`.
    pub per_window: usize,
    pub short_window: Duration,
    pub window: Duration,
    /// Pause applied once the short window is full.
    pub cooldown: Duration,
}

impl Default for RateLimits {
    fn default() -> Self {
        RateLimits {
            per_second: 20,
            per_window: 100,
            short_window: Duration::from_secs(1),
            window: Duration::from_secs(120),
            cooldown: Duration::from_millis(1100),
        }
    }
}

/// Sleeps the caller when either window is full. It never rejects.
pub struct RateLimiter {
    limits: RateLimits,
    clock: Arc<dyn Clock>,
    log: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(limits: RateLimits, clock: Arc<dyn Clock>) -> Self {
        RateLimiter {
            limits,
            clock,
            log: VecDeque::new(),
        }
    }

    /// Blocks until one more request fits both windows, then records it.
    pub fn acquire(&mut self) {
        self.prune(self.clock.now());

        if self.log.len() >= self.limits.per_window {
            warn!(
                wait_secs = self.limits.window.as_secs(),
                logged = self.log.len(),
                "Long window exhausted, pausing"
            );
            self.clock.sleep(self.limits.window);
            self.log.clear();
        }

        let now = self.clock.now();
        if self.in_short_window(now) >= self.limits.per_second {
            debug!(
                wait_ms = self.limits.cooldown.as_millis() as u64,
                "Short window full, cooling down"
            );
            self.clock.sleep(self.limits.cooldown);
        }

        self.log.push_back(self.clock.now());
    }

    /// Requests currently tracked in the long window.
    pub fn logged(&self) -> usize {
        self.log.len()
    }

    fn in_short_window(&self, now: Instant) -> usize {
        self.log
            .iter()
            .rev()
            .take_while(|&&t| now.saturating_duration_since(t) < self.limits.short_window)
            .count()
    }

    fn prune(&mut self, now: Instant) {
        while self
            .log
            .front()
            .is_some_and(|&t| now.saturating_duration_since(t) >= self.limits.window)
        {
            self.log.pop_front();
        }
    }
}
