use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::config::GuiaConfig;


pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }
}

/// Sliding-window limiter: at most `max_requests` admissions per `window`.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
    admitted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_requests,
            window,
            clock,
            admitted: Mutex::new(VecDeque::with_capacity(max_requests)),
        }
    }

    pub fn with_system_clock(max_requests: usize, window: Duration) -> Self {
        Self::new(max_requests, window, Arc::new(SystemClock))
    }

    pub fn from_config(config: &GuiaConfig) -> Self {
        Self::with_system_clock(config.rate_limit_max_requests, config.rate_limit_window())
    }

    pub fn try_acquire(&self) -> bool {
        let now = self.clock.now();
        let mut admitted = self.admitted.lock();
        Self::evict_expired(&mut admitted, now, self.window);

        if admitted.len() < self.max_requests {
            admitted.push_back(now);
            true
        } else {
            debug!(
                "Rate limit reached: {} request(s) in {:?}",
                admitted.len(),
                self.window
            );
            false
        }
    }

    pub fn remaining(&self) -> usize {
        let now = self.clock.now();
        let mut admitted = self.admitted.lock();
        Self::evict_expired(&mut admitted, now, self.window);
        self.max_requests.saturating_sub(admitted.len())
    }

    fn evict_expired(admitted: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = admitted.front() {
            if now.duration_since(*oldest) >= window {
                admitted.pop_front();
            } else {
                break;
            }
        }
    }
}
