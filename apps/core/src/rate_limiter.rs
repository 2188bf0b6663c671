use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Sliding-window limiter keyed by sender (phone number, or a shared
/// anonymous bucket).
///
/// Owned by the relay actor, so it needs no locking.
pub struct RateLimiter {
    /// Accepted request timestamps per sender, oldest first.
    requests: HashMap<String, Vec<Instant>>,
    /// Requests allowed per sender within `window`.
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: HashMap::new(),
            limit,
            window,
        }
    }

    /// Records a request from `sender` if it is under the limit.
    ///
    /// Returns `false` when the sender has used up its window.
    pub fn check(&mut self, sender: &str) -> bool {
        self.check_at(sender, Instant::now())
    }

    fn check_at(&mut self, sender: &str, now: Instant) -> bool {
        let window = self.window;
        let timestamps = self.requests.entry(sender.to_string()).or_default();
        timestamps.retain(|&seen| now.duration_since(seen) < window);

        if timestamps.len() < self.limit {
            timestamps.push(now);
            true
        } else {
            false
        }
    }

    /// Drops senders with no request inside the window.
    pub fn prune(&mut self) {
        let now = Instant::now();
        let window = self.window;
        self.requests
            .retain(|_, timestamps| timestamps.iter().any(|&seen| now.duration_since(seen) < window));
    }

    /// Number of senders currently tracked.
    pub fn tracked(&self) -> usize {
        self.requests.len()
    }
}
