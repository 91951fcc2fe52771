use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::Duration;

// Source of "now" in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

// Rate limit entry - tracks requests per client id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: i64,
}

impl RateLimitEntry {
    fn fresh(now: i64) -> Self {
        Self { count: 1, window_start: now }
    }
}

/// Fixed-window admission counter keyed by client id.
///
/// The call being checked counts toward the limit, so calls `1..=max_attempts`
/// inside a window are admitted and call `max_attempts + 1` is the first one
/// rejected. An expired window is replaced (count back to 1), not decayed.
///
/// Windows start at each client's first call, not at wall-clock boundaries, and
/// up to `2 * max_attempts` calls can still cluster around a window edge.
///
/// Client ids are advisory (a session token or header the caller chose). This is
/// best-effort per-session throttling, not a security boundary.
pub struct RateLimiter<C: Clock = SystemClock> {
    entries: DashMap<String, RateLimitEntry>,
    max_attempts: u32,
    window_millis: i64,
    clock: C,
}

impl RateLimiter<SystemClock> {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self::with_clock(max_attempts, window, SystemClock)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(max_attempts: u32, window: Duration, clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            max_attempts,
            window_millis: i64::try_from(window.as_millis()).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Records an attempt for `client_id` and reports whether it is over the limit.
    ///
    /// The lookup, window check and increment happen under the entry's lock, so
    /// two concurrent callers can never both observe the same count.
    pub fn is_rate_limited(&self, client_id: &str) -> bool {
        let now = self.clock.now_millis();

        match self.entries.entry(client_id.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(RateLimitEntry::fresh(now));
                false
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();

                // window expired..? replace it
                if now - entry.window_start > self.window_millis {
                    *entry = RateLimitEntry::fresh(now);
                    return false;
                }

                entry.count = entry.count.saturating_add(1);
                entry.count > self.max_attempts
            }
        }
    }

    // Forget the client entirely; the next call behaves like a first call.
    // No route forgets a client early, so only tests call this for now.
    #[allow(dead_code)]
    pub fn reset(&self, client_id: &str) {
        self.entries.remove(client_id);
    }

    /// Drops every record whose window has expired and returns how many went.
    ///
    /// An expired record and a missing one answer the next call identically, so
    /// this never changes an admission decision.
    pub fn prune(&self) -> usize {
        let now = self.clock.now_millis();
        let before = self.entries.len();
        self.entries.retain(|_, e| now - e.window_start <= self.window_millis);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn entry(&self, client_id: &str) -> Option<RateLimitEntry> {
        self.entries.get(client_id).map(|e| *e)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_millis.max(0) as u64)
    }
}
