//! Per-editor state that outlives a single request: the configured git user
//! and the pending edit-triggered refresh.

/// The `user.name` configured for the current working directory.
///
/// Only used for labels ("You" instead of the raw name), so a stale value
/// is harmless. Refresh it when [`UserNameCache::needs_refresh`] says so.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserNameCache {
    workdir: Option<String>,
    user_name: Option<String>,
}

impl UserNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the cache belongs to another directory or holds no name.
    pub fn needs_refresh(&self, workdir: &str) -> bool {
        self.workdir.as_deref() != Some(workdir) || self.user_name.is_none()
    }

    /// Record the result of `git config user.name` for `workdir`.
    ///
    /// A blank or missing name is stored as unknown.
    pub fn store(&mut self, workdir: &str, user_name: Option<&str>) {
        self.workdir = Some(workdir.to_string());
        self.user_name = user_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn invalidate(&mut self) {
        self.workdir = None;
        self.user_name = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRefresh {
    ticket: u32,
    due_at_ms: u64,
}

/// Coalesces bursts of refresh requests into one.
///
/// The host calls [`schedule`](Debouncer::schedule) on every edit and sets
/// a timer for the delay; when the timer fires it asks
/// [`fire`](Debouncer::fire) whether its ticket is still the newest one.
/// Scheduling again cancels the previous ticket, so at most one refresh is
/// outstanding. Times are milliseconds on any monotonic clock the host likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay_ms: u64,
    next_ticket: u32,
    pending: Option<PendingRefresh>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Debouncer {
            delay_ms,
            next_ticket: 1,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Schedule a refresh at `now_ms + delay`, replacing any pending one.
    /// Returns the ticket the host must present to [`fire`](Self::fire).
    pub fn schedule(&mut self, now_ms: u64) -> u32 {
        let ticket = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        if self.next_ticket == 0 {
            self.next_ticket = 1; // 0 never names a ticket
        }

        if let Some(previous) = self.pending.replace(PendingRefresh {
            ticket,
            due_at_ms: now_ms.saturating_add(self.delay_ms),
        }) {
            log::trace!("refresh ticket {} superseded by {}", previous.ticket, ticket);
        }

        ticket
    }

    /// Drop the pending refresh, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the refresh for `ticket` should run now.
    ///
    /// True only for the newest ticket once its quiet period has elapsed; the
    /// ticket is consumed, so a second call returns false.
    pub fn fire(&mut self, ticket: u32, now_ms: u64) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket && now_ms >= pending.due_at_ms => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_cache_refresh_rules() {
        let mut cache = UserNameCache::new();
        assert!(cache.needs_refresh("/repo"));

        cache.store("/repo", Some("Alice\n"));
        assert_eq!(cache.user_name(), Some("Alice"));
        assert!(!cache.needs_refresh("/repo"));
        assert!(cache.needs_refresh("/other"));

        cache.store("/other", Some("   "));
        assert_eq!(cache.user_name(), None);
        assert!(cache.needs_refresh("/other"));

        cache.store("/other", Some("Bob"));
        cache.invalidate();
        assert!(cache.needs_refresh("/other"));
        assert_eq!(cache.user_name(), None);
    }

    #[test]
    fn test_debouncer_fires_after_delay() {
        let mut debouncer = Debouncer::new(500);
        let ticket = debouncer.schedule(1_000);
        assert!(debouncer.is_pending());
        assert!(!debouncer.fire(ticket, 1_499));
        assert!(debouncer.fire(ticket, 1_500));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire(ticket, 2_000));
    }

    #[test]
    fn test_debouncer_only_newest_ticket_fires() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.schedule(0);
        let second = debouncer.schedule(200);
        assert_ne!(first, second);
        assert!(!debouncer.fire(first, 10_000));
        assert!(!debouncer.fire(second, 600));
        assert!(debouncer.fire(second, 700));
    }

    #[test]
    fn test_debouncer_cancel() {
        let mut debouncer = Debouncer::new(100);
        let ticket = debouncer.schedule(0);
        debouncer.cancel();
        assert!(!debouncer.fire(ticket, 1_000));
    }

    #[test]
    fn test_debouncer_ticket_skips_zero() {
        let mut debouncer = Debouncer::new(0);
        debouncer.next_ticket = u32::MAX;
        assert_eq!(debouncer.schedule(0), u32::MAX);
        assert_eq!(debouncer.schedule(0), 1);
    }
}
