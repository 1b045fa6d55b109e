/// Time sources and the cancellable deferred action
///
/// Animation completion is modeled as a deferred action polled against a
/// `Clock`, so hosts drive it from their event loop and tests drive it with
/// a `VirtualClock`.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source measured from an arbitrary origin.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced time. Clones share the same timeline.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Arc<Mutex<Duration>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// Identifier of a scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Pending<A> {
    id: TimerId,
    due: Duration,
    action: A,
}

/// A single-slot, cancellable deferred action.
///
/// At most one action is outstanding. Scheduling while another is pending
/// replaces it; the replaced action never fires.
#[derive(Debug, Clone)]
pub struct DeferredAction<A> {
    pending: Option<Pending<A>>,
    next_id: u64,
}

impl<A> DeferredAction<A> {
    pub fn new() -> Self {
        Self {
            pending: None,
            next_id: 0,
        }
    }

    /// Schedule `action` to become due `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, action: A) -> TimerId {
        if let Some(previous) = self.pending.take() {
            tracing::debug!("Replacing pending {} before it fired", previous.id);
        }

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending = Some(Pending {
            id,
            due: now + delay,
            action,
        });
        id
    }

    /// Clear the pending action without firing it. Returns it if there was one.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }

    /// Take the pending action if its deadline has been reached.
    pub fn take_due(&mut self, now: Duration) -> Option<A> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.action),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_id(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|p| p.id)
    }

    /// Time left until the pending action is due
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_sub(now))
    }
}

impl<A> Default for DeferredAction<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_clock_shared_between_clones() {
        let clock = VirtualClock::new();
        let other = clock.clone();

        clock.advance_ms(250);
        assert_eq!(other.now(), Duration::from_millis(250));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_action_fires_only_when_due() {
        let mut timer = DeferredAction::new();
        timer.schedule(Duration::ZERO, Duration::from_millis(400), "commit");

        assert_eq!(timer.take_due(Duration::from_millis(399)), None);
        assert!(timer.is_pending());
        assert_eq!(timer.take_due(Duration::from_millis(400)), Some("commit"));
        assert!(!timer.is_pending());
        assert_eq!(timer.take_due(Duration::from_millis(800)), None);
    }

    #[test]
    fn test_cancel_clears_without_firing() {
        let mut timer = DeferredAction::new();
        timer.schedule(Duration::ZERO, Duration::from_millis(10), 1);

        assert_eq!(timer.cancel(), Some(1));
        assert_eq!(timer.take_due(Duration::from_secs(1)), None);
        assert_eq!(timer.cancel(), None);
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let mut timer = DeferredAction::new();
        let first = timer.schedule(Duration::ZERO, Duration::from_millis(10), "first");
        let second = timer.schedule(Duration::ZERO, Duration::from_millis(20), "second");

        assert_ne!(first, second);
        assert_eq!(timer.pending_id(), Some(second));
        assert_eq!(timer.take_due(Duration::from_millis(15)), None);
        assert_eq!(timer.take_due(Duration::from_millis(20)), Some("second"));
    }

    #[test]
    fn test_remaining() {
        let mut timer = DeferredAction::new();
        assert_eq!(timer.remaining(Duration::ZERO), None);

        timer.schedule(Duration::from_millis(100), Duration::from_millis(400), ());
        assert_eq!(
            timer.remaining(Duration::from_millis(300)),
            Some(Duration::from_millis(200))
        );
        assert_eq!(timer.remaining(Duration::from_secs(5)), Some(Duration::ZERO));
    }
}
