//! Deferred AI move.
//!
//! The AI plays after a fixed pause. Instead of a timer thread the game keeps
//! a deadline; the caller polls with the current time. At most one move is
//! ever pending.

use std::time::{Duration, Instant};

/// A pending AI move, or nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeferredMove {
    due: Option<Instant>,
}

impl DeferredMove {
    /// Arm the move to fire `delay` after `now`. Re-arming replaces the
    /// previous deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Time left until the deadline; zero once due, `None` if nothing is pending.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Disarm and report whether the move was due.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.due = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let start = Instant::now();
        let delay = Duration::from_millis(500);
        let mut deferred = DeferredMove::default();
        assert!(!deferred.is_pending());
        assert_eq!(deferred.remaining(start), None);

        deferred.schedule(start, delay);
        assert!(deferred.is_pending());
        assert!(!deferred.is_due(start));
        assert_eq!(deferred.remaining(start), Some(delay));
        assert!(!deferred.fire(start + Duration::from_millis(499)));
        assert!(deferred.is_pending());

        assert!(deferred.fire(start + delay));
        assert!(!deferred.is_pending());
        assert!(!deferred.fire(start + delay));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut deferred = DeferredMove::default();
        deferred.schedule(start, Duration::ZERO);
        deferred.cancel();
        assert!(!deferred.is_due(start));
        assert!(!deferred.fire(start));
    }

    #[test]
    fn test_remaining_saturates() {
        let start = Instant::now();
        let mut deferred = DeferredMove::default();
        deferred.schedule(start, Duration::from_millis(10));
        assert_eq!(
            deferred.remaining(start + Duration::from_secs(1)),
            Some(Duration::ZERO)
        );
    }
}
