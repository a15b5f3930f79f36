//! Deferred, re-armable tasks driven by an external clock.
//!
//! The engine never sleeps or spawns. The host calls
//! `Controller::advance(now)` with a monotonic timestamp, and each
//! `ScheduledTask` reports whether its deadline has passed. Arming an armed
//! task pushes the deadline back (debounce).

use std::time::Duration;

/// A single pending deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    delay: Duration,
    due_at: Option<Duration>,
}

impl ScheduledTask {
    /// Create a disarmed task with a fixed delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, due_at: None }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule (or reschedule) to fire `delay` after `now`.
    pub fn arm(&mut self, now: Duration) {
        self.due_at = Some(now + self.delay);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.due_at = None;
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.due_at.is_some()
    }

    #[must_use]
    pub const fn due_at(&self) -> Option<Duration> {
        self.due_at
    }

    /// If due at `now`, disarm and return the deadline that fired.
    pub fn take_due(&mut self, now: Duration) -> Option<Duration> {
        match self.due_at {
            Some(due) if due <= now => {
                self.due_at = None;
                Some(due)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_after_delay() {
        let mut task = ScheduledTask::new(ms(200));
        assert_eq!(task.take_due(ms(1000)), None);

        task.arm(ms(0));
        assert_eq!(task.take_due(ms(199)), None);
        assert_eq!(task.take_due(ms(200)), Some(ms(200)));
        assert!(!task.is_armed());
        assert_eq!(task.take_due(ms(400)), None);
    }

    #[test]
    fn test_rearm_debounces() {
        let mut task = ScheduledTask::new(ms(200));
        task.arm(ms(0));
        task.arm(ms(150));
        assert_eq!(task.take_due(ms(200)), None);
        assert_eq!(task.due_at(), Some(ms(350)));
        assert_eq!(task.take_due(ms(350)), Some(ms(350)));
    }

    #[test]
    fn test_cancel() {
        let mut task = ScheduledTask::new(ms(10));
        task.arm(ms(0));
        task.cancel();
        assert_eq!(task.take_due(ms(100)), None);
    }
}
