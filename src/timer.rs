use std::time::{Duration, SystemTime};

/// Countdown resolution
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A repeating schedule driven by caller-supplied clock readings.
///
/// Nothing fires on its own: the owner asks which ticks have come due with
/// [`TickTimer::pop_due`], so tests can move time forward deterministically.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    next_due: Option<SystemTime>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Arm the timer; the first tick falls one period after `now`
    pub fn start(&mut self, now: SystemTime) {
        self.next_due = Some(now + self.period);
    }

    /// Disarm the timer. Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Take the earliest tick scheduled at or before `now`, rescheduling the
    /// next one. Returns the instant the tick was due.
    pub fn pop_due(&mut self, now: SystemTime) -> Option<SystemTime> {
        let due = self.next_due?;
        if due > now {
            return None;
        }
        self.next_due = Some(due + self.period);
        Some(due)
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
