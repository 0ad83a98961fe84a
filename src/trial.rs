use crate::grid::Cell;
use itertools::Itertools;
use std::time::{Duration, SystemTime};

/// Trailing window NTPM is computed over
pub const NTPM_WINDOW: Duration = Duration::from_secs(60);

/// One recorded click
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trial {
    pub timestamp: SystemTime,
    pub hit: bool,
}

impl Trial {
    /// +1 for a hit, -1 for a miss
    pub fn score(&self) -> i64 {
        if self.hit {
            1
        } else {
            -1
        }
    }

    /// Whether the trial falls inside the trailing window ending at `now`.
    /// Trials stamped after `now` are counted.
    pub fn within_window(&self, now: SystemTime, window: Duration) -> bool {
        match now.duration_since(self.timestamp) {
            Ok(age) => age <= window,
            Err(_) => true,
        }
    }
}

pub fn record_trial(cell: Cell, target: Cell, now: SystemTime) -> Trial {
    Trial {
        timestamp: now,
        hit: cell == target,
    }
}

/// Ordered record of every click in the current round
#[derive(Debug, Clone, Default)]
pub struct TrialLog {
    trials: Vec<Trial>,
}

impl TrialLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trial: Trial) {
        self.trials.push(trial);
    }

    pub fn clear(&mut self) {
        self.trials.clear();
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.trials.iter().filter(|t| t.hit).count()
    }

    pub fn misses(&self) -> usize {
        self.trials.len() - self.hits()
    }

    /// Net targets per minute: hits minus misses over the trailing minute
    pub fn ntpm(&self, now: SystemTime) -> i64 {
        self.trials
            .iter()
            .filter(|t| t.within_window(now, NTPM_WINDOW))
            .map(Trial::score)
            .sum()
    }

    /// Milliseconds between consecutive clicks
    pub fn intervals_ms(&self) -> Vec<f64> {
        self.trials
            .iter()
            .tuple_windows()
            .map(|(prev, next)| {
                next.timestamp
                    .duration_since(prev.timestamp)
                    .unwrap_or_default()
                    .as_millis() as f64
            })
            .collect()
    }
}
