use crate::grid::{Cell, GridSize};
use crate::scoring::{self, RoundSummary};
use crate::target::pick_target;
use crate::time_series::TimeSeriesPoint;
use crate::timer::TickTimer;
use crate::trial::{record_trial, TrialLog};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::time::SystemTime;

/// Countdown length used when nothing else is configured (1:10)
pub const DEFAULT_ROUND_SECS: u64 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub grid_size: GridSize,
    pub round_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            round_secs: DEFAULT_ROUND_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first click; no timer running
    Idle,
    Active,
    /// Countdown hit zero; scores are frozen until reset
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Hit,
    Miss,
    Ignored,
}

/// Everything the presentation layer shows, already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub time: String,
    pub bps: String,
    pub ntpm: i64,
    pub target: Cell,
    pub grid_size: GridSize,
    pub phase: Phase,
}

/// One round of the grid game and all of its state
#[derive(Debug)]
pub struct GameSession {
    round_secs: u64,
    grid_size: GridSize,
    time_remaining: u64,
    phase: Phase,
    target: Cell,
    trials: TrialLog,
    ntpm: i64,
    bps: f64,
    history: Vec<TimeSeriesPoint>,
    timer: TickTimer,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic target sequence, for practice runs and tests
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, mut rng: StdRng) -> Self {
        let round_secs = config.round_secs.max(1);
        let target = pick_target(config.grid_size, &mut rng);
        Self {
            round_secs,
            grid_size: config.grid_size,
            time_remaining: round_secs,
            phase: Phase::Idle,
            target,
            trials: TrialLog::new(),
            ntpm: 0,
            bps: 0.0,
            history: Vec::new(),
            timer: TickTimer::default(),
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn round_secs(&self) -> u64 {
        self.round_secs
    }

    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn trials(&self) -> &TrialLog {
        &self.trials
    }

    pub fn ntpm(&self) -> i64 {
        self.ntpm
    }

    pub fn bps(&self) -> f64 {
        self.bps
    }

    pub fn history(&self) -> &[TimeSeriesPoint] {
        &self.history
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn readout(&self) -> Readout {
        Readout {
            time: scoring::format_time(self.time_remaining),
            bps: scoring::format_bps(self.bps),
            ntpm: self.ntpm,
            target: self.target,
            grid_size: self.grid_size,
            phase: self.phase,
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary::from_log(&self.trials, self.ntpm, self.bps)
    }

    /// Register a click on `cell` at `now`. The first click of a round starts
    /// the countdown and is scored like any other.
    pub fn click(&mut self, cell: Cell, now: SystemTime) -> ClickOutcome {
        self.advance(now);

        match self.phase {
            Phase::GameOver => return ClickOutcome::Ignored,
            Phase::Idle => {
                self.phase = Phase::Active;
                self.timer.start(now);
                debug!("round started on {} grid", self.grid_size);
            }
            Phase::Active => {}
        }

        let trial = record_trial(cell, self.target, now);
        self.trials.push(trial);
        if trial.hit {
            self.target = pick_target(self.grid_size, &mut self.rng);
        }
        self.rescore(now);

        if trial.hit {
            ClickOutcome::Hit
        } else {
            ClickOutcome::Miss
        }
    }

    /// One countdown step, stamped at `at`. Ignored unless the round is running.
    pub fn tick(&mut self, at: SystemTime) {
        if self.phase != Phase::Active {
            return;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.rescore(at);
        self.history.push(TimeSeriesPoint::new(
            (self.round_secs - self.time_remaining) as f64,
            self.bps,
        ));

        if self.time_remaining == 0 {
            self.phase = Phase::GameOver;
            self.timer.cancel();
            info!(
                "round over on {} grid: {} NTPM, {} BPS over {} trials",
                self.grid_size,
                self.ntpm,
                scoring::format_bps(self.bps),
                self.trials.len()
            );
        }
    }

    /// Apply every tick that has come due by `now`. Returns how many ran.
    pub fn advance(&mut self, now: SystemTime) -> usize {
        let mut applied = 0;
        while let Some(at) = self.timer.pop_due(now) {
            self.tick(at);
            applied += 1;
        }
        applied
    }

    /// Back to a fresh idle round with a new target
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.phase = Phase::Idle;
        self.time_remaining = self.round_secs;
        self.trials.clear();
        self.history.clear();
        self.ntpm = 0;
        self.bps = 0.0;
        self.target = pick_target(self.grid_size, &mut self.rng);
        debug!("session reset");
    }

    /// Change the board size. Only allowed before the round starts; returns
    /// whether the change was applied.
    pub fn set_grid_size(&mut self, size: GridSize) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.grid_size = size;
        self.target = pick_target(size, &mut self.rng);
        self.bps = scoring::bps(size, self.ntpm);
        debug!("grid size set to {size}");
        true
    }

    fn rescore(&mut self, now: SystemTime) {
        self.ntpm = self.trials.ntpm(now);
        self.bps = scoring::bps(self.grid_size, self.ntpm);
    }
}
