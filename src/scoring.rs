use crate::grid::GridSize;
use crate::trial::TrialLog;

/// Bits carried by one correct selection: the player picks one cell out of
/// every other cell on the board.
pub fn bits_per_target(size: GridSize) -> f64 {
    ((size.cell_count() - 1) as f64).log2()
}

/// Throughput in bits per second, floored at zero and rounded to 2 decimals
pub fn bps(size: GridSize, ntpm: i64) -> f64 {
    let raw = bits_per_target(size) * ntpm as f64 / 60.0;
    round2(raw.max(0.0))
}

pub fn format_bps(bps: f64) -> String {
    format!("{bps:.2}")
}

/// `MM:SS`
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let avg = mean(data)?;
    let variance = data.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}

/// Totals shown once a round is over
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub hits: usize,
    pub misses: usize,
    /// Percentage of clicks that hit, 0 when nothing was clicked
    pub accuracy: f64,
    pub mean_interval_ms: Option<f64>,
    pub interval_std_dev_ms: Option<f64>,
    pub ntpm: i64,
    pub bps: f64,
}

impl RoundSummary {
    pub fn from_log(log: &TrialLog, ntpm: i64, bps: f64) -> Self {
        let hits = log.hits();
        let misses = log.misses();
        let accuracy = if log.is_empty() {
            0.0
        } else {
            (hits as f64 / log.len() as f64 * 100.0).round()
        };
        let intervals = log.intervals_ms();

        Self {
            hits,
            misses,
            accuracy,
            mean_interval_ms: mean(&intervals),
            interval_std_dev_ms: std_dev(&intervals),
            ntpm,
            bps,
        }
    }
}
