/// One sample of the BPS trace, `t` in seconds since the round started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub bps: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, bps: f64) -> Self {
        Self { t, bps }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.bps)
    }
}
