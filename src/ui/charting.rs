use crate::time_series::TimeSeriesPoint;

/// Compute X (seconds) and Y (BPS) bounds for the results chart
pub fn compute_chart_params(history: &[TimeSeriesPoint], round_secs: u64) -> (f64, f64) {
    let highest_bps = history.iter().map(|p| p.bps).fold(0.0, f64::max);

    let overall_duration = history
        .last()
        .map_or(round_secs as f64, |p| p.t)
        .max(1.0);

    // keep a visible y range even for a flat zero trace
    (overall_duration, highest_bps.ceil().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_chart_params_empty() {
        assert_eq!(compute_chart_params(&[], 70), (70.0, 1.0));
    }

    #[test]
    fn test_compute_chart_params_uses_peak() {
        let history = [
            TimeSeriesPoint::new(1.0, 0.4),
            TimeSeriesPoint::new(2.0, 2.3),
            TimeSeriesPoint::new(3.0, 1.1),
        ];
        assert_eq!(compute_chart_params(&history, 70), (3.0, 3.0));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
