//! Trailing moving average over a bounded window of stored history.

use chrono::Duration;

use riskline_core::errors::RisklineResult;
use riskline_core::time;
use riskline_core::traits::ScoreStore;

/// Unweighted mean of a metric's values over `[as_of - window_days, as_of)`.
///
/// The upper bound is exclusive: the observation being scored must never
/// be part of its own baseline. Returns `Ok(None)` when the window holds
/// no observations; callers must treat that distinctly from a true
/// average of `0`.
///
/// An `as_of` that is neither a canonical timestamp nor a bare date cannot
/// anchor a window; the history is treated as empty.
pub fn moving_average(
    store: &dyn ScoreStore,
    metric: &str,
    as_of: &str,
    window_days: u32,
) -> RisklineResult<Option<f64>> {
    let Some(end) = time::parse_canonical(as_of) else {
        tracing::warn!(
            metric,
            as_of,
            "cannot anchor moving-average window on unparseable timestamp; treating history as empty"
        );
        return Ok(None);
    };

    let start = end - Duration::days(window_days as i64);
    let values = store.values_in_window(
        metric,
        &time::to_canonical(&start),
        &time::to_canonical(&end),
    )?;

    if values.is_empty() {
        return Ok(None);
    }
    Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
}
