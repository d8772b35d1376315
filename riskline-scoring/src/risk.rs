//! Risk assessment: percent change against the moving average, a bounded
//! score, and a discrete severity classification.
//!
//! All functions here are pure and stateless. Integer truncation (not
//! rounding) at each band is load-bearing: historical scored data must
//! remain reproducible.

use serde::{Deserialize, Serialize};

use riskline_core::models::Severity;

/// Upper bound of the normal band (percent, absolute change).
pub const NORMAL_MAX: f64 = 5.0;
/// Upper bound of the warning band (percent, absolute change).
pub const WARNING_MAX: f64 = 15.0;

/// Output of [`assess`]: the derived risk fields of a scored observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Percent deviation, rounded to 2 decimals.
    pub pct_change: f64,
    pub risk_score: u8,
    pub severity: Severity,
}

/// Percent deviation of `current` from `moving_avg`.
///
/// Returns `0.0` when the average is zero: no baseline, no change signal.
pub fn percent_change(current: f64, moving_avg: f64) -> f64 {
    if moving_avg == 0.0 {
        return 0.0;
    }
    (current - moving_avg) / moving_avg * 100.0
}

/// Map a percent change onto a `[0, 100]` score, piecewise-linear across
/// the three severity bands.
pub fn risk_score(pct_change: f64) -> u8 {
    let abs_change = pct_change.abs();

    if abs_change < NORMAL_MAX {
        // Normal band: 0-29
        ((abs_change * 6.0).trunc() as u8).min(30)
    } else if abs_change < WARNING_MAX {
        // Warning band: 31-69
        let range_size = abs_change - NORMAL_MAX;
        let max_range = WARNING_MAX - NORMAL_MAX;
        31 + ((range_size / max_range) * 39.0).trunc() as u8
    } else {
        // Critical band: 71-100, saturating once the change passes 50%
        let range_size = abs_change - WARNING_MAX;
        let additional = (((range_size / 35.0) * 29.0).trunc() as u8).min(29);
        71 + additional
    }
}

/// Classify a percent change into a severity band.
///
/// Computed independently of [`risk_score`]; the two share thresholds but
/// no other invariant ties them.
pub fn severity(pct_change: f64) -> Severity {
    let abs_change = pct_change.abs();

    if abs_change < NORMAL_MAX {
        Severity::Normal
    } else if abs_change < WARNING_MAX {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

/// Complete risk assessment for a value against its moving average.
/// The single entry point other components call.
pub fn assess(current: f64, moving_avg: f64) -> RiskAssessment {
    let pct_change = percent_change(current, moving_avg);
    RiskAssessment {
        pct_change: (pct_change * 100.0).round() / 100.0,
        risk_score: risk_score(pct_change),
        severity: severity(pct_change),
    }
}
