//! Time-unit normalization.
//!
//! Two conversions live here, and they disagree:
//!
//! - [`average_per_second`] spreads a volume over an *active coverage
//!   window* (days per month, hours per day). This feeds every rate-based
//!   calculator.
//! - [`rescale`] converts a raw quantity between display units using a
//!   fixed calendar (24h days, 30-day months, 360-day years). It only keeps
//!   an entered value consistent when its unit label changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SizerError;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days in the capacity-normalized year used for `perYear` volumes.
pub const DAYS_PER_YEAR: f64 = 360.0;

/// Days in the calendar month used by [`rescale`].
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Granularity a workload volume is stated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    PerSecond,
    PerMinute,
    PerHour,
    PerDay,
    PerMonth,
    PerYear,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::PerSecond,
        TimeUnit::PerMinute,
        TimeUnit::PerHour,
        TimeUnit::PerDay,
        TimeUnit::PerMonth,
        TimeUnit::PerYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::PerSecond => "perSecond",
            TimeUnit::PerMinute => "perMinute",
            TimeUnit::PerHour => "perHour",
            TimeUnit::PerDay => "perDay",
            TimeUnit::PerMonth => "perMonth",
            TimeUnit::PerYear => "perYear",
        }
    }

    /// Fraction of this unit's period that one second represents.
    fn per_second_factor(&self) -> f64 {
        match self {
            TimeUnit::PerSecond => 1.0,
            TimeUnit::PerMinute => 1.0 / SECONDS_PER_MINUTE,
            TimeUnit::PerHour => 1.0 / SECONDS_PER_HOUR,
            TimeUnit::PerDay => 1.0 / SECONDS_PER_DAY,
            TimeUnit::PerMonth => 1.0 / (DAYS_PER_MONTH * SECONDS_PER_DAY),
            TimeUnit::PerYear => 1.0 / (DAYS_PER_YEAR * SECONDS_PER_DAY),
        }
    }

    fn uses_coverage_days(&self) -> bool {
        matches!(self, TimeUnit::PerMonth)
    }

    fn uses_coverage_hours(&self) -> bool {
        matches!(
            self,
            TimeUnit::PerDay | TimeUnit::PerMonth | TimeUnit::PerYear
        )
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = SizerError;

    /// Accepts `perDay`, `per-day`, `per_day` and the bare `day`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let bare = normalized.strip_prefix("per").unwrap_or(&normalized);
        match bare {
            "second" => Ok(TimeUnit::PerSecond),
            "minute" => Ok(TimeUnit::PerMinute),
            "hour" => Ok(TimeUnit::PerHour),
            "day" => Ok(TimeUnit::PerDay),
            "month" => Ok(TimeUnit::PerMonth),
            "year" => Ok(TimeUnit::PerYear),
            _ => Err(SizerError::UnknownTimeUnit(s.to_string())),
        }
    }
}

/// Average per-second rate of `value` stated in `unit`, spread over the
/// active coverage window.
///
/// ```text
/// perSecond  value
/// perMinute  value / 60
/// perHour    value / 3600
/// perDay     value / (coverage_hours * 3600)
/// perMonth   value / (coverage_days * coverage_hours * 3600)
/// perYear    value / (360 * coverage_hours * 3600)
/// ```
///
/// Returns 0 when `value` is not a finite positive number, or when a
/// coverage figure the unit depends on is not strictly positive.
/// `perYear` always uses the fixed 360-day year, never `coverage_days`.
pub fn average_per_second(
    value: f64,
    unit: TimeUnit,
    coverage_days: f64,
    coverage_hours: f64,
) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    if unit.uses_coverage_days() && !is_positive(coverage_days) {
        return 0.0;
    }
    if unit.uses_coverage_hours() && !is_positive(coverage_hours) {
        return 0.0;
    }

    match unit {
        TimeUnit::PerSecond => value,
        TimeUnit::PerMinute => value / SECONDS_PER_MINUTE,
        TimeUnit::PerHour => value / SECONDS_PER_HOUR,
        TimeUnit::PerDay => value / (coverage_hours * SECONDS_PER_HOUR),
        TimeUnit::PerMonth => value / (coverage_days * coverage_hours * SECONDS_PER_HOUR),
        TimeUnit::PerYear => value / (DAYS_PER_YEAR * coverage_hours * SECONDS_PER_HOUR),
    }
}

fn is_positive(x: f64) -> bool {
    x > 0.0
}

/// Convert a raw quantity from one display unit to another using the fixed
/// calendar. Independent of any coverage window.
pub fn rescale(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    if from == to {
        return value;
    }
    value * from.per_second_factor() / to.per_second_factor()
}

/// [`rescale`] for re-display after a unit change: a positive value is
/// rounded to the nearest whole number, anything else is returned as-is.
pub fn rescale_rounded(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    if from == to || !is_positive(value) {
        return value;
    }
    rescale(value, from, to).round()
}
