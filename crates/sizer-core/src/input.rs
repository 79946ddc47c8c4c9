//! Raw input parsing and defaulting.
//!
//! Every numeric field goes through two explicit steps:
//!
//! 1. [`parse_number`] turns a raw value (a number, or text typed by a
//!    user) into `Some(finite)` or `None`.
//! 2. [`resolve`] substitutes the field's documented default for `None`.
//!
//! Multiplier fields use [`resolve_multiplier`], which also replaces
//! non-positive values, since they divide capacity.
//!
//! The per-model `Raw*` structs gather optional fields (from CLI flags or a
//! workload file) and resolve into the typed inputs the calculators take.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::headless::{DataVolumeInput, EventFrequencyInput};
use crate::models::scheduled::{BatchUnit, ScheduledInput};
use crate::models::triggered::TriggeredInput;
use crate::models::ultra::UltraInput;
use crate::tier::ComplexityTier;
use crate::units::TimeUnit;

/// Documented per-field defaults.
pub mod defaults {
    use crate::models::scheduled::BatchUnit;
    use crate::units::TimeUnit;

    pub const VOLUME: f64 = 0.0;
    pub const PEAK_LOAD_PCT: f64 = 100.0;

    pub const TRIGGERED_UNIT: TimeUnit = TimeUnit::PerYear;
    pub const TRIGGERED_COVERAGE_DAYS: f64 = 30.0;
    pub const TRIGGERED_COVERAGE_HOURS: f64 = 24.0;

    pub const ULTRA_UNIT: TimeUnit = TimeUnit::PerYear;
    pub const ULTRA_COVERAGE_DAYS: f64 = 20.0;
    pub const ULTRA_COVERAGE_HOURS: f64 = 12.0;

    pub const SCHEDULED_BATCH_UNIT: BatchUnit = BatchUnit::Gb;
    pub const SCHEDULED_WINDOW_HOURS: f64 = 12.0;
    pub const SCHEDULED_COMPLEXITY_MULTIPLIER: f64 = 1.5;

    pub const EVENT_FREQUENCY_UNIT: TimeUnit = TimeUnit::PerDay;
    pub const HEADLESS_COVERAGE_HOURS: f64 = 24.0;
    pub const DATA_VOLUME_MESSAGE_BYTES: f64 = 2000.0;
    pub const DATA_VOLUME_COMPLEXITY_MULTIPLIER: f64 = 1.0;

    pub const NODE_COUNT: f64 = 0.0;
}

/// A numeric field as supplied: a number, or unparsed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        RawNumber::Text(value)
    }
}

/// `Some` only for finite numbers.
pub fn parse_number(raw: &RawNumber) -> Option<f64> {
    let value = match raw {
        RawNumber::Number(n) => *n,
        RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Parse `raw`, falling back to `default` when absent or malformed.
pub fn resolve(field: &'static str, raw: Option<&RawNumber>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match parse_number(raw) {
        Some(value) => value,
        None => {
            warn!(field, raw = ?raw, default, "malformed input, using default");
            default
        }
    }
}

/// Like [`resolve`], but a non-positive value also takes the default.
pub fn resolve_multiplier(field: &'static str, raw: Option<&RawNumber>, default: f64) -> f64 {
    let value = resolve(field, raw, default);
    positive_or(field, value, default)
}

/// Return `value` if strictly positive, else `default`.
pub(crate) fn positive_or(field: &'static str, value: f64, default: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        warn!(field, value, default, "non-positive multiplier, using default");
        default
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTriggered {
    pub name: Option<String>,
    pub requests: Option<RawNumber>,
    pub unit: Option<TimeUnit>,
    pub coverage_days: Option<RawNumber>,
    pub coverage_hours: Option<RawNumber>,
    pub peak_load_pct: Option<RawNumber>,
    pub complexity: Option<ComplexityTier>,
}

impl RawTriggered {
    pub fn resolve(&self) -> TriggeredInput {
        TriggeredInput {
            requests: resolve("triggered.requests", self.requests.as_ref(), defaults::VOLUME),
            unit: self.unit.unwrap_or(defaults::TRIGGERED_UNIT),
            coverage_days: resolve(
                "triggered.coverage_days",
                self.coverage_days.as_ref(),
                defaults::TRIGGERED_COVERAGE_DAYS,
            ),
            coverage_hours: resolve(
                "triggered.coverage_hours",
                self.coverage_hours.as_ref(),
                defaults::TRIGGERED_COVERAGE_HOURS,
            ),
            peak_load_pct: resolve(
                "triggered.peak_load_pct",
                self.peak_load_pct.as_ref(),
                defaults::PEAK_LOAD_PCT,
            ),
            complexity: self.complexity.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUltra {
    pub name: Option<String>,
    pub requests: Option<RawNumber>,
    pub unit: Option<TimeUnit>,
    pub coverage_days: Option<RawNumber>,
    pub coverage_hours: Option<RawNumber>,
    pub peak_load_pct: Option<RawNumber>,
    pub complexity: Option<ComplexityTier>,
}

impl RawUltra {
    pub fn resolve(&self) -> UltraInput {
        UltraInput {
            requests: resolve("ultra.requests", self.requests.as_ref(), defaults::VOLUME),
            unit: self.unit.unwrap_or(defaults::ULTRA_UNIT),
            coverage_days: resolve(
                "ultra.coverage_days",
                self.coverage_days.as_ref(),
                defaults::ULTRA_COVERAGE_DAYS,
            ),
            coverage_hours: resolve(
                "ultra.coverage_hours",
                self.coverage_hours.as_ref(),
                defaults::ULTRA_COVERAGE_HOURS,
            ),
            peak_load_pct: resolve(
                "ultra.peak_load_pct",
                self.peak_load_pct.as_ref(),
                defaults::PEAK_LOAD_PCT,
            ),
            complexity: self.complexity.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScheduled {
    pub name: Option<String>,
    pub batch_size: Option<RawNumber>,
    pub batch_unit: Option<BatchUnit>,
    pub process_window_hours: Option<RawNumber>,
    pub complexity_multiplier: Option<RawNumber>,
}

impl RawScheduled {
    pub fn resolve(&self) -> ScheduledInput {
        ScheduledInput {
            batch_size: resolve("scheduled.batch_size", self.batch_size.as_ref(), defaults::VOLUME),
            batch_unit: self.batch_unit.unwrap_or(defaults::SCHEDULED_BATCH_UNIT),
            process_window_hours: resolve(
                "scheduled.process_window_hours",
                self.process_window_hours.as_ref(),
                defaults::SCHEDULED_WINDOW_HOURS,
            ),
            complexity_multiplier: resolve_multiplier(
                "scheduled.complexity_multiplier",
                self.complexity_multiplier.as_ref(),
                defaults::SCHEDULED_COMPLEXITY_MULTIPLIER,
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventFrequency {
    pub name: Option<String>,
    pub events: Option<RawNumber>,
    pub unit: Option<TimeUnit>,
    pub coverage_hours: Option<RawNumber>,
    pub peak_load_pct: Option<RawNumber>,
}

impl RawEventFrequency {
    pub fn resolve(&self) -> EventFrequencyInput {
        EventFrequencyInput {
            events: resolve("event_frequency.events", self.events.as_ref(), defaults::VOLUME),
            unit: self.unit.unwrap_or(defaults::EVENT_FREQUENCY_UNIT),
            coverage_hours: resolve(
                "event_frequency.coverage_hours",
                self.coverage_hours.as_ref(),
                defaults::HEADLESS_COVERAGE_HOURS,
            ),
            peak_load_pct: resolve(
                "event_frequency.peak_load_pct",
                self.peak_load_pct.as_ref(),
                defaults::PEAK_LOAD_PCT,
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDataVolume {
    pub name: Option<String>,
    pub events_per_day: Option<RawNumber>,
    pub message_size_bytes: Option<RawNumber>,
    pub coverage_hours: Option<RawNumber>,
    pub peak_load_pct: Option<RawNumber>,
    pub complexity_multiplier: Option<RawNumber>,
}

impl RawDataVolume {
    pub fn resolve(&self) -> DataVolumeInput {
        DataVolumeInput {
            events_per_day: resolve(
                "data_volume.events_per_day",
                self.events_per_day.as_ref(),
                defaults::VOLUME,
            ),
            message_size_bytes: resolve(
                "data_volume.message_size_bytes",
                self.message_size_bytes.as_ref(),
                defaults::DATA_VOLUME_MESSAGE_BYTES,
            ),
            coverage_hours: resolve(
                "data_volume.coverage_hours",
                self.coverage_hours.as_ref(),
                defaults::HEADLESS_COVERAGE_HOURS,
            ),
            peak_load_pct: resolve(
                "data_volume.peak_load_pct",
                self.peak_load_pct.as_ref(),
                defaults::PEAK_LOAD_PCT,
            ),
            complexity_multiplier: resolve_multiplier(
                "data_volume.complexity_multiplier",
                self.complexity_multiplier.as_ref(),
                defaults::DATA_VOLUME_COMPLEXITY_MULTIPLIER,
            ),
        }
    }
}
