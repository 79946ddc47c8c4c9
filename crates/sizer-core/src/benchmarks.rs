//! Benchmark registry.
//!
//! Per-model performance constants. A [`BenchmarkConfig`] is built once at
//! startup (defaults, optionally overridden from a TOML file) and passed by
//! reference into every calculation; nothing mutates it afterwards.
//!
//! ```toml
//! [ha]
//! buffer_multiplier = 1.5
//!
//! [triggered]
//! requests_per_node_per_second = 25
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{SizerError, SizerResult};
use crate::ha::HaPolicy;
use crate::tier::TierValues;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub ha: HaPolicy,
    pub triggered: TriggeredBenchmarks,
    pub ultra: UltraBenchmarks,
    pub scheduled: ScheduledBenchmarks,
    pub headless: HeadlessBenchmarks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggeredBenchmarks {
    pub requests_per_node_per_second: f64,
    /// Assumed response time in seconds.
    pub response_times: TierValues,
}

impl Default for TriggeredBenchmarks {
    fn default() -> Self {
        Self {
            requests_per_node_per_second: 20.0,
            response_times: TierValues::new(1.0, 2.5, 4.0, 12.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltraBenchmarks {
    pub exec_requests_per_node_per_second: f64,
    /// FeedMaster nodes per Execution node.
    pub feed_master_ratio: f64,
    pub response_times: TierValues,
}

impl Default for UltraBenchmarks {
    fn default() -> Self {
        Self {
            exec_requests_per_node_per_second: 100.0,
            feed_master_ratio: 0.5,
            response_times: TierValues::new(0.3, 1.0, 2.5, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduledBenchmarks {
    pub mb_per_minute_per_node: f64,
    pub rows_to_gb_divisor: f64,
    /// Predict rows/min as `MB/min * rows_to_gb_divisor` instead of
    /// converting MB to GB first. Matches the legacy calculator output.
    pub legacy_row_throughput: bool,
    pub complexity_multipliers: TierValues,
}

impl Default for ScheduledBenchmarks {
    fn default() -> Self {
        Self {
            mb_per_minute_per_node: 300.0,
            rows_to_gb_divisor: 5_000_000.0,
            legacy_row_throughput: false,
            complexity_multipliers: TierValues::new(1.0, 1.25, 1.5, 2.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessBenchmarks {
    pub mb_per_minute_per_node: f64,
    pub bytes_to_gb_eq_divisor: f64,
    pub requests_per_node_per_second: f64,
    /// Response time for event-frequency sizing, independent of complexity.
    pub fixed_response_time: f64,
    /// Days a `perMonth` event volume is spread over.
    pub days_per_month: f64,
    pub complexity_multipliers: TierValues,
}

impl Default for HeadlessBenchmarks {
    fn default() -> Self {
        Self {
            mb_per_minute_per_node: 150.0,
            bytes_to_gb_eq_divisor: 1e10,
            requests_per_node_per_second: 100.0,
            fixed_response_time: 0.3,
            days_per_month: 30.42,
            complexity_multipliers: TierValues::new(1.0, 1.25, 1.5, 2.0),
        }
    }
}

impl BenchmarkConfig {
    /// Load overrides from a TOML file. Missing sections and fields keep
    /// their defaults.
    pub fn from_file(path: &Path) -> SizerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SizerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "benchmark overrides loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> SizerResult<Self> {
        let config: BenchmarkConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> SizerResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject constants that would turn a guard into a silent NaN.
    ///
    /// Response times and per-node request rates may be zero: that is the
    /// unbounded-requirement path, surfaced in results.
    pub fn validate(&self) -> SizerResult<()> {
        if !self.ha.buffer_multiplier.is_finite() || self.ha.buffer_multiplier < 1.0 {
            return Err(SizerError::InvalidBenchmark {
                field: "ha.buffer_multiplier",
                value: self.ha.buffer_multiplier,
            });
        }

        non_negative("triggered.requests_per_node_per_second", self.triggered.requests_per_node_per_second)?;
        tier_table("triggered.response_times", &self.triggered.response_times, non_negative)?;

        non_negative("ultra.exec_requests_per_node_per_second", self.ultra.exec_requests_per_node_per_second)?;
        non_negative("ultra.feed_master_ratio", self.ultra.feed_master_ratio)?;
        tier_table("ultra.response_times", &self.ultra.response_times, non_negative)?;

        positive("scheduled.mb_per_minute_per_node", self.scheduled.mb_per_minute_per_node)?;
        positive("scheduled.rows_to_gb_divisor", self.scheduled.rows_to_gb_divisor)?;
        tier_table("scheduled.complexity_multipliers", &self.scheduled.complexity_multipliers, positive)?;

        positive("headless.mb_per_minute_per_node", self.headless.mb_per_minute_per_node)?;
        positive("headless.bytes_to_gb_eq_divisor", self.headless.bytes_to_gb_eq_divisor)?;
        non_negative("headless.requests_per_node_per_second", self.headless.requests_per_node_per_second)?;
        non_negative("headless.fixed_response_time", self.headless.fixed_response_time)?;
        tier_table("headless.complexity_multipliers", &self.headless.complexity_multipliers, positive)?;
        positive("headless.days_per_month", self.headless.days_per_month)?;

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> SizerResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SizerError::InvalidBenchmark { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> SizerResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SizerError::InvalidBenchmark { field, value })
    }
}

fn tier_table(
    field: &'static str,
    table: &TierValues,
    check: fn(&'static str, f64) -> SizerResult<()>,
) -> SizerResult<()> {
    table.iter().try_for_each(|(_, value)| check(field, value))
}
