//! Scheduled tasks: batch jobs that must finish inside a processing window.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::benchmarks::BenchmarkConfig;
use crate::error::SizerError;
use crate::ha::NodePlan;
use crate::input::{defaults, positive_or};
use crate::models::headroom_pct;

const MB_PER_GB: f64 = 1024.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// How a batch size is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchUnit {
    #[serde(rename = "GB", alias = "gb")]
    Gb,
    #[serde(rename = "Rows", alias = "rows")]
    Rows,
}

impl fmt::Display for BatchUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchUnit::Gb => f.write_str("GB"),
            BatchUnit::Rows => f.write_str("Rows"),
        }
    }
}

impl FromStr for BatchUnit {
    type Err = SizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gb" => Ok(BatchUnit::Gb),
            "rows" => Ok(BatchUnit::Rows),
            _ => Err(SizerError::UnknownBatchUnit(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledInput {
    pub batch_size: f64,
    pub batch_unit: BatchUnit,
    pub process_window_hours: f64,
    /// Free-form transformation cost factor; must be positive.
    pub complexity_multiplier: f64,
}

impl Default for ScheduledInput {
    fn default() -> Self {
        Self {
            batch_size: defaults::VOLUME,
            batch_unit: defaults::SCHEDULED_BATCH_UNIT,
            process_window_hours: defaults::SCHEDULED_WINDOW_HOURS,
            complexity_multiplier: defaults::SCHEDULED_COMPLEXITY_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduledResult {
    pub input: ScheduledInput,
    pub batch_gb: f64,
    /// Data rate needed to finish inside the window.
    pub mb_per_minute: f64,
    pub nodes: NodePlan,
    /// `None` when the node requirement is unbounded.
    pub capacity: Option<BatchCapacity>,
}

/// MB/min the HA nodes can process at this complexity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchCapacity {
    pub max_capacity: f64,
    pub headroom_pct: f64,
}

/// ```text
/// batch_gb      = rows ? batch_size / rows_to_gb_divisor : batch_size
/// mb_per_minute = window > 0 ? batch_gb * 1024 / (window * 60) : 0
/// raw           = mb_per_minute > 0 ? mb_per_minute * multiplier / mb_per_node : 0
/// max_capacity  = ha * mb_per_node / multiplier
/// ```
///
/// A batch too large to size leaves the HA count unbounded and the capacity
/// `None`.
pub fn calculate(config: &BenchmarkConfig, input: &ScheduledInput) -> ScheduledResult {
    let bench = &config.scheduled;
    let multiplier = positive_or(
        "scheduled.complexity_multiplier",
        input.complexity_multiplier,
        defaults::SCHEDULED_COMPLEXITY_MULTIPLIER,
    );

    let batch_gb = match input.batch_unit {
        BatchUnit::Gb => input.batch_size,
        BatchUnit::Rows => input.batch_size / bench.rows_to_gb_divisor,
    };
    let mb_per_minute = if input.process_window_hours > 0.0 {
        (batch_gb * MB_PER_GB) / (input.process_window_hours * MINUTES_PER_HOUR)
    } else {
        0.0
    };
    let raw = if mb_per_minute > 0.0 {
        (mb_per_minute * multiplier) / bench.mb_per_minute_per_node
    } else {
        0.0
    };

    let nodes = config.ha.apply(raw);
    let capacity = nodes.ha.finite().map(|ha_nodes| {
        let max_capacity = (ha_nodes as f64 * bench.mb_per_minute_per_node) / multiplier;
        BatchCapacity {
            max_capacity,
            headroom_pct: headroom_pct(max_capacity, mb_per_minute),
        }
    });

    debug!(
        batch_gb,
        mb_per_minute,
        raw_nodes = nodes.raw,
        ha_nodes = %nodes.ha,
        "scheduled sizing"
    );

    ScheduledResult {
        input: ScheduledInput {
            complexity_multiplier: multiplier,
            ..*input
        },
        batch_gb,
        mb_per_minute,
        nodes,
        capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ha::NodeCount;

    #[test]
    fn three_hundred_gb_in_twelve_hours() {
        let config = BenchmarkConfig::default();
        let input = ScheduledInput {
            batch_size: 300.0,
            batch_unit: BatchUnit::Gb,
            process_window_hours: 12.0,
            complexity_multiplier: 1.5,
        };
        let r = calculate(&config, &input);

        assert!((r.mb_per_minute - 426.6667).abs() < 1e-3);
        assert!((r.nodes.raw - 2.1333).abs() < 1e-3);
        assert_eq!(r.nodes.non_ha, NodeCount::Finite(3));
        assert_eq!(r.nodes.ha, NodeCount::Finite(3));
        // 3 * 300 / 1.5 = 600 MB/min
        let capacity = r.capacity.unwrap();
        assert!((capacity.max_capacity - 600.0).abs() < 1e-9);
        assert!((capacity.headroom_pct - 40.625).abs() < 1e-6);
    }

    #[test]
    fn rows_convert_to_gb() {
        let config = BenchmarkConfig::default();
        let input = ScheduledInput {
            batch_size: 1_500_000_000.0,
            batch_unit: BatchUnit::Rows,
            ..ScheduledInput::default()
        };
        let r = calculate(&config, &input);
        assert_eq!(r.batch_gb, 300.0);
        assert_eq!(r.nodes.ha, NodeCount::Finite(3));
    }

    #[test]
    fn zero_window_means_no_load() {
        let config = BenchmarkConfig::default();
        let input = ScheduledInput {
            batch_size: 300.0,
            process_window_hours: 0.0,
            ..ScheduledInput::default()
        };
        let r = calculate(&config, &input);
        assert_eq!(r.mb_per_minute, 0.0);
        assert_eq!(r.nodes.raw, 0.0);
        assert_eq!(r.nodes.non_ha, NodeCount::Finite(0));
        assert_eq!(r.nodes.ha, NodeCount::Finite(2));
        assert_eq!(r.capacity.unwrap().headroom_pct, 0.0);
    }

    #[test]
    fn non_positive_multiplier_falls_back_to_default() {
        let config = BenchmarkConfig::default();
        let input = ScheduledInput {
            batch_size: 300.0,
            complexity_multiplier: 0.0,
            ..ScheduledInput::default()
        };
        let r = calculate(&config, &input);
        assert_eq!(r.input.complexity_multiplier, 1.5);
        assert!(r.capacity.unwrap().max_capacity.is_finite());
    }

    #[test]
    fn overflowing_batch_has_no_capacity() {
        let config = BenchmarkConfig::default();
        let input = ScheduledInput {
            batch_size: 1e308,
            batch_unit: BatchUnit::Gb,
            process_window_hours: 12.0,
            complexity_multiplier: 1.5,
        };
        let r = calculate(&config, &input);
        assert_eq!(r.nodes.raw, f64::INFINITY);
        assert!(r.nodes.is_unbounded());
        assert!(r.capacity.is_none());
    }

    #[test]
    fn batch_unit_parsing() {
        assert_eq!("GB".parse::<BatchUnit>().unwrap(), BatchUnit::Gb);
        assert_eq!("rows".parse::<BatchUnit>().unwrap(), BatchUnit::Rows);
        assert!("TB".parse::<BatchUnit>().is_err());
    }
}
