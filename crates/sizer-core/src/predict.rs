//! Throughput prediction: the inverse of the model calculators.
//!
//! Given a node count, report the throughput the fleet supports at every
//! complexity tier (or the single fixed tier, for event-frequency headless).
//!
//! ```text
//! triggered   n * rps_per_node / response_time[tier]       req/sec
//! ultra       n * rps_per_node / response_time[tier]       req/sec
//! scheduled   n * mb_per_node / multiplier[tier]           MB/min (+ rows/min)
//! headless/ef n * rps_per_node / fixed_response_time       events/sec
//! headless/dv n * mb_per_node / multiplier[tier]           MB/min
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::benchmarks::BenchmarkConfig;
use crate::error::SizerError;
use crate::models::HeadlessMode;
use crate::tier::{ComplexityTier, TierValues};

const MB_PER_GB: f64 = 1024.0;

/// Model (and headless sub-mode) to predict for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PredictionTarget {
    Triggered,
    Ultra,
    Scheduled,
    Headless(HeadlessMode),
}

impl PredictionTarget {
    pub fn label(&self) -> &'static str {
        match self {
            PredictionTarget::Triggered => "Triggered",
            PredictionTarget::Ultra => "Ultra",
            PredictionTarget::Scheduled => "Scheduled",
            PredictionTarget::Headless(HeadlessMode::EventFrequency) => "Headless (Event Freq.)",
            PredictionTarget::Headless(HeadlessMode::DataVolume) => "Headless (Data Volume)",
        }
    }

    pub fn throughput_unit(&self) -> ThroughputUnit {
        match self {
            PredictionTarget::Triggered | PredictionTarget::Ultra => ThroughputUnit::RequestsPerSecond,
            PredictionTarget::Headless(HeadlessMode::EventFrequency) => ThroughputUnit::EventsPerSecond,
            PredictionTarget::Scheduled | PredictionTarget::Headless(HeadlessMode::DataVolume) => {
                ThroughputUnit::MbPerMinute
            }
        }
    }
}

impl fmt::Display for PredictionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PredictionTarget {
    type Err = SizerError;

    /// `triggered`, `ultra`, `scheduled`, `headless` (event frequency),
    /// or `headless:<mode>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (model, mode) = match s.trim().split_once(':') {
            Some((model, mode)) => (model, Some(mode)),
            None => (s.trim(), None),
        };
        match (model.to_ascii_lowercase().as_str(), mode) {
            ("triggered", None) => Ok(PredictionTarget::Triggered),
            ("ultra", None) => Ok(PredictionTarget::Ultra),
            ("scheduled", None) => Ok(PredictionTarget::Scheduled),
            ("headless", None) => Ok(PredictionTarget::Headless(HeadlessMode::EventFrequency)),
            ("headless", Some(mode)) => Ok(PredictionTarget::Headless(mode.parse()?)),
            _ => Err(SizerError::UnknownModel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThroughputUnit {
    RequestsPerSecond,
    EventsPerSecond,
    MbPerMinute,
}

impl ThroughputUnit {
    pub fn label(&self) -> &'static str {
        match self {
            ThroughputUnit::RequestsPerSecond => "req/sec",
            ThroughputUnit::EventsPerSecond => "events/sec",
            ThroughputUnit::MbPerMinute => "MB/min",
        }
    }
}

/// What a row's tier selects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Factor {
    /// Assumed response time in seconds.
    ResponseTimeSecs(f64),
    /// Dimensionless throughput divisor.
    Multiplier(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRow {
    /// `None` where the model has no complexity dimension.
    pub tier: Option<ComplexityTier>,
    pub factor: Factor,
    pub throughput: f64,
    /// Scheduled only: equivalent rows per minute.
    pub rows_per_minute: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub target: PredictionTarget,
    pub node_count: f64,
    pub throughput_unit: ThroughputUnit,
    pub rows: Vec<PredictionRow>,
}

/// Throughput `node_count` nodes support for `target`, one row per tier.
///
/// Non-finite and negative node counts are treated as zero.
pub fn predict(config: &BenchmarkConfig, target: PredictionTarget, node_count: f64) -> Prediction {
    let n = if node_count.is_finite() && node_count > 0.0 { node_count } else { 0.0 };

    let rows = match target {
        PredictionTarget::Triggered => by_response_time(
            n,
            config.triggered.requests_per_node_per_second,
            &config.triggered.response_times,
        ),
        PredictionTarget::Ultra => by_response_time(
            n,
            config.ultra.exec_requests_per_node_per_second,
            &config.ultra.response_times,
        ),
        PredictionTarget::Scheduled => {
            let bench = &config.scheduled;
            by_multiplier(n, bench.mb_per_minute_per_node, &bench.complexity_multipliers)
                .into_iter()
                .map(|row| PredictionRow {
                    rows_per_minute: Some(rows_per_minute(
                        row.throughput,
                        bench.rows_to_gb_divisor,
                        bench.legacy_row_throughput,
                    )),
                    ..row
                })
                .collect()
        }
        PredictionTarget::Headless(HeadlessMode::EventFrequency) => {
            let time = config.headless.fixed_response_time;
            vec![PredictionRow {
                tier: None,
                factor: Factor::ResponseTimeSecs(time),
                throughput: fleet_rate(n, per_node_rate(config.headless.requests_per_node_per_second, time)),
                rows_per_minute: None,
            }]
        }
        PredictionTarget::Headless(HeadlessMode::DataVolume) => by_multiplier(
            n,
            config.headless.mb_per_minute_per_node,
            &config.headless.complexity_multipliers,
        ),
    };

    debug!(target = %target, node_count = n, rows = rows.len(), "throughput prediction");

    Prediction {
        target,
        node_count: n,
        throughput_unit: target.throughput_unit(),
        rows,
    }
}

/// Per-node rate at a response time; infinite at zero response time.
fn per_node_rate(requests_per_node_per_second: f64, response_time: f64) -> f64 {
    if response_time > 0.0 {
        requests_per_node_per_second / response_time
    } else {
        f64::INFINITY
    }
}

/// `n * per_node`, with an empty fleet always at zero.
fn fleet_rate(n: f64, per_node: f64) -> f64 {
    if n > 0.0 { n * per_node } else { 0.0 }
}

fn by_response_time(n: f64, requests_per_node_per_second: f64, times: &TierValues) -> Vec<PredictionRow> {
    times
        .iter()
        .map(|(tier, time)| PredictionRow {
            tier: Some(tier),
            factor: Factor::ResponseTimeSecs(time),
            throughput: fleet_rate(n, per_node_rate(requests_per_node_per_second, time)),
            rows_per_minute: None,
        })
        .collect()
}

fn by_multiplier(n: f64, mb_per_minute_per_node: f64, multipliers: &TierValues) -> Vec<PredictionRow> {
    multipliers
        .iter()
        .map(|(tier, multiplier)| PredictionRow {
            tier: Some(tier),
            factor: Factor::Multiplier(multiplier),
            throughput: (n * mb_per_minute_per_node) / multiplier,
            rows_per_minute: None,
        })
        .collect()
}

/// Rows per minute equivalent of an MB/min throughput.
///
/// The legacy form skips the MB to GB step and overstates rows by 1024x.
fn rows_per_minute(mb_per_minute: f64, rows_to_gb_divisor: f64, legacy: bool) -> f64 {
    if legacy {
        mb_per_minute * rows_to_gb_divisor
    } else {
        (mb_per_minute / MB_PER_GB) * rows_to_gb_divisor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throughputs(p: &Prediction) -> Vec<f64> {
        p.rows.iter().map(|r| r.throughput).collect()
    }

    #[test]
    fn triggered_rows_per_tier() {
        let p = predict(&BenchmarkConfig::default(), PredictionTarget::Triggered, 4.0);
        assert_eq!(p.throughput_unit, ThroughputUnit::RequestsPerSecond);
        let expected = [80.0, 32.0, 20.0, 80.0 / 12.0];
        for (got, want) in throughputs(&p).into_iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
        assert_eq!(p.rows[0].tier, Some(ComplexityTier::Simple));
        assert_eq!(p.rows[3].factor, Factor::ResponseTimeSecs(12.0));
    }

    #[test]
    fn ultra_rows_per_tier() {
        let p = predict(&BenchmarkConfig::default(), PredictionTarget::Ultra, 2.0);
        assert!((p.rows[0].throughput - 2.0 * 100.0 / 0.3).abs() < 1e-9);
        assert_eq!(p.rows[1].throughput, 200.0);
        assert_eq!(p.rows[2].throughput, 80.0);
        assert_eq!(p.rows[3].throughput, 40.0);
    }

    #[test]
    fn scheduled_corrected_rows() {
        let p = predict(&BenchmarkConfig::default(), PredictionTarget::Scheduled, 3.0);
        let simple = &p.rows[0];
        assert_eq!(simple.throughput, 900.0);
        assert_eq!(simple.factor, Factor::Multiplier(1.0));
        let rows = simple.rows_per_minute.unwrap();
        assert!((rows - 900.0 / 1024.0 * 5_000_000.0).abs() < 1e-3);
        assert_eq!(p.rows[3].throughput, 450.0);
    }

    #[test]
    fn scheduled_legacy_rows() {
        let mut config = BenchmarkConfig::default();
        config.scheduled.legacy_row_throughput = true;
        let p = predict(&config, PredictionTarget::Scheduled, 1.0);
        assert_eq!(p.rows[0].rows_per_minute, Some(300.0 * 5_000_000.0));
    }

    #[test]
    fn headless_event_frequency_single_row() {
        let p = predict(
            &BenchmarkConfig::default(),
            PredictionTarget::Headless(HeadlessMode::EventFrequency),
            3.0,
        );
        assert_eq!(p.rows.len(), 1);
        assert_eq!(p.rows[0].tier, None);
        assert!((p.rows[0].throughput - 1000.0).abs() < 1e-9);
        assert_eq!(p.throughput_unit, ThroughputUnit::EventsPerSecond);
    }

    #[test]
    fn headless_data_volume_rows() {
        let p = predict(
            &BenchmarkConfig::default(),
            PredictionTarget::Headless(HeadlessMode::DataVolume),
            2.0,
        );
        assert_eq!(throughputs(&p), vec![300.0, 240.0, 200.0, 150.0]);
        assert!(p.rows.iter().all(|r| r.rows_per_minute.is_none()));
    }

    #[test]
    fn invalid_node_counts_predict_zero() {
        for n in [-2.0, f64::NAN, f64::INFINITY] {
            let p = predict(&BenchmarkConfig::default(), PredictionTarget::Triggered, n);
            assert_eq!(p.node_count, 0.0);
            assert!(p.rows.iter().all(|r| r.throughput == 0.0));
        }
    }

    #[test]
    fn zero_response_time_row_is_infinite() {
        let mut config = BenchmarkConfig::default();
        config.triggered.response_times = TierValues::new(0.0, 2.5, 4.0, 12.0);
        let p = predict(&config, PredictionTarget::Triggered, 1.0);
        assert_eq!(p.rows[0].throughput, f64::INFINITY);
    }

    #[test]
    fn prediction_is_restartable() {
        let config = BenchmarkConfig::default();
        let a = predict(&config, PredictionTarget::Scheduled, 5.0);
        let b = predict(&config, PredictionTarget::Scheduled, 5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn parse_targets() {
        assert_eq!("ultra".parse::<PredictionTarget>().unwrap(), PredictionTarget::Ultra);
        assert_eq!(
            "headless".parse::<PredictionTarget>().unwrap(),
            PredictionTarget::Headless(HeadlessMode::EventFrequency)
        );
        assert_eq!(
            "headless:data-volume".parse::<PredictionTarget>().unwrap(),
            PredictionTarget::Headless(HeadlessMode::DataVolume)
        );
        assert!("batch".parse::<PredictionTarget>().is_err());
        assert!("headless:stream".parse::<PredictionTarget>().is_err());
    }
}
