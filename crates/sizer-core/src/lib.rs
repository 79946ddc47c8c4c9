//! sizer-core: node sizing for workload execution models.
//!
//! Converts a workload description (volume, time unit, coverage window,
//! peak factor, complexity) into the number of execution nodes it needs,
//! with and without high-availability buffering, and predicts the
//! throughput a given node count supports.
//!
//! # Sizing Pipeline
//!
//! ```text
//! raw input --resolve--> typed input
//!     average = volume / (coverage window in seconds)
//!     peak    = average * peak_pct / 100
//!     raw     = peak / per_node_throughput[tier]
//!     non_ha  = ceil(raw)
//!     ha      = ceil(max(raw * 1.3, 2))
//! ```
//!
//! Every tunable constant lives in [`BenchmarkConfig`]; calculators are pure
//! functions of their input and that config.

pub mod benchmarks;
pub mod error;
pub mod ha;
pub mod input;
pub mod models;
pub mod predict;
pub mod tier;
pub mod units;
pub mod workload;

pub use benchmarks::BenchmarkConfig;
pub use error::{SizerError, SizerResult};
pub use ha::{HaPolicy, NodeCount, NodePlan};
pub use input::RawNumber;
pub use models::{CalculationResult, WorkloadInput, calculate};
pub use predict::{Prediction, PredictionTarget, predict};
pub use tier::{ComplexityTier, TierValues};
pub use units::TimeUnit;
pub use workload::{FleetPlan, WorkloadFile};
