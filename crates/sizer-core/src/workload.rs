//! Workload files: several named workloads sized together into one fleet.
//!
//! ```toml
//! [[triggered]]
//! name = "orders-api"
//! requests = 1000000
//! unit = "perMonth"
//!
//! [[scheduled]]
//! batch_size = 300
//! batch_unit = "GB"
//!
//! [[headless_event_frequency]]
//! events = 86400000
//! ```
//!
//! Every field is optional and goes through the same defaulting as CLI
//! input. Unnamed entries get `<model>-<n>` names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::benchmarks::BenchmarkConfig;
use crate::error::{SizerError, SizerResult};
use crate::ha::NodeCount;
use crate::input::{RawDataVolume, RawEventFrequency, RawScheduled, RawTriggered, RawUltra};
use crate::models::{CalculationResult, WorkloadInput, calculate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadFile {
    pub triggered: Vec<RawTriggered>,
    pub ultra: Vec<RawUltra>,
    pub scheduled: Vec<RawScheduled>,
    pub headless_event_frequency: Vec<RawEventFrequency>,
    pub headless_data_volume: Vec<RawDataVolume>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedWorkload {
    pub name: String,
    pub input: WorkloadInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetEntry {
    pub name: String,
    pub result: CalculationResult,
}

/// Sized workloads plus fleet-wide node totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetPlan {
    pub entries: Vec<FleetEntry>,
    pub total_non_ha: NodeCount,
    pub total_ha: NodeCount,
}

impl WorkloadFile {
    pub fn from_file(path: &Path) -> SizerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SizerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file = Self::from_toml_str(&content)?;
        info!(path = %path.display(), workloads = file.len(), "workload file loaded");
        Ok(file)
    }

    pub fn from_toml_str(content: &str) -> SizerResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn len(&self) -> usize {
        self.triggered.len()
            + self.ultra.len()
            + self.scheduled.len()
            + self.headless_event_frequency.len()
            + self.headless_data_volume.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolved workloads in file-section order.
    pub fn workloads(&self) -> Vec<NamedWorkload> {
        let mut out = Vec::with_capacity(self.len());

        for (i, raw) in self.triggered.iter().enumerate() {
            out.push(named(&raw.name, "triggered", i, WorkloadInput::Triggered(raw.resolve())));
        }
        for (i, raw) in self.ultra.iter().enumerate() {
            out.push(named(&raw.name, "ultra", i, WorkloadInput::Ultra(raw.resolve())));
        }
        for (i, raw) in self.scheduled.iter().enumerate() {
            out.push(named(&raw.name, "scheduled", i, WorkloadInput::Scheduled(raw.resolve())));
        }
        for (i, raw) in self.headless_event_frequency.iter().enumerate() {
            out.push(named(
                &raw.name,
                "headless-event-frequency",
                i,
                WorkloadInput::HeadlessEventFrequency(raw.resolve()),
            ));
        }
        for (i, raw) in self.headless_data_volume.iter().enumerate() {
            out.push(named(
                &raw.name,
                "headless-data-volume",
                i,
                WorkloadInput::HeadlessDataVolume(raw.resolve()),
            ));
        }

        out
    }

    /// Size every workload and total the fleet.
    pub fn plan(&self, config: &BenchmarkConfig) -> FleetPlan {
        let entries: Vec<FleetEntry> = self
            .workloads()
            .into_iter()
            .map(|w| FleetEntry {
                result: calculate(config, &w.input),
                name: w.name,
            })
            .collect();

        let total_non_ha = entries.iter().map(|e| e.result.total_non_ha()).sum();
        let total_ha = entries.iter().map(|e| e.result.total_ha()).sum();

        info!(workloads = entries.len(), %total_non_ha, %total_ha, "fleet planned");

        FleetPlan {
            entries,
            total_non_ha,
            total_ha,
        }
    }
}

fn named(name: &Option<String>, model: &str, index: usize, input: WorkloadInput) -> NamedWorkload {
    let name = match name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("{model}-{}", index + 1),
    };
    NamedWorkload { name, input }
}
