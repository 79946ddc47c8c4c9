//! Self-describing JSON export.
//!
//! Each document names the calculation, explains the sizing method, and
//! carries a glossary entry for every input and output field it contains.
//! Values keep the precision they are displayed with: rates to 4 decimals,
//! throughput and capacity to 2, headroom to 1 with a `%` suffix.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use sizer_core::models::RateCapacity;
use sizer_core::{CalculationResult, NodeCount};

use crate::format::{NOT_APPLICABLE, capacity_or_na, fixed, pct};

const PURPOSE: &str = "Translates business transaction volumes into a recommended number of \
execution nodes able to process the workload reliably and efficiently.";

const BENEFIT: &str = "Sizing from measured benchmarks avoids under-provisioning, which causes \
bottlenecks and failed processes, and over-provisioning, which adds cost without benefit. The \
estimate gives architectural planning a concrete starting point that meets service levels from \
day one.";

const METHODOLOGY: &str = "The stated business volume is converted to an average rate over the \
workload's active window (days per month, hours per day) and scaled to a peak rate by the expected \
peak load. The peak rate is divided by the benchmarked capacity of a single node for the workload \
type, giving the raw node requirement. That figure is rounded up for a non-redundant plan and \
buffered with a minimum floor for a high-availability plan.";

const KEY_CONCEPTS: &[(&str, &str)] = &[
    ("Node", "One unit of execution capacity. A collection of nodes forms an execution cluster."),
    (
        "High Availability (HA)",
        "A configuration with redundant capacity (a 30% buffer and a minimum node count) so the \
         workload keeps running when a node fails.",
    ),
    (
        "Peak Load",
        "The highest expected load, as a percentage of the average. Sizing for peak keeps bursts \
         from degrading performance.",
    ),
    (
        "Effective Throughput",
        "Transactions a single node completes per second. Faster tasks let a node complete more.",
    ),
];

/// A field name paired with its glossary text.
type Glossary = &'static [(&'static str, &'static str)];

const TRIGGERED_INPUTS: Glossary = &[
    ("apiRequests", "Total API requests expected over the stated time unit."),
    ("coverageDays", "Days per month the workload is active (e.g. 22 for business days, 30 for always-on)."),
    ("coverageHours", "Hours per day the workload is active."),
    ("peakLoadPercentage", "Peak load as a percentage of average (150 means peak is 1.5x average)."),
    ("complexity", "Complexity tier; selects the assumed average response time of one task."),
];

const TRIGGERED_OUTPUTS: Glossary = &[
    ("assumedResponseTime", "Average response time in seconds for the selected complexity."),
    ("avgRequestsPerSecond", "Average requests per second during the active window."),
    ("peakRequestsPerSecond", "Peak requests per second."),
    ("effectiveThroughputPerNode", "Requests per second one node handles at the assumed response time."),
    ("rawNodesRequired", "Fractional node requirement at peak load."),
    ("nodesRequiredNonHA", "Nodes required, rounded up, without an HA buffer."),
    ("nodesRequiredHA", "Recommended nodes including the HA buffer and minimum floor."),
    ("maxCapacityHA", "Maximum requests per second the HA configuration handles."),
    ("headroomVsPeak", "Extra HA capacity over peak load."),
    ("headroomVsAverage", "Extra HA capacity over average load."),
];

const ULTRA_INPUTS: Glossary = &[
    ("apiRequests", "Total API requests expected over the stated time unit for low-latency pipelines."),
    ("coverageDays", "Days per month the workload is active."),
    ("coverageHours", "Hours per day the workload is active."),
    ("peakLoadPercentage", "Peak load as a percentage of average."),
    ("complexity", "Complexity tier; selects the assumed average response time of one task."),
];

const ULTRA_OUTPUTS: Glossary = &[
    ("assumedResponseTime", "Average response time in seconds for the selected complexity."),
    ("avgRequestsPerSecond", "Average requests per second during the active window."),
    ("peakRequestsPerSecond", "Peak requests per second."),
    ("effectiveThroughputPerExecNode", "Requests per second one Execution node handles at the assumed response time."),
    ("execNodesNonHA", "Execution nodes required, rounded up, without an HA buffer."),
    ("execNodesHA", "Recommended Execution nodes for high availability."),
    ("fmNodesNonHA", "FeedMaster nodes required, from the raw Execution requirement and the FeedMaster ratio."),
    ("fmNodesHA", "Recommended FeedMaster nodes for high availability."),
    ("maxCapacityHA", "Maximum requests per second the HA Execution nodes handle."),
    ("headroomVsPeak", "Extra HA capacity over peak load."),
    ("headroomVsAverage", "Extra HA capacity over average load."),
];

const SCHEDULED_INPUTS: Glossary = &[
    ("batchSize", "Data volume of one batch, in GB or rows."),
    ("processWindowHours", "Hours available to finish the batch."),
    ("complexityMultiplier", "Transformation cost factor (pass-through is low, heavy aggregation is high)."),
];

const SCHEDULED_OUTPUTS: Glossary = &[
    ("requiredThroughput", "Processing speed in MB/min needed to meet the window."),
    ("rawNodesRequired", "Fractional node requirement."),
    ("nodesRequiredNonHA", "Nodes required, rounded up, without an HA buffer."),
    ("nodesRequiredHA", "Recommended nodes including the HA buffer."),
    ("maxCapacityHA", "Maximum throughput the HA configuration handles."),
    ("headroom", "Extra HA capacity over the required throughput."),
];

const EVENT_FREQUENCY_INPUTS: Glossary = &[
    ("eventVolume", "Total events over the stated time unit."),
    ("coverageHours", "Hours per day the workload is active."),
    ("peakLoadPercentage", "Peak load as a percentage of average."),
];

const EVENT_FREQUENCY_OUTPUTS: Glossary = &[
    ("avgEventsPerSecond", "Average events per second."),
    ("peakEventsPerSecond", "Peak events per second."),
    ("effectiveThroughputPerNode", "Events per second one node handles."),
    ("execNodesNonHA", "Execution nodes required without an HA buffer."),
    ("execNodesHA", "Recommended Execution nodes for high availability."),
    ("maxCapacityHA", "Maximum events per second the HA configuration handles."),
    ("headroomVsPeak", "Extra capacity over peak load."),
    ("headroomVsAverage", "Extra capacity over average load."),
];

const DATA_VOLUME_INPUTS: Glossary = &[
    ("eventVolumePerDay", "Total events per day."),
    ("avgMessageSizeBytes", "Average size of one event message in bytes."),
    ("coverageHours", "Hours per day the workload is active."),
    ("peakLoadPercentage", "Peak load as a percentage of average."),
    ("complexityMultiplier", "Transformation cost factor."),
];

const DATA_VOLUME_OUTPUTS: Glossary = &[
    ("avgThroughput", "Average data throughput in MB/min."),
    ("peakThroughput", "Peak data throughput in MB/min."),
    ("execNodesNonHA", "Execution nodes required without an HA buffer."),
    ("execNodesHA", "Recommended Execution nodes for high availability."),
    ("maxCapacityHA", "Maximum throughput the HA configuration handles."),
    ("headroomVsPeak", "Extra capacity over peak load."),
    ("headroomVsAverage", "Extra capacity over average load."),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub calculation_type: &'static str,
    pub explanation: Explanation,
    pub inputs: Fields,
    pub outputs: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub purpose: &'static str,
    pub benefit: &'static str,
    pub methodology: &'static str,
    pub key_concepts: Entries,
    pub field_glossary: FieldGlossary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGlossary {
    pub inputs: Entries,
    pub outputs: Entries,
}

/// Ordered `name -> text` pairs, serialized as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries(pub Glossary);

impl Serialize for Entries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, text) in self.0 {
            map.serialize_entry(key, text)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Ordered fields, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(&'static str, Field)>);

impl Fields {
    fn with(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((name, Field { value: value.into(), unit: None }));
        self
    }

    fn with_unit(mut self, name: &'static str, value: impl Into<Value>, unit: impl ToString) -> Self {
        self.0.push((
            name,
            Field {
                value: value.into(),
                unit: Some(unit.to_string()),
            },
        ));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, f)| f)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, field) in &self.0 {
            map.serialize_entry(name, field)?;
        }
        map.end()
    }
}

/// Build the export document for one result.
pub fn export(result: &CalculationResult) -> ExportDocument {
    let (calculation_type, inputs, outputs, glossary) = match result {
        CalculationResult::Triggered(r) => {
            let i = &r.input;
            let inputs = Fields::default()
                .with_unit("apiRequests", i.requests, i.unit)
                .with("coverageDays", i.coverage_days)
                .with("coverageHours", i.coverage_hours)
                .with("peakLoadPercentage", i.peak_load_pct)
                .with("complexity", i.complexity.as_str());
            let outputs = Fields::default()
                .with("assumedResponseTime", r.response_time)
                .with("avgRequestsPerSecond", fixed(r.avg_requests_per_second, 4))
                .with("peakRequestsPerSecond", fixed(r.peak_requests_per_second, 4))
                .with("effectiveThroughputPerNode", fixed(r.node_throughput, 2))
                .with("rawNodesRequired", fixed(r.nodes.raw, 4))
                .with("nodesRequiredNonHA", count(r.nodes.non_ha))
                .with("nodesRequiredHA", count(r.nodes.ha));
            let outputs = rate_capacity(outputs, r.capacity.as_ref(), None);
            ("Triggered Task", inputs, outputs, (TRIGGERED_INPUTS, TRIGGERED_OUTPUTS))
        }
        CalculationResult::Ultra(r) => {
            let i = &r.input;
            let inputs = Fields::default()
                .with_unit("apiRequests", i.requests, i.unit)
                .with("coverageDays", i.coverage_days)
                .with("coverageHours", i.coverage_hours)
                .with("peakLoadPercentage", i.peak_load_pct)
                .with("complexity", i.complexity.as_str());
            let outputs = Fields::default()
                .with("assumedResponseTime", r.response_time)
                .with("avgRequestsPerSecond", fixed(r.avg_requests_per_second, 4))
                .with("peakRequestsPerSecond", fixed(r.peak_requests_per_second, 4))
                .with("effectiveThroughputPerExecNode", fixed(r.exec_node_throughput, 2))
                .with("execNodesNonHA", count(r.exec_nodes.non_ha))
                .with("execNodesHA", count(r.exec_nodes.ha))
                .with("fmNodesNonHA", count(r.feed_master_nodes.non_ha))
                .with("fmNodesHA", count(r.feed_master_nodes.ha));
            let outputs = rate_capacity(outputs, r.capacity.as_ref(), None);
            ("Ultra Task", inputs, outputs, (ULTRA_INPUTS, ULTRA_OUTPUTS))
        }
        CalculationResult::Scheduled(r) => {
            let i = &r.input;
            let inputs = Fields::default()
                .with_unit("batchSize", i.batch_size, i.batch_unit)
                .with("processWindowHours", i.process_window_hours)
                .with("complexityMultiplier", i.complexity_multiplier);
            let outputs = Fields::default()
                .with("requiredThroughput", format!("{} MB/min", fixed(r.mb_per_minute, 2)))
                .with("rawNodesRequired", fixed(r.nodes.raw, 4))
                .with("nodesRequiredNonHA", count(r.nodes.non_ha))
                .with("nodesRequiredHA", count(r.nodes.ha))
                .with(
                    "maxCapacityHA",
                    capacity_or_na(r.capacity.as_ref(), |c| format!("{} MB/min", fixed(c.max_capacity, 2))),
                )
                .with("headroom", capacity_or_na(r.capacity.as_ref(), |c| pct(c.headroom_pct)));
            ("Scheduled Task", inputs, outputs, (SCHEDULED_INPUTS, SCHEDULED_OUTPUTS))
        }
        CalculationResult::HeadlessEventFrequency(r) => {
            let i = &r.input;
            let inputs = Fields::default()
                .with_unit("eventVolume", i.events, i.unit)
                .with("coverageHours", i.coverage_hours)
                .with("peakLoadPercentage", i.peak_load_pct);
            let outputs = Fields::default()
                .with("avgEventsPerSecond", fixed(r.avg_events_per_second, 4))
                .with("peakEventsPerSecond", fixed(r.peak_events_per_second, 4))
                .with("effectiveThroughputPerNode", fixed(r.node_throughput, 2))
                .with("execNodesNonHA", count(r.nodes.non_ha))
                .with("execNodesHA", count(r.nodes.ha));
            let outputs = rate_capacity(outputs, r.capacity.as_ref(), Some("events/sec"));
            (
                "Headless (Event Frequency)",
                inputs,
                outputs,
                (EVENT_FREQUENCY_INPUTS, EVENT_FREQUENCY_OUTPUTS),
            )
        }
        CalculationResult::HeadlessDataVolume(r) => {
            let i = &r.input;
            let inputs = Fields::default()
                .with("eventVolumePerDay", i.events_per_day)
                .with("avgMessageSizeBytes", i.message_size_bytes)
                .with("coverageHours", i.coverage_hours)
                .with("peakLoadPercentage", i.peak_load_pct)
                .with("complexityMultiplier", i.complexity_multiplier);
            let outputs = Fields::default()
                .with("avgThroughput", format!("{} MB/min", fixed(r.avg_mb_per_minute, 2)))
                .with("peakThroughput", format!("{} MB/min", fixed(r.peak_mb_per_minute, 2)))
                .with("execNodesNonHA", count(r.nodes.non_ha))
                .with("execNodesHA", count(r.nodes.ha));
            let outputs = rate_capacity(outputs, r.capacity.as_ref(), Some("MB/min"));
            (
                "Headless (Data Volume)",
                inputs,
                outputs,
                (DATA_VOLUME_INPUTS, DATA_VOLUME_OUTPUTS),
            )
        }
    };

    ExportDocument {
        calculation_type,
        explanation: Explanation {
            purpose: PURPOSE,
            benefit: BENEFIT,
            methodology: METHODOLOGY,
            key_concepts: Entries(KEY_CONCEPTS),
            field_glossary: FieldGlossary {
                inputs: Entries(glossary.0),
                outputs: Entries(glossary.1),
            },
        },
        inputs,
        outputs,
    }
}

fn count(n: NodeCount) -> Value {
    match n.finite() {
        Some(n) => Value::from(n),
        None => Value::from(n.to_string()),
    }
}

fn rate_capacity(fields: Fields, capacity: Option<&RateCapacity>, unit: Option<&str>) -> Fields {
    let Some(c) = capacity else {
        return fields
            .with("maxCapacityHA", NOT_APPLICABLE)
            .with("headroomVsPeak", NOT_APPLICABLE)
            .with("headroomVsAverage", NOT_APPLICABLE);
    };
    let max = match unit {
        Some(unit) => format!("{} {unit}", fixed(c.max_capacity, 2)),
        None => fixed(c.max_capacity, 2),
    };
    fields
        .with("maxCapacityHA", max)
        .with("headroomVsPeak", pct(c.headroom_vs_peak_pct))
        .with("headroomVsAverage", pct(c.headroom_vs_average_pct))
}
