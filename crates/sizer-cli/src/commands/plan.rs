use std::path::Path;

use serde_json::json;
use sizer_core::{BenchmarkConfig, WorkloadFile};

use crate::OutputFormat;

pub fn plan(config: &BenchmarkConfig, format: OutputFormat, path: &Path) -> anyhow::Result<()> {
    let file = WorkloadFile::from_file(path)?;
    if file.is_empty() {
        tracing::warn!(path = %path.display(), "workload file defines no workloads");
    }
    let plan = file.plan(config);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Export => {
            let documents: Vec<_> = plan
                .entries
                .iter()
                .map(|e| json!({ "name": e.name, "export": sizer_report::export(&e.result) }))
                .collect();
            let out = json!({
                "workloads": documents,
                "totalNonHA": plan.total_non_ha,
                "totalHA": plan.total_ha,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for entry in &plan.entries {
                println!("{}", sizer_report::format_result(Some(&entry.name), &entry.result));
            }
            println!("{}", sizer_report::format_plan(&plan));
        }
    }
    Ok(())
}
