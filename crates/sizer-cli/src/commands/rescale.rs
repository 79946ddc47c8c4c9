use anyhow::Context;
use serde_json::json;
use sizer_core::input::parse_number;
use sizer_core::units::rescale_rounded;
use sizer_core::{RawNumber, TimeUnit};

use crate::OutputFormat;

pub fn rescale(format: OutputFormat, value: &str, from: TimeUnit, to: TimeUnit) -> anyhow::Result<()> {
    let parsed = parse_number(&RawNumber::from(value)).with_context(|| format!("not a number: {value:?}"))?;
    let converted = rescale_rounded(parsed, from, to);

    match format {
        OutputFormat::Json | OutputFormat::Export => {
            let out = json!({ "value": parsed, "from": from, "to": to, "result": converted });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => println!("{parsed} {from} = {converted} {to}"),
    }
    Ok(())
}
