//! sizer-report: rendering for sizing results.
//!
//! Two surfaces:
//!
//! - [`text`]: boxed summary cards and prediction tables for the terminal
//! - [`export`]: a self-describing JSON document per result, carrying an
//!   explanation of the method and a glossary of every field

pub mod export;
mod format;
pub mod text;

pub use export::{ExportDocument, export};
pub use text::{format_plan, format_prediction, format_result};
