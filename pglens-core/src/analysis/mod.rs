//! PostgreSQL log analysis pipeline
//!
//! A single pass over a line source, followed by one report:
//!
//! LineSource
//! Classifier::classify
//! ClassificationResult
//! Aggregator::observe
//! Aggregator::report
//! AnalysisReport
//! render_text / render_json
//!
//! Classification is pure and holds no state between lines. Everything that
//! accumulates lives in one `Aggregator`, owned by the driver for the length
//! of the run.

mod aggregate;
mod classify;
mod render;
mod report;
mod run;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{AnalysisState, Aggregator};
pub use classify::Classifier;
pub use render::{
    ReportFormat, default_report_format, render, render_json, render_text, truncate_chars,
};
pub use report::{Advisory, AnalysisReport, ErrorKindCount, ReportMeta, UserConnections};
pub use run::{Analyzer, analyze_path};
pub use types::{ClassificationResult, ErrorKind, MalformedField, SlowOperation};
