use crate::analysis::aggregate::Aggregator;
use crate::analysis::classify::Classifier;
use crate::analysis::render::{ReportFormat, render};
use crate::analysis::report::{AnalysisReport, ReportMeta};
use crate::conf::AnalysisConfig;
use crate::error::AnalyzeError;
use crate::source::{LineSource, open_path};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Drives one pass: source -> classifier -> aggregator -> report.
pub struct Analyzer {
    config: AnalysisConfig,
    classifier: Classifier,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let classifier = Classifier::new(config.detection.slow_threshold_ms);
        Self { config, classifier }
    }

    /// Consume `source` to the end and report.
    ///
    /// A read error before the first line means the source never produced
    /// anything and is returned as `SourceUnavailable`. A read error after
    /// that ends the stream early; the report covers what was read and
    /// records the failure in `interrupted`.
    pub fn run<S: LineSource>(&self, mut source: S) -> Result<AnalysisReport, AnalyzeError> {
        let mut agg = Aggregator::new(&self.config);
        let mut meta = ReportMeta::new(source.name());
        let mut line_no: u64 = 0;

        info!(source = %meta.source, "analysis started");

        while let Some(next) = source.next_line() {
            let line = match next {
                Ok(line) => line,
                Err(e) if line_no == 0 => {
                    return Err(AnalyzeError::source_unavailable(meta.source, e));
                }
                Err(e) => {
                    warn!(
                        source = %meta.source,
                        line_no,
                        error = %e,
                        "read failed, reporting partial results"
                    );
                    meta.interrupted = Some(e.to_string());
                    break;
                }
            };
            line_no += 1;

            let result = self.classifier.classify(&line);
            if let Some(field) = &result.malformed {
                warn!(source = %meta.source, line_no, reason = %field, "skipping malformed line");
            }

            agg.observe(&result, &line)?;
        }

        let report = agg.report(meta)?;

        info!(
            source = %report.source,
            lines = report.lines_read,
            errors = report.error_count,
            slow_queries = report.slow_query_count,
            users = report.connections.len(),
            malformed = report.malformed_lines,
            "analysis finished"
        );

        Ok(report)
    }
}

/// Open `path`, analyze it and write the rendered report to `sink`.
pub fn analyze_path<W: Write>(
    path: &Path,
    config: &AnalysisConfig,
    format: ReportFormat,
    sink: &mut W,
) -> Result<AnalysisReport, AnalyzeError> {
    let source = open_path(path)?;
    let report = Analyzer::new(config.clone()).run(source)?;

    let rendered = render(&report, config, format)?;
    sink.write_all(rendered.as_bytes())
        .and_then(|_| sink.flush())
        .map_err(AnalyzeError::Write)?;

    Ok(report)
}
