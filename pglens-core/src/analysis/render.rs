use crate::analysis::report::AnalysisReport;
use crate::conf::AnalysisConfig;
use crate::error::AnalyzeError;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Text with colored headings and advisories.
    Pretty,
    Plain,
    /// Full, untruncated report as JSON.
    Json,
}

pub fn default_report_format() -> ReportFormat {
    if io::stdout().is_terminal() {
        ReportFormat::Pretty
    } else {
        ReportFormat::Plain
    }
}

pub fn render(
    report: &AnalysisReport,
    config: &AnalysisConfig,
    format: ReportFormat,
) -> Result<String, AnalyzeError> {
    match format {
        ReportFormat::Pretty => Ok(render_text(report, config, true)),
        ReportFormat::Plain => Ok(render_text(report, config, false)),
        ReportFormat::Json => Ok(render_json(report)?),
    }
}

pub fn render_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Longest prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

pub fn render_text(report: &AnalysisReport, config: &AnalysisConfig, color: bool) -> String {
    let mut out = String::new();

    render_header(&mut out, report, color);
    render_errors(&mut out, report, config, color);
    render_slow_queries(&mut out, report, config, color);
    render_connections(&mut out, report, color);
    render_advisories(&mut out, report, color);

    out
}

fn section(out: &mut String, title: &str, color: bool) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&format!("\n{rule}\n"));
    if color {
        out.push_str(&format!("{}\n", title.bold()));
    } else {
        out.push_str(&format!("{title}\n"));
    }
    out.push_str(&format!("{rule}\n"));
}

fn render_header(out: &mut String, report: &AnalysisReport, color: bool) {
    let rule = "=".repeat(RULE_WIDTH);
    let title = "PostgreSQL Log Analysis Report";

    out.push_str(&format!("{rule}\n"));
    if color {
        out.push_str(&format!("{}\n", title.bold().cyan()));
    } else {
        out.push_str(&format!("{title}\n"));
    }
    out.push_str(&format!("Source: {}\n", report.source));
    out.push_str(&format!(
        "Generated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("Lines read: {}", report.lines_read));
    if report.malformed_lines > 0 {
        out.push_str(&format!(" ({} malformed)", report.malformed_lines));
    }
    out.push('\n');

    if let Some(reason) = &report.interrupted {
        let note = format!("Source interrupted, results are partial: {reason}");
        if color {
            out.push_str(&format!("{}\n", note.yellow()));
        } else {
            out.push_str(&format!("{note}\n"));
        }
    }
    out.push_str(&format!("{rule}\n"));
}

fn render_errors(
    out: &mut String,
    report: &AnalysisReport,
    config: &AnalysisConfig,
    color: bool,
) {
    section(out, "Error Analysis", color);

    out.push_str(&format!("\nTotal errors: {}\n", report.error_count));
    out.push_str("\nErrors by type:\n");
    for entry in &report.error_kinds {
        out.push_str(&format!("  {}: {}\n", entry.kind, entry.count));
    }

    if !report.recent_errors.is_empty() {
        out.push_str(&format!(
            "\nMost recent errors (up to {}):\n",
            config.report.recent_errors
        ));
        for line in &report.recent_errors {
            out.push_str(&format!(
                "  {}\n",
                truncate_chars(line, config.report.error_truncate_chars)
            ));
        }
    }
}

fn render_slow_queries(
    out: &mut String,
    report: &AnalysisReport,
    config: &AnalysisConfig,
    color: bool,
) {
    section(out, "Slow Query Analysis", color);

    if report.slow_query_count == 0 {
        out.push_str("\nNo slow queries detected.\n");
        return;
    }

    out.push_str(&format!("\nSlow queries: {}\n", report.slow_query_count));
    out.push_str(&format!(
        "\nSlowest queries (top {}):\n",
        config.report.top_k_slow
    ));
    for (i, op) in report.slowest.iter().enumerate() {
        out.push_str(&format!("\n{}. Duration: {:.2} ms\n", i + 1, op.duration_ms));
        out.push_str(&format!(
            "   {}\n",
            truncate_chars(&op.line, config.report.slow_truncate_chars)
        ));
    }
}

fn render_connections(out: &mut String, report: &AnalysisReport, color: bool) {
    section(out, "Connection Analysis", color);

    out.push_str("\nConnections by user:\n");
    for c in &report.connections {
        out.push_str(&format!("  {}: {}\n", c.user, c.count));
    }
}

fn render_advisories(out: &mut String, report: &AnalysisReport, color: bool) {
    section(out, "Recommended Actions", color);

    if report.advisories.is_empty() {
        out.push_str("No action required.\n");
        return;
    }

    for advisory in &report.advisories {
        let line = format!("⚠️  {}", advisory.message());
        if color {
            out.push_str(&format!("{}\n", line.yellow()));
        } else {
            out.push_str(&format!("{line}\n"));
        }
    }
}
