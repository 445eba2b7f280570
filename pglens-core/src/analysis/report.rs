use crate::analysis::aggregate::Aggregator;
use crate::analysis::types::{ErrorKind, SlowOperation};
use crate::conf::AdvisoryConfig;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;

/// Context for the report header.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub source: String,
    pub generated_at: DateTime<Local>,
    /// Set when the source failed part-way through.
    pub interrupted: Option<String>,
}

impl ReportMeta {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            generated_at: Local::now(),
            interrupted: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorKindCount {
    pub kind: ErrorKind,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserConnections {
    pub user: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    HighErrorRate { errors: u64 },
    ManySlowQueries { slow_queries: u64 },
    ConnectionHotspot { user: String, connections: u64 },
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::HighErrorRate { errors } => format!(
                "{errors} errors logged. Investigate the application or database configuration."
            ),
            Advisory::ManySlowQueries { slow_queries } => format!(
                "{slow_queries} slow queries detected. Consider index optimization."
            ),
            Advisory::ConnectionHotspot { user, connections } => format!(
                "User '{user}' opened {connections} connections. Review connection pooling."
            ),
        }
    }
}

/// Read-only result of one analysis run.
///
/// Stored lines are full length; truncation happens in the renderers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub generated_at: DateTime<Local>,
    pub lines_read: u64,
    pub malformed_lines: u64,
    pub interrupted: Option<String>,

    pub error_count: u64,
    pub error_kinds: Vec<ErrorKindCount>,
    pub recent_errors: Vec<String>,

    pub slow_query_count: u64,
    pub slowest: Vec<SlowOperation>,

    pub connections: Vec<UserConnections>,

    pub advisories: Vec<Advisory>,
}

impl AnalysisReport {
    pub(crate) fn build(agg: &mut Aggregator, meta: ReportMeta) -> Self {
        // In place and stable: equal durations keep arrival order.
        if !agg.slow_operations.is_empty() {
            agg.slow_operations
                .sort_by(|a, b| b.duration_ms.total_cmp(&a.duration_ms));
        }

        let limits = &agg.config.report;

        let slowest: Vec<SlowOperation> = agg
            .slow_operations
            .iter()
            .take(limits.top_k_slow)
            .cloned()
            .collect();

        let recent_start = agg.errors.len().saturating_sub(limits.recent_errors);
        let recent_errors = agg.errors[recent_start..].to_vec();

        let error_kinds = error_histogram(&agg.errors);
        let connections = rank_connections(&agg.users);
        let advisories = advisories(
            agg.errors.len() as u64,
            agg.slow_operations.len() as u64,
            connections.first(),
            &agg.config.advisory,
        );

        AnalysisReport {
            source: meta.source,
            generated_at: meta.generated_at,
            lines_read: agg.lines_observed,
            malformed_lines: agg.malformed_lines,
            interrupted: meta.interrupted,
            error_count: agg.errors.len() as u64,
            error_kinds,
            recent_errors,
            slow_query_count: agg.slow_operations.len() as u64,
            slowest,
            connections,
            advisories,
        }
    }

    pub fn connection_count(&self, user: &str) -> Option<u64> {
        self.connections
            .iter()
            .find(|c| c.user == user)
            .map(|c| c.count)
    }

    pub fn error_kind_count(&self, kind: ErrorKind) -> u64 {
        self.error_kinds
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.count)
            .unwrap_or(0)
    }
}

fn error_histogram(errors: &[String]) -> Vec<ErrorKindCount> {
    let mut counts: HashMap<ErrorKind, u64> = HashMap::new();
    for line in errors {
        *counts.entry(ErrorKind::from_line(line)).or_insert(0) += 1;
    }

    let mut out: Vec<ErrorKindCount> = counts
        .into_iter()
        .map(|(kind, count)| ErrorKindCount { kind, count })
        .collect();

    // Highest count first, ties in declaration order of ErrorKind.
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.kind.cmp(&b.kind)));
    out
}

fn rank_connections(users: &[(String, u64)]) -> Vec<UserConnections> {
    let mut out: Vec<UserConnections> = users
        .iter()
        .map(|(user, count)| UserConnections {
            user: user.clone(),
            count: *count,
        })
        .collect();

    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user.cmp(&b.user)));
    out
}

fn advisories(
    errors: u64,
    slow_queries: u64,
    busiest: Option<&UserConnections>,
    thresholds: &AdvisoryConfig,
) -> Vec<Advisory> {
    let mut out = Vec::new();

    if errors > thresholds.error_threshold {
        out.push(Advisory::HighErrorRate { errors });
    }

    if slow_queries > thresholds.slow_threshold {
        out.push(Advisory::ManySlowQueries { slow_queries });
    }

    if let Some(busiest) = busiest.filter(|u| u.count > thresholds.connection_threshold) {
        out.push(Advisory::ConnectionHotspot {
            user: busiest.user.clone(),
            connections: busiest.count,
        });
    }

    out
}
