use crate::analysis::{
    Advisory, Aggregator, AnalysisReport, Classifier, ErrorKind, ErrorKindCount, ReportMeta,
    UserConnections,
};
use crate::conf::AnalysisConfig;
use pretty_assertions::assert_eq;

fn report_for(config: &AnalysisConfig, lines: &[String]) -> AnalysisReport {
    let c = Classifier::new(config.detection.slow_threshold_ms);
    let mut agg = Aggregator::new(config);
    for line in lines {
        agg.observe(&c.classify(line), line).unwrap();
    }
    agg.report(ReportMeta::new("fixture")).unwrap()
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn empty_input_reports_zeroes() {
    let report = report_for(&AnalysisConfig::default(), &[]);

    assert_eq!(report.error_count, 0);
    assert!(report.error_kinds.is_empty());
    assert!(report.recent_errors.is_empty());
    assert_eq!(report.slow_query_count, 0);
    assert!(report.slowest.is_empty());
    assert!(report.connections.is_empty());
    assert!(report.advisories.is_empty());
    assert_eq!(report.lines_read, 0);
}

#[test]
fn slow_queries_sorted_descending_and_stable_on_ties() {
    let report = report_for(
        &AnalysisConfig::default(),
        &lines(&[
            "duration: 2000 ms first-tie",
            "duration: 1500 ms low",
            "duration: 3000 ms high",
            "duration: 2000 ms second-tie",
            "duration: 2000.0 ms third-tie",
        ]),
    );

    let order: Vec<&str> = report.slowest.iter().map(|s| s.line.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "duration: 3000 ms high",
            "duration: 2000 ms first-tie",
            "duration: 2000 ms second-tie",
            "duration: 2000.0 ms third-tie",
            "duration: 1500 ms low",
        ]
    );
    assert!(
        report
            .slowest
            .windows(2)
            .all(|w| w[0].duration_ms >= w[1].duration_ms)
    );
}

#[test]
fn slowest_is_capped_at_top_k() {
    let input: Vec<String> = (1..=8)
        .map(|i| format!("duration: {} ms q{i}", 1000 + i * 100))
        .collect();

    let report = report_for(&AnalysisConfig::default(), &input);

    assert_eq!(report.slow_query_count, 8);
    assert_eq!(report.slowest.len(), 5);
    assert_eq!(report.slowest[0].duration_ms, 1800.0);
    assert_eq!(report.slowest[4].duration_ms, 1400.0);
}

#[test]
fn recent_errors_are_last_n_in_arrival_order() {
    let input: Vec<String> = (1..=7).map(|i| format!("ERROR: e{i}")).collect();

    let report = report_for(&AnalysisConfig::default(), &input);

    assert_eq!(report.error_count, 7);
    assert_eq!(
        report.recent_errors,
        vec!["ERROR: e3", "ERROR: e4", "ERROR: e5", "ERROR: e6", "ERROR: e7"]
    );
}

#[test]
fn recent_errors_keep_full_text() {
    let long = format!("ERROR: {}", "x".repeat(500));

    let report = report_for(&AnalysisConfig::default(), &[long.clone()]);

    assert_eq!(report.recent_errors, vec![long]);
}

#[test]
fn error_histogram_orders_by_count_then_kind() {
    let report = report_for(
        &AnalysisConfig::default(),
        &lines(&[
            "ERROR: syntax error at or near",
            "ERROR: permission denied for table t",
            "ERROR: disk full",
            "ERROR: permission denied for schema s",
            "ERROR: deadlock detected",
        ]),
    );

    assert_eq!(
        report.error_kinds,
        vec![
            ErrorKindCount {
                kind: ErrorKind::Permission,
                count: 2
            },
            ErrorKindCount {
                kind: ErrorKind::Deadlock,
                count: 1
            },
            ErrorKindCount {
                kind: ErrorKind::Syntax,
                count: 1
            },
            ErrorKindCount {
                kind: ErrorKind::Other,
                count: 1
            },
        ]
    );
    assert_eq!(report.error_kind_count(ErrorKind::Connection), 0);
}

#[test]
fn connections_rank_by_count_then_name() {
    let report = report_for(
        &AnalysisConfig::default(),
        &lines(&[
            "connection authorized user=zed",
            "connection authorized user=carol",
            "connection received user=bob",
            "connection authorized user=bob",
            "connection authorized user=alice",
        ]),
    );

    assert_eq!(
        report.connections,
        vec![
            UserConnections {
                user: "bob".into(),
                count: 2
            },
            UserConnections {
                user: "alice".into(),
                count: 1
            },
            UserConnections {
                user: "carol".into(),
                count: 1
            },
            UserConnections {
                user: "zed".into(),
                count: 1
            },
        ]
    );
    assert_eq!(report.connection_count("bob"), Some(2));
    assert_eq!(report.connection_count("nobody"), None);
}

#[test]
fn advisories_fire_strictly_above_thresholds() {
    let mut config = AnalysisConfig::default();
    config.advisory.error_threshold = 2;
    config.advisory.slow_threshold = 1;
    config.advisory.connection_threshold = 2;

    let at_threshold = report_for(
        &config,
        &lines(&[
            "ERROR: a",
            "ERROR: b",
            "duration: 1500 ms",
            "connection authorized user=app",
            "connection authorized user=app",
        ]),
    );
    assert!(at_threshold.advisories.is_empty());

    let above = report_for(
        &config,
        &lines(&[
            "ERROR: a",
            "ERROR: b",
            "ERROR: c",
            "duration: 1500 ms",
            "duration: 1600 ms",
            "connection authorized user=app",
            "connection authorized user=app",
            "connection authorized user=app",
        ]),
    );
    assert_eq!(
        above.advisories,
        vec![
            Advisory::HighErrorRate { errors: 3 },
            Advisory::ManySlowQueries { slow_queries: 2 },
            Advisory::ConnectionHotspot {
                user: "app".into(),
                connections: 3
            },
        ]
    );
}

#[test]
fn advisory_messages_name_the_action() {
    assert!(
        Advisory::HighErrorRate { errors: 150 }
            .message()
            .contains("configuration")
    );
    assert!(
        Advisory::ManySlowQueries { slow_queries: 51 }
            .message()
            .contains("index optimization")
    );
    assert!(
        Advisory::ConnectionHotspot {
            user: "app".into(),
            connections: 1001
        }
        .message()
        .contains("connection pooling")
    );
}
