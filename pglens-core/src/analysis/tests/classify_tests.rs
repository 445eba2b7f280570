use crate::analysis::{ClassificationResult, Classifier, ErrorKind, MalformedField};
use pretty_assertions::assert_eq;

fn classifier() -> Classifier {
    Classifier::new(1000.0)
}

#[test]
fn error_markers_are_detected() {
    let c = classifier();

    for line in [
        "2024-01-01 10:00:00 UTC [42] ERROR: relation \"foo\" does not exist",
        "FATAL: password authentication failed for user \"bob\"",
        "PANIC: could not write to file",
        "prefix ERROR:suffix",
    ] {
        assert!(c.classify(line).is_error, "expected error: {line}");
    }
}

#[test]
fn error_markers_are_case_sensitive() {
    let c = classifier();

    for line in [
        "error: lowercase is not a marker",
        "ERROR without colon",
        "Fatal: mixed case",
        "LOG:  checkpoint starting",
    ] {
        assert!(!c.classify(line).is_error, "unexpected error: {line}");
    }
}

#[test]
fn slow_duration_is_extracted() {
    let result = classifier().classify("LOG:  duration: 1234.5 ms  statement: SELECT 1");

    assert_eq!(result.slow_operation_ms, Some(1234.5));
    assert!(result.malformed.is_none());
}

#[test]
fn integer_and_trailing_dot_durations_parse() {
    let c = classifier();

    assert_eq!(c.classify("duration: 1500 ms").slow_operation_ms, Some(1500.0));
    assert_eq!(c.classify("duration: 2000. ms").slow_operation_ms, Some(2000.0));
}

#[test]
fn durations_at_or_below_threshold_are_not_slow() {
    let c = classifier();

    assert_eq!(c.classify("duration: 1000 ms").slow_operation_ms, None);
    assert_eq!(c.classify("duration: 1000.0 ms").slow_operation_ms, None);
    assert_eq!(c.classify("duration: 500 ms query Y").slow_operation_ms, None);
    assert_eq!(c.classify("duration: 1000.01 ms").slow_operation_ms, Some(1000.01));
}

#[test]
fn duration_needs_exact_shape() {
    let c = classifier();

    assert_eq!(c.classify("duration: 5000ms").slow_operation_ms, None);
    assert_eq!(c.classify("duration 5000 ms").slow_operation_ms, None);
    assert_eq!(c.classify("duration: .5 ms").slow_operation_ms, None);
    assert_eq!(c.classify("duration: 5000 s").slow_operation_ms, None);
}

#[test]
fn non_ascii_numerals_are_ignored_not_malformed() {
    let c = classifier();

    for line in ["duration: ١٥٠٠ ms", "duration: １５００ ms", "duration: १५००.५ ms"] {
        let result = c.classify(line);
        assert_eq!(result.slow_operation_ms, None, "{line}");
        assert_eq!(result.malformed, None, "{line}");
    }
}

#[test]
fn overflowing_duration_is_malformed_not_slow() {
    let huge = "9".repeat(400);
    let line = format!("duration: {huge} ms");

    let result = classifier().classify(&line);

    assert_eq!(result.slow_operation_ms, None);
    assert_eq!(result.malformed, Some(MalformedField::Duration { raw: huge }));
}

#[test]
fn connection_needs_phrase_and_user() {
    let c = classifier();

    assert_eq!(
        c.classify("LOG:  connection authorized: user=alice database=app")
            .connection_identifier
            .as_deref(),
        Some("alice")
    );
    assert_eq!(
        c.classify("connection received: host=10.0.0.1 user=bob_2")
            .connection_identifier
            .as_deref(),
        Some("bob_2")
    );

    // phrase without user
    assert_eq!(
        c.classify("LOG:  connection received: host=10.0.0.1 port=5432")
            .connection_identifier,
        None
    );
    // user without phrase
    assert_eq!(
        c.classify("LOG:  disconnection: user=alice").connection_identifier,
        None
    );
}

#[test]
fn user_token_stops_at_non_word_character() {
    let result = classifier().classify("connection authorized: user=carol,db=x");

    assert_eq!(result.connection_identifier.as_deref(), Some("carol"));
}

#[test]
fn one_line_can_match_several_categories() {
    let result = classifier().classify(
        "ERROR: canceling statement due to timeout duration: 2500.0 ms connection authorized user=dave",
    );

    assert_eq!(
        result,
        ClassificationResult {
            is_error: true,
            slow_operation_ms: Some(2500.0),
            connection_identifier: Some("dave".into()),
            malformed: None,
        }
    );
}

#[test]
fn classification_is_repeatable() {
    let c = classifier();
    let line = "FATAL: connection authorized user=eve duration: 1200 ms";

    assert_eq!(c.classify(line), c.classify(line));
}

#[test]
fn plain_line_is_empty() {
    assert!(classifier().classify("normal line").is_empty());
}

#[test]
fn custom_threshold_is_respected() {
    let c = Classifier::new(100.0);

    assert_eq!(c.classify("duration: 150 ms").slow_operation_ms, Some(150.0));
    assert_eq!(c.slow_threshold_ms(), 100.0);
}

#[test]
fn error_kind_first_keyword_wins() {
    assert_eq!(
        ErrorKind::from_line("ERROR: deadlock detected on connection 4"),
        ErrorKind::Deadlock
    );
    assert_eq!(
        ErrorKind::from_line("FATAL: Connection refused, syntax unknown"),
        ErrorKind::Connection
    );
    assert_eq!(
        ErrorKind::from_line("ERROR: SYNTAX error at or near \"SELEC\""),
        ErrorKind::Syntax
    );
    assert_eq!(
        ErrorKind::from_line("ERROR: Permission denied for table users"),
        ErrorKind::Permission
    );
    assert_eq!(ErrorKind::from_line("ERROR: disk full"), ErrorKind::Other);
}

#[test]
fn error_kind_labels() {
    let labels: Vec<_> = [
        ErrorKind::Deadlock,
        ErrorKind::Connection,
        ErrorKind::Syntax,
        ErrorKind::Permission,
        ErrorKind::Other,
    ]
    .iter()
    .map(ErrorKind::to_string)
    .collect();

    assert_eq!(
        labels,
        vec![
            "Deadlock",
            "Connection Error",
            "Syntax Error",
            "Permission Denied",
            "Other"
        ]
    );
}
