use crate::analysis::types::{ClassificationResult, MalformedField};
use once_cell::sync::Lazy;
use regex::Regex;

const ERROR_MARKERS: &[&str] = &["ERROR:", "FATAL:", "PANIC:"];
const CONNECTION_PHRASES: &[&str] = &["connection authorized", "connection received"];

// ASCII digits only.
static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"duration: ([0-9]+\.?[0-9]*) ms").expect("duration pattern is valid")
});

static USER: Lazy<Regex> = Lazy::new(|| Regex::new(r"user=(\w+)").expect("user pattern is valid"));

/// Stateless line classifier.
///
/// Holds only the slow cutoff; calling `classify` twice on the same line
/// always returns the same result.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    slow_threshold_ms: f64,
}

impl Classifier {
    pub fn new(slow_threshold_ms: f64) -> Self {
        Self { slow_threshold_ms }
    }

    pub fn slow_threshold_ms(&self) -> f64 {
        self.slow_threshold_ms
    }

    pub fn classify(&self, line: &str) -> ClassificationResult {
        let mut result = ClassificationResult {
            is_error: is_error(line),
            connection_identifier: connection_identifier(line),
            ..Default::default()
        };

        if let Some(raw) = DURATION.captures(line).and_then(|c| c.get(1)) {
            match parse_duration(raw.as_str()) {
                Some(ms) if ms > self.slow_threshold_ms => result.slow_operation_ms = Some(ms),
                Some(_) => {}
                None => {
                    result.malformed = Some(MalformedField::Duration {
                        raw: raw.as_str().to_string(),
                    })
                }
            }
        }

        result
    }
}

fn is_error(line: &str) -> bool {
    ERROR_MARKERS.iter().any(|marker| line.contains(marker))
}

fn parse_duration(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|ms| ms.is_finite())
}

/// Both gates must hold: a connection phrase and a `user=` field.
fn connection_identifier(line: &str) -> Option<String> {
    if !CONNECTION_PHRASES.iter().any(|phrase| line.contains(phrase)) {
        return None;
    }

    USER.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
