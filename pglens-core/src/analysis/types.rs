use serde::Serialize;

/// What a single line contributed, as decided by the classifier.
///
/// A line may be an error and a slow operation at the same time; the fields
/// are independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationResult {
    pub is_error: bool,
    /// Present only when the parsed duration exceeds the slow threshold.
    pub slow_operation_ms: Option<f64>,
    /// `user=<token>` from a connection authorized/received line.
    pub connection_identifier: Option<String>,
    pub malformed: Option<MalformedField>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        !self.is_error
            && self.slow_operation_ms.is_none()
            && self.connection_identifier.is_none()
            && self.malformed.is_none()
    }
}

/// A field that matched its pattern but could not be interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedField {
    Duration { raw: String },
}

impl std::fmt::Display for MalformedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedField::Duration { raw } => write!(f, "unparseable duration '{raw}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowOperation {
    pub duration_ms: f64,
    pub line: String,
}

/// Error sub-type, inferred from keywords at report time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ErrorKind {
    Deadlock,
    #[serde(rename = "Connection Error")]
    Connection,
    #[serde(rename = "Syntax Error")]
    Syntax,
    #[serde(rename = "Permission Denied")]
    Permission,
    Other,
}

/// Checked in order; the first keyword found wins.
const KEYWORDS: &[(&str, ErrorKind)] = &[
    ("deadlock", ErrorKind::Deadlock),
    ("connection", ErrorKind::Connection),
    ("syntax", ErrorKind::Syntax),
    ("permission", ErrorKind::Permission),
];

impl ErrorKind {
    pub fn from_line(line: &str) -> Self {
        let lower = line.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| lower.contains(*keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(ErrorKind::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Deadlock => "Deadlock",
            ErrorKind::Connection => "Connection Error",
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Permission => "Permission Denied",
            ErrorKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
