use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The line source could not be opened, or failed before yielding a line.
    #[error("failed to read log source {source_name}: {source}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// `observe` or `report` called after the report was produced.
    #[error("cannot {operation}: analysis has already been reported")]
    InvalidState { operation: &'static str },

    #[error("failed to serialize report: {0}")]
    Render(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Write(#[source] std::io::Error),
}

impl AnalyzeError {
    pub fn source_unavailable(source_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            source,
        }
    }
}
