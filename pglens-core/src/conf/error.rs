use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Check that the path exists and is readable.\n\
             \n\
             Generate a starting point with:\n\
             \n\
             pglens config init pglens.toml",
        ),

        ConfigError::Parse { .. } => Some(
            "The config file must be TOML with optional [detection], [report]\n\
             and [advisory] tables.\n\
             \n\
             Example:\n\
             \n\
             [detection]\n\
             slow_threshold_ms = 1000.0\n\
             \n\
             [report]\n\
             top_k_slow = 5",
        ),

        ConfigError::InvalidValue { field, .. } if field.starts_with("detection.") => Some(
            "The slow query threshold is a duration in milliseconds and must be\n\
             a finite, non-negative number.",
        ),

        ConfigError::InvalidValue { field, .. } if field.starts_with("report.") => Some(
            "Report limits and truncation lengths must be greater than zero.",
        ),

        _ => None,
    }
}
