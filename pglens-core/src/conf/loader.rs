use crate::conf::error::ConfigError;
use crate::conf::types::AnalysisConfig;

use std::fs;
use std::path::Path;

pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let config: AnalysisConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

    config.validate()?;
    Ok(config)
}

/// Load `path` when given, otherwise fall back to the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AnalysisConfig::default()),
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.detection.slow_threshold_ms;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::invalid(
                "detection.slow_threshold_ms",
                format!("expected a finite, non-negative number, got {threshold}"),
            ));
        }

        let limits = [
            ("report.top_k_slow", self.report.top_k_slow),
            ("report.recent_errors", self.report.recent_errors),
            ("report.error_truncate_chars", self.report.error_truncate_chars),
            ("report.slow_truncate_chars", self.report.slow_truncate_chars),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::invalid(field, "must be greater than zero"));
            }
        }

        Ok(())
    }
}
