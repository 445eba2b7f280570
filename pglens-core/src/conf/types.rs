use serde::{Deserialize, Serialize};

/// Thresholds and display limits for one analysis run.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub detection: DetectionConfig,
    pub report: ReportConfig,
    pub advisory: AdvisoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// Durations strictly above this many milliseconds count as slow.
    pub slow_threshold_ms: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            slow_threshold_ms: 1000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub top_k_slow: usize,
    pub recent_errors: usize,
    pub error_truncate_chars: usize,
    pub slow_truncate_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_k_slow: 5,
            recent_errors: 5,
            error_truncate_chars: 200,
            slow_truncate_chars: 300,
        }
    }
}

/// Advisories fire when a count is strictly greater than its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdvisoryConfig {
    pub error_threshold: u64,
    pub slow_threshold: u64,
    pub connection_threshold: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            error_threshold: 100,
            slow_threshold: 50,
            connection_threshold: 1000,
        }
    }
}
