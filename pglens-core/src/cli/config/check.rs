use crate::conf::{ConfigError, config_error_hint, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!(
                "✔ slow query threshold: {} ms",
                cfg.detection.slow_threshold_ms
            );
            println!(
                "✔ report: top {} slow queries, last {} errors",
                cfg.report.top_k_slow, cfg.report.recent_errors
            );
            println!(
                "✔ advisories: errors > {}, slow queries > {}, connections per user > {}",
                cfg.advisory.error_threshold,
                cfg.advisory.slow_threshold,
                cfg.advisory.connection_threshold
            );
            Ok(())
        }
        Err(err) => anyhow::bail!(describe_config_error(&err)),
    }
}

/// Error message followed by its hint, when one exists.
pub fn describe_config_error(err: &ConfigError) -> String {
    match config_error_hint(err) {
        Some(hint) => format!("{err}\n\n{hint}"),
        None => err.to_string(),
    }
}
