mod error;
mod loader;
pub mod types;


pub use error::{ConfigError, config_error_hint};
pub use loader::{load_config, load_or_default};
pub use types::{AdvisoryConfig, AnalysisConfig, DetectionConfig, ReportConfig};
