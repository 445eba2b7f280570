pub mod fixtures;
pub mod tracing;
