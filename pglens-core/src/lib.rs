pub mod analysis;
pub mod cli;
pub mod conf;
pub mod error;
pub mod logging;
pub mod source;
