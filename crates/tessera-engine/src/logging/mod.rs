//! Logging utilities.
//!
//! Logger initialization lives here so binaries configure `env_logger` once
//! and every crate in the workspace logs through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
