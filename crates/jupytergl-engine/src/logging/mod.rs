//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only talks to the `log`
//! facade; the backend is `env_logger`, set up once by the host binary.

mod init;

pub use init::{init_logging, LoggingConfig};
