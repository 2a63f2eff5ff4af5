//! Front-end plumbing shared by PocketBoy binaries: the `key = value`
//! configuration file and the log-file backed logger.

pub mod config;
pub mod logging;

pub use config::Config;
