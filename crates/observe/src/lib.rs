//! Initialization logic for logging as well as logging helper functions
//! shared between the workspace binaries.
pub mod config;
pub mod panic_hook;
pub mod tracing;

#[cfg(unix)]
mod tracing_reload_handler;

pub use config::Config;
