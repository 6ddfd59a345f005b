//! Process bootstrap: logging and configuration loading.
pub mod config;
pub mod tracing;
