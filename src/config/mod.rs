//! Configuration management module
//!
//! Batch description loaded from a JSON file, plus runtime settings from the environment

pub mod file;
pub mod settings;

pub use file::{BatchConfig, DispatchUnit, EndpointSpec, MessageBatch, DEFAULT_CONFIG_FILE};
pub use settings::{ClientSettings, LoggingConfig, Settings};
