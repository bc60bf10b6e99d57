//! Configuration management for the SDR agent
//!
//! Supports loading configuration from:
//! - YAML files under `config/`
//! - Environment variables (SDR_AGENT prefix)

pub mod prompts;
pub mod settings;

pub use prompts::SystemPrompt;
pub use settings::{
    load_settings, AgentConfig, DataConfig, ObservabilityConfig, PersonaConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
