//! Main settings module

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Agent persona and behavior configuration
    #[serde(default)]
    pub agent: AgentConfig,

    /// Backing document locations
    #[serde(default)]
    pub data: DataConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.data.validate()?;

        if self.agent.persona.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "agent.persona.name".to_string(),
                message: "Persona name must not be blank".to_string(),
            });
        }

        Ok(())
    }
}

/// Agent persona and lead-tagging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Persona the agent speaks as
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Value stamped into the `source` field of captured leads
    #[serde(default = "default_lead_source")]
    pub lead_source: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            persona: PersonaConfig::default(),
            lead_source: default_lead_source(),
        }
    }
}

fn default_lead_source() -> String {
    "voice_call".to_string()
}

/// Persona configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Agent's spoken name
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Agent's role
    #[serde(default = "default_persona_role")]
    pub role: String,

    /// Company the agent represents
    #[serde(default = "default_company")]
    pub company: String,
}

fn default_persona_name() -> String {
    "Hazel".to_string()
}
fn default_persona_role() -> String {
    "Sales Development Representative".to_string()
}
fn default_company() -> String {
    "Acme Broking".to_string()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            role: default_persona_role(),
            company: default_company(),
        }
    }
}

/// Backing document locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the agent's JSON documents
    #[serde(default = "default_data_dir")]
    pub dir: String,

    /// FAQ document file name
    #[serde(default = "default_faq_file")]
    pub faq_file: String,

    /// Lead collection file name
    #[serde(default = "default_leads_file")]
    pub leads_file: String,

    /// Raw call-summary input file name
    #[serde(default = "default_call_summaries_file")]
    pub call_summaries_file: String,

    /// Broad-summary output file name
    #[serde(default = "default_summary_file")]
    pub summary_file: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}
fn default_faq_file() -> String {
    "faq.json".to_string()
}
fn default_leads_file() -> String {
    "leads.json".to_string()
}
fn default_call_summaries_file() -> String {
    "call_summaries.json".to_string()
}
fn default_summary_file() -> String {
    "summary.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            faq_file: default_faq_file(),
            leads_file: default_leads_file(),
            call_summaries_file: default_call_summaries_file(),
            summary_file: default_summary_file(),
        }
    }
}

impl DataConfig {
    pub fn faq_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.faq_file)
    }

    pub fn leads_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.leads_file)
    }

    pub fn call_summaries_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.call_summaries_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.summary_file)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.dir".to_string(),
                message: "Data directory must not be blank".to_string(),
            });
        }

        let files = [
            ("data.faq_file", &self.faq_file),
            ("data.leads_file", &self.leads_file),
            ("data.call_summaries_file", &self.call_summaries_file),
            ("data.summary_file", &self.summary_file),
        ];

        for (field, file) in files {
            if file.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "File name must not be blank".to_string(),
                });
            }
            if !file.ends_with(".json") {
                tracing::warn!("{}: expected .json extension, got '{}'", field, file);
            }
        }

        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (SDR_AGENT prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder = builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("SDR_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.agent.persona.name, "Hazel");
        assert_eq!(settings.agent.lead_source, "voice_call");
        assert_eq!(settings.data.leads_path(), PathBuf::from("data/leads.json"));
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.data.dir = "  ".to_string();
        assert!(settings.validate().is_err());

        settings.data.dir = "data".to_string();
        assert!(settings.validate().is_ok());

        settings.agent.persona.name = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_blank_file_name_rejected() {
        let mut settings = Settings::default();
        settings.data.summary_file = String::new();

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("summary_file"));
    }
}
