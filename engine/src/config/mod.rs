//! Configuration management
//!
//! This module handles loading, validation, and management of the Atelier
//! configuration. Configuration is stored in TOML format at
//! ~/.atelier/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Log level
//! - **llm**: Generation service settings (Gemini endpoint, model, credential variable)
//! - **orchestrator**: Placeholder narratives and the optional call deadline
//!
//! The credential itself is never stored here. `llm.gemini.api_key_env` only
//! names the environment variable it is read from.
//!
//! # Examples
//!
//! ```no_run
//! use atelier_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_or_create()?;
//! println!("Model: {}", config.llm.gemini.model);
//! # Ok(())
//! # }
//! ```

use sdk::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Levels accepted by `core.log_level` and `--log`
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Core settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Generation service configuration
    #[serde(default)]
    pub llm: LLMConfig,

    /// Response shaping configuration
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

/// Core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LLMConfig {
    /// Gemini provider settings
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Gemini provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for Gemini API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature (0.0-2.0); service default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Narrative used when a structured response has no analysis text
    #[serde(default = "default_fallback_narrative")]
    pub fallback_narrative: String,

    /// Narrative used when the generation call fails
    #[serde(default = "default_unavailable_narrative")]
    pub unavailable_narrative: String,

    /// Narrative used when the service answers with no text at all
    #[serde(default = "default_empty_response_narrative")]
    pub empty_response_narrative: String,

    /// Optional deadline for a single generation call, in seconds.
    /// Unset means the call may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl OrchestratorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_fallback_narrative() -> String {
    "Data generated successfully.".to_string()
}

fn default_unavailable_narrative() -> String {
    "The AI Muse is currently taking a coffee break. Please check your API Key.".to_string()
}

fn default_empty_response_narrative() -> String {
    "No response generated.".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            api_key_env: default_api_key_env(),
            temperature: None,
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            fallback_narrative: default_fallback_narrative(),
            unavailable_narrative: default_unavailable_narrative(),
            empty_response_narrative: default_empty_response_narrative(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.atelier/config.toml)
    ///
    /// If the configuration file doesn't exist, creates a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file cannot be read or written
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load_or_create() -> Result<Self, EngineError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Create default configuration and save to path
    fn create_default(path: &Path) -> Result<Self, EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config = Self::default();

        let toml_string = toml::to_string_pretty(&config)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| EngineError::Config(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Wrote default configuration to {}", path.display());

        Ok(config)
    }

    /// Get the default configuration file path (~/.atelier/config.toml)
    pub fn default_config_path() -> Result<PathBuf, EngineError> {
        let home = dirs::home_dir()
            .ok_or_else(|| EngineError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".atelier").join("config.toml"))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log level is unknown
    /// - The Gemini base URL, model, or credential variable is blank
    /// - The temperature is outside 0.0-2.0
    /// - Any placeholder narrative is blank
    /// - The timeout is zero
    pub fn validate(&self) -> Result<(), EngineError> {
        if !LOG_LEVELS.contains(&self.core.log_level.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        let gemini = &self.llm.gemini;
        if gemini.base_url.trim().is_empty() {
            return Err(EngineError::Config(
                "llm.gemini.base_url must not be empty".to_string(),
            ));
        }
        if gemini.model.trim().is_empty() {
            return Err(EngineError::Config(
                "llm.gemini.model must not be empty".to_string(),
            ));
        }
        if gemini.api_key_env.trim().is_empty() {
            return Err(EngineError::Config(
                "llm.gemini.api_key_env must not be empty".to_string(),
            ));
        }
        if let Some(t) = gemini.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(EngineError::Config(
                    "llm.gemini.temperature must be between 0.0 and 2.0".to_string(),
                ));
            }
        }

        let orchestrator = &self.orchestrator;
        for (field, value) in [
            ("fallback_narrative", &orchestrator.fallback_narrative),
            ("unavailable_narrative", &orchestrator.unavailable_narrative),
            ("empty_response_narrative", &orchestrator.empty_response_narrative),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::Config(format!(
                    "orchestrator.{} must not be empty",
                    field
                )));
            }
        }
        if orchestrator.timeout_secs == Some(0) {
            return Err(EngineError::Config(
                "orchestrator.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
