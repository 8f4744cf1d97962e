use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::{LevelThresholds, ScoringConfig, ScoringWeights};
use crate::services::LlmConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub levels: LevelsConfig,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            levels: LevelsConfig::default(),
            min_token_len: default_min_token_len(),
        }
    }
}

fn default_min_token_len() -> usize { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
    #[serde(default = "default_interest_weight")]
    pub interest: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword_weight(),
            interest: default_interest_weight(),
        }
    }
}

fn default_keyword_weight() -> f64 { 0.4 }
fn default_interest_weight() -> f64 { 0.6 }

#[derive(Debug, Clone, Deserialize)]
pub struct LevelsConfig {
    #[serde(default = "default_low_threshold")]
    pub low: f64,
    #[serde(default = "default_medium_threshold")]
    pub medium: f64,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            low: default_low_threshold(),
            medium: default_medium_threshold(),
        }
    }
}

fn default_low_threshold() -> f64 { 0.2 }
fn default_medium_threshold() -> f64 { 0.5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Text file remembering the last working endpoint across runs.
    #[serde(default)]
    pub endpoint_cache_file: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            probe_timeout_secs: default_probe_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            endpoint_cache_file: None,
        }
    }
}

fn default_model() -> String { "llama3".to_string() }
fn default_temperature() -> f64 { 0.3 }
fn default_max_tokens() -> u32 { 200 }
fn default_probe_timeout_secs() -> u64 { 2 }
fn default_request_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SWIPE__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. SWIPE__LLM__MODEL -> llm.model
            .add_source(
                Environment::with_prefix("SWIPE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SWIPE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig {
            weights: ScoringWeights {
                keyword: self.scoring.weights.keyword,
                interest: self.scoring.weights.interest,
            },
            thresholds: LevelThresholds {
                low: self.scoring.levels.low,
                medium: self.scoring.levels.medium,
            },
            min_token_len: self.scoring.min_token_len,
        }
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
            probe_timeout: Duration::from_secs(self.llm.probe_timeout_secs),
            request_timeout: Duration::from_secs(self.llm.request_timeout_secs),
        }
    }
}
