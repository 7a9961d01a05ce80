pub mod toml_config;

#[cfg(feature = "cli")]
use crate::adapters::google_tts::{Credentials, GoogleTtsConfig};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TtsError};
use crate::utils::validation::{
    validate_language_tag, validate_non_empty_string, validate_path, validate_positive_number,
};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_range, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_INPUT_PATH: &str = "inputs/jp-words.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "./outputs";
pub const DEFAULT_SOURCE_COLUMN: &str = "日本語";
pub const DEFAULT_TARGET_COLUMN: &str = "英語";
pub const DEFAULT_SOURCE_LANGUAGE: &str = "ja_JP";
pub const DEFAULT_TARGET_LANGUAGE: &str = "en_US";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "wordlist-tts")]
#[command(about = "Generate Japanese/English speech files from a CSV word list")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_INPUT_PATH)]
    pub input: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_SOURCE_COLUMN)]
    pub source_column: String,

    #[arg(long, default_value = DEFAULT_SOURCE_LANGUAGE)]
    pub source_language: String,

    #[arg(long, default_value = DEFAULT_TARGET_COLUMN)]
    pub target_column: String,

    #[arg(long, default_value = DEFAULT_TARGET_LANGUAGE)]
    pub target_language: String,

    #[arg(long, default_value = crate::adapters::google_tts::DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    #[serde(skip_serializing)]
    pub access_token: Option<String>,

    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value_t = crate::adapters::google_tts::DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(short, long, help = "Load settings from a TOML file instead of the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Only print the files that would be generated")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn google_tts_config(&self) -> GoogleTtsConfig {
        GoogleTtsConfig {
            endpoint: self.api_endpoint.clone(),
            credentials: Credentials::from_options(
                self.api_key.as_deref(),
                self.access_token.as_deref(),
            ),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn source_column(&self) -> &str {
        &self.source_column
    }

    fn source_language(&self) -> &str {
        &self.source_language
    }

    fn target_column(&self) -> &str {
        &self.target_column
    }

    fn target_language(&self) -> &str {
        &self.target_language
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_common(self)?;
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 600)
    }
}

/// CLI 與 TOML 共用的檢查
pub(crate) fn validate_common<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_path("input", config.input_path())?;
    validate_path("output_path", config.output_path())?;
    validate_non_empty_string("source_column", config.source_column())?;
    validate_non_empty_string("target_column", config.target_column())?;
    validate_language_tag("source_language", config.source_language())?;
    validate_language_tag("target_language", config.target_language())?;
    validate_positive_number("concurrent_requests", config.concurrent_requests(), 1)?;

    // 兩個語言標籤相同時，同一列的兩個檔名會相撞
    if config.source_language() == config.target_language() {
        return Err(TtsError::ConfigValidationError {
            field: "target_language".to_string(),
            message: format!(
                "must differ from source_language ({})",
                config.source_language()
            ),
        });
    }

    Ok(())
}
