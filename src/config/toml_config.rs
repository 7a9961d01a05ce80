use crate::adapters::google_tts::{
    Credentials, GoogleTtsConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS,
};
use crate::config::{
    validate_common, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
    DEFAULT_SOURCE_COLUMN, DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_COLUMN,
    DEFAULT_TARGET_LANGUAGE,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TtsError};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

/// 只寫 `source` / `target` 時，語言標籤沿用 ja_JP / en_US
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_source_column")]
    pub source: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_column")]
    pub target: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

fn default_source_column() -> String {
    DEFAULT_SOURCE_COLUMN.to_string()
}

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

fn default_target_column() -> String {
    DEFAULT_TARGET_COLUMN.to_string()
}

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub concurrent_requests: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_INPUT_PATH.to_string(),
        }
    }
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            source: default_source_column(),
            source_language: default_source_language(),
            target: default_target_column(),
            target_language: default_target_language(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            access_token: None,
            concurrent_requests: None,
            timeout_seconds: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TtsError::ConfigError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TtsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_API_KEY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TtsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn google_tts_config(&self) -> GoogleTtsConfig {
        // 未替換的 ${VAR} 視為未設定
        let resolved = |v: &Option<String>| v.clone().filter(|s| !s.starts_with("${"));
        let api_key = resolved(&self.synthesis.api_key);
        let access_token = resolved(&self.synthesis.access_token);

        GoogleTtsConfig {
            endpoint: self.synthesis.endpoint.clone(),
            credentials: Credentials::from_options(api_key.as_deref(), access_token.as_deref()),
            timeout: Duration::from_secs(self.timeout_seconds()),
        }
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.synthesis
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn source_column(&self) -> &str {
        &self.columns.source
    }

    fn source_language(&self) -> &str {
        &self.columns.source_language
    }

    fn target_column(&self) -> &str {
        &self.columns.target
    }

    fn target_language(&self) -> &str {
        &self.columns.target_language
    }

    fn concurrent_requests(&self) -> usize {
        self.synthesis
            .concurrent_requests
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_common(self)?;
        validate_url("synthesis.endpoint", &self.synthesis.endpoint)?;
        validate_range("synthesis.timeout_seconds", self.timeout_seconds(), 1, 600)
    }
}
