use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error("Failed to read input file '{path}': {source}")]
    InputReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed input: {message}")]
    ParseError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Speech synthesis failed: {message}")]
    SynthesisError { message: String },

    #[error("Audio content could not be decoded: {0}")]
    AudioDecodeError(#[from] base64::DecodeError),

    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Job '{file_name}' failed: {source}")]
    JobFailed {
        file_name: String,
        #[source]
        source: Box<TtsError>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Column '{column}' not found in input header")]
    MissingColumnError { column: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parse,
    Synthesis,
    Write,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 任何錯誤都以非零代碼結束程序
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl TtsError {
    /// 失敗的工作會回報其根本原因的分類
    pub fn category(&self) -> ErrorCategory {
        match self {
            TtsError::InputReadError { .. } => ErrorCategory::Input,
            TtsError::CsvError(_) | TtsError::ParseError { .. } => ErrorCategory::Parse,
            TtsError::ApiError(_)
            | TtsError::SynthesisError { .. }
            | TtsError::AudioDecodeError(_) => ErrorCategory::Synthesis,
            TtsError::WriteError { .. } => ErrorCategory::Write,
            TtsError::JobFailed { source, .. } => source.category(),
            TtsError::ConfigError { .. }
            | TtsError::ConfigValidationError { .. }
            | TtsError::InvalidConfigValueError { .. }
            | TtsError::MissingConfigError { .. }
            | TtsError::MissingColumnError { .. } => ErrorCategory::Configuration,
            TtsError::SerializationError(_) | TtsError::ProcessingError { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路或配額問題，稍後重跑通常就能成功
            ErrorCategory::Synthesis => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Parse | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::Write | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check that the input CSV path exists and is readable",
            ErrorCategory::Parse => {
                "Check the CSV for unbalanced quotes or rows with a different column count than the header"
            }
            ErrorCategory::Synthesis => {
                "Check the API credentials, language codes and quota, then run again"
            }
            ErrorCategory::Write => {
                "Check permissions and free space in the output directory"
            }
            ErrorCategory::Configuration => {
                "Review the command line flags or the TOML configuration file"
            }
            ErrorCategory::Internal => "Re-run with --verbose and report the log output",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TtsError::JobFailed { file_name, source } => {
                format!("Could not create '{}': {}", file_name, source)
            }
            TtsError::MissingColumnError { column } => format!(
                "The input file has no column named '{}'. Use --source-column / --target-column to match the header",
                column
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TtsError>;
