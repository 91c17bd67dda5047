use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagError {
    #[error("Provider request failed: {0}")]
    ProviderError(#[from] reqwest::Error),

    #[error("Provider request timed out after {seconds}s")]
    ProviderTimeout { seconds: u64 },

    #[error("Provider returned status {status}: {message}")]
    ProviderStatus { status: u16, message: String },

    #[error("Model output is not valid JSON")]
    ModelOutputNotJson,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, DiagError>;

/// 錯誤嚴重程度，對應 CLI 退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiagError {
    /// Stable machine-readable kind, surfaced in the serverless error body.
    pub fn kind(&self) -> &'static str {
        match self {
            DiagError::ProviderError(_)
            | DiagError::ProviderTimeout { .. }
            | DiagError::ProviderStatus { .. } => "PROVIDER_CALL_FAILED",
            DiagError::ModelOutputNotJson => "MODEL_OUTPUT_NOT_JSON",
            DiagError::IoError(_) => "IO_ERROR",
            DiagError::SerializationError(_) => "SERIALIZATION_ERROR",
            DiagError::ConfigError { .. }
            | DiagError::InvalidConfigValueError { .. }
            | DiagError::MissingConfigError { .. } => "CONFIG_INVALID",
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 供應商呼叫失敗通常重試即可恢復
            DiagError::ProviderError(_)
            | DiagError::ProviderTimeout { .. }
            | DiagError::ProviderStatus { .. } => ErrorSeverity::Medium,
            DiagError::ModelOutputNotJson
            | DiagError::IoError(_)
            | DiagError::SerializationError(_) => ErrorSeverity::High,
            DiagError::ConfigError { .. }
            | DiagError::InvalidConfigValueError { .. }
            | DiagError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DiagError::ProviderError(_) => {
                "Check network connectivity and the provider base URL"
            }
            DiagError::ProviderTimeout { .. } => {
                "Raise the request timeout or try again later"
            }
            DiagError::ProviderStatus { .. } => {
                "Verify the API key, the model name and the provider's status page"
            }
            DiagError::ModelOutputNotJson => {
                "Retry the diagnosis; raise max_tokens if the reply was cut off mid-JSON"
            }
            DiagError::IoError(_) => "Check the input file path and permissions",
            DiagError::SerializationError(_) => "Check that the input is valid JSON",
            DiagError::ConfigError { .. }
            | DiagError::InvalidConfigValueError { .. }
            | DiagError::MissingConfigError { .. } => {
                "Review the command-line flags or the profile file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DiagError::ProviderError(_) | DiagError::ProviderStatus { .. } => {
                "The scoring provider could not be reached or rejected the request".to_string()
            }
            DiagError::ProviderTimeout { seconds } => {
                format!("The scoring provider did not answer within {}s", seconds)
            }
            DiagError::ModelOutputNotJson => {
                "The model reply could not be read as a diagnosis".to_string()
            }
            other => other.to_string(),
        }
    }
}
