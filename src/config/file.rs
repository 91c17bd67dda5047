use crate::config::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECONDS,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DiagError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML 設定檔:一組可重複使用的 provider 參數
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub profile: ProfileInfo,
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub api_key_env: Option<String>,
}

impl ProfileConfig {
    /// 從 TOML 檔載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DiagError::IoError)?;
        Self::from_str(&content)
    }

    /// 從 TOML 字串解析
    pub fn from_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| DiagError::ConfigError {
            message: format!("Profile TOML parsing error: {}", e),
        })
    }

    /// ${VAR} 換成環境變數值;沒設定的保留原樣,讓後續驗證攔下來
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl ConfigProvider for ProfileConfig {
    fn base_url(&self) -> &str {
        self.provider.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn model(&self) -> &str {
        self.provider.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn temperature(&self) -> f64 {
        self.provider.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    fn max_tokens(&self) -> u32 {
        self.provider.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    fn timeout_seconds(&self) -> u64 {
        self.provider.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn api_key_env(&self) -> &str {
        self.provider
            .api_key_env
            .as_deref()
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }
}

impl Validate for ProfileConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("profile.name", &self.profile.name)?;
        validation::validate_url("provider.base_url", self.base_url())?;
        validation::validate_non_empty_string("provider.model", self.model())?;
        validation::validate_non_empty_string("provider.api_key_env", self.api_key_env())?;
        validation::validate_range("provider.temperature", self.temperature(), 0.0, 2.0)?;
        validation::validate_positive_number("provider.max_tokens", self.max_tokens() as usize, 1)?;
        validation::validate_range("provider.timeout_seconds", self.timeout_seconds(), 1, 600)?;

        tracing::info!("✅ Profile '{}' validated", self.profile.name);
        Ok(())
    }
}
