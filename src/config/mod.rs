pub mod env;
pub mod file;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 2500;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "loop-diag")]
#[command(about = "Closed-loop business model diagnosis scored by an LLM provider")]
pub struct CliConfig {
    /// 商業模式 JSON 檔;省略時改讀 stdin
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// 放 API 金鑰的環境變數名稱
    #[arg(long, default_value = DEFAULT_API_KEY_ENV)]
    pub api_key_env: String,

    /// TOML 設定檔;指定時 provider 參數以檔案為準
    #[arg(long)]
    pub profile: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Pretty-print the diagnosis JSON")]
    pub pretty: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn api_key_env(&self) -> &str {
        &self.api_key_env
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_non_empty_string("api_key_env", &self.api_key_env)?;
        validation::validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validation::validate_positive_number("max_tokens", self.max_tokens as usize, 1)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        Ok(())
    }
}
