#[cfg(feature = "lambda")]
use crate::config::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECONDS,
};
#[cfg(feature = "lambda")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "lambda")]
use crate::utils::error::Result;
#[cfg(feature = "lambda")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "lambda")]
use std::env;

/// Serverless 環境的設定,全部從環境變數來,缺的用預設值
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub api_key_env: String,
}

#[cfg(feature = "lambda")]
impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature: env::var("TEMPERATURE")
                .unwrap_or_else(|_| DEFAULT_TEMPERATURE.to_string())
                .parse()
                .unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: env::var("MAX_TOKENS")
                .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_seconds: env::var("TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECONDS.to_string())
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            api_key_env: env::var("API_KEY_ENV")
                .unwrap_or_else(|_| DEFAULT_API_KEY_ENV.to_string()),
        }
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for EnvConfig {
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

#[cfg(feature = "lambda")]
impl Validate for EnvConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_non_empty_string("api_key_env", &self.api_key_env)?;
        validation::validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validation::validate_positive_number("max_tokens", self.max_tokens as usize, 1)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;

        tracing::info!("✅ Environment configuration validated");
        Ok(())
    }
}
