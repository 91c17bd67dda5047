use crate::domain::model::ScoringRequest;
use crate::domain::ports::{CompletionProvider, ConfigProvider};
use crate::utils::error::{DiagError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// OpenAI 相容的 chat completions 介接
///
/// Sends one request per diagnosis, no retries. The API key is injected by
/// the caller at construction; this type never touches the environment.
pub struct OpenAiProvider<C: ConfigProvider> {
    config: C,
    api_key: String,
    client: reqwest::Client,
}

impl<C: ConfigProvider> OpenAiProvider<C> {
    pub fn new(config: C, api_key: String) -> Self {
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url().trim_end_matches('/')
        )
    }

    fn request_body(&self, request: &ScoringRequest) -> Value {
        json!({
            "model": self.config.model(),
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ],
            "temperature": self.config.temperature(),
            "max_tokens": self.config.max_tokens(),
        })
    }
}

#[async_trait]
impl<C: ConfigProvider> CompletionProvider for OpenAiProvider<C> {
    async fn complete(&self, request: &ScoringRequest) -> Result<Value> {
        let url = self.endpoint();
        let timeout = self.config.timeout_seconds();

        tracing::info!(
            "📡 Calling completion provider: {} (model: {})",
            url,
            self.config.model()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .timeout(Duration::from_secs(timeout))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DiagError::ProviderTimeout { seconds: timeout }
                } else {
                    DiagError::ProviderError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ Provider returned {}: {}", status, body);
            return Err(DiagError::ProviderStatus {
                status: status.as_u16(),
                message: provider_error_message(&body),
            });
        }

        // 封包原樣回傳,解讀交給 normalizer
        let envelope: Value = response.json().await?;
        tracing::debug!("✅ Provider responded");
        Ok(envelope)
    }
}

/// 盡量挖出錯誤內文的 error.message,挖不到就用原始內文
fn provider_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
