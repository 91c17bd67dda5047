use crate::domain::model::ScoringRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f64;
    fn max_tokens(&self) -> u32;
    fn timeout_seconds(&self) -> u64;
    fn api_key_env(&self) -> &str;
}

/// 外部補全服務的接縫;回傳 provider 的原始回應封包,不做任何解讀
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &ScoringRequest) -> Result<Value>;
}
