#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use loop_diag::config::env::EnvConfig;
#[cfg(feature = "lambda")]
use loop_diag::domain::ports::ConfigProvider;
#[cfg(feature = "lambda")]
use loop_diag::utils::error::DiagError;
#[cfg(feature = "lambda")]
use loop_diag::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use loop_diag::{BusinessModel, DiagnosisEngine, OpenAiProvider};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub body: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl Response {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }
}

/// 一次診斷:寬鬆解析 body → 驗證環境設定 → 呼叫引擎 → 序列化結果
#[cfg(feature = "lambda")]
async fn score(body: Option<&str>) -> loop_diag::Result<String> {
    let input = BusinessModel::from_json_lenient(body.unwrap_or("{}"));

    let config = EnvConfig::from_env();
    config.validate()?;

    let api_key =
        std::env::var(config.api_key_env()).map_err(|_| DiagError::MissingConfigError {
            field: config.api_key_env().to_string(),
        })?;

    let provider = OpenAiProvider::new(config, api_key);
    let engine = DiagnosisEngine::new(provider);

    let diagnosis = engine.run(&input).await?;
    Ok(serde_json::to_string(&diagnosis)?)
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Handling diagnosis request");

    // 失敗不往 runtime 丟,統一包成 500 回應
    let response = match score(event.payload.body.as_deref()).await {
        Ok(body) => Response::json(200, body),
        Err(e) => {
            tracing::error!("❌ Diagnosis failed: {} (Kind: {})", e, e.kind());
            let error_body = serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind(),
            });
            Response::json(500, error_body.to_string())
        }
    };

    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
