use crate::core::normalizer;
use crate::core::prompt;
use crate::domain::model::{BusinessModel, Diagnosis};
use crate::domain::ports::CompletionProvider;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct DiagnosisEngine<P: CompletionProvider> {
    provider: P,
    monitor: SystemMonitor,
}

impl<P: CompletionProvider> DiagnosisEngine<P> {
    pub fn new(provider: P) -> Self {
        Self::new_with_monitoring(provider, false)
    }

    pub fn new_with_monitoring(provider: P, monitoring: bool) -> Self {
        Self {
            provider,
            monitor: SystemMonitor::new(monitoring),
        }
    }

    /// 單發診斷:組提示 → 呼叫 provider → 正規化
    ///
    /// One provider call per run, no retries, no state kept between runs.
    pub async fn run(&self, input: &BusinessModel) -> Result<Diagnosis> {
        tracing::info!(
            "🚀 Starting closed-loop diagnosis ({} input fields)",
            input.fields.len()
        );
        if input.is_empty() {
            tracing::warn!("⚠️ Scoring an empty business model, expect harsh scores");
        }

        let request = prompt::scoring_request(input)?;
        self.monitor.log_stats("Prompt built");

        let envelope = self.provider.complete(&request).await?;
        self.monitor.log_stats("Provider responded");

        let diagnosis = normalizer::normalize(&envelope)?;
        tracing::info!(
            "✅ Diagnosis complete - total: {}, axes: {:?}",
            diagnosis.total,
            diagnosis.axes
        );
        self.monitor.log_final_stats();

        Ok(diagnosis)
    }
}
