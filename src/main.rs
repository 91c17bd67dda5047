#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use loop_diag::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use loop_diag::utils::error::{DiagError, ErrorSeverity};
#[cfg(feature = "cli")]
use loop_diag::utils::{logger, validation::Validate};
#[cfg(feature = "cli")]
use loop_diag::{BusinessModel, CliConfig, Diagnosis, DiagnosisEngine, OpenAiProvider, ProfileConfig};

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting loop-diag CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    // Profile 檔優先於命令列的 provider 參數
    let result = match &config.profile {
        Some(path) => {
            tracing::info!("📁 Loading provider profile from {}", path);
            match ProfileConfig::from_file(path) {
                Ok(profile) => diagnose(profile, &config).await,
                Err(e) => Err(e),
            }
        }
        None => diagnose(config.clone(), &config).await,
    };

    match result {
        Ok(diagnosis) => {
            let rendered = if config.pretty {
                serde_json::to_string_pretty(&diagnosis)?
            } else {
                serde_json::to_string(&diagnosis)?
            };
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ Diagnosis failed: {} (Kind: {}, Severity: {:?})",
                e,
                e.kind(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// 一次完整的診斷:驗證設定 → 注入金鑰 → 讀輸入 → 跑引擎
#[cfg(feature = "cli")]
async fn diagnose<C>(config: C, cli: &CliConfig) -> loop_diag::Result<Diagnosis>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let api_key =
        std::env::var(config.api_key_env()).map_err(|_| DiagError::MissingConfigError {
            field: config.api_key_env().to_string(),
        })?;

    let input = read_input(cli)?;

    let provider = OpenAiProvider::new(config, api_key);
    let engine = DiagnosisEngine::new_with_monitoring(provider, cli.monitor);
    engine.run(&input).await
}

#[cfg(feature = "cli")]
fn read_input(config: &CliConfig) -> loop_diag::Result<BusinessModel> {
    let raw = match &config.input {
        Some(path) => {
            tracing::info!("📁 Reading business model from {}", path);
            std::fs::read_to_string(path)?
        }
        None => {
            tracing::info!("📁 Reading business model from stdin");
            std::io::read_to_string(std::io::stdin())?
        }
    };

    Ok(BusinessModel::from_json_lenient(&raw))
}

#[cfg(not(feature = "cli"))]
fn main() {}
