use clap::Parser;
use invoice_lookup::adapters::{HttpCrmLookup, HttpFieldExtractor};
use invoice_lookup::core::ConfigProvider;
use invoice_lookup::utils::error::ErrorSeverity;
use invoice_lookup::utils::{logger, validation::Validate};
use invoice_lookup::web::{create_router, ApiState};
use invoice_lookup::{CliConfig, LookupEngine, TomlConfig};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting invoice-lookup");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config_file.clone() {
        Some(path) => {
            tracing::info!("📄 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli).await,
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ invoice-lookup failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

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

async fn run<C>(config: C) -> invoice_lookup::Result<()>
where
    C: ConfigProvider + Validate,
{
    // 驗證配置
    config.validate()?;

    let timeout = Duration::from_secs(config.request_timeout_secs());
    let extractor = HttpFieldExtractor::new(config.extractor_endpoint().to_string(), timeout);
    let crm = HttpCrmLookup::new(config.crm_endpoint().to_string(), timeout);

    if config.monitoring_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }
    let engine = LookupEngine::new_with_monitoring(extractor, crm, config.monitoring_enabled());

    let state = Arc::new(ApiState { engine });
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
