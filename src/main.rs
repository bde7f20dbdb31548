use bazi_engine::adapters::http;
use bazi_engine::utils::{logger, validation::Validate};
use bazi_engine::{AstronomicalCalendar, BaziService, CliArgs, LlmInterpreter};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.environment, args.verbose);

    tracing::info!("Starting bazi-server");
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    if !config.has_llm_credential() {
        tracing::warn!("⚠️ DEEPSEEK_API_KEY not set, interpretations will use fallback text");
    }

    let config = Arc::new(config);
    let interpreter = LlmInterpreter::from_config(Arc::clone(&config))?;
    let service = Arc::new(BaziService::new(AstronomicalCalendar::new(), interpreter));
    let app = http::router(service, Arc::clone(&config))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("✅ Server listening on http://localhost:{}", config.port);
    tracing::info!("🔧 Health check: http://localhost:{}/health", config.port);
    tracing::info!("🎯 API: http://localhost:{}/api/calculate", config.port);

    http::serve(listener, app).await?;
    Ok(())
}
