use crate::config::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("bazi_engine=debug,tower_http=debug,info")
        } else {
            EnvFilter::new("bazi_engine=info,warn")
        }
    })
}

/// 開發模式輸出精簡文字，正式環境輸出 JSON 方便日誌平台收集
pub fn init_logger(environment: Environment, verbose: bool) {
    let registry = tracing_subscriber::registry().with(default_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match environment {
        Environment::Development => registry.with(layer.compact()).init(),
        Environment::Production => registry.with(layer.json()).init(),
    }
}

/// 給輔助工具用，只輸出到 stderr，不影響 stdout 上的結果
pub fn init_tool_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
