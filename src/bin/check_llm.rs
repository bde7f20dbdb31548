use bazi_engine::adapters::llm::{ChatCompletionClient, ChatMessage, CompletionOptions};
use bazi_engine::utils::error::BaziError;
use bazi_engine::utils::logger;
use bazi_engine::AppConfig;
use std::sync::Arc;

/// 檢查 LLM 金鑰與端點是否可用
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_tool_logger(false);

    println!("Testing LLM endpoint...\n");

    let config = AppConfig::from_env()?;
    let Some(api_key) = config.llm_api_key.as_deref() else {
        eprintln!("❌ DEEPSEEK_API_KEY not found");
        std::process::exit(1);
    };

    println!("✅ API key configured");
    println!("Prefix: {}...\n", api_key.chars().take(10).collect::<String>());

    let client = ChatCompletionClient::new(Arc::new(config.clone()))?;
    let messages = [ChatMessage::user("你好，请回复：测试成功")];

    match client.complete(&messages, CompletionOptions::default()).await {
        Ok(reply) => {
            println!("✅ API test succeeded!");
            println!("{} replied: {}", client.model(), reply);
            Ok(())
        }
        Err(BaziError::ApiStatusError { status, body }) => {
            eprintln!("❌ API test failed");
            eprintln!("Status: {}", status);
            eprintln!("Error: {}", body);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("❌ Request error: {}", e);
            std::process::exit(3);
        }
    }
}
