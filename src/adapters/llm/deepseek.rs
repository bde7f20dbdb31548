use crate::adapters::llm::fallback::fallback_interpretation;
use crate::adapters::llm::parser::parse_interpretation;
use crate::adapters::llm::prompt::{build_user_prompt, SYSTEM_PROMPT};
use crate::config::AppConfig;
use crate::domain::model::{BaziChart, Gender, Interpretation};
use crate::domain::ports::Interpreter;
use crate::utils::error::{BaziError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// 取樣參數；留空時由服務端決定
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionOptions {
    /// 解讀固定使用的參數
    pub fn interpretation() -> Self {
        Self {
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// OpenAI 相容的 chat completions 端點（DeepSeek）
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    config: Arc<AppConfig>,
}

impl ChatCompletionClient {
    pub fn new(config: Arc<AppConfig>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.llm_model
    }

    /// 單次請求，不重試
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<String> {
        let api_key = self
            .config
            .llm_api_key
            .as_deref()
            .ok_or(BaziError::MissingCredentialError)?;

        let body = ChatCompletionRequest {
            model: &self.config.llm_model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        tracing::debug!("Making chat completion request to: {}", self.config.llm_api_url);
        let response = self
            .client
            .post(&self.config.llm_api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let text = response.text().await?;

        if !status.is_success() {
            return Err(BaziError::ApiStatusError {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| BaziError::MalformedResponseError {
                message: format!("{}: {}", e, text),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| BaziError::MalformedResponseError {
                message: format!("no choices in response: {}", text),
            })
    }
}

/// 呼叫模型解讀命盤；任何失敗都換成固定解讀，不往上拋
#[derive(Debug, Clone)]
pub struct LlmInterpreter {
    client: ChatCompletionClient,
}

impl LlmInterpreter {
    pub fn new(client: ChatCompletionClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: Arc<AppConfig>) -> Result<Self> {
        Ok(Self::new(ChatCompletionClient::new(config)?))
    }

    async fn request(&self, chart: &BaziChart, gender: Gender) -> Result<Interpretation> {
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_prompt(chart, gender)),
        ];
        let text = self
            .client
            .complete(&messages, CompletionOptions::interpretation())
            .await?;
        Ok(parse_interpretation(&text))
    }
}

#[async_trait]
impl Interpreter for LlmInterpreter {
    async fn interpret(&self, chart: &BaziChart, gender: Gender) -> Interpretation {
        if !self.client.config.has_llm_credential() {
            tracing::warn!("⚠️ LLM credential not configured, using fallback interpretation");
            return fallback_interpretation();
        }

        tracing::info!("🤖 Requesting interpretation from {}", self.client.model());
        match self.request(chart, gender).await {
            Ok(interpretation) => {
                tracing::info!("✅ Interpretation received");
                interpretation
            }
            Err(e) => {
                tracing::error!("❌ Interpretation failed: {}", e);
                tracing::info!("📝 Using fallback interpretation");
                fallback_interpretation()
            }
        }
    }
}
