//! 命盤解讀：提示詞、回覆解析、固定備用內容與 DeepSeek 客戶端

pub mod deepseek;
pub mod fallback;
pub mod parser;
pub mod prompt;

pub use deepseek::{ChatCompletionClient, ChatMessage, CompletionOptions, LlmInterpreter};
pub use fallback::fallback_interpretation;
