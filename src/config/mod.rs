#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{BaziError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LLM_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "deepseek-chat";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5500";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// 只有 `development` 視為開發模式，其餘一律按正式環境
    pub fn from_label(label: &str) -> Self {
        if label == "development" {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// 進程級配置，啟動時建立一次，之後以 `Arc<AppConfig>` 共享、不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm_api_key: Option<String>,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub frontend_url: String,
    pub port: u16,
    pub environment: Environment,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::default(),
        }
    }
}

impl AppConfig {
    /// 預設值 + 環境變數
    pub fn from_env() -> Result<Self> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// 配置檔（可選）+ 環境變數
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let base = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BaziError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，支援 ${VAR} 環境變數替換
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed).map_err(|e| BaziError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(config.normalized())
    }

    /// 替換環境變數 (例如 ${DEEPSEEK_API_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BaziError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 以環境變數覆蓋。`lookup` 抽出來是為了測試時不必改動真實環境
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("DEEPSEEK_API_KEY") {
            self.llm_api_key = Some(key);
        }
        if let Some(url) = get("DEEPSEEK_API_URL") {
            self.llm_api_url = url;
        }
        if let Some(model) = get("DEEPSEEK_MODEL") {
            self.llm_model = model;
        }
        if let Some(url) = get("FRONTEND_URL") {
            self.frontend_url = url;
        }
        if let Some(port) = get("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| BaziError::InvalidConfigValueError {
                    field: "PORT".to_string(),
                    value: port.clone(),
                    reason: "Port must be an integer between 1 and 65535".to_string(),
                })?;
        }
        if let Some(env) = get("APP_ENV").or_else(|| get("NODE_ENV")) {
            self.environment = Environment::from_label(&env);
        }

        Ok(self.normalized())
    }

    /// 空白或未被替換的 ${...} 金鑰視為未設定
    fn normalized(mut self) -> Self {
        self.llm_api_key = self
            .llm_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && !key.starts_with("${"));
        self
    }

    pub fn has_llm_credential(&self) -> bool {
        self.llm_api_key.is_some()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("llm_api_url", &self.llm_api_url)?;
        validate_non_empty_string("llm_model", &self.llm_model)?;
        validate_range("llm_timeout_secs", self.llm_timeout_secs, 1, 600)?;
        validate_url("frontend_url", &self.frontend_url)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        Ok(())
    }
}
