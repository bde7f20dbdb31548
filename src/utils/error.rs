use thiserror::Error;

#[derive(Error, Debug)]
pub enum BaziError {
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFieldsError { fields: Vec<&'static str> },

    #[error("Invalid date '{input}': {reason}")]
    InvalidDateError { input: String, reason: String },

    #[error("Year {year} is outside the supported range {min}..={max}")]
    YearOutOfRangeError { year: i32, min: i32, max: i32 },

    #[error("Lunar date {year}-{month:02}-{day:02} (leap month: {leap}) does not exist")]
    InvalidLunarDateError {
        year: i32,
        month: u32,
        day: u32,
        leap: bool,
    },

    #[error("Stem {stem} and branch {branch} do not form a sexagenary pair")]
    InvalidPillarError { stem: char, branch: char },

    #[error("LLM credential is not configured")]
    MissingCredentialError,

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("Malformed API response: {message}")]
    MalformedResponseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

/// 錯誤大類，HTTP 層依此決定狀態碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Calculation,
    Interpretation,
    Configuration,
    System,
}

impl BaziError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BaziError::MissingFieldsError { .. } => ErrorCategory::Validation,
            BaziError::InvalidDateError { .. }
            | BaziError::YearOutOfRangeError { .. }
            | BaziError::InvalidLunarDateError { .. }
            | BaziError::InvalidPillarError { .. } => ErrorCategory::Calculation,
            BaziError::MissingCredentialError
            | BaziError::ApiError(_)
            | BaziError::ApiStatusError { .. }
            | BaziError::MalformedResponseError { .. } => ErrorCategory::Interpretation,
            BaziError::ConfigError { .. }
            | BaziError::InvalidConfigValueError { .. }
            | BaziError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            BaziError::IoError(_) => ErrorCategory::System,
        }
    }
}

pub type Result<T> = std::result::Result<T, BaziError>;
