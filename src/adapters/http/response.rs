use crate::core::service::{ChartReport, REQUIRED_FIELDS};
use crate::domain::model::{BaziChart, Interpretation};
use crate::utils::error::{BaziError, ErrorCategory};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

const MISSING_FIELDS: &str = "缺少必填参数";
const CALCULATION_FAILED: &str = "计算失败，请重试";
const INTERNAL_ERROR: &str = "服务器内部错误";
const NOT_FOUND: &str = "接口不存在";

/// 成功回應：`success`、`interpretation` 加上命盤各欄位
#[derive(Debug, Serialize)]
pub struct CalculateResponse<'a> {
    pub success: bool,
    #[serde(flatten)]
    pub chart: &'a BaziChart,
    pub interpretation: &'a Interpretation,
}

impl<'a> CalculateResponse<'a> {
    pub fn new(report: &'a ChartReport) -> Self {
        Self {
            success: true,
            chart: &report.chart,
            interpretation: &report.interpretation,
        }
    }
}

/// 錯誤回應。`message` 只在開發模式帶出
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<[&'static str; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn from_error(error: &BaziError, development: bool) -> Self {
        let detail = development.then(|| error.to_string());
        match error.category() {
            ErrorCategory::Validation => Self {
                status: StatusCode::BAD_REQUEST,
                error: MISSING_FIELDS,
                required: Some(REQUIRED_FIELDS),
                message: None,
            },
            ErrorCategory::Calculation => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: CALCULATION_FAILED,
                required: None,
                message: detail,
            },
            ErrorCategory::Interpretation
            | ErrorCategory::Configuration
            | ErrorCategory::System => Self::internal(error.to_string(), development),
        }
    }

    pub fn internal(detail: String, development: bool) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: INTERNAL_ERROR,
            required: None,
            message: development.then_some(detail),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: NOT_FOUND,
            required: None,
            message: None,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: String,
}

pub fn health_body() -> HealthBody {
    HealthBody {
        status: "ok",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_lists_required_fields() {
        let error = BaziError::MissingFieldsError {
            fields: vec!["birthTime"],
        };
        let response = ErrorResponse::from_error(&error, true);

        assert_eq!(StatusCode::BAD_REQUEST, response.status);
        assert_eq!(
            json!({"error": "缺少必填参数", "required": ["birthdate", "birthTime", "gender"]}),
            serde_json::to_value(&response).unwrap()
        );
    }

    #[test]
    fn test_detail_only_in_development() {
        let error = BaziError::InvalidDateError {
            input: "1990-13-01".to_string(),
            reason: "no such Gregorian date".to_string(),
        };

        let production = serde_json::to_value(ErrorResponse::from_error(&error, false)).unwrap();
        assert_eq!(json!({"error": "计算失败，请重试"}), production);

        let development = serde_json::to_value(ErrorResponse::from_error(&error, true)).unwrap();
        assert_eq!("计算失败，请重试", development["error"]);
        assert!(development["message"].as_str().unwrap().contains("1990-13-01"));
    }

    #[test]
    fn test_other_failures_are_internal() {
        let error = BaziError::ConfigError {
            message: "boom".to_string(),
        };
        let response = ErrorResponse::from_error(&error, false);
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status);
        assert_eq!("服务器内部错误", response.error);
        assert_eq!(None, response.message);
    }

    #[test]
    fn test_health_timestamp_is_rfc3339() {
        let body = health_body();
        assert_eq!("ok", body.status);
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }
}
