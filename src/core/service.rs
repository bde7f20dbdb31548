use crate::core::pillars::PillarEngine;
use crate::domain::model::{BaziChart, BirthRequest, CalendarKind, Gender, Interpretation};
use crate::domain::ports::{Interpreter, LunisolarCalendar};
use crate::utils::error::{BaziError, Result};
use crate::utils::validation::missing_fields;
use serde::Deserialize;

/// 缺少任一時在錯誤回應中列出的完整必填清單
pub const REQUIRED_FIELDS: [&str; 3] = ["birthdate", "birthTime", "gender"];

/// `POST /api/calculate` 的請求體，欄位都可缺省，由 [`CalculateRequest::validate`] 檢查
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub birthdate: Option<String>,
    pub calendar_type: Option<String>,
    pub birth_time: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub is_leap_month: Option<bool>,
}

impl CalculateRequest {
    pub fn validate(self) -> Result<BirthRequest> {
        let missing = missing_fields(&[
            ("birthdate", self.birthdate.as_deref()),
            ("birthTime", self.birth_time.as_deref()),
            ("gender", self.gender.as_deref()),
        ]);

        match (self.birthdate, self.birth_time, self.gender) {
            (Some(birthdate), Some(birth_time), Some(gender)) if missing.is_empty() => {
                Ok(BirthRequest {
                    birthdate: birthdate.trim().to_string(),
                    calendar: CalendarKind::from_label(self.calendar_type.as_deref()),
                    leap_month: self.is_leap_month.unwrap_or(false),
                    birth_time,
                    gender: Gender::from_label(&gender),
                    city: self.city.filter(|c| !c.trim().is_empty()),
                })
            }
            _ => Err(BaziError::MissingFieldsError { fields: missing }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartReport {
    pub chart: BaziChart,
    pub interpretation: Interpretation,
}

/// 驗證 → 排盤 → 解讀。不保存跨請求的可變狀態
pub struct BaziService<C: LunisolarCalendar, I: Interpreter> {
    engine: PillarEngine<C>,
    interpreter: I,
}

impl<C: LunisolarCalendar, I: Interpreter> BaziService<C, I> {
    pub fn new(calendar: C, interpreter: I) -> Self {
        Self {
            engine: PillarEngine::new(calendar),
            interpreter,
        }
    }

    pub async fn calculate(&self, request: CalculateRequest) -> Result<ChartReport> {
        let birth = request.validate()?;
        tracing::info!(
            "📥 Received request: {} ({:?}) {} {:?}",
            birth.birthdate,
            birth.calendar,
            birth.birth_time,
            birth.gender
        );

        let chart = self.engine.calculate(&birth)?;
        tracing::info!("✅ Chart calculated: {}", chart.pillars);

        let interpretation = self.interpreter.interpret(&chart, birth.gender).await;
        tracing::info!("✅ Interpretation ready");

        Ok(ChartReport {
            chart,
            interpretation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::calendar::AstronomicalCalendar;
    use crate::adapters::llm::fallback_interpretation;
    use crate::domain::model::{CalendarDay, LunarDate, SolarTermInfo};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct CountingCalendar {
        inner: AstronomicalCalendar,
        calls: Arc<AtomicUsize>,
    }

    impl LunisolarCalendar for CountingCalendar {
        fn from_solar(&self, date: NaiveDate) -> Result<CalendarDay> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.from_solar(date)
        }

        fn from_lunar(&self, date: LunarDate) -> Result<CalendarDay> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.from_lunar(date)
        }

        fn solar_terms(&self, date: NaiveDate) -> Result<SolarTermInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.solar_terms(date)
        }
    }

    #[derive(Clone, Default)]
    struct CountingInterpreter {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Interpreter for CountingInterpreter {
        async fn interpret(&self, _chart: &BaziChart, _gender: Gender) -> Interpretation {
            self.calls.fetch_add(1, Ordering::SeqCst);
            fallback_interpretation()
        }
    }

    fn full_request() -> CalculateRequest {
        CalculateRequest {
            birthdate: Some("1990-01-01".to_string()),
            calendar_type: Some("solar".to_string()),
            birth_time: Some("11-13".to_string()),
            gender: Some("male".to_string()),
            city: Some("上海".to_string()),
            is_leap_month: None,
        }
    }

    #[test]
    fn test_validate_defaults() {
        let birth = CalculateRequest {
            calendar_type: None,
            city: Some("  ".to_string()),
            ..full_request()
        }
        .validate()
        .unwrap();

        assert_eq!(CalendarKind::Solar, birth.calendar);
        assert_eq!(Gender::Male, birth.gender);
        assert!(!birth.leap_month);
        assert_eq!(None, birth.city);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let err = CalculateRequest {
            birth_time: None,
            gender: Some("".to_string()),
            ..full_request()
        }
        .validate()
        .unwrap_err();

        match err {
            BaziError::MissingFieldsError { fields } => {
                assert_eq!(vec!["birthTime", "gender"], fields)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_calculate_runs_engine_and_interpreter() {
        let calendar = CountingCalendar::default();
        let interpreter = CountingInterpreter::default();
        let service = BaziService::new(calendar.clone(), interpreter.clone());

        let report = service.calculate(full_request()).await.unwrap();

        assert_eq!("己巳 丙子 丙寅 甲午", report.chart.pillars.to_string());
        assert!(report.interpretation.is_complete());
        assert!(calendar.calls.load(Ordering::SeqCst) > 0);
        assert_eq!(1, interpreter.calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_missing_birth_time_touches_no_collaborator() {
        let calendar = CountingCalendar::default();
        let interpreter = CountingInterpreter::default();
        let service = BaziService::new(calendar.clone(), interpreter.clone());

        let result = service
            .calculate(CalculateRequest {
                birth_time: None,
                ..full_request()
            })
            .await;

        assert!(matches!(result, Err(BaziError::MissingFieldsError { .. })));
        assert_eq!(0, calendar.calls.load(Ordering::SeqCst));
        assert_eq!(0, interpreter.calls.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_calculation_failure_skips_interpreter() {
        let interpreter = CountingInterpreter::default();
        let service = BaziService::new(AstronomicalCalendar::new(), interpreter.clone());

        let result = service
            .calculate(CalculateRequest {
                birthdate: Some("not-a-date".to_string()),
                ..full_request()
            })
            .await;

        assert!(matches!(result, Err(BaziError::InvalidDateError { .. })));
        assert_eq!(0, interpreter.calls.load(Ordering::SeqCst));
    }
}
