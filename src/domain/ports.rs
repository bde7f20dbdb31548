use crate::domain::model::{BaziChart, CalendarDay, Gender, Interpretation, LunarDate, SolarTermInfo};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// 農曆換算元件：給出某日的公曆／農曆對照與年、月、日三柱。
///
/// 時柱不由此元件提供，見 [`crate::core::pillars`]。
pub trait LunisolarCalendar: Send + Sync {
    fn from_solar(&self, date: NaiveDate) -> Result<CalendarDay>;
    fn from_lunar(&self, date: LunarDate) -> Result<CalendarDay>;
    fn solar_terms(&self, date: NaiveDate) -> Result<SolarTermInfo>;
}

/// 命盤解讀。實作必須自行處理失敗，總是返回可展示的內容。
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, chart: &BaziChart, gender: Gender) -> Interpretation;
}
