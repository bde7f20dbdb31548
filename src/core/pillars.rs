use crate::core::time_block::TimeBlock;
use crate::domain::model::{
    BaziChart, BirthInfo, BirthRequest, Branch, CalendarDay, CalendarKind, ElementTally,
    FourPillars, LunarDate, Pillar, Stem,
};
use crate::domain::ports::LunisolarCalendar;
use crate::utils::error::{BaziError, Result};
use chrono::NaiveDate;

/// 五鼠遁：日干決定子時的時干起點
///
/// 甲己還加甲，乙庚丙作初，丙辛從戊起，丁壬庚子居，戊癸何方發，壬子是真途。
const HOUR_STEM_OFFSETS: [u8; 10] = [0, 2, 4, 6, 8, 0, 2, 4, 6, 8];

/// 時干 = (日干起點 + 時支序號) mod 10
pub fn hour_stem(day_stem: Stem, hour_branch: Branch) -> Stem {
    Stem::new(HOUR_STEM_OFFSETS[day_stem.index() as usize] + hour_branch.index())
}

pub fn hour_pillar(day_stem: Stem, hour_branch: Branch) -> Result<Pillar> {
    Pillar::from_pair(hour_stem(day_stem, hour_branch), hour_branch)
}

/// 拆出 y-m-d 三個數字，接受 `-` 或 `/` 分隔，忽略 `T` 或空白之後的時間部分
fn split_ymd(input: &str) -> Result<(i32, u32, u32)> {
    let invalid = |reason: &str| BaziError::InvalidDateError {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let date_part = input
        .trim()
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    let parts: Vec<&str> = date_part.split(['-', '/']).collect();
    if parts.len() != 3 {
        return Err(invalid("expected YYYY-MM-DD"));
    }

    let year = parts[0].parse().map_err(|_| invalid("year is not a number"))?;
    let month = parts[1].parse().map_err(|_| invalid("month is not a number"))?;
    let day = parts[2].parse().map_err(|_| invalid("day is not a number"))?;
    Ok((year, month, day))
}

pub fn parse_solar_date(input: &str) -> Result<NaiveDate> {
    let (year, month, day) = split_ymd(input)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| BaziError::InvalidDateError {
        input: input.to_string(),
        reason: "no such Gregorian date".to_string(),
    })
}

/// 農曆日期不經公曆校驗（三十日在公曆中可能不存在），合法性由曆法元件判斷
pub fn parse_lunar_date(input: &str, leap: bool) -> Result<LunarDate> {
    let (year, month, day) = split_ymd(input)?;
    Ok(LunarDate::new(year, month, day, leap))
}

/// 排盤引擎：年月日三柱取自曆法元件，時柱在本地推算
#[derive(Debug, Clone, Default)]
pub struct PillarEngine<C: LunisolarCalendar> {
    calendar: C,
}

impl<C: LunisolarCalendar> PillarEngine<C> {
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }

    /// 統一成同一日的公曆與農曆對照
    pub fn normalize(&self, request: &BirthRequest) -> Result<CalendarDay> {
        match request.calendar {
            CalendarKind::Solar => {
                let date = parse_solar_date(&request.birthdate)?;
                self.calendar.from_solar(date)
            }
            CalendarKind::Lunar => {
                let lunar = parse_lunar_date(&request.birthdate, request.leap_month)?;
                let day = self.calendar.from_lunar(lunar)?;
                tracing::debug!("🔄 Lunar {} is solar {}", lunar, day.solar);
                Ok(day)
            }
        }
    }

    pub fn calculate(&self, request: &BirthRequest) -> Result<BaziChart> {
        let day = self.normalize(request)?;
        let block = TimeBlock::resolve_or_first(&request.birth_time);
        tracing::debug!(
            "📅 Calculating chart for {} {} ({:?})",
            day.solar,
            block,
            request.calendar
        );

        let day_pillar = Pillar::from_cycle(day.day);
        let pillars = FourPillars {
            year: Pillar::from_cycle(day.year),
            month: Pillar::from_cycle(day.month),
            day: day_pillar,
            hour: hour_pillar(day_pillar.stem(), block.branch())?,
        };
        let elements = ElementTally::from_pillars(&pillars);
        let solar_terms = self.calendar.solar_terms(day.solar)?;

        Ok(BaziChart {
            pillars,
            elements,
            day_master: pillars.day_master(),
            gender: request.gender,
            lunar: day.lunar,
            solar: day.solar,
            solar_terms,
            birth_info: BirthInfo {
                date: request.birthdate.clone(),
                calendar_type: request.calendar,
                time: request.birth_time.clone(),
                city: request.city.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::calendar::AstronomicalCalendar;
    use crate::domain::model::{Element, Gender, Sexagenary};

    fn request(birthdate: &str, calendar: CalendarKind, birth_time: &str) -> BirthRequest {
        BirthRequest {
            birthdate: birthdate.to_string(),
            calendar,
            leap_month: false,
            birth_time: birth_time.to_string(),
            gender: Gender::Male,
            city: Some("北京".to_string()),
        }
    }

    #[test]
    fn test_hour_stem_table() {
        // 每行：日干，子..亥 十二時的時干
        let table = [
            ('甲', "甲乙丙丁戊己庚辛壬癸甲乙"),
            ('乙', "丙丁戊己庚辛壬癸甲乙丙丁"),
            ('丙', "戊己庚辛壬癸甲乙丙丁戊己"),
            ('丁', "庚辛壬癸甲乙丙丁戊己庚辛"),
            ('戊', "壬癸甲乙丙丁戊己庚辛壬癸"),
            ('己', "甲乙丙丁戊己庚辛壬癸甲乙"),
            ('庚', "丙丁戊己庚辛壬癸甲乙丙丁"),
            ('辛', "戊己庚辛壬癸甲乙丙丁戊己"),
            ('壬', "庚辛壬癸甲乙丙丁戊己庚辛"),
            ('癸', "壬癸甲乙丙丁戊己庚辛壬癸"),
        ];
        for (day, row) in table {
            let day_stem = Stem::from_char(day).unwrap();
            let derived: String = Branch::all()
                .map(|branch| hour_stem(day_stem, branch).name())
                .collect();
            assert_eq!(row, derived, "day stem {}", day);
        }
    }

    #[test]
    fn test_hour_pillar_is_total() {
        for day_stem in Stem::all() {
            for block in TimeBlock::all() {
                let pillar = hour_pillar(day_stem, block.branch()).unwrap();
                assert_eq!(block.branch(), pillar.branch());
                assert!(Sexagenary::from_pair(pillar.stem(), pillar.branch()).is_some());
            }
        }
    }

    #[test]
    fn test_date_parsing() {
        assert_eq!(
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            parse_solar_date("1990-01-01").unwrap()
        );
        assert_eq!(
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            parse_solar_date("1990/1/1").unwrap()
        );
        assert_eq!(
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            parse_solar_date("1990-01-01T00:00:00.000Z").unwrap()
        );
        assert!(parse_solar_date("1990-02-30").is_err());
        assert!(parse_solar_date("yesterday").is_err());
        // 農曆三十日不做公曆校驗
        assert_eq!(
            LunarDate::new(2017, 2, 30, false),
            parse_lunar_date("2017-02-30", false).unwrap()
        );
    }

    #[test]
    fn test_1990_01_01_noon() {
        let engine = PillarEngine::new(AstronomicalCalendar::new());
        let chart = engine
            .calculate(&request("1990-01-01", CalendarKind::Solar, "11-13"))
            .unwrap();

        assert_eq!("己巳 丙子 丙寅 甲午", chart.pillars.to_string());
        assert_eq!('丙', chart.day_master.name());
        assert_eq!(8, chart.elements.total());
        assert_eq!(4, chart.elements.get(Element::Fire));
        assert_eq!(LunarDate::new(1989, 12, 5, false), chart.lunar);
        assert_eq!(Some("北京".to_string()), chart.birth_info.city);
        assert_eq!("冬至", chart.solar_terms.previous.term.name());
    }

    #[test]
    fn test_lunar_input_matches_solar_input() {
        let engine = PillarEngine::new(AstronomicalCalendar::new());
        let solar = engine
            .calculate(&request("1990-01-01", CalendarKind::Solar, "11-13"))
            .unwrap();
        let lunar = engine
            .calculate(&request("1989-12-05", CalendarKind::Lunar, "11-13"))
            .unwrap();

        assert_eq!(solar.pillars, lunar.pillars);
        assert_eq!(solar.solar, lunar.solar);
        assert_eq!(solar.lunar, lunar.lunar);
    }

    #[test]
    fn test_unknown_time_block_uses_zi_hour() {
        let engine = PillarEngine::new(AstronomicalCalendar::new());
        let chart = engine
            .calculate(&request("1990-01-01", CalendarKind::Solar, "bogus"))
            .unwrap();
        // 丙日子時起戊子
        assert_eq!("戊子", chart.pillars.hour.to_string());
    }

    #[test]
    fn test_invalid_dates_fail() {
        let engine = PillarEngine::new(AstronomicalCalendar::new());
        assert!(matches!(
            engine.calculate(&request("1990-13-01", CalendarKind::Solar, "11-13")),
            Err(BaziError::InvalidDateError { .. })
        ));
        assert!(matches!(
            engine.calculate(&request("1850-01-01", CalendarKind::Solar, "11-13")),
            Err(BaziError::YearOutOfRangeError { .. })
        ));

        let mut leap = request("2017-05-01", CalendarKind::Lunar, "11-13");
        leap.leap_month = true;
        assert!(matches!(
            engine.calculate(&leap),
            Err(BaziError::InvalidLunarDateError { .. })
        ));
    }
}
