//! 農曆換算元件的天文實作
//!
//! 年柱以立春、月柱以各「節」為界，日柱按儒略日數循環，都以北京時間該日 00:00 為準。

pub mod astro;
pub mod lunisolar;
pub mod nutation;
pub mod vsop87;

use crate::domain::model::{
    Branch, CalendarDay, LunarDate, Sexagenary, SolarTerm, SolarTermInfo, Stem, TermDate,
};
use crate::domain::ports::LunisolarCalendar;
use crate::utils::error::{BaziError, Result};
use astro::{Tt, Ut};
use chrono::{Datelike, NaiveDate};
use lunisolar::Annus;
use std::ops::RangeInclusive;

/// 公元 1 年 1 月 1 日前一日的儒略日數
const JDN_CE_OFFSET: i64 = 1_721_425;
/// 立春的太陽黃經
const SPRING_BEGINS: f64 = 315.0;
const DAYS_PER_DEGREE: f64 = 365.242_189 / 360.0;

pub fn jdn_from_date(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 + JDN_CE_OFFSET
}

pub fn date_from_jdn(jdn: i64) -> Result<NaiveDate> {
    i32::try_from(jdn - JDN_CE_OFFSET)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| BaziError::InvalidDateError {
            input: format!("JDN {}", jdn),
            reason: "not representable as a calendar date".to_string(),
        })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalCalendar;

impl AstronomicalCalendar {
    pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1900..=2100;

    pub fn new() -> Self {
        Self
    }

    fn check_year(year: i32) -> Result<()> {
        if Self::SUPPORTED_YEARS.contains(&year) {
            Ok(())
        } else {
            Err(Self::out_of_range(year))
        }
    }

    fn out_of_range(year: i32) -> BaziError {
        BaziError::YearOutOfRangeError {
            year,
            min: *Self::SUPPORTED_YEARS.start(),
            max: *Self::SUPPORTED_YEARS.end(),
        }
    }

    pub fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate> {
        self.from_solar(date).map(|day| day.lunar)
    }

    pub fn lunar_to_solar(&self, date: LunarDate) -> Result<NaiveDate> {
        self.from_lunar(date).map(|day| day.solar)
    }

    fn day_for_jdn(&self, jdn: i64) -> Result<CalendarDay> {
        let solar = date_from_jdn(jdn)?;
        let lunar = Annus::containing(jdn, solar.year())
            .lunar_date(jdn)
            .ok_or_else(|| BaziError::InvalidDateError {
                input: solar.to_string(),
                reason: "no lunar month covers this date".to_string(),
            })?;
        let (year, month) = year_and_month_cycles(jdn, solar)?;

        Ok(CalendarDay {
            solar,
            lunar,
            year,
            month,
            day: day_cycle(jdn),
        })
    }
}

impl LunisolarCalendar for AstronomicalCalendar {
    fn from_solar(&self, date: NaiveDate) -> Result<CalendarDay> {
        Self::check_year(date.year())?;
        self.day_for_jdn(jdn_from_date(date))
    }

    fn from_lunar(&self, date: LunarDate) -> Result<CalendarDay> {
        // 範圍以換算後的公曆日期為準；農曆年最多比公曆年早一年
        let earliest = *Self::SUPPORTED_YEARS.start() - 1;
        if !(earliest..=*Self::SUPPORTED_YEARS.end()).contains(&date.year) {
            return Err(Self::out_of_range(date.year));
        }
        let invalid = || BaziError::InvalidLunarDateError {
            year: date.year,
            month: date.month,
            day: date.day,
            leap: date.leap,
        };
        if !(1..=12).contains(&date.month) {
            return Err(invalid());
        }
        let jdn = Annus::for_lunar_month(date.year, date.month)
            .day_of(date)
            .ok_or_else(invalid)?;
        Self::check_year(date_from_jdn(jdn)?.year())?;
        self.day_for_jdn(jdn)
    }

    fn solar_terms(&self, date: NaiveDate) -> Result<SolarTermInfo> {
        Self::check_year(date.year())?;
        solar_terms_around(jdn_from_date(date))
    }
}

/// 日柱：儒略日數 + 49 對 60 取餘，0 為甲子
pub fn day_cycle(jdn: i64) -> Sexagenary {
    Sexagenary::new((jdn + 49).rem_euclid(60) as u8)
}

/// 年柱與月柱。當日 00:00 的太陽黃經決定自立春起第幾個節月，一、二月未過立春者屬上一年。
fn year_and_month_cycles(jdn: i64, solar: NaiveDate) -> Result<(Sexagenary, Sexagenary)> {
    let lambda = astro::sun_apparent_longitude(Ut::cst_midnight(jdn).to_tt());
    let months_since_spring = ((lambda - SPRING_BEGINS).rem_euclid(360.0) / 30.0).floor() as u8;

    let year = if solar.month() <= 2 && months_since_spring >= 10 {
        solar.year() - 1
    } else {
        solar.year()
    };
    let year_cycle = Sexagenary::new((year - 4).rem_euclid(60) as u8);

    // 五虎遁：甲己之年丙作首，乙庚之歲戊為頭……
    let first_month_stem = (year_cycle.stem().index() % 5) * 2 + 2;
    let stem = Stem::new(first_month_stem + months_since_spring);
    let branch = Branch::new(2 + months_since_spring);
    let month_cycle =
        Sexagenary::from_pair(stem, branch).ok_or(BaziError::InvalidPillarError {
            stem: stem.name(),
            branch: branch.name(),
        })?;

    Ok((year_cycle, month_cycle))
}

fn term_date(term: SolarTerm, at: Tt) -> Result<TermDate> {
    Ok(TermDate {
        term,
        date: date_from_jdn(at.cst_jdn())?,
    })
}

fn crossing_after(term: SolarTerm, from: Tt, lambda: f64) -> Tt {
    let ahead = (term.longitude() - lambda).rem_euclid(360.0);
    astro::sun_longitude_crossing(term.longitude(), Tt(from.0 + ahead * DAYS_PER_DEGREE))
}

fn solar_terms_around(jdn: i64) -> Result<SolarTermInfo> {
    let midnight = Ut::cst_midnight(jdn).to_tt();
    let lambda = astro::sun_apparent_longitude(midnight);

    let previous = SolarTerm::from_longitude(lambda);
    let previous_at = astro::sun_longitude_crossing(
        previous.longitude(),
        Tt(midnight.0 - (lambda - previous.longitude()) * DAYS_PER_DEGREE),
    );
    let next = previous.next();
    let next_at = crossing_after(next, midnight, lambda);

    if next_at.cst_jdn() == jdn {
        let following = next.next();
        let following_at = crossing_after(following, next_at, next.longitude());
        return Ok(SolarTermInfo {
            previous: term_date(next, next_at)?,
            current: Some(next),
            next: term_date(following, following_at)?,
        });
    }

    let current = (previous_at.cst_jdn() == jdn).then_some(previous);
    Ok(SolarTermInfo {
        previous: term_date(previous, previous_at)?,
        current,
        next: term_date(next, next_at)?,
    })
}
