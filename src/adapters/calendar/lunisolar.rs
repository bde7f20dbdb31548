//! 以「歲」（冬至到冬至）為單位排農曆月
//!
//! 含冬至之月為十一月；兩冬至間若有十三個朔，則置一閏月，取冬至後第一個不含中氣的月。

use super::astro::{self, Tt};
use crate::domain::model::LunarDate;

/// 月名，`Leap(n)` 為閏 n 月
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    pub fn num(&self) -> u32 {
        match self {
            Month::Common(n) | Month::Leap(n) => *n,
        }
    }

    pub fn is_leap(&self) -> bool {
        matches!(self, Month::Leap(_))
    }
}

/// 月首：月名與朔日（北京時間儒略日數）
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    pub month: Month,
    pub jdn: i64,
}

#[derive(Debug, Clone)]
pub struct Annus {
    /// 該歲大部分時段所在的公元年
    pub annus: i32,
    /// 全部月首，最後一項是次歲十一月，只用來標記本歲末日
    pub months: Vec<NewMoon>,
}

impl Annus {
    pub fn new(annus: i32) -> Self {
        let solstice = astro::winter_solstice(annus - 1);
        let solstice_day = solstice.cst_jdn();
        let next_solstice_day = astro::winter_solstice(annus).cst_jdn();

        // 冬至起的十三個中氣，末項即次歲冬至
        let principal_days: Vec<i64> = (0..=12)
            .map(|i| {
                let target = (270.0 + 30.0 * i as f64) % 360.0;
                let guess = Tt(solstice.0 + i as f64 * astro::SYNODIC_MONTH * 1.03);
                astro::sun_longitude_crossing(target, guess).cst_jdn()
            })
            .collect();

        let first = astro::lunation_before(solstice) - 2;
        let new_moon_days: Vec<i64> = (first..first + 18)
            .map(|k| astro::new_moon(k).cst_jdn())
            .collect();

        let m11 = new_moon_days.partition_point(|&day| day <= solstice_day) - 1;
        let m11_next = new_moon_days.partition_point(|&day| day <= next_solstice_day) - 1;
        let mut needs_leap = m11_next - m11 == 13;

        let mut months = Vec::with_capacity(m11_next - m11 + 1);
        let mut month = 10;
        let mut term = 0;
        for i in m11..=m11_next {
            if needs_leap && new_moon_days[i + 1] <= principal_days[term] {
                months.push(NewMoon {
                    month: Month::Leap(month),
                    jdn: new_moon_days[i],
                });
                needs_leap = false;
                continue;
            }
            month = month % 12 + 1;
            months.push(NewMoon {
                month: Month::Common(month),
                jdn: new_moon_days[i],
            });
            term += 1;
        }

        Annus { annus, months }
    }

    /// 找出包含 `jdn` 的歲
    pub fn containing(jdn: i64, gregorian_year: i32) -> Self {
        let mut year = gregorian_year;
        loop {
            let annus = Self::new(year);
            if jdn < annus.first_day() {
                year -= 1;
            } else if jdn >= annus.end_day() {
                year += 1;
            } else {
                return annus;
            }
        }
    }

    pub fn first_day(&self) -> i64 {
        self.months.first().map_or(i64::MAX, |m| m.jdn)
    }

    /// 次歲首日（不屬本歲）
    pub fn end_day(&self) -> i64 {
        self.months.last().map_or(i64::MIN, |m| m.jdn)
    }

    /// 本歲中某日的農曆年月日；不在本歲時返回 `None`
    pub fn lunar_date(&self, jdn: i64) -> Option<LunarDate> {
        if jdn < self.first_day() || jdn >= self.end_day() {
            return None;
        }
        let start = self.months.iter().take_while(|m| m.jdn <= jdn).last()?;
        let day = (jdn - start.jdn + 1) as u32;
        let year = if start.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Some(LunarDate::new(
            year,
            start.month.num(),
            day,
            start.month.is_leap(),
        ))
    }

    /// 農曆日期對應的儒略日數；該月不存在或日數超出月長時返回 `None`
    pub fn day_of(&self, date: LunarDate) -> Option<i64> {
        let target = if date.leap {
            Month::Leap(date.month)
        } else {
            Month::Common(date.month)
        };
        let idx = self.months[..self.months.len().saturating_sub(1)]
            .iter()
            .position(|m| m.month == target)?;
        let start = self.months[idx].jdn;
        let length = self.months[idx + 1].jdn - start;
        if date.day == 0 || date.day as i64 > length {
            return None;
        }
        Some(start + date.day as i64 - 1)
    }

    /// 該農曆年月所在的歲：十一、十二月屬下一歲
    pub fn for_lunar_month(year: i32, month: u32) -> Self {
        if month >= 11 {
            Self::new(year + 1)
        } else {
            Self::new(year)
        }
    }
}
