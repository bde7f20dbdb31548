use crate::domain::model::{
    BaziChart, BirthInfo, Branch, CalendarKind, ElementTally, FourPillars, Gender, LunarDate,
    Pillar, SolarTerm, SolarTermInfo, Stem, TermDate,
};
use chrono::NaiveDate;

fn pillar(name: &str) -> Pillar {
    let mut chars = name.chars();
    let stem = Stem::from_char(chars.next().unwrap()).unwrap();
    let branch = Branch::from_char(chars.next().unwrap()).unwrap();
    Pillar::from_pair(stem, branch).unwrap()
}

/// 1990-01-01 午時男命
pub fn sample_chart() -> BaziChart {
    let pillars = FourPillars {
        year: pillar("己巳"),
        month: pillar("丙子"),
        day: pillar("丙寅"),
        hour: pillar("甲午"),
    };
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

    BaziChart {
        pillars,
        elements: ElementTally::from_pillars(&pillars),
        day_master: pillars.day_master(),
        gender: Gender::Male,
        lunar: LunarDate::new(1989, 12, 5, false),
        solar: date(1990, 1, 1),
        solar_terms: SolarTermInfo {
            previous: TermDate {
                term: SolarTerm::from_longitude(270.0),
                date: date(1989, 12, 22),
            },
            current: None,
            next: TermDate {
                term: SolarTerm::from_longitude(285.0),
                date: date(1990, 1, 5),
            },
        },
        birth_info: BirthInfo {
            date: "1990-01-01".to_string(),
            calendar_type: CalendarKind::Solar,
            time: "11-13".to_string(),
            city: None,
        },
    }
}
