use crate::domain::fmt;
use crate::domain::nayin::Nayin;
use crate::utils::error::{BaziError, Result};
use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// 五行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// 天干，序號 0..10 循環
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stem(u8);

impl Stem {
    pub const COUNT: u8 = 10;
    const NAMES: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

    pub fn new(index: u8) -> Self {
        Self(index % Self::COUNT)
    }

    pub fn all() -> impl Iterator<Item = Stem> {
        (0..Self::COUNT).map(Stem)
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::NAMES.iter().position(|&n| n == c).map(|i| Self(i as u8))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> char {
        Self::NAMES[self.0 as usize]
    }

    /// 甲乙木、丙丁火、戊己土、庚辛金、壬癸水
    pub fn element(self) -> Element {
        Element::ALL[(self.0 / 2) as usize]
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Stem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 地支，序號 0..12 循環，同時代表一日中的十二個時辰
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Branch(u8);

impl Branch {
    pub const COUNT: u8 = 12;
    const NAMES: [char; 12] = [
        '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
    ];
    const ELEMENTS: [Element; 12] = [
        Element::Water,
        Element::Earth,
        Element::Wood,
        Element::Wood,
        Element::Earth,
        Element::Fire,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Metal,
        Element::Earth,
        Element::Water,
    ];

    /// 子，一日之首
    pub const FIRST: Branch = Branch(0);

    pub fn new(index: u8) -> Self {
        Self(index % Self::COUNT)
    }

    pub fn all() -> impl Iterator<Item = Branch> {
        (0..Self::COUNT).map(Branch)
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::NAMES.iter().position(|&n| n == c).map(|i| Self(i as u8))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> char {
        Self::NAMES[self.0 as usize]
    }

    pub fn element(self) -> Element {
        Self::ELEMENTS[self.0 as usize]
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 六十甲子中的位置，0 為甲子，59 為癸亥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sexagenary(u8);

impl Sexagenary {
    pub const COUNT: u8 = 60;

    pub fn new(index: u8) -> Self {
        Self(index % Self::COUNT)
    }

    /// 干支陰陽不同則不成對，返回 `None`。
    ///
    /// 位置 n 滿足 n ≡ stem (mod 10) 且 n ≡ branch (mod 12)，即 n = 6·stem − 5·branch (mod 60)。
    pub fn from_pair(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 != branch.index() % 2 {
            return None;
        }
        let n = (6 * stem.index() as i32 - 5 * branch.index() as i32).rem_euclid(60);
        Some(Self(n as u8))
    }

    pub fn all() -> impl Iterator<Item = Sexagenary> {
        (0..Self::COUNT).map(Sexagenary)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn stem(self) -> Stem {
        Stem::new(self.0 % Stem::COUNT)
    }

    pub fn branch(self) -> Branch {
        Branch::new(self.0 % Branch::COUNT)
    }

    pub fn nayin(self) -> Nayin {
        Nayin::for_cycle(self)
    }

    pub fn offset(self, steps: i32) -> Self {
        Self((self.0 as i32 + steps).rem_euclid(Self::COUNT as i32) as u8)
    }
}

impl Display for Sexagenary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

/// 一柱：干支及其納音
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pillar {
    #[serde(rename = "heavenly")]
    stem: Stem,
    #[serde(rename = "earthly")]
    branch: Branch,
    nayin: Nayin,
}

impl Pillar {
    pub fn from_cycle(cycle: Sexagenary) -> Self {
        Self {
            stem: cycle.stem(),
            branch: cycle.branch(),
            nayin: cycle.nayin(),
        }
    }

    pub fn from_pair(stem: Stem, branch: Branch) -> Result<Self> {
        Sexagenary::from_pair(stem, branch)
            .map(Self::from_cycle)
            .ok_or(BaziError::InvalidPillarError {
                stem: stem.name(),
                branch: branch.name(),
            })
    }

    pub fn stem(&self) -> Stem {
        self.stem
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn nayin(&self) -> Nayin {
        self.nayin
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn iter(&self) -> impl Iterator<Item = &Pillar> {
        [&self.year, &self.month, &self.day, &self.hour].into_iter()
    }

    /// 日主即日干
    pub fn day_master(&self) -> Stem {
        self.day.stem()
    }
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// 五行計數，四柱干支各計一次，總和恆為 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementTally {
    counts: [u8; 5],
}

impl ElementTally {
    pub fn from_pillars(pillars: &FourPillars) -> Self {
        let mut tally = Self::default();
        for pillar in pillars.iter() {
            tally.counts[pillar.stem().element().slot()] += 1;
            tally.counts[pillar.branch().element().slot()] += 1;
        }
        tally
    }

    pub fn get(&self, element: Element) -> u8 {
        self.counts[element.slot()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, u8)> + '_ {
        Element::ALL.into_iter().map(|e| (e, self.get(e)))
    }
}

impl Serialize for ElementTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Element::ALL.len()))?;
        for (element, count) in self.iter() {
            map.serialize_entry(element.name(), &count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    #[default]
    Solar,
    Lunar,
}

impl CalendarKind {
    /// 只有 "lunar" 視為農曆，其餘（含缺省）一律按公曆
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if l.eq_ignore_ascii_case("lunar") => CalendarKind::Lunar,
            _ => CalendarKind::Solar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// "male" 以外的值都按女命處理，與提示詞的二分措辭一致
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    pub fn chinese(self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
        }
    }
}

/// 已通過必填檢查的出生資料，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthRequest {
    pub birthdate: String,
    pub calendar: CalendarKind,
    pub leap_month: bool,
    pub birth_time: String,
    pub gender: Gender,
    pub city: Option<String>,
}

/// 農曆日期，`leap` 表示閏月
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap: bool,
}

impl LunarDate {
    pub fn new(year: i32, month: u32, day: u32, leap: bool) -> Self {
        Self {
            year,
            month,
            day,
            leap,
        }
    }

    pub fn month_name(&self) -> String {
        fmt::month(self.month, self.leap)
    }

    pub fn day_name(&self) -> String {
        fmt::day(self.day)
    }

    pub fn year_name(&self) -> String {
        fmt::year_digits(self.year)
    }

    /// 農曆年干支，以正月初一為界
    pub fn year_cycle(&self) -> Sexagenary {
        Sexagenary::new((self.year - 4).rem_euclid(60) as u8)
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}年{}{}", self.year_name(), self.month_name(), self.day_name())
    }
}

impl Serialize for LunarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(8))?;
        map.serialize_entry("year", &self.year)?;
        map.serialize_entry("month", &self.month)?;
        map.serialize_entry("day", &self.day)?;
        map.serialize_entry("isLeapMonth", &self.leap)?;
        map.serialize_entry("monthName", &self.month_name())?;
        map.serialize_entry("dayName", &self.day_name())?;
        map.serialize_entry("yearInChinese", &self.year_name())?;
        map.serialize_entry("yearInGanZhi", &self.year_cycle().to_string())?;
        map.end()
    }
}

/// 二十四節氣，序號即太陽視黃經 / 15°，0 為春分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolarTerm(u8);

impl SolarTerm {
    const NAMES: [&'static str; 24] = [
        "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑", "立秋", "处暑", "白露",
        "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒", "立春", "雨水", "惊蛰",
    ];

    pub fn from_longitude(degrees: f64) -> Self {
        Self(((degrees.rem_euclid(360.0) / 15.0).floor() as u8) % 24)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn longitude(self) -> f64 {
        self.0 as f64 * 15.0
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }

    pub fn next(self) -> Self {
        Self((self.0 + 1) % 24)
    }
}

impl Display for SolarTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SolarTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermDate {
    pub term: SolarTerm,
    pub date: NaiveDate,
}

/// 某日前後的節氣：`current` 只在當日交節時有值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTermInfo {
    pub previous: TermDate,
    pub current: Option<SolarTerm>,
    pub next: TermDate,
}

/// 曆法元件對某一日的換算結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub solar: NaiveDate,
    pub lunar: LunarDate,
    pub year: Sexagenary,
    pub month: Sexagenary,
    pub day: Sexagenary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInfo {
    pub date: String,
    pub calendar_type: CalendarKind,
    pub time: String,
    pub city: Option<String>,
}

/// 排盤結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaziChart {
    pub pillars: FourPillars,
    pub elements: ElementTally,
    pub day_master: Stem,
    pub gender: Gender,
    pub lunar: LunarDate,
    pub solar: NaiveDate,
    pub solar_terms: SolarTermInfo,
    pub birth_info: BirthInfo,
}

/// 解讀的六個段落
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Overview,
    Personality,
    Love,
    Career,
    Wealth,
    Health,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Overview,
        Section::Personality,
        Section::Love,
        Section::Career,
        Section::Wealth,
        Section::Health,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Personality => "personality",
            Section::Love => "love",
            Section::Career => "career",
            Section::Wealth => "wealth",
            Section::Health => "health",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Section::Overview => "总体概况",
            Section::Personality => "性格特征",
            Section::Love => "感情运势",
            Section::Career => "事业运势",
            Section::Wealth => "财运趋势",
            Section::Health => "健康提示",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub overview: String,
    pub personality: String,
    pub love: String,
    pub career: String,
    pub wealth: String,
    pub health: String,
}

impl Interpretation {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Overview => &self.overview,
            Section::Personality => &self.personality,
            Section::Love => &self.love,
            Section::Career => &self.career,
            Section::Wealth => &self.wealth,
            Section::Health => &self.health,
        }
    }

    pub fn set(&mut self, section: Section, text: String) {
        let slot = match section {
            Section::Overview => &mut self.overview,
            Section::Personality => &mut self.personality,
            Section::Love => &mut self.love,
            Section::Career => &mut self.career,
            Section::Wealth => &mut self.wealth,
            Section::Health => &mut self.health,
        };
        *slot = text;
    }

    pub fn is_complete(&self) -> bool {
        Section::ALL.iter().all(|&s| !self.get(s).trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pillar(name: &str) -> Pillar {
        let mut chars = name.chars();
        let stem = Stem::from_char(chars.next().unwrap()).unwrap();
        let branch = Branch::from_char(chars.next().unwrap()).unwrap();
        Pillar::from_pair(stem, branch).unwrap()
    }

    #[test]
    fn test_sexagenary_positions() {
        assert_eq!(0, Sexagenary::from_pair(Stem::new(0), Branch::new(0)).unwrap().index());
        assert_eq!(10, Sexagenary::from_pair(Stem::new(0), Branch::new(10)).unwrap().index());
        assert_eq!(59, Sexagenary::from_pair(Stem::new(9), Branch::new(11)).unwrap().index());
        for cycle in Sexagenary::all() {
            assert_eq!(Some(cycle), Sexagenary::from_pair(cycle.stem(), cycle.branch()));
        }
    }

    #[test]
    fn test_mismatched_parity_is_rejected() {
        assert!(Sexagenary::from_pair(Stem::new(0), Branch::new(1)).is_none());
        let err = Pillar::from_pair(Stem::new(1), Branch::new(0)).unwrap_err();
        assert!(matches!(
            err,
            BaziError::InvalidPillarError {
                stem: '乙',
                branch: '子'
            }
        ));
    }

    #[test]
    fn test_element_tables() {
        assert_eq!(Element::Wood, Stem::from_char('乙').unwrap().element());
        assert_eq!(Element::Water, Stem::from_char('癸').unwrap().element());
        assert_eq!(Element::Earth, Branch::from_char('戌').unwrap().element());
        assert_eq!(Element::Fire, Branch::from_char('巳').unwrap().element());
        assert_eq!(Element::Metal, Branch::from_char('酉').unwrap().element());
    }

    #[test]
    fn test_element_tally_counts_stem_and_branch() {
        let pillars = FourPillars {
            year: pillar("己巳"),
            month: pillar("丙子"),
            day: pillar("丙寅"),
            hour: pillar("甲午"),
        };
        let tally = ElementTally::from_pillars(&pillars);

        assert_eq!(8, tally.total());
        assert_eq!(2, tally.get(Element::Wood));
        assert_eq!(4, tally.get(Element::Fire));
        assert_eq!(1, tally.get(Element::Earth));
        assert_eq!(0, tally.get(Element::Metal));
        assert_eq!(1, tally.get(Element::Water));

        let json = serde_json::to_value(tally).unwrap();
        assert_eq!(json, serde_json::json!({"木": 2, "火": 4, "土": 1, "金": 0, "水": 1}));
    }

    #[test]
    fn test_pillar_wire_format() {
        let json = serde_json::to_value(pillar("甲子")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"heavenly": "甲", "earthly": "子", "nayin": "海中金"})
        );
    }

    #[test]
    fn test_calendar_kind_defaults_to_solar() {
        assert_eq!(CalendarKind::Solar, CalendarKind::from_label(None));
        assert_eq!(CalendarKind::Solar, CalendarKind::from_label(Some("gregorian")));
        assert_eq!(CalendarKind::Lunar, CalendarKind::from_label(Some("lunar")));
    }

    #[test]
    fn test_lunar_date_names() {
        let date = LunarDate::new(1989, 12, 5, false);
        assert_eq!("腊月", date.month_name());
        assert_eq!("初五", date.day_name());
        assert_eq!("己巳", date.year_cycle().to_string());
        assert_eq!("一九八九年腊月初五", date.to_string());
    }

    #[test]
    fn test_solar_term_lookup() {
        let term = SolarTerm::from_longitude(315.0);
        assert_eq!("立春", term.name());
        assert_eq!("冬至", SolarTerm::from_longitude(270.4).name());
        assert_eq!("春分", SolarTerm::from_longitude(359.99).next().name());
    }

    #[test]
    fn test_interpretation_completeness() {
        let mut interpretation = Interpretation::default();
        assert!(!interpretation.is_complete());
        for section in Section::ALL {
            interpretation.set(section, format!("{} text", section.key()));
        }
        assert!(interpretation.is_complete());
        assert_eq!("love text", interpretation.get(Section::Love));
    }
}
