//! 六十甲子納音
//!
//! 相鄰兩組干支（甲子乙丑、丙寅丁卯……）共用一個納音，故表長 30，以甲子序號除以 2 索引。

use crate::domain::model::Sexagenary;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

const NAMES: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火", "涧下水", "城头土", "白蜡金", "杨柳木",
    "泉中水", "屋上土", "霹雳火", "松柏木", "长流水", "砂中金", "山下火", "平地木", "壁上土", "金箔金",
    "覆灯火", "天河水", "大驿土", "钗钏金", "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nayin(u8);

impl Nayin {
    pub const COUNT: u8 = 30;

    pub fn for_cycle(cycle: Sexagenary) -> Self {
        Self(cycle.index() / 2)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NAMES[self.0 as usize]
    }
}

impl Display for Nayin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Nayin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Branch, Stem};

    fn lookup(pair: &str) -> &'static str {
        let mut chars = pair.chars();
        let stem = Stem::from_char(chars.next().unwrap()).unwrap();
        let branch = Branch::from_char(chars.next().unwrap()).unwrap();
        Sexagenary::from_pair(stem, branch).unwrap().nayin().name()
    }

    #[test]
    fn test_known_pairs() {
        assert_eq!("海中金", lookup("甲子"));
        assert_eq!("海中金", lookup("乙丑"));
        assert_eq!("大林木", lookup("己巳"));
        assert_eq!("涧下水", lookup("丙子"));
        assert_eq!("炉中火", lookup("丙寅"));
        assert_eq!("砂中金", lookup("甲午"));
        assert_eq!("平地木", lookup("己亥"));
        assert_eq!("大海水", lookup("癸亥"));
    }

    #[test]
    fn test_every_cycle_position_has_a_nayin() {
        let mut seen = [0u8; Nayin::COUNT as usize];
        for cycle in Sexagenary::all() {
            let nayin = cycle.nayin();
            assert!(!nayin.name().is_empty());
            seen[nayin.index() as usize] += 1;
        }
        assert!(seen.iter().all(|&n| n == 2));
    }

    fn lookup_nayin(pair: &str) -> Nayin {
        let mut chars = pair.chars();
        let stem = Stem::from_char(chars.next().unwrap()).unwrap();
        let branch = Branch::from_char(chars.next().unwrap()).unwrap();
        Sexagenary::from_pair(stem, branch).unwrap().nayin()
    }
}
