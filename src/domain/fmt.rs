//! 農曆日期的中文寫法

const DIGITS: [&str; 10] = ["〇", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 月名（含「月」字），十一、十二月稱「冬月」「腊月」，閏月加「闰」。
///
/// # Panics
///
/// 月序號不在 `1..=12` 間時 panic。
pub fn month(num: u32, leap: bool) -> String {
    let mut name = String::new();
    if leap {
        name.push('闰');
    }
    name += match num {
        1 => "正",
        2..=9 => DIGITS[num as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => panic!("month {} not in 1..=12", num),
    };
    name.push('月');
    name
}

/// 日名：初一至初十、十一至二十、廿一至廿九、三十。
///
/// # Panics
///
/// 日序號不在 `1..=30` 間時 panic。
pub fn day(num: u32) -> String {
    let tens = match num {
        1..=10 => "初",
        11..=19 => "十",
        20 => return "二十".to_string(),
        21..=29 => "廿",
        30 => return "三十".to_string(),
        _ => panic!("day {} not in 1..=30", num),
    };
    let unit = match num % 10 {
        0 => "十",
        n => DIGITS[n as usize],
    };
    format!("{}{}", tens, unit)
}

/// 年份逐位轉寫，如 1989 寫作「一九八九」。
pub fn year_digits(year: i32) -> String {
    year.unsigned_abs()
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| DIGITS[d as usize])
        .collect()
}
