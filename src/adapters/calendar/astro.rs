//! 太陽視黃經、朔日與 ΔT
//!
//! 太陽位置由 VSOP87 截斷級數加章動與光行差得出，黃經誤差約 1″；朔用 Meeus 第 49 章平朔加周期修正，
//! 誤差在秒級。ΔT 用 Espenak & Meeus 分段多項式。

use super::{nutation, vsop87};

/// J2000.0 的儒略日
pub const J2000: f64 = 2_451_545.0;
/// 回歸年長度（日），用於把黃經差換算成時間
const TROPICAL_YEAR: f64 = 365.242_189;
/// 平朔望月（日）
pub const SYNODIC_MONTH: f64 = 29.530_588_861;
/// 第 0 號朔（2000-01-06）的平朔儒略日
const NEW_MOON_EPOCH: f64 = 2_451_550.097_66;
/// 北京時間相對 UTC 的分鐘數
pub const CST_OFFSET_MINUTES: i32 = 480;

const MAX_ITERATIONS: usize = 30;

/// 力學時（TT）儒略日
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// 世界時（UT）儒略日
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Tt {
    pub fn to_ut(self) -> Ut {
        Ut(self.0 - delta_t(self.0) / 86_400.0)
    }

    /// 該時刻在北京時間的儒略日數（日期）
    pub fn cst_jdn(self) -> i64 {
        self.to_ut().jdn_in_timezone(CST_OFFSET_MINUTES)
    }
}

impl Ut {
    pub fn to_tt(self) -> Tt {
        Tt(self.0 + delta_t(self.0) / 86_400.0)
    }

    /// 東時區 `offset_minutes` 分鐘處的當地日期
    pub fn jdn_in_timezone(self, offset_minutes: i32) -> i64 {
        (self.0 + offset_minutes as f64 / 1440.0).round() as i64
    }

    /// 北京時間某日 00:00
    pub fn cst_midnight(jdn: i64) -> Self {
        Ut(jdn as f64 - 0.5 - CST_OFFSET_MINUTES as f64 / 1440.0)
    }
}

fn sin_deg(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// 角度歸到 [-180, 180)
pub fn normalize_pm180(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// TT − UT（秒）
pub fn delta_t(jd: f64) -> f64 {
    let y = 2000.0 + (jd - J2000) / 365.25;
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    if y < 1860.0 {
        long_term(y)
    } else if y < 1900.0 {
        let t = y - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4)
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else if y < 2150.0 {
        long_term(y) - 0.5628 * (2150.0 - y)
    } else {
        long_term(y)
    }
}

/// FK5 修正（角秒）
const FK5_CORRECTION: f64 = -0.090_33;
/// 光行差常數（角秒，乘以 1/R）
const ABERRATION: f64 = -20.4898;

/// 太陽視黃經（度，0..360）
pub fn sun_apparent_longitude(tt: Tt) -> f64 {
    let t = (tt.0 - J2000) / 36_525.0;
    let earth = vsop87::earth_position(t / 10.0);
    let geometric = earth.longitude.to_degrees() + 180.0;
    let corrections =
        FK5_CORRECTION + nutation::nutation_in_longitude(t) + ABERRATION / earth.radius;
    (geometric + corrections / 3600.0).rem_euclid(360.0)
}

/// 從 `guess` 附近找太陽視黃經到達 `target` 度的時刻。
///
/// 每步按平均角速度修正，`guess` 與真值相差半年以內都會收斂到最近的一次。
pub fn sun_longitude_crossing(target: f64, guess: Tt) -> Tt {
    let mut jd = guess.0;
    for _ in 0..MAX_ITERATIONS {
        let diff = normalize_pm180(target - sun_apparent_longitude(Tt(jd)));
        jd += diff * TROPICAL_YEAR / 360.0;
        if diff.abs() < 1e-7 {
            break;
        }
    }
    Tt(jd)
}

/// 某公曆年的冬至時刻
pub fn winter_solstice(year: i32) -> Tt {
    let guess = J2000 + (year - 2000) as f64 * TROPICAL_YEAR + 355.0;
    sun_longitude_crossing(270.0, Tt(guess))
}

/// `tt` 之前（含）最近一次平朔的編號，實際朔可能前後差一號
pub fn lunation_before(tt: Tt) -> i64 {
    ((tt.0 - NEW_MOON_EPOCH) / SYNODIC_MONTH).floor() as i64
}

/// 第 `k` 號朔的時刻，k = 0 為 2000-01-06 的朔
pub fn new_moon(k: i64) -> Tt {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = NEW_MOON_EPOCH + SYNODIC_MONTH * k + 0.00015437 * t2 - 0.000000150 * t3
        + 0.00000000073 * t4;
    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let m = 2.5534 + 29.10535670 * k - 0.0000014 * t2 - 0.00000011 * t3;
    let mp = 201.5643 + 385.81693528 * k + 0.0107582 * t2 + 0.00001238 * t3
        - 0.000000058 * t4;
    let f = 160.7108 + 390.67050284 * k - 0.0016118 * t2 - 0.00000227 * t3
        + 0.000000011 * t4;
    let omega = 124.7746 - 1.56375588 * k + 0.0020672 * t2 + 0.00000215 * t3;

    let periodic = -0.40720 * sin_deg(mp)
        + 0.17241 * e * sin_deg(m)
        + 0.01608 * sin_deg(2.0 * mp)
        + 0.01039 * sin_deg(2.0 * f)
        + 0.00739 * e * sin_deg(mp - m)
        - 0.00514 * e * sin_deg(mp + m)
        + 0.00208 * e * e * sin_deg(2.0 * m)
        - 0.00111 * sin_deg(mp - 2.0 * f)
        - 0.00057 * sin_deg(mp + 2.0 * f)
        + 0.00056 * e * sin_deg(2.0 * mp + m)
        - 0.00042 * sin_deg(3.0 * mp)
        + 0.00042 * e * sin_deg(m + 2.0 * f)
        + 0.00038 * e * sin_deg(m - 2.0 * f)
        - 0.00024 * e * sin_deg(2.0 * mp - m)
        - 0.00017 * sin_deg(omega)
        - 0.00007 * sin_deg(mp + 2.0 * m)
        + 0.00004 * sin_deg(2.0 * mp - 2.0 * f)
        + 0.00004 * sin_deg(3.0 * m)
        + 0.00003 * sin_deg(mp + m - 2.0 * f)
        + 0.00003 * sin_deg(2.0 * mp + 2.0 * f)
        - 0.00003 * sin_deg(mp + m + 2.0 * f)
        + 0.00003 * sin_deg(mp - m + 2.0 * f)
        - 0.00002 * sin_deg(mp - m - 2.0 * f)
        - 0.00002 * sin_deg(3.0 * mp + m)
        + 0.00002 * sin_deg(4.0 * mp);

    // 行星攝動
    let planetary: [(f64, f64); 14] = [
        (0.000325, 299.77 + 0.107408 * k - 0.009173 * t2),
        (0.000165, 251.88 + 0.016321 * k),
        (0.000164, 251.83 + 26.651886 * k),
        (0.000126, 349.42 + 36.412478 * k),
        (0.000110, 84.66 + 18.206239 * k),
        (0.000062, 141.74 + 53.303771 * k),
        (0.000060, 207.14 + 2.453732 * k),
        (0.000056, 154.84 + 7.306860 * k),
        (0.000047, 34.52 + 27.261239 * k),
        (0.000042, 207.19 + 0.121824 * k),
        (0.000040, 291.34 + 1.844379 * k),
        (0.000037, 161.72 + 24.198154 * k),
        (0.000035, 239.56 + 25.513099 * k),
        (0.000023, 331.55 + 3.592518 * k),
    ];
    let additional: f64 = planetary
        .iter()
        .map(|&(coefficient, argument)| coefficient * sin_deg(argument))
        .sum();

    Tt(mean + periodic + additional)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_moon_matches_reference() {
        // 1977-02-18 03:37:42 TD
        let tt = new_moon(-283);
        assert!((tt.0 - 2_443_192.65118).abs() < 1e-4, "{}", tt.0);
    }

    #[test]
    fn sun_longitude_matches_reference() {
        // 1992-10-13 0h TD：199°54′21.818″
        let lambda = sun_apparent_longitude(Tt(2_448_908.5));
        assert!((lambda - 199.906_06).abs() < 0.000_1, "{}", lambda);
    }

    #[test]
    fn crossing_lands_on_target() {
        let tt = sun_longitude_crossing(315.0, Tt(2_451_580.0));
        let lambda = sun_apparent_longitude(tt);
        assert!(normalize_pm180(lambda - 315.0).abs() < 1e-6);
        // 2000 年立春：2000-02-04 北京時間
        assert_eq!(2_451_579, tt.cst_jdn());
    }

    #[test]
    fn winter_solstice_dates() {
        assert_eq!(2_451_535, winter_solstice(1999).cst_jdn()); // 1999-12-22
        assert_eq!(2_451_900, winter_solstice(2000).cst_jdn()); // 2000-12-21
    }

    #[test]
    fn delta_t_is_plausible() {
        assert!((delta_t(J2000) - 63.86).abs() < 0.5);
        assert!(delta_t(2_415_020.0) < 5.0); // 1900
    }

    #[test]
    fn normalize_wraps() {
        assert_eq!(-170.0, normalize_pm180(190.0));
        assert_eq!(10.0, normalize_pm180(370.0));
        assert_eq!(-180.0, normalize_pm180(180.0));
    }
}
