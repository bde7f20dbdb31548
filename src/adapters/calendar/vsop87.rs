//! 地球日心黃經與日地距離，VSOP87 截斷級數
//!
//! 係數取自 Meeus《Astronomical Algorithms》附錄三（第 32 章），每項為 `(A, B, C)`，
//! 貢獻 `A·cos(B + C·τ)`，單位 1e-8 弧度（距離為 1e-8 AU），τ 為 J2000 起算的儒略千年。
//! 在 1900–2100 年間黃經誤差約 1″，相當於太陽行走 25 秒。

type Term = (f64, f64, f64);

#[rustfmt::skip]
const L0: &[Term] = &[
    (175_347_046.0, 0.0, 0.0),
    (3_341_656.0, 4.669_256_8, 6_283.075_85),
    (34_894.0, 4.6261, 12_566.1517),
    (3_497.0, 2.7441, 5_753.3849),
    (3_418.0, 2.8289, 3.5231),
    (3_136.0, 3.6277, 77_713.7715),
    (2_676.0, 4.4181, 7_860.4194),
    (2_343.0, 6.1352, 3_930.2097),
    (1_324.0, 0.7425, 11_506.7698),
    (1_273.0, 2.0371, 529.691),
    (1_199.0, 1.1096, 1_577.3435),
    (990.0, 5.233, 5_884.927),
    (902.0, 2.045, 26.298),
    (857.0, 3.508, 398.149),
    (780.0, 1.179, 5_223.694),
    (753.0, 2.533, 5_507.553),
    (505.0, 4.583, 18_849.228),
    (492.0, 4.205, 775.523),
    (357.0, 2.92, 0.067),
    (317.0, 5.849, 11_790.629),
    (284.0, 1.899, 796.298),
    (271.0, 0.315, 10_977.079),
    (243.0, 0.345, 5_486.778),
    (206.0, 4.806, 2_544.314),
    (205.0, 1.869, 5_573.143),
    (202.0, 2.458, 6_069.777),
    (156.0, 0.833, 213.299),
    (132.0, 3.411, 2_942.463),
    (126.0, 1.083, 20.775),
    (115.0, 0.645, 0.98),
    (103.0, 0.636, 4_694.003),
    (102.0, 0.976, 15_720.839),
    (102.0, 4.267, 7.114),
    (99.0, 6.21, 2_146.17),
    (98.0, 0.68, 155.42),
    (86.0, 5.98, 161_000.69),
    (85.0, 1.3, 6_275.96),
    (85.0, 3.67, 71_430.7),
    (80.0, 1.81, 17_260.15),
    (79.0, 3.04, 12_036.46),
    (75.0, 1.76, 5_088.63),
    (74.0, 3.5, 3_154.69),
    (74.0, 4.68, 801.82),
    (70.0, 0.83, 9_437.76),
    (62.0, 3.98, 8_827.39),
    (61.0, 1.82, 7_084.9),
    (57.0, 2.78, 6_286.6),
    (56.0, 4.39, 14_143.5),
    (56.0, 3.47, 6_279.55),
    (52.0, 0.19, 12_139.55),
    (52.0, 1.33, 1_748.02),
    (51.0, 0.28, 5_856.48),
    (49.0, 0.49, 1_194.45),
    (41.0, 5.37, 8_429.24),
    (41.0, 2.4, 19_651.05),
    (39.0, 6.17, 10_447.39),
    (37.0, 6.04, 10_213.29),
    (37.0, 2.57, 1_059.38),
    (36.0, 1.71, 2_352.87),
    (36.0, 1.78, 6_812.77),
    (33.0, 0.59, 17_789.85),
    (30.0, 0.44, 83_996.85),
    (30.0, 2.74, 1_349.87),
    (25.0, 3.16, 4_690.48),
];

#[rustfmt::skip]
const L1: &[Term] = &[
    (628_331_966_747.0, 0.0, 0.0),
    (206_059.0, 2.678_235, 6_283.075_85),
    (4_303.0, 2.6351, 12_566.1517),
    (425.0, 1.59, 3.523),
    (119.0, 5.796, 26.298),
    (109.0, 2.966, 1_577.344),
    (93.0, 2.59, 18_849.23),
    (72.0, 1.14, 529.69),
    (68.0, 1.87, 398.15),
    (67.0, 4.41, 5_507.55),
    (59.0, 2.89, 5_223.69),
    (56.0, 2.17, 155.42),
    (45.0, 0.4, 796.3),
    (36.0, 0.47, 775.52),
    (29.0, 2.65, 7.11),
    (21.0, 5.34, 0.98),
    (19.0, 1.85, 5_486.78),
    (19.0, 4.97, 213.3),
    (17.0, 2.99, 6_275.96),
    (16.0, 0.03, 2_544.31),
    (16.0, 1.43, 2_146.17),
    (15.0, 1.21, 10_977.08),
    (12.0, 2.83, 1_748.02),
    (12.0, 3.26, 5_088.63),
    (12.0, 5.27, 1_194.45),
    (12.0, 2.08, 4_694.0),
    (11.0, 0.77, 553.57),
    (10.0, 1.3, 6_286.6),
    (10.0, 4.24, 1_349.87),
    (9.0, 2.7, 242.73),
    (9.0, 5.64, 951.72),
    (8.0, 5.3, 2_352.87),
    (6.0, 2.65, 9_437.76),
    (6.0, 4.67, 4_690.48),
];

#[rustfmt::skip]
const L2: &[Term] = &[
    (52_919.0, 0.0, 0.0),
    (8_720.0, 1.0721, 6_283.0758),
    (309.0, 0.867, 12_566.152),
    (27.0, 0.05, 3.52),
    (16.0, 5.19, 26.3),
    (16.0, 3.68, 155.42),
    (10.0, 0.76, 18_849.23),
    (9.0, 2.06, 77_713.77),
    (7.0, 0.83, 775.52),
    (5.0, 4.66, 1_577.34),
    (4.0, 1.03, 7.11),
    (4.0, 3.44, 5_573.14),
    (3.0, 5.14, 796.3),
    (3.0, 6.05, 5_507.55),
    (3.0, 1.19, 242.73),
    (3.0, 6.12, 529.69),
    (3.0, 0.31, 398.15),
    (3.0, 2.28, 553.57),
    (2.0, 4.38, 5_223.69),
    (2.0, 3.75, 0.98),
];

#[rustfmt::skip]
const L3: &[Term] = &[
    (289.0, 5.844, 6_283.076),
    (35.0, 0.0, 0.0),
    (17.0, 5.49, 12_566.15),
    (3.0, 5.2, 155.42),
    (1.0, 4.72, 3.52),
    (1.0, 5.3, 18_849.23),
    (1.0, 5.97, 242.73),
];

const L4: &[Term] = &[(114.0, 3.142, 0.0), (8.0, 4.13, 6_283.08), (1.0, 3.84, 12_566.15)];

const L5: &[Term] = &[(1.0, 3.14, 0.0)];

// 距離只用於光行差，取主項即可
#[rustfmt::skip]
const R0: &[Term] = &[
    (100_013_989.0, 0.0, 0.0),
    (1_670_700.0, 3.098_463_5, 6_283.075_85),
    (13_956.0, 3.055_25, 12_566.1517),
    (3_084.0, 5.1985, 77_713.7715),
    (1_628.0, 1.1739, 5_753.3849),
    (1_576.0, 2.8469, 7_860.4194),
];

const R1: &[Term] = &[(103_019.0, 1.107_49, 6_283.075_85), (1_721.0, 1.0644, 12_566.1517)];

fn series(terms: &[Term], tau: f64) -> f64 {
    terms.iter().map(|&(a, b, c)| a * (b + c * tau).cos()).sum()
}

/// `Σ series_i · τ^i`，結果換成弧度（或 AU）
fn evaluate(groups: &[&[Term]], tau: f64) -> f64 {
    groups
        .iter()
        .rev()
        .fold(0.0, |acc, terms| acc * tau + series(terms, tau))
        / 1e8
}

/// 地球日心座標（VSOP87 動力學黃道）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heliocentric {
    /// 黃經（弧度，未歸一）
    pub longitude: f64,
    /// 日地距離（AU）
    pub radius: f64,
}

/// `tau`：J2000 起算的儒略千年（TT）
pub fn earth_position(tau: f64) -> Heliocentric {
    Heliocentric {
        longitude: evaluate(&[L0, L1, L2, L3, L4, L5], tau),
        radius: evaluate(&[R0, R1], tau),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_position_matches_reference() {
        // Meeus 例 25.b：1992-10-13 0h TD
        let tau = (2_448_908.5 - 2_451_545.0) / 365_250.0;
        let earth = earth_position(tau);
        assert!((earth.longitude - -43.634_847_96).abs() < 1e-7, "{}", earth.longitude);
        assert!((earth.radius - 0.997_607_75).abs() < 1e-4, "{}", earth.radius);
    }

    #[test]
    fn radius_stays_near_one_au() {
        for year in [1900.0, 1950.0, 2000.0, 2050.0, 2100.0] {
            for day in (0..365).step_by(30) {
                let tau = (year - 2000.0 + day as f64 / 365.25) / 1000.0;
                let radius = earth_position(tau).radius;
                assert!((0.98..1.02).contains(&radius), "{year} +{day}: {radius}");
            }
        }
    }
}
