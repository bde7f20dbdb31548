//! 黃經章動 Δψ，IAU 2000B 的主要日月項
//!
//! 基本角與係數出自 IERS Conventions 2010 表 5.2e、5.3b。只取振幅 5 mas 以上的十六項，
//! 與完整模型相差不到 0.05″。

use std::f64::consts::TAU;

const ARCSEC_TO_RAD: f64 = TAU / 1_296_000.0;

/// 月亮平近點角、太陽平近點角、月亮升交角距、日月平角距、月亮升交點平黃經（弧度）
fn delaunay_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    [
        485_868.249_036 + 1_717_915_923.217_8 * t + 31.8792 * t2 + 0.051_635 * t3
            - 0.000_244_70 * t4,
        1_287_104.793_05 + 129_596_581.048_1 * t - 0.5532 * t2 + 0.000_136 * t3
            - 0.000_011_49 * t4,
        335_779.526_232 + 1_739_527_262.847_8 * t - 12.7512 * t2 - 0.001_037 * t3
            + 0.000_004_17 * t4,
        1_072_260.703_69 + 1_602_961_601.209_0 * t - 6.3706 * t2 + 0.006_593 * t3
            - 0.000_031_69 * t4,
        450_160.398_036 - 6_962_890.543_1 * t + 7.4722 * t2 + 0.007_702 * t3
            - 0.000_059_39 * t4,
    ]
    .map(|arcsec| arcsec * ARCSEC_TO_RAD)
}

/// `[l, l', F, D, Ω 的倍數, S, S']`，S 以 0.1 μas 計
#[rustfmt::skip]
const LONGITUDE_TERMS: [[i64; 7]; 16] = [
    [ 0,  0, 0,  0, 1, -172_064_161, -174_666],
    [ 0,  0, 2, -2, 2,  -13_170_906,   -1_675],
    [ 0,  0, 2,  0, 2,   -2_276_413,     -234],
    [ 0,  0, 0,  0, 2,    2_074_554,      207],
    [ 0,  1, 0,  0, 0,    1_475_877,   -3_633],
    [ 0,  1, 2, -2, 2,     -516_821,    1_226],
    [ 1,  0, 0,  0, 0,      711_159,       73],
    [ 0,  0, 2,  0, 1,     -387_298,     -367],
    [ 1,  0, 2,  0, 2,     -301_461,      -36],
    [ 0, -1, 2, -2, 2,      215_829,     -494],
    [ 0,  0, 2, -2, 1,      128_227,      137],
    [-1,  0, 2,  0, 2,      123_457,       11],
    [-1,  0, 0,  2, 0,      156_994,       10],
    [ 1,  0, 0,  0, 1,       63_110,       63],
    [-1,  0, 0,  0, 1,      -57_976,      -63],
    [-1,  0, 2,  2, 2,      -59_641,      -11],
];

/// 黃經章動（角秒），`t` 為 J2000 起算的儒略世紀（TT）
pub fn nutation_in_longitude(t: f64) -> f64 {
    let args = delaunay_arguments(t);
    let sum: f64 = LONGITUDE_TERMS
        .iter()
        .map(|row| {
            let angle: f64 = row[..5]
                .iter()
                .zip(args)
                .map(|(&n, arg)| n as f64 * arg)
                .sum();
            (row[5] as f64 + row[6] as f64 * t) * angle.sin()
        })
        .sum();
    sum * 1e-7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_value() {
        // Meeus 例 22.a：1987-04-10 0h TD，Δψ = −3.788″
        let t = (2_446_895.5 - 2_451_545.0) / 36_525.0;
        let dpsi = nutation_in_longitude(t);
        assert!((dpsi - -3.788).abs() < 0.05, "{dpsi}");
    }

    #[test]
    fn amplitude_is_bounded() {
        for step in 0..200 {
            let t = -1.0 + step as f64 * 0.01;
            assert!(nutation_in_longitude(t).abs() < 20.0, "{t}");
        }
    }
}
