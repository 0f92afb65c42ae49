use super::*;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn assert_rel(a: f64, b: f64, tol: f64, msg: &str) {
    let err = if b == 0.0 { a.abs() } else { (a / b - 1.0).abs() };
    assert!(err < tol, "{}: {} vs {} (rel err {})", msg, a, b, err);
}

// ═══════════════════════════════════════════════════════════════════
// Normal
// ═══════════════════════════════════════════════════════════════════

#[test]
fn pnormal_reference() {
    assert_eq!(pnormal(0.0_f64, false), 0.5);
    assert_rel(pnormal(-10.0, false), 7.6198530241605261e-24, 1e-13, "Φ(-10)");
    assert_rel(pnormal(10.0, true), 7.6198530241605261e-24, 1e-13, "1-Φ(10)");
    assert_rel(pnormal(-37.0, false), 5.7255712225245768e-300, 1e-11, "Φ(-37)");
}

#[test]
fn qnormal_reference() {
    assert_rel(qnormal(0.3_f64, false).unwrap(), -0.52440051270804078, 1e-14, "Φ⁻¹(0.3)");
    assert_rel(qnormal(0.3_f64, true).unwrap(), 0.52440051270804078, 1e-14, "upper 0.3");
    assert_eq!(qnormal(0.5_f64, false).unwrap(), 0.0);
}

#[test]
fn qnormal_deep_tail_round_trip() {
    let p = 5.7255712225245768e-300_f64;
    let x = qnormal(p, false).unwrap();
    assert_rel(x, -37.0, 1e-13, "Φ⁻¹ deep tail");
    assert_rel(pnormal(x, false), p, 1e-11, "Φ(Φ⁻¹(p))");
}

#[test]
fn qnormal_rejects_boundaries() {
    for p in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
        let err = qnormal(p, false).unwrap_err();
        assert!(err.is_invalid_argument(), "p = {p}");
    }
}

#[test]
fn dnormal_peak() {
    assert_rel(dnormal(0.0_f64), 0.3989422804014327, 1e-15, "φ(0)");
}

// ═══════════════════════════════════════════════════════════════════
// Student CDF
// ═══════════════════════════════════════════════════════════════════

#[test]
fn pstudent_at_zero_is_half() {
    for nu in [0.3, 1.0, 2.0, 3.0, 4.5, 7.0, 1e3, 1e7] {
        assert_eq!(pstudent(nu, 0.0_f64, false), 0.5, "nu = {nu}");
        assert_eq!(pstudent(nu, 0.0_f64, true), 0.5, "nu = {nu}");
    }
}

#[test]
fn pstudent_small_integer_reference() {
    assert_rel(pstudent(1.0_f64, 1.0, false), 0.75, 1e-15, "Cauchy");
    assert_rel(pstudent(3.0_f64, 10.0, true), 0.001064199529207075, 1e-14, "nu=3 t=10");
    assert_rel(pstudent(5.0_f64, 0.5, true), 0.3191494358204645, 1e-14, "nu=5 t=0.5");
    assert_rel(pstudent(7.0_f64, 2.0, true), 0.042809664281488038, 1e-14, "nu=7 t=2");
    assert_rel(pstudent(4.0_f64, 1e3, true), 2.9999800001049995e-12, 1e-13, "nu=4 t=1e3");
}

#[test]
fn pstudent_incomplete_beta_reference() {
    assert_rel(pstudent(2.5_f64, 3.0, true), 0.036288047774515922, 1e-13, "nu=2.5 t=3");
    assert_rel(pstudent(0.5_f64, 2.0, true), 0.22275744509156562, 1e-13, "nu=0.5 t=2");
    assert_rel(pstudent(17.3_f64, -1.2, true), 0.87684239816491989, 1e-14, "nu=17.3 t=-1.2");
    assert_rel(pstudent(250.5_f64, 5.0, true), 5.3926481617924361e-7, 1e-12, "nu=250.5 t=5");
    assert_rel(pstudent(30.0_f64, 40.0, true), 6.8630225972032014e-28, 1e-12, "nu=30 t=40");
}

#[test]
fn pstudent_far_tail_keeps_relative_precision() {
    let q = pstudent(2.5_f64, 1e10, true);
    assert_rel(q, 7.1933971908317224e-26, 1e-12, "nu=2.5 t=1e10");
    assert_eq!(pstudent(2.5_f64, -1e10, false), q);
}

#[test]
fn pstudent_small_nu_beyond_underflow_of_c() {
    // ν/(ν+t²) underflows here while the tail is still of order 1e-9
    let t = 1.42268145875073068e161;
    let q = pstudent(0.05_f64, t, true);
    assert_rel(q, 3.927970030546676e-9, 1e-13, "nu=0.05 t=1.4e161");
    assert_eq!(pstudent(0.05_f64, -t, false), q);
    assert_rel(pstudent(0.3_f64, 3.48e161, true), 1.2049646488005948e-49, 1e-12, "nu=0.3 t=3.5e161");
    assert_rel(pstudent(0.05_f64, 1e300, true), 4.485631048063479e-16, 1e-13, "nu=0.05 t=1e300");
    assert_rel(pstudent(3.5_f64, 1e9, true), 5.628104268696493e-32, 1e-13, "nu=3.5 t=1e9");
}

#[test]
fn pstudent_near_asymptotic_threshold() {
    assert_rel(pstudent(5e4_f64, 3.0, true), 0.0013505628959770216, 1e-14, "nu=5e4 t=3");
    assert_rel(pstudent(5e4_f64, 4.5, true), 3.4053219277509332e-6, 1e-14, "nu=5e4 t=4.5");
    assert_rel(pstudent(9.9999e4_f64, 3.0, true), 0.0013502304453567146, 1e-14, "nu=99999 t=3");
    assert_rel(pstudent(9.9999e4_f64, 2.0, true), 0.022751481742251236, 1e-14, "nu=99999 t=2");
}

#[test]
fn pstudent_large_nu_reference() {
    assert_rel(pstudent(1e6_f64, 3.0, true), 0.0013499312707108985, 1e-12, "nu=1e6 t=3");
    assert_rel(pstudent(3e5_f64, 7.0, true), 1.2824793245746351e-12, 1e-11, "nu=3e5 t=7");
}

#[test]
fn pstudent_infinite_argument() {
    assert_eq!(pstudent(3.5_f64, f64::INFINITY, false), 1.0);
    assert_eq!(pstudent(3.5_f64, f64::NEG_INFINITY, false), 0.0);
    assert_eq!(pstudent(3.5_f64, f64::INFINITY, true), 0.0);
}

#[test]
fn pstudent_invalid_nu_is_nan() {
    assert!(pstudent(0.0_f64, 1.0, false).is_nan());
    assert!(pstudent(-2.0_f64, 1.0, false).is_nan());
    assert!(pstudent(f64::NAN, 1.0, false).is_nan());
}

#[test]
fn pstudent_f32() {
    let p = pstudent(3.0_f32, 10.0, true);
    assert!((p / 0.001064199529207075_f32 - 1.0).abs() < 1e-5);
}

#[test]
fn dstudent_reference() {
    assert_rel(dstudent(3.5_f64, 1.3), 0.15321582498019391, 1e-13, "nu=3.5");
    assert_rel(dstudent(1e7_f64, 1.0), 0.24197071242060763, 1e-12, "nu=1e7");
    assert_rel(dstudent(1.0_f64, 0.0), core::f64::consts::FRAC_1_PI, 1e-14, "Cauchy peak");
    // x² overflows
    assert_rel(dstudent(0.05_f64, 1e200), 2.242815524031744e-212, 1e-12, "nu=0.05 x=1e200");
}

// ═══════════════════════════════════════════════════════════════════
// Student quantile
// ═══════════════════════════════════════════════════════════════════

#[test]
fn qstudent_closed_forms() {
    assert_rel(qstudent(1.0_f64, 0.75, false).unwrap(), 1.0, 1e-15, "Cauchy");
    assert_rel(qstudent(2.0_f64, 0.9, false).unwrap(), 1.8856180831641267, 1e-14, "nu=2");
    assert_eq!(qstudent(3.0_f64, 0.5, false).unwrap(), 0.0);
}

#[test]
fn qstudent_reference() {
    assert_rel(qstudent(4.0_f64, 0.99, false).unwrap(), 3.7469473879791968, 1e-13, "nu=4");
    assert_rel(qstudent(12.5_f64, 0.2, true).unwrap(), 0.87132970440529159, 1e-13, "nu=12.5");
    assert_rel(qstudent(0.4_f64, 0.05, true).unwrap(), 113.63588164259991, 1e-12, "nu=0.4");
    assert_rel(qstudent(2e5_f64, 1e-8, true).unwrap(), 5.6122292015386422, 1e-11, "nu=2e5");
}

#[test]
fn qstudent_deep_tail() {
    let x = qstudent(3.5_f64, 1e-30, false).unwrap();
    assert_rel(x, -439501751.26881819, 1e-11, "nu=3.5 p=1e-30");
}

#[test]
fn qstudent_far_tail_for_small_nu() {
    let p = 1e-40;
    let x = qstudent(0.3_f64, p, false).unwrap();
    assert!(x.is_finite() && x < -1e100, "x = {x}");
    assert_rel(pstudent(0.3, x, false), p, 1e-10, "nu=0.3 p=1e-40");
}

#[test]
fn qstudent_beyond_f64_range_is_an_error() {
    // the true quantiles are around -1e393 and -1e333
    assert!(qstudent(0.05_f64, 1e-20, false).is_err());
    assert!(qstudent(0.3_f64, 1e-100, false).is_err());
    assert!(qstudent(0.3_f64, 1e-100, true).is_err());
}

#[test]
fn qstudent_tail_flag_negates() {
    for &(nu, p) in &[(3.0, 0.1), (4.5, 0.7), (1e6, 0.01)] {
        let lower = qstudent(nu, p, false).unwrap();
        let upper = qstudent(nu, p, true).unwrap();
        assert_eq!(lower, -upper, "nu={nu} p={p}");
    }
}

#[test]
fn qstudent_rejects_invalid_arguments() {
    assert!(qstudent(3.0_f64, 0.0, false).unwrap_err().is_invalid_argument());
    assert!(qstudent(3.0_f64, 1.0, true).unwrap_err().is_invalid_argument());
    assert!(qstudent(0.0_f64, 0.5, false).unwrap_err().is_invalid_argument());
}

// ═══════════════════════════════════════════════════════════════════
// Student variates
// ═══════════════════════════════════════════════════════════════════

#[test]
fn rstudent_is_reproducible() {
    let mut a = StdRng::seed_from_u64(7);
    let mut b = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        assert_eq!(rstudent(4.5_f64, &mut a), rstudent(4.5_f64, &mut b));
    }
}

#[test]
fn rstudent_empirical_cdf() {
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 20_000;
    let below = (0..n).filter(|_| rstudent(5.0_f64, &mut rng) < 1.0).count();
    let expected = pstudent(5.0_f64, 1.0, false);
    let freq = below as f64 / n as f64;
    // ~5 standard errors
    assert!((freq - expected).abs() < 0.015, "{freq} vs {expected}");
}

#[test]
fn rstudent_invalid_nu() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(rstudent(-1.0_f64, &mut rng).is_nan());
}

// ═══════════════════════════════════════════════════════════════════
// Pareto
// ═══════════════════════════════════════════════════════════════════

#[test]
fn ppareto_reference() {
    assert_rel(ppareto(10.0_f64, 1.0, 2.0, 0.0, true), 0.01, 1e-15, "survival");
    assert_rel(ppareto(10.0_f64, 1.0, 2.0, 0.0, false), 0.99, 1e-15, "cdf");
    // just above the lower bound: F ≈ α·ε/β
    assert_rel(ppareto(1.0 + 1e-12, 1.0, 3.0, 0.0, false), 3e-12, 1e-3, "near bound");
}

#[test]
fn ppareto_outside_support() {
    assert_eq!(ppareto(1.5_f64, 2.0, 1.0, -0.5, false), 0.0);
    assert_eq!(ppareto(1.5_f64, 2.0, 1.0, -0.5, true), 1.0);
    assert_eq!(ppareto(f64::INFINITY, 2.0, 1.0, -0.5, false), 1.0);
}

#[test]
fn dpareto_reference() {
    // α/β at the lower bound
    assert_rel(dpareto(2.0_f64, 2.0, 3.0, 0.0), 1.5, 1e-15, "at bound");
    assert_eq!(dpareto(1.0_f64, 2.0, 3.0, 0.0), 0.0);
}

#[test]
fn pareto_invalid_parameters() {
    assert!(ppareto(2.0_f64, 0.0, 1.0, 0.0, false).is_nan());
    assert!(dpareto(2.0_f64, 1.0, -1.0, 0.0).is_nan());
    assert!(qpareto(0.5_f64, 1.0, 0.0, 0.0, false).unwrap_err().is_invalid_argument());
    assert!(qpareto(1.0_f64, 1.0, 1.0, 0.0, false).unwrap_err().is_invalid_argument());
}

#[test]
fn rpareto_respects_support() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..1000 {
        let x = rpareto(2.0_f64, 1.5, 1.0, &mut rng);
        assert!(x >= 3.0, "{x}");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn student_cdf_and_tail_are_complementary(nu in 0.2f64..2e6, x in -50.0f64..50.0) {
        let p = pstudent(nu, x, false);
        let q = pstudent(nu, x, true);
        prop_assert!((p + q - 1.0).abs() < 1e-12, "nu={} x={} p={} q={}", nu, x, p, q);
        prop_assert_eq!(q, pstudent(nu, -x, false));
    }

    #[test]
    fn student_cdf_is_monotone(nu in 0.5f64..1e3, x in -20.0f64..20.0, dx in 1e-3f64..5.0) {
        prop_assert!(pstudent(nu, x, false) <= pstudent(nu, x + dx, false));
    }

    #[test]
    fn student_tail_is_monotone_out_to_f64_max(
        nu in 0.01f64..1e6,
        log_x in -2.0f64..300.0,
        factor in 1.0f64..10.0,
    ) {
        let x = 10f64.powf(log_x);
        let (near, far) = (pstudent(nu, x, true), pstudent(nu, x * factor, true));
        prop_assert!(far <= near * (1.0 + 1e-12), "nu={} x={} factor={}: {} then {}", nu, x, factor, near, far);
        if near > 0.0 {
            // the tail decays like x^-ν; it never drops to zero before it underflows
            let floor = (-nu * (factor.ln() + 1.0) + near.ln()).exp();
            prop_assert!(far > 0.0 || floor < 1e-300, "nu={} x={}: tail vanished", nu, x);
        }
    }

    #[test]
    fn student_quantile_round_trip(nu in 0.5f64..1e6, p in 1e-12f64..0.999_999) {
        let x = qstudent(nu, p, false).unwrap();
        let back = pstudent(nu, x, false);
        prop_assert!((back - p).abs() <= 1e-10 * p.min(1.0 - p).max(1e-3), "nu={} p={} x={} back={}", nu, p, x, back);
    }

    #[test]
    fn student_quantile_is_a_root_or_an_error(nu in 0.01f64..1e6, log_p in -300.0f64..-0.31) {
        let p = 10f64.powf(log_p);
        match qstudent(nu, p, false) {
            Ok(x) => {
                prop_assert!(x.is_finite());
                let back = pstudent(nu, x, false);
                prop_assert!((back / p - 1.0).abs() < 1e-8, "nu={} p={} x={} back={}", nu, p, x, back);
            }
            // only a quantile beyond the f64 range may fail
            Err(_) => prop_assert!(pstudent(nu, -f64::MAX, false) > p, "nu={} p={}", nu, p),
        }
    }

    #[test]
    fn integer_nu_matches_incomplete_beta_neighbour(n in 3u32..=7, x in 0.1f64..30.0) {
        // the closed form at ν and the beta branch just above ν agree to first order
        let nu = f64::from(n);
        let exact = pstudent(nu, x, true);
        let nearby = pstudent(nu * (1.0 + 1e-9), x, true);
        prop_assert!((exact / nearby - 1.0).abs() < 1e-6, "n={} x={}", n, x);
    }

    #[test]
    fn pareto_quantile_round_trip(p in 1e-9f64..0.999, scale in 0.1f64..10.0, shape in 0.2f64..8.0) {
        let x = qpareto(p, scale, shape, 1.0, false).unwrap();
        let back = ppareto(x, scale, shape, 1.0, false);
        prop_assert!((back / p - 1.0).abs() < 1e-9, "p={} back={}", p, back);
    }
}
