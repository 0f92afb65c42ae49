use super::*;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

// ═══════════════════════════════════════════════════════════════════
// Brent
// ═══════════════════════════════════════════════════════════════════

#[test]
fn brent_sqrt2() {
    let r = brent(|x| x * x - 2.0, 0.0, 2.0, &RootSettings::default()).unwrap();
    assert_near(r.x, core::f64::consts::SQRT_2, 1e-11, "brent √2");
    assert_near(r.fx, 0.0, 1e-11, "brent f(√2)");
}

#[test]
fn brent_cubic() {
    // x^3 - x - 2, root near 1.5214
    let r = brent(|x: f64| x * x * x - x - 2.0, 1.0, 2.0, &RootSettings::default()).unwrap();
    assert!(r.fx.abs() < 1e-10, "brent cubic");
}

#[test]
fn brent_reversed_bracket() {
    let r = brent(|x: f64| x.sin(), 4.0, 3.0, &RootSettings::default()).unwrap();
    assert_near(r.x, core::f64::consts::PI, 1e-11, "brent sin root");
}

#[test]
fn brent_root_at_endpoint() {
    let r = brent(|x: f64| x - 1.0, 1.0, 3.0, &RootSettings::default()).unwrap();
    assert_eq!(r.x, 1.0);
    assert_eq!(r.iterations, 0);
}

#[test]
fn brent_invalid_bracket() {
    let r = brent(|x| x * x + 1.0, 0.0, 2.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::BracketInvalid);
}

#[test]
fn brent_not_finite() {
    let r = brent(|x: f64| if x > 1.5 { f64::NAN } else { x - 1.0 }, 0.0, 2.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::NotFinite);
}

#[test]
fn brent_relative_tolerance_tiny_root() {
    // Root at 1e-200: an absolute tolerance would stop immediately.
    let root = 1e-200_f64;
    let r = brent(|x: f64| (x / root).ln(), 1e-201, 1e-199, &RootSettings::relative()).unwrap();
    assert!((r.x / root - 1.0).abs() < 1e-13, "relative root {}", r.x);
}

#[test]
fn brent_f32() {
    let settings = RootSettings::<f32>::default();
    let r = brent(|x: f32| x * x - 2.0, 0.0f32, 2.0f32, &settings).unwrap();
    assert!((r.x - core::f32::consts::SQRT_2).abs() < 1e-5, "brent f32");
}

#[test]
fn brent_max_iterations() {
    let settings = RootSettings { max_iter: 2, ..RootSettings::relative() };
    let r = brent(|x: f64| x.powi(3) - 2.0, 0.0, 100.0, &settings);
    assert_eq!(r.unwrap_err(), OptimError::MaxIterations);
}

// ═══════════════════════════════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════════════════════════════

#[test]
fn error_display() {
    assert_eq!(format!("{}", OptimError::MaxIterations), "maximum iterations exceeded");
    assert_eq!(
        format!("{}", OptimError::BracketInvalid),
        "bracket endpoints must have opposite signs"
    );
}

#[test]
fn settings_defaults() {
    let rs: RootSettings<f64> = RootSettings::default();
    assert_eq!(rs.max_iter, 100);
    let rel: RootSettings<f64> = RootSettings::relative();
    assert_eq!(rel.f_tol, 0.0);
}
