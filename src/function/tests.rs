use super::*;
use crate::config::{BATCH_CHUNK_ROWS, BOX_COX_TAYLOR_THRESHOLD};
use crate::persist::{Persist, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn ibc(lambda: &[f64], shift: &[f64]) -> InverseBoxCox {
    InverseBoxCox::with_shift(Point::from(lambda), Point::from(shift)).unwrap()
}

fn random_sample(size: usize, dimension: usize, seed: u64) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..size * dimension).map(|_| rng.random_range(-1.0..3.0)).collect();
    Sample::from_rows(dimension, data).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Inverse Box-Cox values
// ═══════════════════════════════════════════════════════════════════

#[test]
fn inverse_box_cox_power_branch() {
    let f = ibc(&[0.5, 2.0, -1.0], &[0.0, 1.0, 0.0]);
    let y = f.evaluate(&Point::from([1.0, 2.5, 0.5])).unwrap();
    assert!((y[0] - 2.25).abs() < 1e-15);
    assert!((y[1] - 2.0).abs() < 1e-15);
    assert!((y[2] - 2.0).abs() < 1e-15);
}

#[test]
fn inverse_box_cox_zero_lambda_is_exp() {
    let f = ibc(&[0.0], &[0.5]);
    let y = f.evaluate(&Point::from([2.0])).unwrap();
    assert!((y[0] - 1.5_f64.exp()).abs() < 1e-15);
}

#[test]
fn inverse_box_cox_taylor_branch() {
    let f = ibc(&[1e-12], &[0.0]);
    let x: f64 = 3.0;
    let y = f.evaluate(&Point::from([x])).unwrap();
    let expected = x.exp() * (1.0 - 0.5 * 1e-12 * x * x);
    assert_eq!(y[0], expected);
}

#[test]
fn inverse_box_cox_non_positive_base_is_an_error() {
    let f = ibc(&[2.0], &[0.0]);
    let err = f.evaluate(&Point::from([-1.0])).unwrap_err();
    assert!(err.is_invalid_argument());
    // base exactly zero
    assert!(f.evaluate(&Point::from([-0.5])).is_err());
    assert_eq!(f.calls_number(), 0);
}

#[test]
fn inverse_box_cox_near_singular_continuity() {
    let lambda = 1e-5;
    let f = ibc(&[lambda], &[0.0]);
    // λx² crosses the threshold at x = √(threshold/λ)
    let edge = (BOX_COX_TAYLOR_THRESHOLD / lambda).sqrt();
    for &sign in &[1.0, -1.0] {
        let below = f.evaluate(&Point::from([sign * edge * (1.0 - 1e-9)])).unwrap()[0];
        let above = f.evaluate(&Point::from([sign * edge * (1.0 + 1e-9)])).unwrap()[0];
        assert!((above - below).abs() < 1e-6, "jump {} at sign {sign}", (above - below).abs());
    }
}

#[test]
fn inverse_box_cox_dimension_mismatch() {
    let f = ibc(&[1.0, 1.0], &[0.0, 0.0]);
    assert_eq!(
        f.evaluate(&Point::from([1.0])).unwrap_err(),
        Error::DimensionMismatch { expected: 2, got: 1 }
    );
    let s = Sample::zeros(4, 3);
    assert_eq!(
        f.evaluate_sample(&s).unwrap_err(),
        Error::DimensionMismatch { expected: 2, got: 3 }
    );
    assert_eq!(f.calls_number(), 0);
}

#[test]
fn inverse_box_cox_construction_errors() {
    assert!(InverseBoxCox::with_shift(Point::from([1.0, 2.0]), Point::from([0.0])).is_err());
    assert!(InverseBoxCox::new(Point::default()).is_err());
    assert!(InverseBoxCox::new(Point::from([f64::NAN])).unwrap_err().is_invalid_argument());
}

// ═══════════════════════════════════════════════════════════════════
// Batches
// ═══════════════════════════════════════════════════════════════════

#[test]
fn batch_matches_pointwise() {
    let f = ibc(&[0.3, 1e-9, -0.2], &[0.1, 0.0, -0.5]);
    let s = random_sample(50, 3, 17);
    let batch = f.evaluate_sample(&s).unwrap();
    assert_eq!(batch.size(), 50);
    for (i, row) in s.rows().enumerate() {
        let y = f.evaluate(&Point::from(row)).unwrap();
        assert_eq!(batch.row(i), y.as_slice(), "row {i}");
    }
}

#[test]
fn batch_spanning_many_chunks_keeps_order() {
    let f = ibc(&[1.0], &[0.0]);
    let n = 3 * BATCH_CHUNK_ROWS + 17;
    let s = Sample::from_rows(1, (0..n).map(|i| i as f64).collect()).unwrap();
    let y = f.evaluate_sample(&s).unwrap();
    for i in 0..n {
        assert_eq!(y[(i, 0)], i as f64 + 1.0);
    }
}

#[test]
fn batch_reports_first_failing_row() {
    let f = ibc(&[2.0], &[0.0]);
    let n = 4 * BATCH_CHUNK_ROWS;
    let bad = [BATCH_CHUNK_ROWS + 3, 3 * BATCH_CHUNK_ROWS + 1];
    let data = (0..n).map(|i| if bad.contains(&i) { -5.0 } else { 1.0 }).collect();
    let s = Sample::from_rows(1, data).unwrap();
    match f.evaluate_sample(&s).unwrap_err() {
        Error::InvalidRow { row, source } => {
            assert_eq!(row, bad[0]);
            assert!(source.is_invalid_argument());
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(f.calls_number(), 0);
}

#[test]
fn batch_empty_sample() {
    let f = ibc(&[1.0, 2.0], &[0.0, 0.0]);
    let y = f.evaluate_sample(&Sample::with_dimension(2)).unwrap();
    assert!(y.is_empty());
    assert_eq!(y.dimension(), 2);
}

#[test]
fn map_rows_changes_dimension() {
    let s = random_sample(10, 3, 1);
    let norms = batch::map_rows(&s, 3, 1, |x, y| {
        y[0] = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        Ok(())
    })
    .unwrap();
    assert_eq!(norms.dimension(), 1);
    assert_eq!(norms.size(), 10);
}

// ═══════════════════════════════════════════════════════════════════
// Counter and history
// ═══════════════════════════════════════════════════════════════════

#[test]
fn calls_number_counts_points() {
    let f = ibc(&[0.5], &[0.0]);
    let n = 600;
    f.evaluate_sample(&random_sample(n, 1, 2)).unwrap();
    for i in 0..7 {
        f.evaluate(&Point::from([i as f64])).unwrap();
    }
    assert_eq!(f.calls_number(), n + 7);
}

#[test]
fn calls_number_under_concurrent_callers() {
    let f = ibc(&[0.5], &[0.0]);
    std::thread::scope(|scope| {
        for t in 0..4 {
            let f = &f;
            scope.spawn(move || {
                for i in 0..100 {
                    f.evaluate(&Point::from([(t * 100 + i) as f64 * 0.01])).unwrap();
                }
            });
        }
    });
    assert_eq!(f.calls_number(), 400);
}

#[test]
fn history_disabled_by_default() {
    let f = ibc(&[1.0], &[0.0]);
    f.evaluate(&Point::from([1.0])).unwrap();
    let h = f.state().history();
    assert_eq!(h.strategy(), HistoryStrategy::Null);
    assert!(h.is_empty());
}

#[test]
fn history_full_records_points_and_batches() {
    let f = ibc(&[1.0], &[0.0]);
    f.state().set_history_strategy(HistoryStrategy::Full);
    f.evaluate(&Point::from([1.0])).unwrap();
    f.evaluate_sample(&Sample::from_rows(1, vec![2.0, 3.0]).unwrap()).unwrap();
    let _ = f.evaluate(&Point::from([f64::NAN]));
    let h = f.state().history();
    assert_eq!(h.input().as_slice(), &[1.0, 2.0, 3.0]);
    assert_eq!(h.output().as_slice(), &[2.0, 3.0, 4.0]);
    f.state().clear_history();
    assert!(f.state().history().is_empty());
    assert_eq!(f.state().history().strategy(), HistoryStrategy::Full);
}

#[test]
fn history_last_keeps_recent_rows() {
    let f = ibc(&[1.0], &[0.0]);
    f.state().set_history_strategy(HistoryStrategy::Last(2));
    f.evaluate_sample(&Sample::from_rows(1, vec![1.0, 2.0, 3.0]).unwrap()).unwrap();
    f.evaluate(&Point::from([4.0])).unwrap();
    let h = f.state().history();
    assert_eq!(h.len(), 2);
    assert_eq!(h.input().as_slice(), &[3.0, 4.0]);
}

#[test]
fn clone_keeps_counter_and_name() {
    let mut f = ibc(&[1.0], &[0.0]);
    f.set_name("g");
    f.evaluate(&Point::from([1.0])).unwrap();
    let g = f.clone();
    assert_eq!(g.calls_number(), 1);
    assert_eq!(g.name(), "g");
    g.evaluate(&Point::from([1.0])).unwrap();
    assert_eq!(f.calls_number(), 1);
    assert_eq!(f, g);
}

// ═══════════════════════════════════════════════════════════════════
// Gradient, inverse, rendering
// ═══════════════════════════════════════════════════════════════════

#[test]
fn inverse_box_cox_gradient_matches_finite_difference() {
    let f = ibc(&[0.4, 1e-10, -0.3], &[0.0, 0.2, 0.1]);
    let x = Point::from([0.7, 1.3, 0.4]);
    let g = f.gradient(&x).unwrap();
    let h = 1e-6;
    for j in 0..3 {
        let mut xp = x.clone();
        let mut xm = x.clone();
        xp[j] += h;
        xm[j] -= h;
        let fd = (f.evaluate(&xp).unwrap()[j] - f.evaluate(&xm).unwrap()[j]) / (2.0 * h);
        assert!((g[j] - fd).abs() < 1e-7 * fd.abs().max(1.0), "component {j}: {} vs {fd}", g[j]);
    }
}

#[test]
fn box_cox_round_trip() {
    let f = BoxCox::with_shift(Point::from([0.25, 0.0, -1.5]), Point::from([1.0, -2.0, 0.5])).unwrap();
    let inv = f.inverse();
    let x = Point::from([3.0, 0.2, 1.7]);
    let back = inv.evaluate(&f.evaluate(&x).unwrap()).unwrap();
    for j in 0..3 {
        assert!((back[j] - x[j]).abs() < 1e-13 * x[j], "component {j}");
    }
    assert_eq!(inv.inverse(), f);
}

#[test]
fn box_cox_rejects_non_positive_input() {
    let f = BoxCox::new(Point::from([0.5])).unwrap();
    assert!(f.evaluate(&Point::from([0.0])).unwrap_err().is_invalid_argument());
    assert!(f.gradient(&Point::from([-1.0])).is_err());
}

#[test]
fn box_cox_gradient() {
    let f = BoxCox::new(Point::from([0.5, 0.0])).unwrap();
    let g = f.gradient(&Point::from([4.0, 2.0])).unwrap();
    assert!((g[0] - 0.5).abs() < 1e-15);
    assert!((g[1] - 0.5).abs() < 1e-15);
}

#[test]
fn rendering() {
    let mut f = ibc(&[0.5, 1.0], &[0.0, 2.0]);
    assert_eq!(f.to_string(), "InverseBoxCox(lambda=[0.5,1], shift=[0,2])");
    f.set_name("T");
    assert_eq!(
        f.repr(),
        "class=InverseBoxCoxEvaluation name=T dimension=2 lambda=[0.5,1] shift=[0,2]"
    );
    assert_eq!(f.inverse().to_string(), "BoxCox(lambda=[0.5,1], shift=[0,2])");
    assert_eq!(f.inverse().name(), "T");
}

// ═══════════════════════════════════════════════════════════════════
// Persistence
// ═══════════════════════════════════════════════════════════════════

#[test]
fn persist_round_trip_excludes_counter() {
    let f = ibc(&[0.5, -1.0], &[0.25, 0.0]);
    f.evaluate(&Point::from([1.0, 0.5])).unwrap();
    let record = f.save();
    assert_eq!(record.attribute_names(), vec!["lambda_", "shift_"]);
    assert_eq!(record.get("shift_").unwrap(), &[0.25, 0.0]);
    let g = InverseBoxCox::load(&record).unwrap();
    assert_eq!(g, f);
    assert_eq!(g.calls_number(), 0);
}

#[test]
fn persist_rejects_foreign_records() {
    let f = BoxCox::new(Point::from([0.5])).unwrap();
    let err = InverseBoxCox::load(&f.save()).unwrap_err();
    assert!(matches!(err, Error::Persist(_)));

    let newer = Record::new("InverseBoxCoxEvaluation", 2).with("lambda_", vec![1.0]).with("shift_", vec![0.0]);
    assert!(matches!(InverseBoxCox::load(&newer).unwrap_err(), Error::Persist(_)));

    let mismatched = Record::new("InverseBoxCoxEvaluation", 1)
        .with("lambda_", vec![1.0, 2.0])
        .with("shift_", vec![0.0]);
    assert!(InverseBoxCox::load(&mismatched).unwrap_err().is_invalid_argument());
}
