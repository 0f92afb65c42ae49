use super::*;

#[test]
fn point_basics() {
    let mut p = Point::from([1.0, 2.5, -3.0]);
    assert_eq!(p.dimension(), 3);
    assert_eq!(p[1], 2.5);
    p[2] = 4.0;
    assert_eq!(p.as_slice(), &[1.0, 2.5, 4.0]);
    assert_eq!(Point::zeros(2).into_vec(), vec![0.0, 0.0]);
}

#[test]
fn point_display() {
    assert_eq!(format!("{}", Point::from([1.0, 0.5, -2.0])), "[1,0.5,-2]");
    assert_eq!(format!("{}", Point::default()), "[]");
}

#[test]
fn sample_from_rows() {
    let s = Sample::from_rows(3, (0..12).map(f64::from).collect()).unwrap();
    assert_eq!(s.size(), 4);
    assert_eq!(s.dimension(), 3);
    assert_eq!(s.row(2), &[6.0, 7.0, 8.0]);
    assert_eq!(s[(3, 1)], 10.0);
    assert_eq!(s.rows().len(), 4);
}

#[test]
fn sample_from_rows_rejects_ragged_buffer() {
    let err = Sample::from_rows(3, vec![1.0; 7]).unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(Sample::from_rows(0, vec![]).is_err());
}

#[test]
fn sample_from_points() {
    let pts = vec![Point::from([1.0, 2.0]), Point::from([3.0, 4.0])];
    let s = Sample::from_points(&pts).unwrap();
    assert_eq!(s.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(s.point(1), pts[1]);
}

#[test]
fn sample_from_points_dimension_mismatch() {
    let pts = vec![Point::from([1.0, 2.0]), Point::from([3.0])];
    assert_eq!(
        Sample::from_points(&pts).unwrap_err(),
        Error::DimensionMismatch { expected: 2, got: 1 }
    );
    assert!(Sample::from_points(&[]).is_err());
}

#[test]
fn sample_push_and_extend() {
    let mut s = Sample::with_dimension(2);
    assert!(s.is_empty());
    s.push(&[1.0, 2.0]).unwrap();
    assert!(s.push(&[1.0]).is_err());
    let other = Sample::from_rows(2, vec![3.0, 4.0, 5.0, 6.0]).unwrap();
    s.extend(&other).unwrap();
    assert_eq!(s.size(), 3);
    assert!(s.extend(&Sample::with_dimension(1)).is_err());
}

#[test]
fn sample_truncate_front_keeps_latest_rows() {
    let mut s = Sample::from_rows(1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    s.truncate_front(2);
    assert_eq!(s.as_slice(), &[3.0, 4.0]);
    s.truncate_front(5);
    assert_eq!(s.size(), 2);
}

#[test]
fn sample_row_mut() {
    let mut s = Sample::zeros(2, 2);
    s.row_mut(1)[0] = 9.0;
    s[(0, 1)] = 7.0;
    assert_eq!(s.into_vec(), vec![0.0, 7.0, 9.0, 0.0]);
}

#[test]
#[should_panic]
fn sample_index_column_out_of_range() {
    let s = Sample::zeros(2, 2);
    let _ = s[(0, 2)];
}
