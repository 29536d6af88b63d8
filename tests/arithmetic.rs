//! Tests for in-place arithmetic against dense computation

use ndarray::array;
use spatial_sparse::{SparseError, SparseMatrix};

#[test]
fn test_add_matches_dense() {
    let da = array![[1.0, 0.0, 2.0], [0.0, 0.0, 3.0], [4.0, 5.0, 0.0]];
    let db = array![[0.0, 1.0, 1.0], [0.0, 0.0, 0.0], [0.0, 2.0, 6.0]];

    let mut a = SparseMatrix::from_dense(&da);
    let b = SparseMatrix::from_dense(&db);
    a.add_in_place(&b).unwrap();

    assert_eq!(a.to_dense(), &da + &db);
    assert_eq!(a.nnz(), 7);
}

#[test]
fn test_subtract_matches_dense() {
    let da = array![[1.0, 0.0], [2.0, 3.0]];
    let db = array![[0.5, 4.0], [0.0, 0.0]];

    let mut a = SparseMatrix::from_dense(&da);
    a.sub_in_place(&SparseMatrix::from_dense(&db)).unwrap();

    assert_eq!(a.to_dense(), &da - &db);
}

#[test]
fn test_fast_path_does_not_reallocate() {
    let mut a = SparseMatrix::from_dense(&array![[1.0, 2.0], [3.0, 4.0]]);
    let b = SparseMatrix::<f64>::identity(2);
    let values_ptr = a.values().as_ptr();

    a.add_in_place(&b).unwrap();

    assert_eq!(a.values().as_ptr(), values_ptr);
    assert_eq!(a.values(), &[2.0, 2.0, 3.0, 5.0]);
}

#[test]
fn test_add_to_empty() {
    let mut a = SparseMatrix::<f64>::zeros(2, 2);
    let b = SparseMatrix::from_dense(&array![[0.0, 1.0], [2.0, 0.0]]);

    a.add_in_place(&b).unwrap();
    assert_eq!(a, b);

    a.sub_in_place(&b).unwrap();
    assert_eq!(a.values(), &[0.0, 0.0]);
}

#[test]
fn test_mismatch_leaves_both_operands() {
    let mut a = SparseMatrix::from_dense(&array![[1.0, 2.0]]);
    let b = SparseMatrix::from_dense(&array![[1.0], [2.0]]);
    let (a0, b0) = (a.clone(), b.clone());

    assert!(matches!(
        a.add_in_place(&b),
        Err(SparseError::SizeMismatch { .. })
    ));
    assert!(matches!(
        a.sub_in_place(&b),
        Err(SparseError::SizeMismatch { .. })
    ));
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn test_negate_twice() {
    let original = SparseMatrix::from_dense(&array![[1.0, -2.0], [0.0, 3.0]]);
    let twice = -(-original.clone());
    assert_eq!(twice, original);
}
