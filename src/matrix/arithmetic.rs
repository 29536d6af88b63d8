//! In-place arithmetic on sparse matrices
//!
//! Addition and subtraction merge the two sparsity patterns row by row.
//! When every position stored by the right operand is already stored by
//! the receiver, values are updated in place without touching the
//! structure; otherwise the receiver's storage is rebuilt from the union
//! pattern. Merged values are not re-filtered, so a cancellation can leave
//! an explicitly stored zero.

use std::cmp::Ordering;
use std::ops::{MulAssign, Neg};
use tracing::{debug, trace};

use crate::error::{Result, SparseError};
use crate::matrix::SparseMatrix;
use crate::scalar::Real;

/// Size of the union of two sorted index slices, and whether `b ⊆ a`
fn union_count(a: &[usize], b: &[usize]) -> (usize, bool) {
    let (mut i, mut j) = (0, 0);
    let mut count = 0;
    let mut contained = true;

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => {
                contained = false;
                j += 1;
            }
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
        count += 1;
    }

    if j < b.len() {
        contained = false;
    }
    (count + (a.len() - i) + (b.len() - j), contained)
}

impl<T: Real> SparseMatrix<T> {
    /// Adds `other` to this matrix
    pub fn add_in_place(&mut self, other: &SparseMatrix<T>) -> Result<()> {
        self.merge_in_place(other, "add", |a, b| a + b, |b| b)
    }

    /// Subtracts `other` from this matrix
    pub fn sub_in_place(&mut self, other: &SparseMatrix<T>) -> Result<()> {
        self.merge_in_place(other, "subtract", |a, b| a - b, |b| -b)
    }

    /// Multiplies every stored value by `scalar`
    pub fn scale_in_place(&mut self, scalar: T) {
        for v in &mut self.values {
            *v *= scalar;
        }
    }

    /// Negates every stored value
    pub fn negate(&mut self) {
        for v in &mut self.values {
            *v = -*v;
        }
    }

    fn merge_in_place(
        &mut self,
        other: &SparseMatrix<T>,
        op: &'static str,
        combine: impl Fn(T, T) -> T,
        only_other: impl Fn(T) -> T,
    ) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(SparseError::SizeMismatch {
                op,
                expected: self.shape(),
                got: other.shape(),
            });
        }

        let mut union_nnz = 0;
        let mut contained = true;
        for row in 0..self.n_rows {
            let (n, fits) = union_count(
                &self.col_idx[self.row_range(row)],
                &other.col_idx[other.row_range(row)],
            );
            union_nnz += n;
            contained &= fits;
        }

        if contained {
            trace!(op, nnz = self.nnz(), "pattern contained, updating values in place");
            for row in 0..self.n_rows {
                let mut k = self.row_ptr[row];
                for kb in other.row_range(row) {
                    let col = other.col_idx[kb];
                    while self.col_idx[k] != col {
                        k += 1;
                    }
                    self.values[k] = combine(self.values[k], other.values[kb]);
                    k += 1;
                }
            }
            return Ok(());
        }

        debug!(op, from = self.nnz(), to = union_nnz, "rebuilding sparsity pattern");

        let mut row_ptr = Vec::with_capacity(self.n_rows + 1);
        let mut col_idx = Vec::with_capacity(union_nnz);
        let mut values = Vec::with_capacity(union_nnz);
        row_ptr.push(0);

        for row in 0..self.n_rows {
            let (mut i, end_a) = (self.row_ptr[row], self.row_ptr[row + 1]);
            let (mut j, end_b) = (other.row_ptr[row], other.row_ptr[row + 1]);

            loop {
                let order = match (i < end_a, j < end_b) {
                    (false, false) => break,
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (true, true) => self.col_idx[i].cmp(&other.col_idx[j]),
                };
                match order {
                    Ordering::Less => {
                        col_idx.push(self.col_idx[i]);
                        values.push(self.values[i]);
                        i += 1;
                    }
                    Ordering::Greater => {
                        col_idx.push(other.col_idx[j]);
                        values.push(only_other(other.values[j]));
                        j += 1;
                    }
                    Ordering::Equal => {
                        col_idx.push(self.col_idx[i]);
                        values.push(combine(self.values[i], other.values[j]));
                        i += 1;
                        j += 1;
                    }
                }
            }
            row_ptr.push(col_idx.len());
        }

        self.row_ptr = row_ptr;
        self.col_idx = col_idx;
        self.values = values;
        Ok(())
    }
}

impl<T: Real> MulAssign<T> for SparseMatrix<T> {
    fn mul_assign(&mut self, scalar: T) {
        self.scale_in_place(scalar);
    }
}

impl<T: Real> Neg for SparseMatrix<T> {
    type Output = SparseMatrix<T>;

    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_union_count() {
        assert_eq!(union_count(&[0, 2, 4], &[2]), (3, true));
        assert_eq!(union_count(&[0, 2, 4], &[1, 4]), (4, false));
        assert_eq!(union_count(&[1], &[1, 5]), (2, false));
        assert_eq!(union_count(&[], &[]), (0, true));
    }

    #[test]
    fn test_add_fast_path_keeps_structure() {
        let mut a = SparseMatrix::from_dense(&array![[1.0, 0.0, 2.0], [0.0, 3.0, 4.0]]);
        let b = SparseMatrix::from_dense(&array![[0.0, 0.0, 5.0], [0.0, 1.0, 0.0]]);
        let col_idx = a.col_idx().to_vec();

        a.add_in_place(&b).unwrap();

        assert_eq!(a.col_idx(), &col_idx[..]);
        assert_eq!(a.values(), &[1.0, 7.0, 4.0, 4.0]);
    }

    #[test]
    fn test_add_general_path() {
        let mut a = SparseMatrix::from_dense(&array![[1.0, 0.0], [0.0, 0.0]]);
        let b = SparseMatrix::from_dense(&array![[2.0, 0.0], [0.0, 3.0]]);

        a.add_in_place(&b).unwrap();

        assert_eq!(a.row_ptr(), &[0, 1, 2]);
        assert_eq!(a.to_dense(), array![[3.0, 0.0], [0.0, 3.0]]);
    }

    #[test]
    fn test_same_count_different_pattern_rebuilds() {
        // both store two entries, at different positions
        let mut a = SparseMatrix::from_dense(&array![[1.0, 0.0], [0.0, 2.0]]);
        let b = SparseMatrix::from_dense(&array![[0.0, 5.0], [6.0, 0.0]]);

        a.add_in_place(&b).unwrap();

        assert_eq!(a.nnz(), 4);
        assert_eq!(a.to_dense(), array![[1.0, 5.0], [6.0, 2.0]]);
    }

    #[test]
    fn test_sub_in_place() {
        let mut a = SparseMatrix::from_dense(&array![[1.0, 0.0, 2.0]]);
        let b = SparseMatrix::from_dense(&array![[1.0, 4.0, 0.0]]);

        a.sub_in_place(&b).unwrap();

        // the cancelled entry stays stored as an explicit zero
        assert_eq!(a.col_idx(), &[0, 1, 2]);
        assert_eq!(a.values(), &[0.0, -4.0, 2.0]);
    }

    #[test]
    fn test_size_mismatch_leaves_operands() {
        let mut a = SparseMatrix::<f64>::identity(2);
        let b = SparseMatrix::<f64>::identity(3);

        let err = a.add_in_place(&b).unwrap_err();
        assert_eq!(
            err,
            SparseError::SizeMismatch {
                op: "add",
                expected: (2, 2),
                got: (3, 3),
            }
        );
        assert_eq!(a, SparseMatrix::identity(2));
        assert!(a.sub_in_place(&b).unwrap_err().is_size_mismatch());
    }

    #[test]
    fn test_scale_and_negate() {
        let mut a = SparseMatrix::from_dense(&array![[1.0f32, 0.0], [-2.0, 3.0]]);
        a.scale_in_place(2.0);
        assert_eq!(a.values(), &[2.0, -4.0, 6.0]);

        a *= 0.5;
        a.negate();
        assert_eq!(a.values(), &[-1.0, 2.0, -3.0]);

        let a = -a;
        assert_eq!(a.values(), &[1.0, -2.0, 3.0]);
    }
}
