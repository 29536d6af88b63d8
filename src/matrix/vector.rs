//! Sparse vector used for row/column extraction and outer products

use ndarray::{Array1, ArrayBase, Data, Ix1};

use crate::error::{check_index, Result, SparseError};
use crate::scalar::{above_tolerance, Real};

/// A sparse vector of dimension `len` with sorted, unique indices
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector<T> {
    len: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

/// Single-precision sparse vector
pub type SparseVectorF32 = SparseVector<f32>;

/// Double-precision sparse vector
pub type SparseVectorF64 = SparseVector<f64>;

impl<T: Real> SparseVector<T> {
    /// Creates a sparse vector from parallel index/value arrays
    ///
    /// Indices must be strictly ascending; the last one must be below `len`.
    pub fn new(len: usize, indices: Vec<usize>, values: Vec<T>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(SparseError::SizeMismatch {
                op: "sparse vector",
                expected: (indices.len(), 1),
                got: (values.len(), 1),
            });
        }
        for pair in indices.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SparseError::InvalidRange {
                    start: pair[0],
                    end: pair[1],
                    bound: len,
                });
            }
        }
        if let Some(&last) = indices.last() {
            check_index!(last, len);
        }

        Ok(Self::from_sorted_parts(len, indices, values))
    }

    pub(crate) fn from_sorted_parts(len: usize, indices: Vec<usize>, values: Vec<T>) -> Self {
        Self {
            len,
            indices,
            values,
        }
    }

    /// Collects the entries of `v` with magnitude above [`Real::EPS`]
    pub fn from_dense<S>(v: &ArrayBase<S, Ix1>) -> Self
    where
        S: Data<Elem = T>,
    {
        let (indices, values) = v
            .iter()
            .enumerate()
            .filter(|&(_, &x)| above_tolerance(x, T::EPS))
            .map(|(i, &x)| (i, x))
            .unzip();

        Self {
            len: v.len(),
            indices,
            values,
        }
    }

    /// Dimension of the vector
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-dimensional vector
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Indices of the stored entries, ascending
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values, aligned with [`indices`](Self::indices)
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterator over `(index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Scatters the stored entries into `out`, which must hold `len` values
    pub(crate) fn scatter_into(&self, out: &mut [T]) {
        for (i, v) in self.iter() {
            out[i] = v;
        }
    }

    /// Dense copy of the vector
    pub fn to_dense(&self) -> Array1<T> {
        let mut out = Array1::zeros(self.len);
        for (i, v) in self.iter() {
            out[i] = v;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_dense() {
        let v = SparseVector::from_dense(&array![0.0, 2.0, 0.0, -5.0]);
        assert_eq!(v.len(), 4);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.indices(), &[1, 3]);
        assert_eq!(v.values(), &[2.0, -5.0]);
        assert_eq!(v.to_dense(), array![0.0, 2.0, 0.0, -5.0]);
    }

    #[test]
    fn test_new_validates() {
        assert!(SparseVector::new(4, vec![0, 2], vec![1.0f64, 2.0]).is_ok());
        assert!(SparseVector::new(4, vec![2, 2], vec![1.0f64, 2.0]).is_err());
        assert!(SparseVector::new(4, vec![0], vec![1.0f64, 2.0])
            .unwrap_err()
            .is_size_mismatch());
    }

    #[cfg(feature = "strict-bounds")]
    #[test]
    fn test_new_rejects_index_past_end() {
        assert_eq!(
            SparseVector::new(3, vec![0, 3], vec![1.0f32, 1.0]),
            Err(SparseError::IndexOutOfRange { index: 3, bound: 3 })
        );
    }
}
