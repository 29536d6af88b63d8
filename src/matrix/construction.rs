//! Building sparse matrices from dense matrices and coordinate lists

use ndarray::{ArrayBase, Data, Ix2};
use std::collections::BTreeMap;

use crate::error::{check_index, Result};
use crate::matrix::SparseMatrix;
use crate::scalar::{above_tolerance, Real};
use crate::utils::exclusive_scan;

/// Coordinate list keyed by `(row, column)`, iterated in row-major order
pub type Coordinates<T> = BTreeMap<(usize, usize), T>;

impl<T: Real> SparseMatrix<T> {
    /// Creates a sparse matrix from a dense one, dropping entries with
    /// magnitude at or below [`Real::EPS`]
    pub fn from_dense<S>(m: &ArrayBase<S, Ix2>) -> Self
    where
        S: Data<Elem = T>,
    {
        Self::from_dense_with_tolerance(m, T::EPS)
    }

    /// Creates a sparse matrix from a dense one, dropping entries with
    /// magnitude at or below `eps`
    pub fn from_dense_with_tolerance<S>(m: &ArrayBase<S, Ix2>, eps: T) -> Self
    where
        S: Data<Elem = T>,
    {
        let (n_rows, n_cols) = m.dim();
        let entries = m
            .indexed_iter()
            .filter(|&(_, &v)| above_tolerance(v, eps))
            .map(|(pos, &v)| (pos, v));

        // indexed_iter visits elements in logical row-major order for any layout
        Self::from_sorted_entries(n_rows, n_cols, entries, 0)
    }

    /// Creates a sparse matrix from a coordinate list
    ///
    /// Every listed value is stored, zeros included.
    pub fn from_coordinates(n_rows: usize, n_cols: usize, coords: &Coordinates<T>) -> Result<Self> {
        #[cfg(feature = "strict-bounds")]
        for &(row, col) in coords.keys() {
            check_index!(row, n_rows);
            check_index!(col, n_cols);
        }

        Ok(Self::from_sorted_entries(
            n_rows,
            n_cols,
            coords.iter().map(|(&pos, &v)| (pos, v)),
            coords.len(),
        ))
    }

    /// Replaces this matrix with one built from a coordinate list
    pub fn set(&mut self, n_rows: usize, n_cols: usize, coords: &Coordinates<T>) -> Result<()> {
        *self = Self::from_coordinates(n_rows, n_cols, coords)?;
        Ok(())
    }

    /// Collects every stored entry into a coordinate list
    pub fn to_coordinates(&self) -> Coordinates<T> {
        let mut coords = Coordinates::new();
        for row in 0..self.n_rows {
            for (col, &v) in self.row_iter(row) {
                coords.insert((row, col), v);
            }
        }
        coords
    }

    /// Builds exact-fit storage from entries sorted by row, then column
    ///
    /// One pass appends indices and values while counting entries per row;
    /// the offsets are the exclusive scan of those counts.
    pub(crate) fn from_sorted_entries<I>(n_rows: usize, n_cols: usize, entries: I, size_hint: usize) -> Self
    where
        I: IntoIterator<Item = ((usize, usize), T)>,
    {
        let mut row_counts = vec![0; n_rows];
        let mut col_idx = Vec::with_capacity(size_hint);
        let mut values = Vec::with_capacity(size_hint);

        for ((row, col), v) in entries {
            row_counts[row] += 1;
            col_idx.push(col);
            values.push(v);
        }
        col_idx.shrink_to_fit();
        values.shrink_to_fit();

        Self {
            n_rows,
            n_cols,
            row_ptr: exclusive_scan(&row_counts),
            col_idx,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_dense_filters_small_values() {
        let dense = array![[1.0, 0.0, 1e-20], [0.0, 0.0, 0.0], [0.0, -2.0, 3.0]];
        let m = SparseMatrix::from_dense(&dense);

        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.nnz(), 3);
        assert_eq!(m.row_ptr(), &[0, 1, 1, 3]);
        assert_eq!(m.col_idx(), &[0, 1, 2]);
        assert_eq!(m.values(), &[1.0, -2.0, 3.0]);
        assert_eq!(m.nnz_capacity(), 3);
    }

    #[test]
    fn test_from_dense_with_tolerance() {
        let dense = array![[0.5f32, 0.05], [-0.2, 0.01]];
        let m = SparseMatrix::from_dense_with_tolerance(&dense, 0.1);
        assert_eq!(m.col_idx(), &[0, 0]);
        assert_eq!(m.values(), &[0.5, -0.2]);
    }

    #[test]
    fn test_from_coordinates() {
        let mut coords = Coordinates::new();
        coords.insert((1, 2), 3.0);
        coords.insert((0, 0), 2.0);
        coords.insert((3, 1), 4.0);

        let m = SparseMatrix::from_coordinates(4, 3, &coords).unwrap();
        assert_eq!(m.row_ptr(), &[0, 1, 2, 2, 3]);
        assert_eq!(m.col_idx(), &[0, 2, 1]);
        assert_eq!(m.values(), &[2.0, 3.0, 4.0]);
        assert_eq!(m.to_coordinates(), coords);
    }

    #[test]
    fn test_from_empty_coordinates() {
        let m = SparseMatrix::<f64>::from_coordinates(2, 5, &Coordinates::new()).unwrap();
        assert_eq!(m.shape(), (2, 5));
        assert_eq!(m.nnz(), 0);
        assert_eq!(m.row_ptr(), &[0, 0, 0]);
    }

    #[cfg(feature = "strict-bounds")]
    #[test]
    fn test_from_coordinates_out_of_range() {
        use crate::error::SparseError;

        let mut coords = Coordinates::new();
        coords.insert((0, 3), 1.0f64);
        assert_eq!(
            SparseMatrix::from_coordinates(2, 3, &coords),
            Err(SparseError::IndexOutOfRange { index: 3, bound: 3 })
        );
    }

    #[test]
    fn test_set_replaces_content() {
        let mut m = SparseMatrix::<f64>::identity(4);
        let mut coords = Coordinates::new();
        coords.insert((0, 1), 7.0);
        m.set(1, 2, &coords).unwrap();
        assert_eq!(m.shape(), (1, 2));
        assert_eq!(m.row_ptr(), &[0, 1]);
        assert_eq!(m.get(0, 1), Some(7.0));
    }
}
