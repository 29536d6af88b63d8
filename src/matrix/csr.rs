//! Compressed Sparse Row (CSR) storage for the sparse engine

use std::fmt;
use tracing::trace;

use crate::scalar::Real;

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Column indices within each row are strictly ascending. Each matrix owns
/// its arrays exclusively; `clone` copies them. Allocated capacity is
/// tracked separately from the logical size so that row edits can grow in
/// place (see [`SparseMatrix::reserve`]).
#[derive(Clone, PartialEq)]
pub struct SparseMatrix<T> {
    /// Number of rows in the matrix
    pub(crate) n_rows: usize,

    /// Number of columns in the matrix
    pub(crate) n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub(crate) row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub(crate) col_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub(crate) values: Vec<T>,
}

/// Single-precision sparse matrix
pub type SparseMatrixF32 = SparseMatrix<f32>;

/// Double-precision sparse matrix
pub type SparseMatrixF64 = SparseMatrix<f64>;

impl<T: Real> Default for SparseMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> SparseMatrix<T> {
    /// Creates an empty 0×0 matrix
    pub fn new() -> Self {
        Self::zeros(0, 0)
    }

    /// Creates a matrix with the given dimensions and no stored entries
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }

    /// Adopts pre-built CSR arrays without copying them
    ///
    /// The number of nonzeros is taken from `row_ptr[n_rows]`; longer
    /// `col_idx`/`values` buffers are truncated to it and their extra length
    /// is kept as capacity. Nothing else is validated: the caller guarantees
    /// monotone offsets and sorted, in-range column indices.
    ///
    /// # Panics
    ///
    /// Panics if `row_ptr` has fewer than `n_rows + 1` entries or the index
    /// and value buffers are shorter than `row_ptr[n_rows]`.
    pub fn from_raw_parts(
        n_rows: usize,
        n_cols: usize,
        mut row_ptr: Vec<usize>,
        mut col_idx: Vec<usize>,
        mut values: Vec<T>,
    ) -> Self {
        let nnz = row_ptr[n_rows];
        row_ptr.truncate(n_rows + 1);
        assert!(
            col_idx.len() >= nnz && values.len() >= nnz,
            "index and value buffers must hold row_ptr[n_rows] entries"
        );
        col_idx.truncate(nnz);
        values.truncate(nnz);

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Releases the CSR arrays as `(row_ptr, col_idx, values)`
    pub fn into_raw_parts(self) -> (Vec<usize>, Vec<usize>, Vec<T>) {
        (self.row_ptr, self.col_idx, self.values)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.n_cols
    }

    /// Dimensions as `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Allocated room for stored entries
    pub fn nnz_capacity(&self) -> usize {
        self.col_idx.capacity().min(self.values.capacity())
    }

    /// Allocated room for row offsets (always at least `rows + 1`)
    pub fn row_capacity(&self) -> usize {
        self.row_ptr.capacity()
    }

    /// Row offsets (length `rows + 1`)
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Column index of every stored entry
    pub fn col_idx(&self) -> &[usize] {
        &self.col_idx
    }

    /// Every stored value, aligned with [`col_idx`](Self::col_idx)
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Sets the allocated capacities of the storage arrays
    ///
    /// Without `preserve`, the content is discarded and fresh storage with
    /// the requested capacities is allocated; the matrix keeps its shape but
    /// holds no entries. With `preserve`, capacities grow to at least
    /// `max(requested, current)` and all entries are kept.
    pub fn reserve(&mut self, nnz_capacity: usize, row_capacity: usize, preserve: bool) {
        let row_capacity = row_capacity.max(self.n_rows + 1);

        if !preserve {
            trace!(nnz_capacity, row_capacity, "reallocating empty storage");
            self.row_ptr = Vec::with_capacity(row_capacity);
            self.row_ptr.resize(self.n_rows + 1, 0);
            self.col_idx = Vec::with_capacity(nnz_capacity);
            self.values = Vec::with_capacity(nnz_capacity);
            return;
        }

        let nnz = self.nnz();
        if nnz_capacity > self.nnz_capacity() {
            trace!(from = self.nnz_capacity(), to = nnz_capacity, "growing nonzero storage");
            self.col_idx.reserve_exact(nnz_capacity - nnz);
            self.values.reserve_exact(nnz_capacity - nnz);
        }
        if row_capacity > self.row_ptr.capacity() {
            self.row_ptr.reserve_exact(row_capacity - self.row_ptr.len());
        }
    }

    /// Storage range of row `i` within `col_idx`/`values`
    #[inline]
    pub(crate) fn row_range(&self, i: usize) -> std::ops::Range<usize> {
        self.row_ptr[i]..self.row_ptr[i + 1]
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let range = self.row_range(i);
        self.col_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&col, val)| (col, val))
    }

    /// Stored value at `(row, col)`, if any
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.n_rows {
            return None;
        }
        let range = self.row_range(row);
        self.col_idx[range.clone()]
            .binary_search(&col)
            .ok()
            .map(|k| self.values[range.start + k])
    }
}

impl<T: Real> fmt::Debug for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrix {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let range = self.row_range(i);

                if range.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    let shown = 5.min(range.len());

                    for j in range.start..(range.start + shown) {
                        write!(f, "({}, {:?}) ", self.col_idx[j], self.values[j])?;
                    }

                    if range.len() > shown {
                        write!(f, "... ({} more)", range.len() - shown)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix<f64> {
        //    [1 2 0]
        //    [0 3 0]
        //    [4 0 5]
        SparseMatrix::from_raw_parts(
            3,
            3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        )
    }

    #[test]
    fn test_empty_matrix() {
        let m = SparseMatrix::<f64>::new();
        assert_eq!(m.shape(), (0, 0));
        assert_eq!(m.nnz(), 0);
        assert_eq!(m.row_ptr(), &[0]);
        assert_eq!(SparseMatrix::<f32>::default().shape(), (0, 0));
    }

    #[test]
    fn test_row_iter() {
        let matrix = sample();

        let row0: Vec<_> = matrix.row_iter(0).collect();
        assert_eq!(row0, vec![(0, &1.0), (1, &2.0)]);

        let row1: Vec<_> = matrix.row_iter(1).collect();
        assert_eq!(row1, vec![(1, &3.0)]);

        let row2: Vec<_> = matrix.row_iter(2).collect();
        assert_eq!(row2, vec![(0, &4.0), (2, &5.0)]);
    }

    #[test]
    fn test_identity() {
        let identity = SparseMatrix::<f32>::identity(3);

        assert_eq!(identity.shape(), (3, 3));
        assert_eq!(identity.nnz(), 3);
        assert_eq!(identity.row_ptr(), &[0, 1, 2, 3]);
        assert_eq!(identity.col_idx(), &[0, 1, 2]);
        assert_eq!(identity.values(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_get() {
        let matrix = sample();
        assert_eq!(matrix.get(0, 1), Some(2.0));
        assert_eq!(matrix.get(2, 2), Some(5.0));
        assert_eq!(matrix.get(1, 0), None);
        assert_eq!(matrix.get(7, 0), None);
    }

    #[test]
    fn test_from_raw_parts_keeps_spare_capacity() {
        let m = SparseMatrix::from_raw_parts(
            2,
            2,
            vec![0, 1, 2],
            vec![0, 1, 9, 9],
            vec![1.0f64, 2.0, 0.0, 0.0],
        );
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.col_idx(), &[0, 1]);
        assert!(m.nnz_capacity() >= 4);
    }

    #[test]
    fn test_reserve_preserve_keeps_content() {
        let mut m = sample();
        m.reserve(32, 10, true);
        assert!(m.nnz_capacity() >= 32);
        assert!(m.row_capacity() >= 10);
        assert_eq!(m, sample());

        // requests below the current size never shrink
        m.reserve(1, 1, true);
        assert!(m.nnz_capacity() >= 32);
        assert_eq!(m.nnz(), 5);
    }

    #[test]
    fn test_reserve_discard() {
        let mut m = sample();
        m.reserve(8, 0, false);
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.nnz(), 0);
        assert_eq!(m.row_ptr(), &[0, 0, 0, 0]);
        assert!(m.nnz_capacity() >= 8);
        assert!(m.row_capacity() >= 4);
    }

    #[test]
    fn test_debug_output() {
        let text = format!("{:?}", sample());
        assert!(text.contains("dimensions: 3 × 3"));
        assert!(text.contains("row 1: (1, 3.0)"));
    }
}
