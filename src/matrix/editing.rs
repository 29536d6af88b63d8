//! Structural editing: row/column replacement and extraction

use ndarray::{ArrayBase, Data, Ix1};
use tracing::{debug, trace};

use crate::error::{check_index, Result, SparseError};
use crate::matrix::config::NNZ_GROWTH_FACTOR;
use crate::matrix::{SparseMatrix, SparseVector};
use crate::scalar::{above_tolerance, Real};

impl<T: Real> SparseMatrix<T> {
    /// Replaces row `row` with the entries of `v` above [`Real::EPS`]
    ///
    /// Later rows are shifted in place; storage grows geometrically when the
    /// row gains more entries than the spare capacity holds.
    pub fn set_row<S>(&mut self, row: usize, v: &ArrayBase<S, Ix1>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        check_index!(row, self.n_rows);
        if v.len() != self.n_cols {
            return Err(SparseError::SizeMismatch {
                op: "set_row",
                expected: (1, self.n_cols),
                got: (1, v.len()),
            });
        }

        let new_len = v.iter().filter(|&&x| above_tolerance(x, T::EPS)).count();
        let range = self.row_range(row);
        let old_len = range.len();
        let nnz = self.nnz();

        if new_len > old_len {
            let extra = new_len - old_len;
            if self.nnz_capacity() < nnz + extra {
                let target = (nnz + extra).max(self.nnz_capacity() * NNZ_GROWTH_FACTOR);
                self.reserve(target, self.row_capacity(), true);
            }

            self.col_idx.resize(nnz + extra, 0);
            self.values.resize(nnz + extra, T::zero());
            self.col_idx.copy_within(range.end..nnz, range.end + extra);
            self.values.copy_within(range.end..nnz, range.end + extra);
            for ptr in &mut self.row_ptr[row + 1..] {
                *ptr += extra;
            }
        } else if new_len < old_len {
            let fewer = old_len - new_len;
            self.col_idx.copy_within(range.end..nnz, range.end - fewer);
            self.values.copy_within(range.end..nnz, range.end - fewer);
            self.col_idx.truncate(nnz - fewer);
            self.values.truncate(nnz - fewer);
            for ptr in &mut self.row_ptr[row + 1..] {
                *ptr -= fewer;
            }
        }
        trace!(row, old_len, new_len, "row replaced");

        let mut k = range.start;
        for (col, &x) in v.iter().enumerate() {
            if above_tolerance(x, T::EPS) {
                self.col_idx[k] = col;
                self.values[k] = x;
                k += 1;
            }
        }

        Ok(())
    }

    /// Replaces column `col` with the entries of `v` above [`Real::EPS`]
    ///
    /// Columns are not indexed, so the whole matrix is rebuilt from its
    /// coordinate list.
    pub fn set_column<S>(&mut self, col: usize, v: &ArrayBase<S, Ix1>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        check_index!(col, self.n_cols);
        if v.len() != self.n_rows {
            return Err(SparseError::SizeMismatch {
                op: "set_column",
                expected: (self.n_rows, 1),
                got: (v.len(), 1),
            });
        }

        let mut coords = self.to_coordinates();
        coords.retain(|&(_, c), _| c != col);
        for (row, &x) in v.iter().enumerate() {
            if above_tolerance(x, T::EPS) {
                coords.insert((row, col), x);
            }
        }
        debug!(col, nnz = coords.len(), "rebuilding matrix for column edit");

        let len = coords.len();
        *self = Self::from_sorted_entries(self.n_rows, self.n_cols, coords, len);
        Ok(())
    }

    /// Copies row `row` out as a sparse vector of dimension `columns`
    pub fn row(&self, row: usize) -> Result<SparseVector<T>> {
        check_index!(row, self.n_rows);

        let range = self.row_range(row);
        Ok(SparseVector::from_sorted_parts(
            self.n_cols,
            self.col_idx[range.clone()].to_vec(),
            self.values[range].to_vec(),
        ))
    }

    /// Copies column `col` out as a sparse vector of dimension `rows`
    ///
    /// Every row is searched, so this costs a pass over the row slices.
    pub fn column(&self, col: usize) -> Result<SparseVector<T>> {
        check_index!(col, self.n_cols);

        let mut indices = Vec::new();
        let mut values = Vec::new();
        for row in 0..self.n_rows {
            let range = self.row_range(row);
            if let Ok(k) = self.col_idx[range.clone()].binary_search(&col) {
                indices.push(row);
                values.push(self.values[range.start + k]);
            }
        }

        Ok(SparseVector::from_sorted_parts(self.n_rows, indices, values))
    }

    /// Extracts rows `row_start..row_end` and columns `col_start..col_end`
    ///
    /// Column indices are re-based to `col_start`. Storage is sized exactly
    /// by a counting pass before the copy.
    pub fn sub_matrix(
        &self,
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<SparseMatrix<T>> {
        #[cfg(feature = "strict-bounds")]
        {
            if row_end < row_start || row_end > self.n_rows {
                return Err(SparseError::InvalidRange {
                    start: row_start,
                    end: row_end,
                    bound: self.n_rows,
                });
            }
            if col_end < col_start || col_end > self.n_cols {
                return Err(SparseError::InvalidRange {
                    start: col_start,
                    end: col_end,
                    bound: self.n_cols,
                });
            }
        }

        let in_range = |c: usize| c >= col_start && c < col_end;

        let nnz = (self.row_ptr[row_start]..self.row_ptr[row_end])
            .filter(|&k| in_range(self.col_idx[k]))
            .count();

        let n_rows = row_end - row_start;
        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        row_ptr.push(0);
        for row in row_start..row_end {
            for k in self.row_range(row) {
                let c = self.col_idx[k];
                if in_range(c) {
                    col_idx.push(c - col_start);
                    values.push(self.values[k]);
                }
            }
            row_ptr.push(col_idx.len());
        }

        Ok(SparseMatrix {
            n_rows,
            n_cols: col_end - col_start,
            row_ptr,
            col_idx,
            values,
        })
    }
}
