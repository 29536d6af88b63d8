//! Conversions: dense rendering, transpose, and the diagnostic dump

use ndarray::Array2;
use std::fmt;

use crate::matrix::SparseMatrix;
use crate::scalar::Real;

impl<T: Real> SparseMatrix<T> {
    /// Dense copy of this matrix
    pub fn to_dense(&self) -> Array2<T> {
        let mut m = Array2::zeros((self.n_rows, self.n_cols));
        self.to_dense_into(&mut m);
        m
    }

    /// Writes the dense form into `m`, resizing it only if its shape differs
    pub fn to_dense_into(&self, m: &mut Array2<T>) {
        if m.dim() == self.shape() {
            m.fill(T::zero());
        } else {
            *m = Array2::zeros(self.shape());
        }

        for row in 0..self.n_rows {
            for (col, &v) in self.row_iter(row) {
                m[[row, col]] = v;
            }
        }
    }

    /// Transpose as a new matrix
    pub fn transpose(&self) -> SparseMatrix<T> {
        // Count non-zeros per column
        let mut col_counts = vec![0; self.n_cols];
        for &col in &self.col_idx {
            col_counts[col] += 1;
        }

        // Column pointers via prefix sum become the row pointers of the result
        let row_ptr = crate::utils::exclusive_scan(&col_counts);

        let nnz = self.nnz();
        let mut col_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        // Rows are visited in order, so each output row comes out sorted
        let mut next = row_ptr.clone();
        for row in 0..self.n_rows {
            for k in self.row_range(row) {
                let col = self.col_idx[k];
                let pos = next[col];

                col_idx[pos] = row;
                values[pos] = self.values[k];

                next[col] += 1;
            }
        }

        SparseMatrix {
            n_rows: self.n_cols,
            n_cols: self.n_rows,
            row_ptr,
            col_idx,
            values,
        }
    }
}

/// Diagnostic dump: nnz, offsets, indices, values, then a dense rendering
impl<T: Real> fmt::Display for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nnz: {}", self.nnz())?;

        write!(f, "ptr:")?;
        for p in &self.row_ptr {
            write!(f, " {}", p)?;
        }
        writeln!(f)?;

        write!(f, "indices:")?;
        for c in &self.col_idx {
            write!(f, " {}", c)?;
        }
        writeln!(f)?;

        write!(f, "data:")?;
        for v in &self.values {
            write!(f, " {}", v)?;
        }
        writeln!(f)?;

        let mut present = vec![T::zero(); self.n_cols];
        for row in 0..self.n_rows {
            present.fill(T::zero());
            for (col, &v) in self.row_iter(row) {
                present[col] = v;
            }
            for v in &present {
                write!(f, "{} ", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_to_dense() {
        let m = SparseMatrix::<f64>::identity(3);
        assert_eq!(m.to_dense(), Array2::eye(3));

        let mut out = Array2::from_elem((3, 3), 7.0);
        SparseMatrix::zeros(3, 3).to_dense_into(&mut out);
        assert_eq!(out, Array2::zeros((3, 3)));
    }

    #[test]
    fn test_transpose() {
        //    [1 2 0]
        //    [0 3 0]
        //    [4 0 5]
        //    [0 0 6]
        let dense = array![[1.0, 2.0, 0.0], [0.0, 3.0, 0.0], [4.0, 0.0, 5.0], [0.0, 0.0, 6.0]];
        let m = SparseMatrix::from_dense(&dense);
        let t = m.transpose();

        assert_eq!(t.shape(), (3, 4));
        assert_eq!(t.row_ptr(), &[0, 2, 4, 6]);
        assert_eq!(t.col_idx(), &[0, 2, 0, 1, 2, 3]);
        assert_eq!(t.to_dense(), dense.t());
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_display_dump() {
        let mut m = SparseMatrix::<f64>::identity(2);
        m.scale_in_place(2.5);

        let expected = "nnz: 2\nptr: 0 1 2\nindices: 0 1\ndata: 2.5 2.5\n2.5 0 \n0 2.5 \n";
        assert_eq!(m.to_string(), expected);
    }

    #[test]
    fn test_display_empty() {
        let m = SparseMatrix::<f32>::zeros(1, 2);
        assert_eq!(m.to_string(), "nnz: 0\nptr: 0 0\nindices:\ndata:\n0 0 \n");
    }
}
