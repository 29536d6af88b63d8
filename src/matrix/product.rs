//! Products of sparse matrices with dense operands
//!
//! Every product writes into a caller-supplied result, which is resized only
//! when its shape is wrong and otherwise zero-filled in place, so a result
//! reused across calls is never reallocated. Transposed forms index the
//! operands transposed instead of materializing a transpose.

use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use rayon::prelude::*;

use crate::error::{Result, SparseError};
use crate::matrix::config::SparseConfig;
use crate::matrix::{SparseMatrix, SparseVector};
use crate::scalar::{above_tolerance, Real};

fn reset_matrix<T: Real>(out: &mut Array2<T>, dim: (usize, usize)) {
    if out.dim() == dim {
        out.fill(T::zero());
    } else {
        *out = Array2::zeros(dim);
    }
}

fn reset_vector<T: Real>(out: &mut Array1<T>, len: usize) {
    if out.len() == len {
        out.fill(T::zero());
    } else {
        *out = Array1::zeros(len);
    }
}

impl<T: Real> SparseMatrix<T> {
    fn mismatch(op: &'static str, expected: (usize, usize), got: (usize, usize)) -> SparseError {
        SparseError::SizeMismatch { op, expected, got }
    }

    /// Computes `result = self * m`
    pub fn multiply_matrix<S>(&self, m: &ArrayBase<S, Ix2>, result: &mut Array2<T>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        if self.n_cols != m.nrows() {
            return Err(Self::mismatch("multiply", (self.n_cols, m.ncols()), m.dim()));
        }

        reset_matrix(result, (self.n_rows, m.ncols()));
        for col in 0..m.ncols() {
            for row in 0..self.n_rows {
                let mut dot = T::zero();
                for k in self.row_range(row) {
                    dot += self.values[k] * m[[self.col_idx[k], col]];
                }
                result[[row, col]] = dot;
            }
        }
        Ok(())
    }

    /// Computes `result = self * m`, one result row per rayon task
    pub fn par_multiply_matrix<S>(&self, m: &ArrayBase<S, Ix2>, result: &mut Array2<T>) -> Result<()>
    where
        S: Data<Elem = T> + Sync,
    {
        if self.n_cols != m.nrows() {
            return Err(Self::mismatch("multiply", (self.n_cols, m.ncols()), m.dim()));
        }

        reset_matrix(result, (self.n_rows, m.ncols()));
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut out)| {
                for k in self.row_range(row) {
                    let a = self.values[k];
                    for (o, &b) in out.iter_mut().zip(m.row(self.col_idx[k]).iter()) {
                        *o += a * b;
                    }
                }
            });
        Ok(())
    }

    /// Computes `result = self * x`
    pub fn multiply_vector<S>(&self, x: &ArrayBase<S, Ix1>, result: &mut Array1<T>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        if self.n_cols != x.len() {
            return Err(Self::mismatch("multiply", (self.n_cols, 1), (x.len(), 1)));
        }

        reset_vector(result, self.n_rows);
        for row in 0..self.n_rows {
            let mut dot = T::zero();
            for k in self.row_range(row) {
                dot += self.values[k] * x[self.col_idx[k]];
            }
            result[row] = dot;
        }
        Ok(())
    }

    /// Computes `result = selfᵀ * x`
    pub fn transpose_multiply_vector<S>(&self, x: &ArrayBase<S, Ix1>, result: &mut Array1<T>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        if self.n_rows != x.len() {
            return Err(Self::mismatch("transpose_multiply", (self.n_rows, 1), (x.len(), 1)));
        }

        reset_vector(result, self.n_cols);
        for row in 0..self.n_rows {
            let xr = x[row];
            for k in self.row_range(row) {
                result[self.col_idx[k]] += self.values[k] * xr;
            }
        }
        Ok(())
    }

    /// Computes `result = selfᵀ * m`
    pub fn transpose_multiply_matrix<S>(&self, m: &ArrayBase<S, Ix2>, result: &mut Array2<T>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        if self.n_rows != m.nrows() {
            return Err(Self::mismatch("transpose_multiply", (self.n_rows, m.ncols()), m.dim()));
        }

        reset_matrix(result, (self.n_cols, m.ncols()));
        for col in 0..m.ncols() {
            for row in 0..self.n_rows {
                let mrc = m[[row, col]];
                for k in self.row_range(row) {
                    result[[self.col_idx[k], col]] += self.values[k] * mrc;
                }
            }
        }
        Ok(())
    }

    /// Computes `result = self * mᵀ`
    pub fn multiply_transpose<S>(&self, m: &ArrayBase<S, Ix2>, result: &mut Array2<T>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        if self.n_cols != m.ncols() {
            return Err(Self::mismatch("multiply_transpose", (m.nrows(), self.n_cols), m.dim()));
        }

        reset_matrix(result, (self.n_rows, m.nrows()));
        for col in 0..m.nrows() {
            for row in 0..self.n_rows {
                let mut dot = T::zero();
                for k in self.row_range(row) {
                    dot += self.values[k] * m[[col, self.col_idx[k]]];
                }
                result[[row, col]] = dot;
            }
        }
        Ok(())
    }

    /// Computes `result = selfᵀ * mᵀ`
    pub fn transpose_multiply_transpose<S>(&self, m: &ArrayBase<S, Ix2>, result: &mut Array2<T>) -> Result<()>
    where
        S: Data<Elem = T>,
    {
        if self.n_rows != m.ncols() {
            return Err(Self::mismatch(
                "transpose_multiply_transpose",
                (m.nrows(), self.n_rows),
                m.dim(),
            ));
        }

        reset_matrix(result, (self.n_cols, m.nrows()));
        for col in 0..m.nrows() {
            for row in 0..self.n_rows {
                let mcr = m[[col, row]];
                for k in self.row_range(row) {
                    result[[self.col_idx[k], col]] += self.values[k] * mcr;
                }
            }
        }
        Ok(())
    }

    /// Outer product `x xᵀ` restricted to the support of `x`
    ///
    /// Entries of `x` with magnitude above [`Real::EPS`] form the support
    /// `S`; the result is `n×n` and stores exactly the block `S×S`.
    pub fn outer_square<S>(x: &ArrayBase<S, Ix1>) -> SparseMatrix<T>
    where
        S: Data<Elem = T>,
    {
        let mut result = SparseMatrix::new();
        Self::outer_square_into(x, &mut result);
        result
    }

    /// [`outer_square`](Self::outer_square) reusing the storage of `result`
    pub fn outer_square_into<S>(x: &ArrayBase<S, Ix1>, result: &mut SparseMatrix<T>)
    where
        S: Data<Elem = T>,
    {
        let support: Vec<usize> = x
            .iter()
            .enumerate()
            .filter(|&(_, &v)| above_tolerance(v, T::EPS))
            .map(|(i, _)| i)
            .collect();

        result.fill_outer_square(x.len(), &support, |i| x[i]);
    }

    /// Outer product `v vᵀ` over the stored indices of `v`
    pub fn outer_square_sparse(v: &SparseVector<T>) -> SparseMatrix<T> {
        let mut result = SparseMatrix::new();
        Self::outer_square_sparse_into(v, &SparseConfig::default(), &mut result);
        result
    }

    /// [`outer_square_sparse`](Self::outer_square_sparse) reusing the storage
    /// of `result`, with the scratch policy taken from `config`
    pub fn outer_square_sparse_into(v: &SparseVector<T>, config: &SparseConfig, result: &mut SparseMatrix<T>) {
        config.with_scratch(v.len(), |dense: &mut [T]| {
            v.scatter_into(dense);
            result.fill_outer_square(v.len(), v.indices(), |i| dense[i]);
        });
    }

    /// Overwrites this matrix with the `support × support` block of an
    /// `n×n` outer square, keeping the existing allocations
    fn fill_outer_square(&mut self, n: usize, support: &[usize], value: impl Fn(usize) -> T) {
        let k = support.len();

        self.n_rows = n;
        self.n_cols = n;

        self.row_ptr.clear();
        self.row_ptr.reserve(n + 1);
        self.row_ptr.push(0);
        let mut next = support.iter().peekable();
        let mut total = 0;
        for i in 0..n {
            if next.next_if_eq(&&i).is_some() {
                total += k;
            }
            self.row_ptr.push(total);
        }

        self.col_idx.clear();
        self.values.clear();
        self.col_idx.reserve(k * k);
        self.values.reserve(k * k);
        for &i in support {
            let vi = value(i);
            for &j in support {
                self.col_idx.push(j);
                self.values.push(vi * value(j));
            }
        }
    }
}
