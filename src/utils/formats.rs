//! Utilities for converting between our matrix format and external libraries

use sprs::CsMat;

use crate::matrix::SparseMatrix;
use crate::scalar::Real;

/// Converts a sparse matrix to an sprs CsMat in CSR format
pub fn to_sprs<T: Real>(matrix: &SparseMatrix<T>) -> CsMat<T> {
    CsMat::new(
        matrix.shape(),
        matrix.row_ptr().to_vec(),
        matrix.col_idx().to_vec(),
        matrix.values().to_vec(),
    )
}

/// Converts an sprs CsMat (either storage order) to a sparse matrix
///
/// sprs keeps indices sorted within each outer dimension, so the arrays are
/// adopted directly.
pub fn from_sprs<T: Real>(matrix: CsMat<T>) -> SparseMatrix<T> {
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrix::from_raw_parts(n_rows, n_cols, indptr, indices, data)
}
