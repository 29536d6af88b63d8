//! Error types for the sparse engine

use thiserror::Error;

/// Result type alias using the engine's error
pub type Result<T> = std::result::Result<T, SparseError>;

/// Errors raised by sparse matrix operations
///
/// These are contract violations by the caller. Nothing is retried or
/// recovered inside the engine, and operands are left untouched when an
/// error is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseError {
    /// Operand dimensions incompatible with the requested operation
    #[error("Size mismatch in {op}: expected {expected:?}, got {got:?}")]
    SizeMismatch {
        /// Operation name
        op: &'static str,
        /// Dimensions the operation required
        expected: (usize, usize),
        /// Dimensions it was given
        got: (usize, usize),
    },

    /// Row or column index outside the matrix
    #[error("Index {index} out of range for dimension of size {bound}")]
    IndexOutOfRange {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        bound: usize,
    },

    /// Inverted or oversized half-open range
    #[error("Range {start}..{end} invalid for dimension of size {bound}")]
    InvalidRange {
        /// Range start (inclusive)
        start: usize,
        /// Range end (exclusive)
        end: usize,
        /// Size of the dimension
        bound: usize,
    },
}

impl SparseError {
    /// True for the index-out-of-range family (single index or range)
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            SparseError::IndexOutOfRange { .. } | SparseError::InvalidRange { .. }
        )
    }

    /// True for operand dimension mismatches
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, SparseError::SizeMismatch { .. })
    }
}

/// Returns `IndexOutOfRange` from the enclosing function when `index >= bound`.
///
/// Compiled to nothing without the `strict-bounds` feature.
macro_rules! check_index {
    ($index:expr, $bound:expr) => {
        #[cfg(feature = "strict-bounds")]
        {
            let (index, bound) = ($index, $bound);
            if index >= bound {
                return Err($crate::error::SparseError::IndexOutOfRange { index, bound });
            }
        }
    };
}

pub(crate) use check_index;
