//! # spatial-sparse: sparse matrix engine for spatial algebra
//!
//! The numeric kernel used by rigid-body dynamics code for sparse
//! operators: a compressed-row sparse matrix with construction, structural
//! editing, in-place arithmetic and products against dense `ndarray`
//! operands.
//!
//! ## Overview
//!
//! - **Storage**: CSR arrays with capacity kept apart from logical size, so
//!   repeated row edits grow storage geometrically instead of per edit.
//! - **Construction**: from dense matrices (thresholded at [`Real::EPS`]),
//!   coordinate lists, identity, or adopted raw arrays.
//! - **Structural editing**: row and column replacement, row/column
//!   extraction as [`SparseVector`], submatrices.
//! - **Arithmetic**: add/subtract with a fast path when the receiver's
//!   pattern already holds the result; scaling and negation.
//! - **Products**: `A x`, `A M`, `Aᵀ x`, `Aᵀ M`, `A Mᵀ`, `Aᵀ Mᵀ` into
//!   caller-owned results, plus outer squares of vectors.
//!
//! Every type is generic over [`Real`], implemented for `f32` and `f64`.
//!
//! ## Usage
//!
//! ```
//! use spatial_sparse::{Coordinates, SparseMatrix};
//! use ndarray::{array, Array1};
//!
//! let mut coords = Coordinates::new();
//! coords.insert((0, 0), 2.0);
//! coords.insert((1, 2), 3.0);
//! let a = SparseMatrix::from_coordinates(2, 3, &coords).unwrap();
//!
//! let mut y = Array1::zeros(2);
//! a.multiply_vector(&array![1.0, 1.0, 1.0], &mut y).unwrap();
//! assert_eq!(y, array![2.0, 3.0]);
//! ```
//!
//! ## Ownership
//!
//! Each matrix owns its arrays outright and `clone` copies them, so an
//! in-place operation can never be observed through another matrix.
//! [`SparseMatrix::from_raw_parts`] moves caller-built arrays in without
//! copying.

pub mod error;
pub mod matrix;
pub mod scalar;
pub mod utils;

// Re-export primary components
pub use error::{Result, SparseError};
pub use matrix::config::{ScratchMode, SparseConfig};
pub use matrix::{Coordinates, SparseMatrix, SparseMatrixF32, SparseMatrixF64};
pub use matrix::{SparseVector, SparseVectorF32, SparseVectorF64};
pub use scalar::Real;
pub use utils::{from_sprs, to_sprs};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
