// Sparse matrix storage and operations

pub mod arithmetic;
pub mod config;
pub mod construction;
pub mod conversion;
pub mod csr;
pub mod editing;
pub mod product;
pub mod vector;

pub use config::{ScratchMode, SparseConfig, NNZ_GROWTH_FACTOR};
pub use construction::Coordinates;
pub use csr::{SparseMatrix, SparseMatrixF32, SparseMatrixF64};
pub use vector::{SparseVector, SparseVectorF32, SparseVectorF64};
