use ndarray::{array, Array1, Array2};
use spatial_sparse::{Result, SparseConfig, SparseMatrix, SparseVector, VERSION};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("spatial-sparse {}", VERSION);

    // Create a simple example matrix
    let mut a = SparseMatrix::from_dense(&array![
        [4.0, 0.0, 1.0],
        [0.0, 3.0, 0.0],
        [1.0, 0.0, 2.0]
    ]);
    println!("\nMatrix A:");
    println!("{}", a);

    // Row edit that adds entries
    a.set_row(1, &array![0.5, 3.0, 0.5])?;
    println!("A after set_row(1):");
    println!("{}", a);

    // Products against dense operands
    let x = array![1.0, 2.0, 3.0];
    let mut y = Array1::zeros(0);
    a.multiply_vector(&x, &mut y)?;
    println!("A x = {}", y);

    a.transpose_multiply_vector(&x, &mut y)?;
    println!("Aᵀ x = {}", y);

    let m = Array2::<f64>::eye(3) * 2.0;
    let mut out = Array2::zeros((0, 0));
    a.multiply_matrix(&m, &mut out)?;
    println!("A (2I) =\n{}", out);

    // Rank-1 block from a sparse vector
    let v = SparseVector::new(3, vec![0, 2], vec![1.0, -2.0])?;
    let mut outer = SparseMatrix::new();
    SparseMatrix::outer_square_sparse_into(&v, &SparseConfig::shared(), &mut outer);
    a.add_in_place(&outer)?;
    println!("A + v vᵀ:");
    println!("{}", a);

    info!(nnz = a.nnz(), capacity = a.nnz_capacity(), "done");
    Ok(())
}
