use log::debug;

use crate::dispatch::Dispatcher;
use crate::error::{MatrixError, Op, Result};
use crate::matrix::Matrix;

/// Element-wise addition: `c[i][j] = a[i][j] + b[i][j]`.
///
/// Both operands must have the same shape. One task per output row; each
/// task reads row `i` of both inputs and writes only row `i` of the result.
///
/// # Errors
/// Returns `ShapeMismatch` if the row or column counts differ. Nothing is
/// allocated or dispatched in that case.
pub fn add(a: &Matrix, b: &Matrix, dispatcher: &dyn Dispatcher) -> Result<Matrix> {
    if a.shape() != b.shape() {
        return Err(MatrixError::ShapeMismatch {
            op: Op::Add,
            left: a.shape(),
            right: b.shape(),
        });
    }

    debug!("add: {} + {} via {}", a.shape(), b.shape(), dispatcher.name());
    Ok(Matrix::build(a.rows(), a.cols(), dispatcher, &|i, row| {
        for ((out, x), y) in row.iter_mut().zip(a.row(i)).zip(b.row(i)) {
            *out = x + y;
        }
    }))
}
