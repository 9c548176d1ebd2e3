use log::debug;

use crate::dispatch::Dispatcher;
use crate::error::{MatrixError, Op, Result};
use crate::matrix::Matrix;

/// Matrix multiplication: `c[i][j] = sum_k a[i][k] * b[k][j]`.
///
/// `a` is [m, k], `b` is [k, n], result is [m, n]. One task per output row;
/// each task computes the whole row `c[i][*]`, summing in natural `k` order
/// so results do not depend on scheduling.
///
/// # Errors
/// Returns `ShapeMismatch` if `a.cols() != b.rows()`, and `TooLarge` if the
/// `[m, n]` result cannot be sized. Nothing is allocated or dispatched in
/// either case.
pub fn multiply(a: &Matrix, b: &Matrix, dispatcher: &dyn Dispatcher) -> Result<Matrix> {
    let Some(shape) = a.shape().matmul(&b.shape()) else {
        return Err(MatrixError::ShapeMismatch {
            op: Op::Multiply,
            left: a.shape(),
            right: b.shape(),
        });
    };
    if shape.checked_numel().is_none() {
        return Err(MatrixError::TooLarge { shape });
    }

    debug!("multiply: {} * {} via {}", a.shape(), b.shape(), dispatcher.name());
    let rhs = b.as_slice();
    let n = shape.cols;
    Ok(Matrix::build(shape.rows, n, dispatcher, &|i, row| {
        let lhs = a.row(i);
        for (j, out) in row.iter_mut().enumerate() {
            // Column j of b, walked in k order.
            let column = rhs.iter().skip(j).step_by(n);
            *out = lhs.iter().zip(column).fold(0.0, |sum, (x, y)| sum + x * y);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{ChunkedDispatcher, PerRowDispatcher, SerialDispatcher};
    use crate::shape::Shape;
    use approx::assert_relative_eq;

    #[test]
    fn test_multiply_basic() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
        let c = multiply(&a, &b, &PerRowDispatcher::new()).unwrap();
        assert_eq!(c.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
    }

    #[test]
    fn test_multiply_row_by_column() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let b = Matrix::from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        let c = multiply(&a, &b, &ChunkedDispatcher::new()).unwrap();
        assert_eq!(c.shape(), Shape::new(1, 1));
        assert_eq!(c.get(0, 0), 14.0);
    }

    #[test]
    fn test_multiply_shape_propagation() {
        let d = ChunkedDispatcher::new();
        let a = Matrix::zeros(4, 7);
        let b = Matrix::zeros(7, 2);
        let c = Matrix::zeros(2, 9);
        let ab = multiply(&a, &b, &d).unwrap();
        assert_eq!(ab.shape(), Shape::new(4, 2));
        assert_eq!(multiply(&ab, &c, &d).unwrap().shape(), Shape::new(4, 9));
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let b = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let err = multiply(&a, &b, &SerialDispatcher::new()).unwrap_err();
        assert_eq!(
            err,
            MatrixError::ShapeMismatch {
                op: Op::Multiply,
                left: Shape::new(1, 3),
                right: Shape::new(2, 2),
            }
        );
    }

    #[test]
    fn test_multiply_result_too_large() {
        // Both operands are empty, but the product would not fit.
        let rows = usize::MAX / 2 + 1;
        let a = Matrix::zeros(rows, 0);
        let b = Matrix::zeros(0, 2);
        let err = multiply(&a, &b, &SerialDispatcher::new()).unwrap_err();
        assert_eq!(
            err,
            MatrixError::TooLarge {
                shape: Shape::new(rows, 2)
            }
        );
    }

    #[test]
    fn test_multiply_non_square() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).unwrap();
        let c = multiply(&a, &b, &ChunkedDispatcher::new()).unwrap();
        assert_eq!(c.to_rows(), vec![vec![58.0, 64.0], vec![139.0, 154.0]]);
    }

    #[test]
    fn test_multiply_identity() {
        let a = Matrix::new(3, 3, (1..=9).map(|x| x as f64 / 3.0).collect()).unwrap();
        let id = Matrix::new(
            3,
            3,
            (0..9).map(|x| if x % 4 == 0 { 1.0 } else { 0.0 }).collect(),
        )
        .unwrap();
        let c = multiply(&a, &id, &ChunkedDispatcher::new()).unwrap();
        for (x, y) in c.as_slice().iter().zip(a.as_slice()) {
            assert_relative_eq!(*x, *y);
        }
    }

    #[test]
    fn test_multiply_empty_inner_dimension() {
        let a = Matrix::zeros(2, 0);
        let b = Matrix::zeros(0, 3);
        let c = multiply(&a, &b, &PerRowDispatcher::new()).unwrap();
        assert_eq!(c, Matrix::zeros(2, 3));
    }
}
