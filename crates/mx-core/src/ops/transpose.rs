use log::debug;

use crate::dispatch::Dispatcher;
use crate::matrix::Matrix;

/// Transpose: `t[j][i] = a[i][j]`.
///
/// One task per output row, i.e. per input column `j`; each task reads down
/// column `j` of `a` and writes the full row `t[j][*]`. Always succeeds.
pub fn transpose(a: &Matrix, dispatcher: &dyn Dispatcher) -> Matrix {
    debug!("transpose: {} via {}", a.shape(), dispatcher.name());
    let shape = a.shape().transposed();
    let src = a.as_slice();
    let cols = a.cols();
    Matrix::build(shape.rows, shape.cols, dispatcher, &|j, row| {
        for (i, out) in row.iter_mut().enumerate() {
            *out = src[i * cols + j];
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{ChunkedDispatcher, PerRowDispatcher};
    use crate::shape::Shape;

    #[test]
    fn test_transpose_basic() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = transpose(&a, &PerRowDispatcher::new());
        assert_eq!(
            t.to_rows(),
            vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]
        );
    }

    #[test]
    fn test_double_transpose_is_identity() {
        let d = ChunkedDispatcher::new();
        let a = Matrix::new(5, 3, (0..15).map(|x| x as f64 * 1.5 - 4.0).collect()).unwrap();
        assert_eq!(transpose(&transpose(&a, &d), &d), a);
    }

    #[test]
    fn test_transpose_empty() {
        let d = ChunkedDispatcher::new();
        assert_eq!(transpose(&Matrix::zeros(3, 0), &d).shape(), Shape::new(0, 3));
        assert_eq!(transpose(&Matrix::zeros(0, 2), &d).shape(), Shape::new(2, 0));
    }

    #[test]
    fn test_transpose_column_vector() {
        let a = Matrix::from_rows(&[[1.0], [2.0], [3.0]]).unwrap();
        let t = transpose(&a, &ChunkedDispatcher::new());
        assert_eq!(t.shape(), Shape::new(1, 3));
        assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0]);
    }
}
