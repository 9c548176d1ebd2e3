use std::fmt;

use crate::dispatch::{Dispatcher, RowTask};
use crate::error::{MatrixError, Result};
use crate::shape::Shape;

/// A dense matrix of `f64` values.
///
/// Holds a single contiguous, row-major buffer together with its shape, so
/// every row always has the same length. Zero-row and zero-column matrices
/// are valid values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    data: Vec<f64>,
    shape: Shape,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `TooLarge` if `rows * cols` overflows `usize`, and
    /// `DataLength` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let shape = Shape::new(rows, cols);
        let expected = shape
            .checked_numel()
            .ok_or(MatrixError::TooLarge { shape })?;
        if data.len() != expected {
            return Err(MatrixError::DataLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Matrix { data, shape })
    }

    /// Create a zero-filled matrix with the given shape.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`, like `vec!` does when the
    /// allocation cannot be sized.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let shape = Shape::new(rows, cols);
        Matrix {
            data: vec![0.0; shape.numel()],
            shape,
        }
    }

    /// Create a matrix from nested rows.
    ///
    /// The column count is taken from the first row; an empty slice gives a
    /// 0x0 matrix.
    ///
    /// # Errors
    /// Returns `RaggedRow` for the first row whose length differs from row 0.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let shape = Shape::new(rows.len(), cols);
        let numel = shape
            .checked_numel()
            .ok_or(MatrixError::TooLarge { shape })?;
        let mut data = Vec::with_capacity(numel);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::RaggedRow {
                    row: i,
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix { data, shape })
    }

    /// Allocate a `rows` x `cols` matrix and fill it row by row through
    /// `dispatcher`. `task` receives each row index and that row's slice.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize` (see [`Matrix::zeros`]).
    /// Operations whose output shape is derived from two operands check
    /// this first and return `TooLarge` instead.
    pub fn build(
        rows: usize,
        cols: usize,
        dispatcher: &dyn Dispatcher,
        task: &RowTask<'_>,
    ) -> Self {
        let mut out = Matrix::zeros(rows, cols);
        dispatcher.for_each_row(&mut out.data, cols, task);
        out
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// True when the matrix holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.shape.rows, "row {} out of range for {}", i, self.shape);
        let cols = self.shape.cols;
        &self.data[i * cols..(i + 1) * cols]
    }

    /// Returns the element at row `i`, column `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.shape.rows && j < self.shape.cols,
            "index ({}, {}) out of range for {}",
            i,
            j,
            self.shape
        );
        self.data[i * self.shape.cols + j]
    }

    /// Iterate over the rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.shape.rows).map(move |i| self.row(i))
    }

    /// Returns the underlying row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the matrix, returning its row-major data.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Copies the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
