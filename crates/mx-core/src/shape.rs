use std::fmt;

/// The `(rows, cols)` dimensions of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    /// Total number of elements.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`. Every `Matrix` shape fits;
    /// use [`checked_numel`](Self::checked_numel) for arbitrary dimensions.
    pub fn numel(&self) -> usize {
        match self.checked_numel() {
            Some(n) => n,
            None => panic!("shape {} overflows usize", self),
        }
    }

    /// Total number of elements, or `None` if it does not fit in `usize`.
    pub fn checked_numel(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// The shape with rows and columns swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.cols, self.rows)
    }

    /// Shape of `self * other`, or `None` when the inner dimensions differ.
    pub fn matmul(&self, other: &Shape) -> Option<Shape> {
        (self.cols == other.rows).then(|| Shape::new(self.rows, other.cols))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}
