//! Shape-checked matrix operations.
//!
//! Every operation follows the same pipeline: validate the operand shapes,
//! allocate the output, fan out one task per output row through a
//! [`Dispatcher`], join, return. Validation happens before any allocation,
//! so a failed call does no parallel work and returns no partial result.

pub mod add;
pub mod multiply;
pub mod transpose;

pub use add::add;
pub use multiply::multiply;
pub use transpose::transpose;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::matrix::Matrix;

impl Matrix {
    /// Element-wise sum `self + other`. See [`add()`].
    pub fn add(&self, other: &Matrix, dispatcher: &dyn Dispatcher) -> Result<Matrix> {
        add::add(self, other, dispatcher)
    }

    /// Matrix product `self * other`. See [`multiply()`].
    pub fn matmul(&self, other: &Matrix, dispatcher: &dyn Dispatcher) -> Result<Matrix> {
        multiply::multiply(self, other, dispatcher)
    }

    /// The transpose of `self`. See [`transpose()`].
    pub fn transpose(&self, dispatcher: &dyn Dispatcher) -> Matrix {
        transpose::transpose(self, dispatcher)
    }
}
