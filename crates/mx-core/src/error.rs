use std::fmt;

use thiserror::Error;

use crate::shape::Shape;

/// Operation that rejected its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Multiply,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Add => write!(f, "add"),
            Op::Multiply => write!(f, "multiply"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("shape mismatch in {op}: left is {left}, right is {right}")]
    ShapeMismatch { op: Op, left: Shape, right: Shape },
    #[error("ragged rows: row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("shape {shape} has more elements than fit in memory")]
    TooLarge { shape: Shape },
    #[error("data length {got} does not match shape (expected {expected} elements)")]
    DataLength { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
