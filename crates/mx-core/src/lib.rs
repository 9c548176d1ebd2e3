//! `mx-core` - Dense matrices with row-parallel compute for matrix-engine.
//!
//! This crate provides:
//! - A `Matrix` type backed by a single row-major buffer (always rectangular)
//! - A `Dispatcher` trait for pluggable fan-out/join strategies
//! - Per-row, chunked (rayon) and serial dispatchers
//! - Shape-checked `add`, `multiply` and `transpose` operations

pub mod dispatch;
pub mod error;
pub mod matrix;
pub mod ops;
pub mod shape;

// Re-export primary types at the crate root for convenience.
pub use dispatch::{ChunkedDispatcher, Dispatcher, PerRowDispatcher, RowTask, SerialDispatcher};
pub use error::{MatrixError, Op, Result};
pub use matrix::Matrix;
pub use shape::Shape;
