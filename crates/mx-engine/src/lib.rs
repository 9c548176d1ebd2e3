//! `mx-engine` - Matrix engine facade for matrix-engine.
//!
//! Binds the `mx-core` operations to a configured dispatcher, adds seeded
//! random construction and wall-clock timed variants of every operation.

pub mod config;
pub mod engine;
pub mod error;
pub mod timing;

pub use config::{EngineConfig, Strategy};
pub use engine::MatrixEngine;
pub use error::{EngineError, Result};
pub use timing::{time, Timed};

pub use mx_core::{Matrix, MatrixError, Shape};
