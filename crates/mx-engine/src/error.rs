use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("unknown strategy: {0:?} (expected chunked, per-row or serial)")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
