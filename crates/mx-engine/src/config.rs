use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// How an engine fans out row tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Contiguous row ranges on a rayon pool, one chunk per worker.
    #[default]
    Chunked,
    /// One OS thread per output row.
    PerRow,
    /// Everything on the calling thread.
    Serial,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Chunked => write!(f, "chunked"),
            Strategy::PerRow => write!(f, "per-row"),
            Strategy::Serial => write!(f, "serial"),
        }
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chunked" => Ok(Strategy::Chunked),
            "per-row" | "per_row" | "perrow" => Ok(Strategy::PerRow),
            "serial" => Ok(Strategy::Serial),
            _ => Err(EngineError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Configuration for a [`MatrixEngine`](crate::MatrixEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Fan-out strategy for every operation.
    pub strategy: Strategy,
    /// Worker count for a dedicated pool (`Chunked` only). `None` uses the
    /// global rayon pool.
    pub num_threads: Option<usize>,
    /// Smallest row range a chunk may hold (`Chunked` only).
    pub min_rows_per_chunk: usize,
    /// Base seed for random construction. `None` draws one from OS entropy
    /// when the engine is created.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: Strategy::Chunked,
            num_threads: None,
            min_rows_per_chunk: 1,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    pub fn with_min_rows_per_chunk(mut self, rows: usize) -> Self {
        self.min_rows_per_chunk = rows;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Names of settings that differ from their defaults but have no effect
    /// under the configured strategy.
    pub fn ignored_settings(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if self.strategy != Strategy::Chunked {
            if self.num_threads.is_some() {
                ignored.push("num_threads");
            }
            if self.min_rows_per_chunk != EngineConfig::default().min_rows_per_chunk {
                ignored.push("min_rows_per_chunk");
            }
        }
        ignored
    }
}
