use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;

use super::{row_count, Dispatcher, RowTask};

/// Rayon fan-out over contiguous row ranges.
///
/// Rows are grouped into at most one chunk per pool thread
/// (`ceil(rows / threads)` rows each, never fewer than `min_rows_per_chunk`),
/// so the number of tasks is bounded by the available parallelism rather
/// than by the row count. Each chunk owns a contiguous slice of the output.
#[derive(Debug, Clone)]
pub struct ChunkedDispatcher {
    pool: Option<Arc<ThreadPool>>,
    min_rows_per_chunk: usize,
}

impl ChunkedDispatcher {
    /// Dispatcher running on the global rayon pool.
    pub fn new() -> Self {
        ChunkedDispatcher {
            pool: None,
            min_rows_per_chunk: 1,
        }
    }

    /// Dispatcher running on a dedicated pool.
    pub fn with_pool(pool: Arc<ThreadPool>) -> Self {
        ChunkedDispatcher {
            pool: Some(pool),
            min_rows_per_chunk: 1,
        }
    }

    /// Set the smallest number of rows a chunk may hold. Zero is treated as one.
    pub fn with_min_rows_per_chunk(mut self, rows: usize) -> Self {
        self.min_rows_per_chunk = rows.max(1);
        self
    }

    /// Number of worker threads rows are spread over.
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Rows per chunk for an output with `rows` rows.
    pub fn chunk_rows(&self, rows: usize) -> usize {
        rows.div_ceil(self.threads().max(1))
            .max(self.min_rows_per_chunk)
    }
}

impl Default for ChunkedDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for ChunkedDispatcher {
    fn name(&self) -> &str {
        "chunked"
    }

    fn for_each_row(&self, out: &mut [f64], width: usize, task: &RowTask<'_>) {
        let Some(rows) = row_count(out, width) else {
            return;
        };
        let chunk_rows = self.chunk_rows(rows);
        match &self.pool {
            Some(pool) => pool.install(|| fill_chunks(out, width, chunk_rows, task)),
            None => fill_chunks(out, width, chunk_rows, task),
        }
    }
}

fn fill_chunks(out: &mut [f64], width: usize, chunk_rows: usize, task: &RowTask<'_>) {
    out.par_chunks_mut(chunk_rows * width)
        .enumerate()
        .for_each(|(chunk, block)| {
            let first = chunk * chunk_rows;
            for (offset, row) in block.chunks_mut(width).enumerate() {
                task(first + offset, row);
            }
        });
}
