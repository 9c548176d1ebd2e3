use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info};
use mx_core::{
    ops, ChunkedDispatcher, Dispatcher, Matrix, PerRowDispatcher, SerialDispatcher,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::ThreadPoolBuilder;

use crate::config::{EngineConfig, Strategy};
use crate::error::Result;
use crate::timing::{time, Timed};

// Spreads consecutive call counters across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Entry point for matrix construction and arithmetic.
///
/// Every operation validates its operands, allocates the result, fans out
/// one task per output row through the engine's dispatcher and joins before
/// returning. The engine is seeded once at creation; each `create` call
/// derives its own generators from that seed, so the engine can be shared
/// across threads without any global random state.
#[derive(Debug)]
pub struct MatrixEngine {
    dispatcher: Box<dyn Dispatcher>,
    seed: u64,
    calls: AtomicU64,
}

impl MatrixEngine {
    /// Engine on the global rayon pool with an entropy-drawn seed.
    pub fn new() -> Self {
        Self::from_dispatcher(Box::new(ChunkedDispatcher::new()), entropy_seed())
    }

    /// Build an engine from a configuration.
    ///
    /// # Errors
    /// Returns `ThreadPool` if a dedicated rayon pool was requested and could
    /// not be built.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let ignored = config.ignored_settings();
        if !ignored.is_empty() {
            debug!(
                "strategy {} ignores configured {}",
                config.strategy,
                ignored.join(", ")
            );
        }

        let dispatcher: Box<dyn Dispatcher> = match config.strategy {
            Strategy::Serial => Box::new(SerialDispatcher::new()),
            Strategy::PerRow => Box::new(PerRowDispatcher::new()),
            Strategy::Chunked => {
                let chunked = match config.num_threads {
                    Some(threads) => {
                        let pool = ThreadPoolBuilder::new()
                            .num_threads(threads)
                            .thread_name(|i| format!("mx-worker-{}", i))
                            .build()?;
                        ChunkedDispatcher::with_pool(Arc::new(pool))
                    }
                    None => ChunkedDispatcher::new(),
                };
                Box::new(chunked.with_min_rows_per_chunk(config.min_rows_per_chunk))
            }
        };

        info!(
            "matrix engine: strategy={}, threads={}, seeded={}",
            config.strategy,
            config
                .num_threads
                .map_or_else(|| "default".to_string(), |n| n.to_string()),
            config.seed.is_some()
        );

        let seed = config.seed.unwrap_or_else(entropy_seed);
        Ok(Self::from_dispatcher(dispatcher, seed))
    }

    /// Engine using a caller-supplied dispatcher and base seed.
    pub fn from_dispatcher(dispatcher: Box<dyn Dispatcher>, seed: u64) -> Self {
        MatrixEngine {
            dispatcher,
            seed,
            calls: AtomicU64::new(0),
        }
    }

    pub fn dispatcher(&self) -> &dyn Dispatcher {
        self.dispatcher.as_ref()
    }

    /// Base seed for random construction.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create a `rows` x `cols` matrix of independent uniform values in `[0, 1)`.
    ///
    /// Each call draws a fresh call seed from the engine seed and an atomic
    /// call counter, then fills rows in parallel with one generator per row.
    /// For a fixed engine seed, the n-th call returns the same matrix under
    /// every strategy. A zero dimension gives an empty matrix.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`.
    pub fn create(&self, rows: usize, cols: usize) -> Matrix {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        let call_seed = self.seed.wrapping_add(call.wrapping_mul(SEED_STRIDE));
        let mut rng = StdRng::seed_from_u64(call_seed);
        let row_seeds: Vec<u64> = (0..rows).map(|_| rng.gen()).collect();

        debug!("create: {}x{} via {}", rows, cols, self.dispatcher.name());
        Matrix::build(rows, cols, self.dispatcher(), &|i, row| {
            let mut rng = StdRng::seed_from_u64(row_seeds[i]);
            for v in row.iter_mut() {
                *v = rng.gen::<f64>();
            }
        })
    }

    /// Element-wise sum of two matrices of the same shape.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if the shapes differ; no work is dispatched.
    pub fn add(&self, a: &Matrix, b: &Matrix) -> mx_core::Result<Matrix> {
        ops::add(a, b, self.dispatcher())
    }

    /// Matrix product `a * b`.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `a.cols() != b.rows()`; no work is dispatched.
    pub fn multiply(&self, a: &Matrix, b: &Matrix) -> mx_core::Result<Matrix> {
        ops::multiply(a, b, self.dispatcher())
    }

    pub fn transpose(&self, a: &Matrix) -> Matrix {
        ops::transpose(a, self.dispatcher())
    }

    /// [`add`](Self::add) with its wall-clock duration. The duration is
    /// reported on the error path too.
    pub fn timed_add(&self, a: &Matrix, b: &Matrix) -> Timed<mx_core::Result<Matrix>> {
        time(|| self.add(a, b))
    }

    /// [`multiply`](Self::multiply) with its wall-clock duration. The
    /// duration is reported on the error path too.
    pub fn timed_multiply(&self, a: &Matrix, b: &Matrix) -> Timed<mx_core::Result<Matrix>> {
        time(|| self.multiply(a, b))
    }

    pub fn timed_transpose(&self, a: &Matrix) -> Timed<Matrix> {
        time(|| self.transpose(a))
    }
}

impl Default for MatrixEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn entropy_seed() -> u64 {
    StdRng::from_entropy().gen()
}
