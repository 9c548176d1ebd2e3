pub mod chunked;
pub mod per_row;
pub mod serial;

pub use chunked::ChunkedDispatcher;
pub use per_row::PerRowDispatcher;
pub use serial::SerialDispatcher;

use std::fmt::Debug;

/// Work for a single output row: receives the row index and the row's
/// exclusively owned slice of the output buffer.
pub type RowTask<'a> = dyn Fn(usize, &mut [f64]) + Sync + 'a;

/// Trait for pluggable fan-out/join strategies.
///
/// A dispatcher splits a freshly allocated, row-major output buffer into
/// disjoint rows of `width` elements and runs `task` exactly once per row.
/// Every task writes only to the slice it is handed, so no locking is needed
/// on the output. `for_each_row` returns only after all rows are written;
/// a panic inside a task is propagated to the caller after the join.
pub trait Dispatcher: Send + Sync + Debug {
    /// Returns the name of this dispatcher (e.g., "chunked", "per-row").
    fn name(&self) -> &str;

    /// Run `task` for every row of `out`.
    ///
    /// - `out`: output buffer, length must be a multiple of `width`
    /// - `width`: number of elements per row
    ///
    /// A zero `width` or empty `out` dispatches nothing.
    fn for_each_row(&self, out: &mut [f64], width: usize, task: &RowTask<'_>);
}

/// Number of rows in `out` when split into rows of `width`, or `None` when
/// there is nothing to dispatch.
pub(crate) fn row_count(out: &[f64], width: usize) -> Option<usize> {
    if width == 0 || out.is_empty() {
        return None;
    }
    debug_assert_eq!(
        out.len() % width,
        0,
        "output length {} is not a multiple of row width {}",
        out.len(),
        width
    );
    Some(out.len() / width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dispatchers() -> Vec<Box<dyn Dispatcher>> {
        vec![
            Box::new(SerialDispatcher::new()),
            Box::new(PerRowDispatcher::new()),
            Box::new(ChunkedDispatcher::new()),
            Box::new(ChunkedDispatcher::new().with_min_rows_per_chunk(4)),
        ]
    }

    #[test]
    fn test_every_row_written_once() {
        for d in dispatchers() {
            let (rows, width) = (37, 5);
            let mut out = vec![0.0; rows * width];
            let calls = AtomicUsize::new(0);
            d.for_each_row(&mut out, width, &|i, row| {
                calls.fetch_add(1, Ordering::Relaxed);
                assert_eq!(row.len(), width);
                for (j, v) in row.iter_mut().enumerate() {
                    *v += (i * width + j) as f64;
                }
            });
            assert_eq!(calls.load(Ordering::Relaxed), rows, "{}", d.name());
            let expected: Vec<f64> = (0..rows * width).map(|x| x as f64).collect();
            assert_eq!(out, expected, "{}", d.name());
        }
    }

    #[test]
    fn test_zero_width_dispatches_nothing() {
        for d in dispatchers() {
            let mut out: Vec<f64> = vec![];
            d.for_each_row(&mut out, 0, &|_, _| panic!("no rows expected"));
            d.for_each_row(&mut out, 3, &|_, _| panic!("no rows expected"));
        }
    }

    #[test]
    fn test_single_row() {
        for d in dispatchers() {
            let mut out = vec![0.0; 4];
            d.for_each_row(&mut out, 4, &|i, row| row.fill(i as f64 + 1.0));
            assert_eq!(out, vec![1.0; 4]);
        }
    }

    #[test]
    fn test_names() {
        let names: Vec<String> = dispatchers().iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, ["serial", "per-row", "chunked", "chunked"]);
    }
}
