use std::thread;

use super::{row_count, Dispatcher, RowTask};

/// One scoped OS thread per output row.
///
/// The simplest fan-out: every row gets its own thread and the scope joins
/// them all before returning. Over-subscribes for matrices with many rows;
/// prefer [`ChunkedDispatcher`](super::ChunkedDispatcher) for those.
#[derive(Debug, Clone, Default)]
pub struct PerRowDispatcher;

impl PerRowDispatcher {
    pub fn new() -> Self {
        PerRowDispatcher
    }
}

impl Dispatcher for PerRowDispatcher {
    fn name(&self) -> &str {
        "per-row"
    }

    /// # Panics
    /// Panics if the OS refuses to spawn a thread, or if any row task panics.
    fn for_each_row(&self, out: &mut [f64], width: usize, task: &RowTask<'_>) {
        if row_count(out, width).is_none() {
            return;
        }
        thread::scope(|scope| {
            for (i, row) in out.chunks_mut(width).enumerate() {
                scope.spawn(move || task(i, row));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[test]
    fn test_rows_run_on_separate_threads() {
        let ids = Mutex::new(HashSet::new());
        let mut out = vec![0.0; 8 * 3];
        PerRowDispatcher::new().for_each_row(&mut out, 3, &|_, row| {
            ids.lock().unwrap().insert(thread::current().id());
            row.fill(1.0);
        });
        assert_eq!(ids.into_inner().unwrap().len(), 8);
        assert!(out.iter().all(|&v| v == 1.0));
    }

    #[test]
    #[should_panic]
    fn test_task_panic_propagates() {
        let mut out = vec![0.0; 4];
        PerRowDispatcher::new().for_each_row(&mut out, 2, &|i, _| {
            if i == 1 {
                panic!("row task failed");
            }
        });
    }
}
