use super::{row_count, Dispatcher, RowTask};

/// Runs every row on the calling thread, in index order.
#[derive(Debug, Clone, Default)]
pub struct SerialDispatcher;

impl SerialDispatcher {
    pub fn new() -> Self {
        SerialDispatcher
    }
}

impl Dispatcher for SerialDispatcher {
    fn name(&self) -> &str {
        "serial"
    }

    fn for_each_row(&self, out: &mut [f64], width: usize, task: &RowTask<'_>) {
        if row_count(out, width).is_none() {
            return;
        }
        for (i, row) in out.chunks_mut(width).enumerate() {
            task(i, row);
        }
    }
}
