use std::time::{Duration, Instant};

/// A value paired with the wall-clock time it took to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    value: T,
    elapsed: Duration,
}

impl<T> Timed<T> {
    pub fn new(value: T, elapsed: Duration) -> Self {
        Timed { value, elapsed }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Duration) {
        (self.value, self.elapsed)
    }

    /// Transform the value, keeping the measured duration.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            value: f(self.value),
            elapsed: self.elapsed,
        }
    }
}

/// Run `f` to completion on the calling thread and measure it with a
/// monotonic clock.
pub fn time<T>(f: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let value = f();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}
