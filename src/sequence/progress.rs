use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe "one more frame finished" notification.
pub trait ProgressSink: Send + Sync {
    fn advance(&self);
}

/// Counts completed frames.
#[derive(Debug, Default)]
pub struct AtomicProgress {
    done: AtomicU64,
}

impl AtomicProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }
}

impl ProgressSink for AtomicProgress {
    fn advance(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/progress.rs"]
mod tests;
