//! Liveness marker for the context that consumes prediction results.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag telling in-flight batches whether their consumer still exists.
///
/// The consuming context creates one token and hands clones to every batch
/// it starts. Once [`end`](Self::end) is called, no batch started under this
/// token will touch shared state again. Ending is one-way.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness {
    /// Create a live token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Check whether the consumer is still active.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the consumer as torn down.
    pub fn end(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
