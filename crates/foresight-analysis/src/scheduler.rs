//! Deferred-task schedulers for the second sensitivity phase.

use foresight_core::traits::{DeferredTask, IDeferredScheduler};

/// Runs every task immediately on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

impl IDeferredScheduler for InlineScheduler {
    fn schedule(&self, task: DeferredTask) {
        task();
    }
}

/// Hands tasks to the global rayon pool and returns at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayonScheduler;

impl IDeferredScheduler for RayonScheduler {
    fn schedule(&self, task: DeferredTask) {
        rayon::spawn(task);
    }
}
