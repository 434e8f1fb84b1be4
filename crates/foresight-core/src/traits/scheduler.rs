/// A unit of deferred work.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Host hook for work that must not block the caller.
///
/// The contract is advisory: a scheduler may run the task immediately, on a
/// worker pool, or at idle time. There is no cancellation; once scheduled a
/// task runs to completion.
pub trait IDeferredScheduler: Send + Sync {
    fn schedule(&self, task: DeferredTask);
}
