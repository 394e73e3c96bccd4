use crate::recipes::Recipe;

/// Thread-safe progress reporting for batch composition.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A batch of `total` recipes has started.
    fn begin(&self, _total: usize) {}

    /// One recipe finished, successfully or not. Called from worker threads.
    fn recipe_done(&self, _recipe: Recipe, _ok: bool) {}

    /// Every recipe in the batch has finished.
    fn finish(&self) {}
}

pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
