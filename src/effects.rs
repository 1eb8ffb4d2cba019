//! Dependency-keyed effect scheduling.
//!
//! An effect is (re)started only when its dependency tuple changes. Starting
//! a new run aborts the previous one and bumps a generation counter, so a
//! late result from an older run can always be told apart from the current
//! one.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::trace;

// ---

#[derive(Debug)]
pub struct EffectScheduler<K> {
    // ---
    deps: Option<K>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl<K> Default for EffectScheduler<K> {
    fn default() -> Self {
        Self {
            deps: None,
            generation: 0,
            in_flight: None,
        }
    }
}

impl<K: PartialEq> EffectScheduler<K> {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recently started run (0 before the first).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Spawn `effect` if `deps` differs from the last run's dependencies.
    ///
    /// Returns the generation handed to the new run, or `None` when the
    /// dependencies are unchanged and nothing was started. Must be called
    /// from within a tokio runtime.
    pub fn run_if_changed<F, Fut>(&mut self, deps: K, effect: F) -> Option<u64>
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        // ---
        if self.deps.as_ref() == Some(&deps) {
            return None;
        }

        self.cancel();
        self.generation += 1;
        self.deps = Some(deps);

        let generation = self.generation;
        trace!("Starting effect generation {}", generation);
        self.in_flight = Some(tokio::spawn(effect(generation)));
        Some(generation)
    }

    /// Abort the in-flight run, if any. Dependencies are kept.
    pub fn cancel(&mut self) {
        // ---
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                trace!("Aborting effect generation {}", self.generation);
            }
            handle.abort();
        }
    }
}

impl<K> Drop for EffectScheduler<K> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
