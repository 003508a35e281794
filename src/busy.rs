// src/busy.rs
// =============================================================================
// A shared "loading" indicator that stays visible while any request is in
// flight.
//
// How it works:
// - Every fetch-bearing scope calls `enter()` and keeps the returned guard
// - The indicator counts live guards; it is visible while the count is > 0
// - Dropping a guard decrements the count; the last one hides the indicator
//
// Nested scopes (a search that runs a repository collection that runs
// individual requests) all hold their own guard, so an inner scope finishing
// never hides the indicator while an outer scope is still working.
//
// On a terminal the indicator is an `indicatif` spinner on stderr. In tests and
// when output is piped it just counts.
//
// Rust concepts:
// - Arc<Mutex<T>>: Shared mutable state between clones
// - Drop: Code that runs automatically when a value goes out of scope (RAII)
// =============================================================================

use indicatif::ProgressBar;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Default)]
struct BusyState {
    depth: usize,
    entered: usize,
    spinner_enabled: bool,
    message: String,
    spinner: Option<ProgressBar>,
}

/// Reference-counted busy indicator. Clones share the same count.
#[derive(Clone, Default)]
pub struct BusyIndicator {
    state: Arc<Mutex<BusyState>>,
}

/// Keeps the indicator visible until dropped.
#[must_use = "the indicator hides again as soon as the guard is dropped"]
pub struct BusyGuard {
    state: Arc<Mutex<BusyState>>,
}

impl BusyIndicator {
    /// An indicator that only counts and never draws anything.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// An indicator that draws a spinner on stderr while busy.
    pub fn spinner(message: impl Into<String>) -> Self {
        let indicator = Self::default();
        {
            let mut state = lock(&indicator.state);
            state.spinner_enabled = true;
            state.message = message.into();
        }
        indicator
    }

    pub fn enter(&self) -> BusyGuard {
        let mut state = lock(&self.state);
        state.depth += 1;
        state.entered += 1;

        if state.depth == 1 && state.spinner_enabled {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(state.message.clone());
            spinner.enable_steady_tick(Duration::from_millis(100));
            state.spinner = Some(spinner);
        }

        BusyGuard {
            state: Arc::clone(&self.state),
        }
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).depth > 0
    }

    /// Number of scopes currently holding the indicator.
    pub fn depth(&self) -> usize {
        lock(&self.state).depth
    }

    /// Number of guards handed out since the indicator was created.
    pub fn times_entered(&self) -> usize {
        lock(&self.state).entered
    }
}

impl std::fmt::Debug for BusyIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyIndicator")
            .field("depth", &self.depth())
            .finish()
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        state.depth = state.depth.saturating_sub(1);

        if state.depth == 0 {
            if let Some(spinner) = state.spinner.take() {
                spinner.finish_and_clear();
            }
        }
    }
}

// A panic while holding the lock can't leave the counter half-updated,
// so a poisoned mutex is still safe to use.
fn lock(state: &Mutex<BusyState>) -> MutexGuard<'_, BusyState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
