pub mod chart;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod generation;
pub mod search;

#[cfg(test)]
mod testing;

pub use chart::ChartLoader;
pub use dashboard::{Dashboard, DashboardSettings};
pub use debounce::DebounceTimer;
pub use error::{LoadError, PolicyParseError};
pub use generation::{Generation, GenerationCounter, StaleResponsePolicy};
pub use search::{SearchController, SearchSnapshot};

use std::sync::{Mutex, MutexGuard, PoisonError};

// Controller state is plain data, so a panic mid-update leaves nothing to repair.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
