//! One-time client construction

use std::fmt;
use std::sync::OnceLock;

use crate::core::errors::Result;

type Factory<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

/// Memoized factory: builds its value on first use and hands out the same
/// value (or the same failure) for the rest of the process.
///
/// A failed construction is remembered and never retried. Concurrent first
/// callers block on a single construction.
pub struct OnceClient<T> {
    cell: OnceLock<Result<T>>,
    factory: Factory<T>,
}

impl<T> OnceClient<T> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self {
            cell: OnceLock::new(),
            factory: Box::new(factory),
        }
    }

    /// Get the client, constructing it on the first call
    pub fn get(&self) -> Result<&T> {
        self.cell
            .get_or_init(|| (self.factory)())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether construction has been attempted, successfully or not
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T> fmt::Debug for OnceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.cell.get() {
            None => "uninitialized",
            Some(Ok(_)) => "ready",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("OnceClient").field("state", &state).finish()
    }
}
