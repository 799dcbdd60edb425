//! Synchronization utilities for robust mutex and condition handling
//!
//! This module provides utilities for handling mutex poisoning in a
//! consistent manner across the codebase. A poisoned lock means some thread
//! panicked while holding the guard; rather than propagating the panic with
//! `unwrap()`, these helpers convert the poison into an application error
//! using a caller-supplied constructor.

use std::sync::{LockResult, MutexGuard, WaitTimeoutResult};

/// Handle poisoned mutex cases with consistent error handling
///
/// Converts mutex poison errors into application-specific errors using a
/// provided error constructor, so every lock site reports the failure the
/// same way.
///
/// # Arguments
/// * `result` - The result from a mutex lock operation
/// * `error_constructor` - Function to create the appropriate error type
///
/// # Returns
/// The mutex guard on success, or an application error on poison
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use boundedq::core::sync::handle_mutex_poison;
/// use boundedq::buffer::BufferError;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(
///     mutex.lock(),
///     |msg| BufferError::OperationFailed { message: msg }
/// ).unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(
            format!(
                "Internal synchronisation error (mutex poisoned). This indicates a panic occurred while holding a lock. PoisonError: {:?}",
                poison_err
            )
        )
    })
}

/// Handle poisoned condition-variable waits with consistent error handling
///
/// `Condvar::wait` returns the reacquired guard wrapped in a `LockResult`,
/// which is poisoned under the same circumstances as a direct lock. This is
/// the wait-side companion of [`handle_mutex_poison`].
pub fn handle_condvar_wait<'a, T, E>(
    result: LockResult<MutexGuard<'a, T>>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    result.map_err(|poison_err| {
        error_constructor(
            format!(
                "Internal synchronisation error (condition wait poisoned). This indicates a panic occurred while holding the lock. PoisonError: {:?}",
                poison_err
            )
        )
    })
}

/// Handle poisoned timed condition-variable waits
///
/// Like [`handle_condvar_wait`] but for `Condvar::wait_timeout`, which also
/// carries a [`WaitTimeoutResult`] indicating whether the wait expired.
pub fn handle_condvar_wait_timeout<'a, T, E>(
    result: LockResult<(MutexGuard<'a, T>, WaitTimeoutResult)>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<(MutexGuard<'a, T>, WaitTimeoutResult), E> {
    result.map_err(|poison_err| {
        error_constructor(
            format!(
                "Internal synchronisation error (timed condition wait poisoned). This indicates a panic occurred while holding the lock. PoisonError: {:?}",
                poison_err
            )
        )
    })
}
