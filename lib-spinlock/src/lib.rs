//! Busy-waiting mutual-exclusion locks with different contention strategies.
//!
//! Every lock here implements [`RawLock`], and [`LockType`] dispatches over all
//! of them so a caller can treat the family uniformly. [`SpinLock`] couples a
//! raw lock with the data it protects.

pub mod alock;
pub mod backoff;
pub mod error;
pub mod lock_type;
pub mod spin_lock;
pub mod tas;
pub mod ttas;


use enum_dispatch::enum_dispatch;

pub use alock::{ALock, ALockPadded, ArrayLock};
pub use backoff::{BackoffConfig, BackoffLock, ExponentialBackoff};
pub use error::{LockError, Operation};
pub use lock_type::LockType;
pub use spin_lock::{Guard, SpinLock};
pub use tas::TASLock;
pub use ttas::TTASLock;

/// The acquire/release contract shared by every lock in this crate.
///
/// Locks are not reentrant: calling [`lock`](RawLock::lock) while already
/// holding the same lock spins forever.
///
/// Timed, interruptible and condition-variable operations are deliberately
/// absent. They are still part of the interface so that callers reaching for
/// them get an immediate [`LockError::Unsupported`] instead of a silent
/// approximation.
#[enum_dispatch]
pub trait RawLock: Send + Sync {
    /// Blocking: spin until the calling thread owns the lock.
    fn lock(&self);

    /// Release the lock.
    ///
    /// Must only be called by the thread currently holding the lock, exactly
    /// once per successful [`lock`](RawLock::lock).
    fn unlock(&self);

    /// Non-blocking acquisition. Not supported.
    fn try_lock(&self) -> Result<bool, crate::LockError> {
        Err(crate::LockError::Unsupported(crate::Operation::TryLock))
    }

    /// Acquisition bounded by a timeout. Not supported.
    fn try_lock_for(&self, _timeout: std::time::Duration) -> Result<bool, crate::LockError> {
        Err(crate::LockError::Unsupported(crate::Operation::TimedLock))
    }

    /// Acquisition that can be interrupted. Not supported.
    fn lock_interruptibly(&self) -> Result<(), crate::LockError> {
        Err(crate::LockError::Unsupported(
            crate::Operation::InterruptibleLock,
        ))
    }

    /// Derive a condition variable bound to this lock. Not supported.
    fn new_condition(&self) -> Result<std::convert::Infallible, crate::LockError> {
        Err(crate::LockError::Unsupported(crate::Operation::NewCondition))
    }
}
