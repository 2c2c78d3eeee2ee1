use std::time::Duration;

use strum::Display;
use thiserror::Error;

/// Operations of a general-purpose lock interface that spin locks refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[strum(serialize = "try_lock")]
    TryLock,
    #[strum(serialize = "try_lock_for")]
    TimedLock,
    #[strum(serialize = "lock_interruptibly")]
    InterruptibleLock,
    #[strum(serialize = "new_condition")]
    NewCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("{0} is not supported by spin locks")]
    Unsupported(Operation),
    #[error("array lock capacity must be at least 1")]
    ZeroCapacity,
    #[error("more than {capacity} threads contend for an array lock of capacity {capacity}")]
    CapacityExceeded { capacity: usize },
    #[error("invalid backoff bounds: min {min:?}, max {max:?}")]
    InvalidBackoff { min: Duration, max: Duration },
}
