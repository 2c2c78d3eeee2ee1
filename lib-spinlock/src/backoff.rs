use std::{cell::Cell, thread, time::Duration};

use crate::{ttas::TTASLock, LockError, RawLock};

const DEFAULT_MIN_DELAY: Duration = Duration::from_micros(1);
const DEFAULT_MAX_DELAY: Duration = Duration::from_micros(1024);

/// Delay bounds for [`BackoffLock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffConfig {
    min_delay: Duration,
    max_delay: Duration,
}

impl BackoffConfig {
    /// `min_delay` must be non-zero and not larger than `max_delay`.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Result<Self, LockError> {
        if min_delay.is_zero() || min_delay > max_delay {
            return Err(LockError::InvalidBackoff {
                min: min_delay,
                max: max_delay,
            });
        }

        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

/// Randomized exponential backoff.
///
/// Each [`backoff`](ExponentialBackoff::backoff) sleeps for a uniformly random
/// duration in `[0, current]` and then doubles `current`, saturating at the
/// configured maximum.
#[derive(Debug)]
pub struct ExponentialBackoff {
    current: Cell<Duration>,
    config: BackoffConfig,
}

impl ExponentialBackoff {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            current: Cell::new(config.min_delay),
            config,
        }
    }

    /// Upper bound of the next sleep.
    #[inline]
    pub fn current(&self) -> Duration {
        self.current.get()
    }

    pub fn backoff(&self) {
        let limit = self.current.get();
        let limit_nanos = u64::try_from(limit.as_nanos()).unwrap_or(u64::MAX);

        thread::sleep(Duration::from_nanos(fastrand::u64(0..=limit_nanos)));

        self.current
            .set(limit.saturating_mul(2).min(self.config.max_delay));
    }

    pub fn reset(&self) {
        self.current.set(self.config.min_delay);
    }
}

/// Test-and-test-and-set lock that sleeps after every lost race.
#[derive(Debug, Default)]
pub struct BackoffLock {
    inner: TTASLock,
    config: BackoffConfig,
}

impl BackoffLock {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            inner: TTASLock::new(),
            config,
        }
    }

    pub fn config(&self) -> BackoffConfig {
        self.config
    }
}

impl RawLock for BackoffLock {
    fn lock(&self) {
        // the delay starts from the minimum on every acquisition
        let backoff = ExponentialBackoff::new(self.config);

        loop {
            self.inner.wait_unlocked();
            if self.inner.try_acquire() {
                return;
            }
            backoff.backoff();
        }
    }

    #[inline]
    fn unlock(&self) {
        self.inner.unlock();
    }
}
