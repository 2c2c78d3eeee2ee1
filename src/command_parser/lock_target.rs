use clap::ValueEnum;
use libspinlock::{
    ALock, ALockPadded, BackoffConfig, BackoffLock, LockError, LockType, TASLock, TTASLock,
};
use strum::{Display, EnumIter};

#[derive(Debug, ValueEnum, EnumIter, Clone, Copy, PartialEq, Eq, Display)]
pub enum LockTarget {
    /// Benchmark Test-and-Set Lock
    #[value(name = "tas")]
    TAS,
    /// Benchmark Test-and-Test-and-Set Lock
    #[value(name = "ttas")]
    TTAS,
    /// Benchmark Exponential Backoff Lock
    #[value(name = "backoff")]
    Backoff,
    /// Benchmark Anderson Array Lock
    #[value(name = "alock")]
    ALock,
    /// Benchmark Anderson Array Lock (cache-padded slots)
    #[value(name = "alock-padded")]
    #[strum(serialize = "ALock (padded)")]
    ALockPadded,
}

impl LockTarget {
    /// Builds a fresh lock for one trial with `num_thread` contenders.
    pub fn to_locktype(
        &self,
        num_thread: usize,
        backoff: BackoffConfig,
    ) -> Result<LockType, LockError> {
        Ok(match self {
            LockTarget::TAS => TASLock::new().into(),
            LockTarget::TTAS => TTASLock::new().into(),
            LockTarget::Backoff => BackoffLock::new(backoff).into(),
            LockTarget::ALock => ALock::new(num_thread)?.into(),
            LockTarget::ALockPadded => ALockPadded::new(num_thread)?.into(),
        })
    }
}
