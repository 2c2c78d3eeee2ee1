use std::fmt::{self, Display};

use enum_dispatch::enum_dispatch;

use crate::{
    alock::{ALock, ALockPadded},
    backoff::BackoffLock,
    tas::TASLock,
    ttas::TTASLock,
};

#[enum_dispatch(RawLock)]
#[derive(Debug)]
pub enum LockType {
    TAS(TASLock),
    TTAS(TTASLock),
    Backoff(BackoffLock),
    ALock(ALock),
    ALockPadded(ALockPadded),
}

impl Display for LockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockType::TAS(_) => write!(f, "TAS"),
            LockType::TTAS(_) => write!(f, "TTAS"),
            LockType::Backoff(_) => write!(f, "Backoff"),
            LockType::ALock(_) => write!(f, "ALock"),
            LockType::ALockPadded(_) => write!(f, "ALock (padded)"),
        }
    }
}
