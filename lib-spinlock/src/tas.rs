use std::{
    hint::spin_loop,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::RawLock;

/// Test-and-set lock.
///
/// Every spin iteration is an atomic swap, so each waiter keeps invalidating
/// the cache line holding the flag. This is the baseline the other locks are
/// measured against.
#[derive(Debug, Default)]
pub struct TASLock {
    flag: AtomicBool,
}

impl TASLock {
    pub fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }
}

impl RawLock for TASLock {
    #[inline]
    fn lock(&self) {
        while self.flag.swap(true, Ordering::Acquire) {
            spin_loop();
        }
    }

    #[inline]
    fn unlock(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
