use std::{
    hint::spin_loop,
    sync::atomic::{AtomicBool, Ordering},
};

use crossbeam::atomic::AtomicConsume;

use crate::RawLock;

/// Test-and-test-and-set lock.
///
/// Waiters spin on a read of the flag, which is served from their own cache
/// while the lock is held, and only attempt the swap once the flag reads
/// unlocked.
#[derive(Debug, Default)]
pub struct TTASLock {
    flag: AtomicBool,
}

impl TTASLock {
    pub fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Read-only spin until the flag is observed unlocked.
    #[inline]
    pub(crate) fn wait_unlocked(&self) {
        while self.flag.load_consume() {
            spin_loop();
        }
    }

    /// One test-and-set attempt. Returns true if the lock was taken.
    #[inline]
    pub(crate) fn try_acquire(&self) -> bool {
        !self.flag.swap(true, Ordering::Acquire)
    }
}

impl RawLock for TTASLock {
    #[inline]
    fn lock(&self) {
        loop {
            self.wait_unlocked();
            if self.try_acquire() {
                return;
            }
        }
    }

    #[inline]
    fn unlock(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
