use std::{
    cell::UnsafeCell,
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use crate::{
    alock::{ArrayLock, SlotFlag},
    LockType, RawLock,
};

/// Data protected by a [`RawLock`].
///
/// The raw lock is kept private, so the only way to release it is by dropping
/// the [`Guard`] returned from [`lock`](SpinLock::lock).
pub struct SpinLock<T, L: RawLock = LockType> {
    lock: L,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send, L: RawLock> Send for SpinLock<T, L> {}
unsafe impl<T: Send, L: RawLock> Sync for SpinLock<T, L> {}

/// Releases the lock when dropped.
///
/// Not `Send`: queue locks release through state owned by the acquiring
/// thread.
pub struct Guard<'s, T, L: RawLock> {
    lock: &'s SpinLock<T, L>,
    _not_send: PhantomData<*const ()>,
}

unsafe impl<'s, T: Sync, L: RawLock> Sync for Guard<'s, T, L> {}

impl<T, L: RawLock> SpinLock<T, L> {
    pub fn new(lock: L, data: T) -> Self {
        Self {
            lock,
            data: UnsafeCell::new(data),
        }
    }

    pub fn lock(&self) -> Guard<'_, T, L> {
        self.lock.lock();

        Guard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T, F: SlotFlag> SpinLock<T, ArrayLock<F>> {
    /// Ticket of the calling thread's most recent acquisition.
    pub fn held_ticket(&self) -> Option<usize> {
        self.lock.held_ticket()
    }
}

impl<T, L: RawLock + fmt::Debug> fmt::Debug for SpinLock<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinLock")
            .field("lock", &self.lock)
            .finish_non_exhaustive()
    }
}

impl<'s, T, L: RawLock> Deref for Guard<'s, T, L> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*self.lock.data.get() }
    }
}

impl<'s, T, L: RawLock> DerefMut for Guard<'s, T, L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<'s, T, L: RawLock> Drop for Guard<'s, T, L> {
    fn drop(&mut self) {
        self.lock.lock.unlock();
    }
}
