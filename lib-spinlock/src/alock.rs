use std::{
    cell::Cell,
    hint::spin_loop,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crossbeam::utils::CachePadded;
use thread_local::ThreadLocal;

use crate::{LockError, RawLock};

/// Anderson array-based queue lock.
pub type ALock = ArrayLock<AtomicBool>;

/// Anderson lock whose slot flags each occupy their own cache line.
pub type ALockPadded = ArrayLock<CachePadded<AtomicBool>>;

/// Storage of one slot flag.
pub trait SlotFlag: Send + Sync {
    fn new(granted: bool) -> Self;

    fn flag(&self) -> &AtomicBool;
}

impl SlotFlag for AtomicBool {
    #[inline]
    fn new(granted: bool) -> Self {
        AtomicBool::new(granted)
    }

    #[inline]
    fn flag(&self) -> &AtomicBool {
        self
    }
}

impl SlotFlag for CachePadded<AtomicBool> {
    #[inline]
    fn new(granted: bool) -> Self {
        CachePadded::new(AtomicBool::new(granted))
    }

    #[inline]
    fn flag(&self) -> &AtomicBool {
        self
    }
}

/// Slot assigned to a thread by its most recent acquire.
#[derive(Debug, Default)]
struct SlotRecord {
    slot: Cell<usize>,
    ticket: Cell<usize>,
}

/// Array-based queue lock.
///
/// Each acquirer draws a ticket and spins on its own slot `ticket % capacity`
/// until the previous holder hands the slot the flag. Waiters are served in
/// ticket order.
///
/// `capacity` bounds the number of live threads that have ever locked this
/// instance, not the number contending at one moment. Threads that only take
/// turns still each count while they are alive. The first `lock` of a thread
/// beyond that bound panics instead of aliasing another waiter's slot.
#[derive(Debug)]
pub struct ArrayLock<F: SlotFlag> {
    tail: AtomicUsize,
    flags: Box<[F]>,
    registered: AtomicUsize,
    my_slot: ThreadLocal<SlotRecord>,
}

impl<F: SlotFlag> ArrayLock<F> {
    pub fn new(capacity: usize) -> Result<Self, LockError> {
        if capacity == 0 {
            return Err(LockError::ZeroCapacity);
        }

        Ok(Self {
            tail: AtomicUsize::new(0),
            flags: (0..capacity).map(|i| F::new(i == 0)).collect(),
            registered: AtomicUsize::new(0),
            my_slot: ThreadLocal::with_capacity(capacity),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.flags.len()
    }

    /// Ticket drawn by the calling thread's most recent `lock`, if any.
    pub fn held_ticket(&self) -> Option<usize> {
        self.my_slot.get().map(|record| record.ticket.get())
    }

    fn record(&self) -> &SlotRecord {
        match self.my_slot.get_or_try(|| self.register()) {
            Ok(record) => record,
            Err(e) => panic!("{}", e),
        }
    }

    fn register(&self) -> Result<SlotRecord, LockError> {
        let capacity = self.capacity();

        if self.registered.fetch_add(1, Ordering::Relaxed) >= capacity {
            self.registered.fetch_sub(1, Ordering::Relaxed);
            return Err(LockError::CapacityExceeded { capacity });
        }

        Ok(SlotRecord::default())
    }

    #[cfg(test)]
    pub(crate) fn granted_slots(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, f)| f.flag().load(Ordering::Acquire))
            .map(|(i, _)| i)
            .collect()
    }
}

impl<F: SlotFlag> RawLock for ArrayLock<F> {
    fn lock(&self) {
        let record = self.record();

        let ticket = self.tail.fetch_add(1, Ordering::Relaxed);
        let slot = ticket % self.capacity();
        record.ticket.set(ticket);
        record.slot.set(slot);

        while !self.flags[slot].flag().load(Ordering::Acquire) {
            spin_loop();
        }
    }

    fn unlock(&self) {
        let Some(record) = self.my_slot.get() else {
            panic!("array lock released by a thread that never acquired it");
        };

        let slot = record.slot.get();
        self.flags[slot].flag().store(false, Ordering::Relaxed);
        self.flags[(slot + 1) % self.capacity()]
            .flag()
            .store(true, Ordering::Release);
    }
}
