use std::thread;

use core_affinity::CoreId;
use debug_print::debug_eprintln;
use libspinlock::SpinLock;
use quanta::Clock;

use crate::benchmark::{bencher::LockBenchInfo, BenchError, Record};

/// One trial: `num_thread` workers each run `iterations` locked increments
/// of a plain counter, timed from the first spawn to the last join.
pub fn counter_trial(info: &LockBenchInfo) -> Result<Record, BenchError> {
    let lock = info.target.to_locktype(info.num_thread, info.backoff)?;
    let locktype = lock.to_string();
    let counter = SpinLock::new(lock, 0u64);

    let core_ids = if info.pin {
        core_affinity::get_core_ids().unwrap_or_default()
    } else {
        Vec::new()
    };

    debug_eprintln!(
        "Start benchmark for {} with {} threads",
        locktype,
        info.num_thread
    );

    let clock = Clock::new();
    let begin = clock.now();

    let joined = thread::scope(|scope| {
        let handles = (0..info.num_thread)
            .map(|id| {
                let counter = &counter;
                let core_id = core_ids.get(id % core_ids.len().max(1)).copied();

                thread::Builder::new()
                    .name(format!("Thread {}", id))
                    .spawn_scoped(scope, move || {
                        thread_job(id, counter, info.iterations, core_id, info.verbose)
                    })
                    .map_err(|source| BenchError::Spawn { id, source })
            })
            .collect::<Vec<_>>();

        // join every worker before looking at any failure
        handles
            .into_iter()
            .enumerate()
            .map(|(id, handle)| {
                handle.and_then(|handle| {
                    handle
                        .join()
                        .map_err(|_| BenchError::WorkerPanicked { id })
                })
            })
            .collect::<Vec<_>>()
    });

    let elapsed = clock.now().duration_since(begin);
    joined.into_iter().collect::<Result<Vec<u64>, BenchError>>()?;

    Ok(Record::new(
        locktype,
        info.num_thread,
        info.iterations,
        info.trial,
        elapsed,
        counter.into_inner(),
    ))
}

fn thread_job(
    id: usize,
    counter: &SpinLock<u64>,
    iterations: u64,
    core_id: Option<CoreId>,
    verbose: bool,
) -> u64 {
    if let Some(core_id) = core_id {
        core_affinity::set_for_current(core_id);
    }

    let mut loop_result = 0u64;

    for _ in 0..iterations {
        // critical section
        let mut guard = counter.lock();
        let value = *guard;
        *guard = value + 1;
        drop(guard);

        loop_result += 1;
    }

    if verbose {
        eprintln!("Thread {} finished with result {}", id, loop_result);
    }

    loop_result
}
