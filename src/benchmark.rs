use std::{io, time::Duration};

use libspinlock::LockError;
use serde::Serialize;
use serde_with::{serde_as, DurationNanoSeconds};
use thiserror::Error;

use crate::command_parser::GlobalOpts;

use self::bencher::{Bencher, LockBenchInfo};
use self::report::Reporter;

pub mod bencher;
pub mod counter_job;
pub mod report;

pub fn benchmark(options: &GlobalOpts) -> anyhow::Result<()> {
    let bencher = Bencher::new(options)?;

    let mut reporter = Reporter::new(options.format, io::stdout());
    bencher.benchmark(&mut reporter)?;
    reporter.flush()?;

    Ok(())
}

#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("failed to spawn worker {id}: {source}")]
    Spawn { id: usize, source: io::Error },
    #[error("worker {id} panicked, counter cannot be trusted")]
    WorkerPanicked { id: usize },
}

#[serde_as]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub locktype: String,
    pub thread_num: usize,
    pub iterations: u64,
    pub trial: u32,
    #[serde_as(as = "DurationNanoSeconds")]
    #[serde(rename = "elapsed_ns")]
    pub elapsed: Duration,
    pub throughput: f64,
    pub counter: u64,
    pub expected: u64,
    pub correct: bool,
}

impl Record {
    pub fn new(
        locktype: String,
        thread_num: usize,
        iterations: u64,
        trial: u32,
        elapsed: Duration,
        counter: u64,
    ) -> Self {
        let expected = thread_num as u64 * iterations;

        Self {
            locktype,
            thread_num,
            iterations,
            trial,
            elapsed,
            throughput: expected as f64 / elapsed.as_secs_f64(),
            counter,
            expected,
            correct: counter == expected,
        }
    }
}

/// CSV row for a trial that produced no measurement. Columns match [`Record`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FailedRecord {
    pub locktype: String,
    pub thread_num: usize,
    pub iterations: u64,
    pub trial: u32,
    pub elapsed_ns: Option<u64>,
    pub throughput: Option<f64>,
    pub counter: Option<u64>,
    pub expected: u64,
    pub correct: bool,
}

impl FailedRecord {
    pub fn new(info: &LockBenchInfo) -> Self {
        Self {
            locktype: info.target.to_string(),
            thread_num: info.num_thread,
            iterations: info.iterations,
            trial: info.trial,
            elapsed_ns: None,
            throughput: None,
            counter: None,
            expected: info.num_thread as u64 * info.iterations,
            correct: false,
        }
    }
}
