use std::io::Write;

use itertools::iproduct;
use libspinlock::{BackoffConfig, LockError};

use crate::{
    benchmark::{counter_job::counter_trial, report::Reporter, BenchError, Record},
    command_parser::{GlobalOpts, LockTarget},
};

#[derive(Debug, Clone)]
pub struct Bencher {
    pub threads: Vec<usize>,
    pub iterations: u64,
    pub targets: Vec<LockTarget>,
    pub backoff: BackoffConfig,
    pub trials: u32,
    pub pin: bool,
    pub verbose: bool,
}

impl Bencher {
    pub fn new(options: &GlobalOpts) -> Result<Self, LockError> {
        Ok(Self {
            threads: options.threads.clone(),
            iterations: options.iterations,
            targets: options.targets(),
            backoff: options.backoff()?,
            trials: options.trials,
            pin: options.pin,
            verbose: options.verbose,
        })
    }

    /// Runs every (threads, trial, lock) combination, reporting each as it
    /// finishes. A failed trial is reported and the matrix carries on.
    pub fn benchmark<W: Write>(&self, reporter: &mut Reporter<W>) -> Result<Vec<Record>, csv::Error> {
        self.benchmark_with(reporter, counter_trial)
    }

    pub fn benchmark_with<W, F>(
        &self,
        reporter: &mut Reporter<W>,
        trial_job: F,
    ) -> Result<Vec<Record>, csv::Error>
    where
        W: Write,
        F: Fn(&LockBenchInfo) -> Result<Record, BenchError>,
    {
        let mut records = Vec::new();

        reporter.header(self.iterations)?;

        for &num_thread in &self.threads {
            reporter.group(num_thread)?;

            for (trial, &target) in iproduct!(0..self.trials, &self.targets) {
                let info = LockBenchInfo {
                    target,
                    num_thread,
                    iterations: self.iterations,
                    trial,
                    backoff: self.backoff,
                    pin: self.pin,
                    verbose: self.verbose,
                };

                match trial_job(&info) {
                    Ok(record) => {
                        reporter.record(&record)?;
                        records.push(record);
                    }
                    Err(e) => {
                        eprintln!("{} with {} threads failed: {}", target, num_thread, e);
                        reporter.failure(&info, &e)?;
                    }
                }
            }
        }

        Ok(records)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LockBenchInfo {
    pub target: LockTarget,
    pub num_thread: usize,
    pub iterations: u64,
    pub trial: u32,
    pub backoff: BackoffConfig,
    pub pin: bool,
    pub verbose: bool,
}
