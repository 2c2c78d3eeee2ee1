use std::{num::ParseIntError, time::Duration};

use clap::*;
use libspinlock::{BackoffConfig, LockError};
use strum::{Display, IntoEnumIterator};

pub mod lock_target;

pub use lock_target::LockTarget;

#[derive(Debug, Parser)]
#[clap(name = "spinlock counter benchmark", version)]
/// Spin lock contention benchmark
pub struct App {
    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// One CSV record per trial
    Csv,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Thread counts to run every lock with
    #[arg(long, short, value_delimiter = ',', value_parser = parse_thread_count, default_values_t = (1..=8).collect::<Vec<usize>>())]
    pub threads: Vec<usize>,
    /// Acquire/increment/release cycles per thread
    #[arg(long, short, default_value_t = 50_000, value_parser = value_parser!(u64).range(1..))]
    pub iterations: u64,
    /// Locks to benchmark (all when omitted)
    #[arg(long, short, value_delimiter = ',')]
    pub locks: Option<Vec<LockTarget>>,
    /// Minimum backoff delay in microseconds
    #[arg(long, value_parser = parse_micros, default_value = "1")]
    pub backoff_min: Duration,
    /// Maximum backoff delay in microseconds
    #[arg(long, value_parser = parse_micros, default_value = "1024")]
    pub backoff_max: Duration,
    /// Repetitions of every (lock, threads) combination
    #[arg(long, short = 'n', default_value_t = 1, value_parser = value_parser!(u32).range(1..))]
    pub trials: u32,
    /// Pin worker i to core i modulo the number of cores
    #[arg(long, short)]
    pub pin: bool,
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    #[arg(long, short)]
    pub verbose: bool,
}

impl GlobalOpts {
    pub fn targets(&self) -> Vec<LockTarget> {
        match &self.locks {
            Some(locks) => locks.clone(),
            None => LockTarget::iter().collect(),
        }
    }

    pub fn backoff(&self) -> Result<BackoffConfig, LockError> {
        BackoffConfig::new(self.backoff_min, self.backoff_max)
    }
}

pub(crate) fn parse_thread_count(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(0) => Err("thread count must be at least 1".to_owned()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

pub(crate) fn parse_micros(arg: &str) -> Result<Duration, ParseIntError> {
    let micros = arg.parse::<u64>()?;
    Ok(Duration::from_micros(micros))
}
