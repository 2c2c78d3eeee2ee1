use std::io::Write;

use crate::{
    benchmark::{bencher::LockBenchInfo, BenchError, FailedRecord, Record},
    command_parser::OutputFormat,
};

const NAME_WIDTH: usize = 20;
const RULE_WIDTH: usize = 65;

/// Writes trial results either as an aligned table or as CSV records.
pub enum Reporter<W: Write> {
    Table(W),
    Csv(csv::Writer<W>),
}

impl<W: Write> Reporter<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        match format {
            OutputFormat::Table => Reporter::Table(writer),
            OutputFormat::Csv => Reporter::Csv(csv::Writer::from_writer(writer)),
        }
    }

    pub fn header(&mut self, iterations: u64) -> Result<(), csv::Error> {
        if let Reporter::Table(w) = self {
            writeln!(w, "=== Spinlock Performance Comparison ===\n")?;
            writeln!(w, "Configuration: {} iterations/thread\n", iterations)?;
            writeln!(
                w,
                "{:<NAME_WIDTH$} {:<10} {:<15} {}",
                "Lock", "Time", "Throughput", "Correct"
            )?;
            writeln!(w, "{}", "-".repeat(RULE_WIDTH))?;
        }
        Ok(())
    }

    pub fn group(&mut self, num_thread: usize) -> Result<(), csv::Error> {
        if let Reporter::Table(w) = self {
            writeln!(w, "\n{} threads:", num_thread)?;
        }
        Ok(())
    }

    pub fn record(&mut self, record: &Record) -> Result<(), csv::Error> {
        match self {
            Reporter::Table(w) => writeln!(w, "{}", format_row(record))?,
            Reporter::Csv(w) => w.serialize(record)?,
        }
        Ok(())
    }

    /// CSV output gets a record with empty measurement columns.
    pub fn failure(&mut self, info: &LockBenchInfo, error: &BenchError) -> Result<(), csv::Error> {
        match self {
            Reporter::Table(w) => {
                writeln!(w, "{:<NAME_WIDTH$} ✗ ERROR: {}", info.target.to_string(), error)?
            }
            Reporter::Csv(w) => w.serialize(FailedRecord::new(info))?,
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), csv::Error> {
        match self {
            Reporter::Table(w) => w.flush()?,
            Reporter::Csv(w) => w.flush()?,
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Result<W, csv::Error> {
        match self {
            Reporter::Table(w) => Ok(w),
            Reporter::Csv(w) => w.into_inner().map_err(|e| e.into_error().into()),
        }
    }
}

pub fn format_row(record: &Record) -> String {
    format!(
        "{:<NAME_WIDTH$} {:6.3}s  {:10.0} ops/s  {}",
        record.locktype,
        record.elapsed.as_secs_f64(),
        record.throughput,
        if record.correct { "✓" } else { "✗ FAILED" }
    )
}
