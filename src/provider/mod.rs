//! Provider abstraction for memory data sinks.
//!
//! A provider both refreshes memory data and renders it. The session picks
//! one variant at selection time and drives it through
//! `Box<dyn MemoryDataProvider>`:
//! - `ConsoleProvider`: redraws the terminal with the current sample and
//!   the recent history table
//! - `FileLoggingProvider`: appends each sample to a log file and confirms
//!   the destination once
//!
//! Both variants share sampling through [`Sampler`] rather than one wrapping
//! the other.

mod console;
mod file_log;
mod history;

pub use console::ConsoleProvider;
pub use file_log::{FileLoggingProvider, format_log_line};
pub use history::{HISTORY_CAPACITY, HistoryIter, HistoryRow, MemorySampleHistory};

use std::io::Write;

use tracing::trace;

use crate::collector::{CollectError, MemoryQuery};
use crate::model::MemorySample;

/// Error types that can occur during provider operations.
#[derive(Debug)]
pub enum ProviderError {
    /// The platform memory query failed for this tick.
    Query(CollectError),
    /// Rendering or file output failed.
    Io(std::io::Error),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Query(e) => write!(f, "Memory query failed: {}", e),
            ProviderError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<CollectError> for ProviderError {
    fn from(e: CollectError) -> Self {
        ProviderError::Query(e)
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(e: std::io::Error) -> Self {
        ProviderError::Io(e)
    }
}

/// Common capability of every memory data sink.
///
/// The trait is object-safe and meant to be used as `Box<dyn MemoryDataProvider>`.
pub trait MemoryDataProvider: Send {
    /// Pulls one fresh sample, stores it as current and records it into the
    /// history.
    ///
    /// On error the previous sample stays current and nothing is recorded.
    fn update_data(&mut self) -> Result<(), ProviderError>;

    /// Renders the current state to `out`.
    ///
    /// Never changes sampled data; may change presentation-only state.
    fn display_data(&mut self, out: &mut dyn Write) -> Result<(), ProviderError>;

    /// Returns the most recent successful sample, if any.
    fn current(&self) -> Option<&MemorySample>;

    /// Returns the rolling history of recent samples.
    fn history(&self) -> &MemorySampleHistory;
}

/// Sampling state shared by all provider variants.
#[derive(Debug)]
pub struct Sampler<Q: MemoryQuery> {
    query: Q,
    current: Option<MemorySample>,
    history: MemorySampleHistory,
}

impl<Q: MemoryQuery> Sampler<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            query,
            current: None,
            history: MemorySampleHistory::new(),
        }
    }

    /// Queries the platform once, keeps the result as current and records it.
    pub fn sample_and_record(&mut self) -> Result<MemorySample, CollectError> {
        let sample = self.query.query()?;
        trace!(
            "Sampled total={} used={} available={}",
            sample.total_kb, sample.used_kb, sample.available_kb
        );
        self.history.record(&sample);
        self.current = Some(sample);
        Ok(sample)
    }

    pub fn current(&self) -> Option<&MemorySample> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &MemorySampleHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::ProcMemQuery;
    use crate::collector::mock::MockFs;

    #[test]
    fn test_sampler_records_each_sample() {
        let mut sampler = Sampler::new(ProcMemQuery::new(MockFs::typical_system(), "/proc"));
        assert!(sampler.current().is_none());

        sampler.sample_and_record().unwrap();
        sampler.sample_and_record().unwrap();

        assert_eq!(sampler.history().len(), 2);
        assert_eq!(sampler.current().unwrap().total_kb, 16384000);
    }

    #[test]
    fn test_sampler_failure_keeps_previous_state() {
        let mut fs = MockFs::typical_system();
        let mut sampler = Sampler::new(ProcMemQuery::new(fs.clone(), "/proc"));
        let first = sampler.sample_and_record().unwrap();

        fs.remove_file("/proc/meminfo");
        assert!(sampler.sample_and_record().is_err());

        assert_eq!(sampler.current(), Some(&first));
        assert_eq!(sampler.history().len(), 1);
    }

    #[test]
    fn test_provider_error_display() {
        let err: ProviderError = CollectError::Parse("bad".to_string()).into();
        assert_eq!(err.to_string(), "Memory query failed: parse error: bad");
    }
}
