//! File logging provider: appends one line per sample to a log file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::collector::MemoryQuery;
use crate::model::MemorySample;

use super::{MemoryDataProvider, MemorySampleHistory, ProviderError, Sampler};

/// Appends each sample to `path` and tells the user once where data goes.
///
/// The file is opened and closed on every tick, so no handle outlives a
/// single `update_data` call.
pub struct FileLoggingProvider<Q: MemoryQuery> {
    sampler: Sampler<Q>,
    path: PathBuf,
    message_shown: bool,
}

impl<Q: MemoryQuery> FileLoggingProvider<Q> {
    pub fn new(query: Q, path: impl Into<PathBuf>) -> Self {
        Self {
            sampler: Sampler::new(query),
            path: path.into(),
            message_shown: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, sample: &MemorySample) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_log_line(sample).as_bytes())
    }
}

/// Formats one log line, newline included.
pub fn format_log_line(sample: &MemorySample) -> String {
    format!(
        "Used Memory: {} KB, Available Memory: {} KB\n",
        sample.used_kb, sample.available_kb
    )
}

impl<Q: MemoryQuery> MemoryDataProvider for FileLoggingProvider<Q> {
    fn update_data(&mut self) -> Result<(), ProviderError> {
        let sample = self.sampler.sample_and_record()?;

        // A failed write only loses this tick's line.
        match self.append_line(&sample) {
            Ok(()) => debug!("Appended sample to {}", self.path.display()),
            Err(e) => error!(
                "Unable to open file {} for writing: {}",
                self.path.display(),
                e
            ),
        }
        Ok(())
    }

    fn display_data(&mut self, out: &mut dyn Write) -> Result<(), ProviderError> {
        if self.message_shown {
            return Ok(());
        }
        writeln!(
            out,
            "Memory information has been saved to {}",
            self.path.display()
        )?;
        writeln!(out, "Press 3 to exit or 4 to return to the menu")?;
        out.flush()?;
        self.message_shown = true;
        Ok(())
    }

    fn current(&self) -> Option<&MemorySample> {
        self.sampler.current()
    }

    fn history(&self) -> &MemorySampleHistory {
        self.sampler.history()
    }
}
