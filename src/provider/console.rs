//! Console provider: redraws the terminal every tick.

use std::io::Write;

use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};

use crate::collector::MemoryQuery;
use crate::model::MemorySample;

use super::{MemoryDataProvider, MemorySampleHistory, ProviderError, Sampler};

/// Renders the current sample and the history table to the console.
pub struct ConsoleProvider<Q: MemoryQuery> {
    sampler: Sampler<Q>,
}

impl<Q: MemoryQuery> ConsoleProvider<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            sampler: Sampler::new(query),
        }
    }
}

impl<Q: MemoryQuery> MemoryDataProvider for ConsoleProvider<Q> {
    fn update_data(&mut self) -> Result<(), ProviderError> {
        self.sampler.sample_and_record()?;
        Ok(())
    }

    fn display_data(&mut self, out: &mut dyn Write) -> Result<(), ProviderError> {
        out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;

        let sample = self.sampler.current().copied().unwrap_or_default();
        writeln!(out, "Total Memory: {} KB", sample.total_kb)?;
        writeln!(out, "Used Memory: {} KB", sample.used_kb)?;
        writeln!(out, "Available Memory: {} KB", sample.available_kb)?;
        writeln!(out)?;
        writeln!(out, "\t\tPRESS 3 TO EXIT, 4 FOR MENU")?;
        writeln!(out, "Memory history (past 4 seconds):")?;
        writeln!(out, "Time (s)\tUsed Memory (KB)\tAvailable Memory (KB)")?;
        for row in self.sampler.history() {
            writeln!(
                out,
                "\t{}\t{}\t\t{}",
                row.offset_secs, row.used_kb, row.available_kb
            )?;
        }
        out.flush()?;
        Ok(())
    }

    fn current(&self) -> Option<&MemorySample> {
        self.sampler.current()
    }

    fn history(&self) -> &MemorySampleHistory {
        self.sampler.history()
    }
}
