//! Memory query backed by `/proc/meminfo`.

use crate::collector::procfs::parser::parse_meminfo;
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, MemoryQuery};
use crate::model::MemorySample;
use std::path::Path;

/// Reads host memory from `<proc_path>/meminfo`.
#[derive(Debug, Clone)]
pub struct ProcMemQuery<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> ProcMemQuery<F> {
    /// Creates a new meminfo query.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }
}

impl<F: FileSystem> MemoryQuery for ProcMemQuery<F> {
    fn query(&self) -> Result<MemorySample, CollectError> {
        let path = format!("{}/meminfo", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path))?;
        let info = parse_meminfo(&content).map_err(|e| CollectError::Parse(e.message))?;

        let available = info.mem_available.unwrap_or(info.mem_free);
        Ok(MemorySample::from_total_available(info.mem_total, available))
    }
}
