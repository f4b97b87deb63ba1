//! Host memory collection.
//!
//! The rest of the crate sees the platform only through [`MemoryQuery`]. On
//! Linux the query parses `/proc/meminfo`; elsewhere it goes through
//! `sysinfo`.

pub mod mock;
mod procfs;
#[cfg(not(target_os = "linux"))]
mod sysinfo_query;
pub mod traits;

pub use procfs::{MemInfo, ParseError, ProcMemQuery, parse_meminfo};
#[cfg(not(target_os = "linux"))]
pub use sysinfo_query::SysinfoQuery;
pub use traits::{FileSystem, RealFs};

use crate::model::MemorySample;

/// Errors that can occur while querying host memory.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading the platform source.
    Io(std::io::Error),
    /// Platform source returned data that could not be parsed.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

/// The single OS touchpoint: returns one memory reading for the current host.
pub trait MemoryQuery: Send {
    fn query(&self) -> Result<MemorySample, CollectError>;
}

/// Memory query used for the build target.
#[cfg(target_os = "linux")]
pub type PlatformQuery = ProcMemQuery<RealFs>;
#[cfg(not(target_os = "linux"))]
pub type PlatformQuery = SysinfoQuery;

/// Creates the memory query for the build target.
///
/// `proc_path` is only meaningful on Linux.
#[cfg(target_os = "linux")]
pub fn platform_query(proc_path: &str) -> PlatformQuery {
    ProcMemQuery::new(RealFs::new(), proc_path)
}

/// Creates the memory query for the build target.
///
/// `proc_path` is only meaningful on Linux.
#[cfg(not(target_os = "linux"))]
pub fn platform_query(_proc_path: &str) -> PlatformQuery {
    SysinfoQuery::new()
}
