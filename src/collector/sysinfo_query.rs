//! Memory query for targets without `/proc`, backed by `sysinfo`.

use sysinfo::System;

use crate::collector::{CollectError, MemoryQuery};
use crate::model::MemorySample;

#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoQuery;

impl SysinfoQuery {
    pub fn new() -> Self {
        Self
    }
}

impl MemoryQuery for SysinfoQuery {
    fn query(&self) -> Result<MemorySample, CollectError> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory() / 1024;
        if total == 0 {
            return Err(CollectError::Parse("sysinfo reported zero memory".to_string()));
        }
        Ok(MemorySample::from_total_available(
            total,
            sys.available_memory() / 1024,
        ))
    }
}
