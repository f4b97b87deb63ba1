//! `/proc` based memory collection.

mod parser;
mod system;

pub use parser::{MemInfo, ParseError, parse_meminfo};
pub use system::ProcMemQuery;
