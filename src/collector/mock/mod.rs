//! Mock filesystem for testing the memory query without Linux `/proc`.

mod filesystem;

pub use filesystem::MockFs;
