//! In-memory mock filesystem for testing collectors without real `/proc`.

use crate::collector::traits::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory filesystem for testing.
///
/// Clones share the same file table, so a test can keep a handle and change
/// `/proc/meminfo` between ticks of a running sampler.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file with the given content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.as_ref().to_path_buf(), content.into());
        }
    }

    /// Removes a file, simulating a transient read failure.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        if let Ok(mut files) = self.files.write() {
            files.remove(path.as_ref());
        }
    }

    /// Creates a mock with a typical 16 GB `/proc/meminfo`.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self
            .files
            .read()
            .map_err(|_| io::Error::other("mock filesystem lock poisoned"))?;
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 16384 kB\n");

        let content = fs.read_to_string(Path::new("/proc/meminfo")).unwrap();
        assert_eq!(content, "MemTotal: 16384 kB\n");
    }

    #[test]
    fn test_mock_fs_clones_share_files() {
        let mut fs = MockFs::new();
        let view = fs.clone();
        fs.add_file("/proc/meminfo", "MemTotal: 1 kB\n");
        assert!(view.read_to_string(Path::new("/proc/meminfo")).is_ok());

        fs.remove_file("/proc/meminfo");
        assert!(view.read_to_string(Path::new("/proc/meminfo")).is_err());
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let err = fs.read_to_string(Path::new("/proc/meminfo")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
