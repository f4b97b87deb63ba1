//! Parser for `/proc/meminfo`.
//!
//! Pure function over the file content so it can be tested with string input.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parsed data from `/proc/meminfo`, all values in kB.
#[derive(Debug, Clone, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    /// `None` on kernels older than 3.14, which do not export `MemAvailable`.
    pub mem_available: Option<u64>,
}

/// Parses `/proc/meminfo` content.
///
/// Fails if `MemTotal` is missing or unparsable.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut total = None;
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> Option<u64> {
        line.split_whitespace().nth(1).and_then(|s| s.parse().ok())
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line).unwrap_or(0);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = parse_kb(line);
        }
    }

    info.mem_total = total.ok_or_else(|| ParseError::new("missing MemTotal in meminfo"))?;
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_meminfo() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
";
        let info = parse_meminfo(content).unwrap();

        assert_eq!(info.mem_total, 16384000);
        assert_eq!(info.mem_free, 8192000);
        assert_eq!(info.mem_available, Some(12000000));
    }

    #[test]
    fn test_parse_meminfo_without_available() {
        let content = "MemTotal: 2048 kB\nMemFree: 512 kB\n";
        let info = parse_meminfo(content).unwrap();

        assert_eq!(info.mem_total, 2048);
        assert_eq!(info.mem_available, None);
    }

    #[test]
    fn test_parse_meminfo_missing_total() {
        let err = parse_meminfo("MemFree: 512 kB\n").unwrap_err();
        assert!(err.message.contains("MemTotal"));
    }

    #[test]
    fn test_parse_meminfo_garbage_total() {
        assert!(parse_meminfo("MemTotal: lots kB\n").is_err());
    }
}
