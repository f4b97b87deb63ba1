//! Data model for sampled memory statistics.

/// One memory reading in kilobytes.
///
/// `used_kb + available_kb == total_kb` holds for every sample built through
/// [`MemorySample::from_total_available`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySample {
    pub total_kb: u64,
    pub used_kb: u64,
    pub available_kb: u64,
}

impl MemorySample {
    /// Builds a sample from total and available memory, deriving `used_kb`.
    ///
    /// Available memory larger than the total is clamped to the total.
    pub fn from_total_available(total_kb: u64, available_kb: u64) -> Self {
        let available_kb = available_kb.min(total_kb);
        Self {
            total_kb,
            used_kb: total_kb - available_kb,
            available_kb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_is_derived() {
        let s = MemorySample::from_total_available(3000, 2000);
        assert_eq!(s.used_kb, 1000);
        assert_eq!(s.used_kb + s.available_kb, s.total_kb);
    }

    #[test]
    fn test_available_clamped_to_total() {
        let s = MemorySample::from_total_available(1000, 1500);
        assert_eq!(s.available_kb, 1000);
        assert_eq!(s.used_kb, 0);
    }
}
