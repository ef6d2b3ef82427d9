//! Transfer configuration and part arithmetic
//!
//! Configuration for the large-file upload path. The defaults are
//! deliberately tiny demonstration values; production use should raise them
//! from the CLI. Real S3 rejects non-final parts smaller than 5 MiB, so the
//! defaults target demo-scale backends.

/// Default multipart threshold: 25 KiB
pub const DEFAULT_MULTIPART_THRESHOLD: u64 = 25 * 1024;

/// Default part size: 25 KiB
pub const DEFAULT_PART_SIZE: u64 = 25 * 1024;

/// Default number of concurrent part uploads
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Multipart upload configuration, constructed per call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    /// File size above which the multipart path is taken
    pub multipart_threshold: u64,

    /// Part size in bytes
    pub part_size: u64,

    /// Number of concurrent part uploads
    pub concurrency: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            multipart_threshold: DEFAULT_MULTIPART_THRESHOLD,
            part_size: DEFAULT_PART_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl TransferConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multipart_threshold(mut self, bytes: u64) -> Self {
        self.multipart_threshold = bytes.max(1);
        self
    }

    pub fn part_size(mut self, bytes: u64) -> Self {
        self.part_size = bytes.max(1);
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Whether a file of `size` bytes takes the multipart path
    pub fn is_multipart(&self, size: u64) -> bool {
        size > self.multipart_threshold
    }
}

/// Number of parts needed for a file
pub fn part_count(file_size: u64, part_size: u64) -> usize {
    file_size.div_ceil(part_size) as usize
}

/// Byte range `[start, end)` for a 1-based part number
pub fn part_byte_range(part_number: i32, part_size: u64, total_size: u64) -> (u64, u64) {
    let start = (part_number as u64 - 1) * part_size;
    let end = (start + part_size).min(total_size);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransferConfig::default();
        assert_eq!(config.multipart_threshold, 25 * 1024);
        assert_eq!(config.part_size, 25 * 1024);
        assert_eq!(config.concurrency, 10);
    }

    #[test]
    fn test_config_builder() {
        let config = TransferConfig::new()
            .multipart_threshold(8 * 1024 * 1024)
            .part_size(16 * 1024 * 1024)
            .concurrency(4);

        assert_eq!(config.multipart_threshold, 8 * 1024 * 1024);
        assert_eq!(config.part_size, 16 * 1024 * 1024);
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_zero_values_clamped() {
        let config = TransferConfig::new().part_size(0).concurrency(0);
        assert_eq!(config.part_size, 1);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_path_selection() {
        let config = TransferConfig::default();
        assert!(!config.is_multipart(25 * 1024));
        assert!(!config.is_multipart(100));
        assert!(config.is_multipart(25 * 1024 + 1));
    }

    #[test]
    fn test_part_count() {
        assert_eq!(part_count(100, 10), 10);
        assert_eq!(part_count(101, 10), 11);
        assert_eq!(part_count(99, 10), 10);
        assert_eq!(part_count(1, 10), 1);
    }

    #[test]
    fn test_part_byte_range() {
        // First part
        let (start, end) = part_byte_range(1, 100, 250);
        assert_eq!(start, 0);
        assert_eq!(end, 100);

        // Middle part
        let (start, end) = part_byte_range(2, 100, 250);
        assert_eq!(start, 100);
        assert_eq!(end, 200);

        // Last part (smaller)
        let (start, end) = part_byte_range(3, 100, 250);
        assert_eq!(start, 200);
        assert_eq!(end, 250);
    }

    #[test]
    fn test_part_ranges_cover_source() {
        let total = 70_001;
        let part = 25 * 1024;
        let parts = part_count(total, part);

        let mut covered = 0;
        for n in 1..=parts as i32 {
            let (start, end) = part_byte_range(n, part, total);
            assert_eq!(start, covered);
            covered = end;
        }
        assert_eq!(covered, total);
    }
}
