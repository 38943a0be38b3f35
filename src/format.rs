use std::fmt;

use number_prefix::NumberPrefix;

/// Renders an estimate as coarse size and node-count buckets.
///
/// `size_gb` is in gigabytes (1024^3 bytes).
///
/// # Examples
/// ```rust
/// # use sampledu::format_usage;
/// assert_eq!("<1GB (<1k)",     format_usage(0.0, 0.0));
/// assert_eq!("3GB (2k nodes)", format_usage(2.6, 1_500.0));
/// ```
pub fn format_usage(size_gb: f64, node_count: f64) -> String {
    let size = if size_gb < 1.0 {
        "<1GB".to_string()
    } else {
        format!("{size_gb:.0}GB")
    };
    let count = if node_count < 1000.0 {
        "<1k".to_string()
    } else {
        format!("{:.0}k nodes", node_count / 1000.0)
    };
    format!("{size} ({count})")
}

/// Byte count with a binary prefix, for log lines.
///
/// ```rust
/// # use sampledu::BinarySize;
/// assert_eq!("2.00 GiB", BinarySize(2.0 * 1024.0 * 1024.0 * 1024.0).to_string());
/// ```
#[derive(Debug)]
pub struct BinarySize(pub f64);

impl fmt::Display for BinarySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NumberPrefix::binary(self.0) {
            NumberPrefix::Standalone(number) => write!(f, "{number:.0} B"),
            NumberPrefix::Prefixed(prefix, number) => write!(f, "{number:.2} {prefix}B"),
        }
    }
}
