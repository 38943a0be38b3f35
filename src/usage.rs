use std::fmt;

use crate::format::format_usage;

pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Estimated size and node count of everything below a path.
///
/// A file counts itself as one node. A directory does not count its own
/// inode, only its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Usage {
    pub size_bytes: f64,
    pub node_count: f64,
}

impl Usage {
    pub const ZERO: Usage = Usage {
        size_bytes: 0.0,
        node_count: 0.0,
    };

    pub fn new(size_bytes: f64, node_count: f64) -> Self {
        Self {
            size_bytes,
            node_count,
        }
    }

    /// A single regular file of `len` bytes.
    pub fn file(len: u64) -> Self {
        Self::new(len as f64, 1.0)
    }

    /// Element-wise mean, or `None` when there is nothing to average.
    pub fn average<I>(usages: I) -> Option<Usage>
    where
        I: IntoIterator<Item = Usage>,
    {
        let mut total = Usage::ZERO;
        let mut n = 0usize;
        for usage in usages {
            total.size_bytes += usage.size_bytes;
            total.node_count += usage.node_count;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(Usage {
            size_bytes: total.size_bytes / n as f64,
            node_count: total.node_count / n as f64,
        })
    }

    pub fn scale(self, factor: f64) -> Usage {
        Usage {
            size_bytes: self.size_bytes * factor,
            node_count: self.node_count * factor,
        }
    }

    pub fn gigabytes(&self) -> f64 {
        self.size_bytes / BYTES_PER_GB
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_usage(self.gigabytes(), self.node_count))
    }
}
