#![forbid(unsafe_code, rust_2018_idioms)]

mod error;
pub use crate::error::Error;

mod estimate;
pub use crate::estimate::{EstimateOptions, Estimator, DEFAULT_BLACKLIST};

mod format;
pub use crate::format::{format_usage, BinarySize};

mod fs;
pub use crate::fs::{EntryKind, FileSystem, HostFileSystem};

mod report;
pub use crate::report::{report_root, user_roots, RootReport, DEFAULT_BASES, ROOT_WIDTH};

mod sampler;
pub use crate::sampler::{RandomSampler, Sampler};

mod usage;
pub use crate::usage::{Usage, BYTES_PER_GB};
