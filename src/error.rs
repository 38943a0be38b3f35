use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a whole run.
///
/// Estimation itself never fails: unreadable paths simply have no estimate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sample fraction must be within [0, 1], got {0}")]
    InvalidSampleFraction(f64),

    #[error("cannot list `{}`: {source}", .path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
