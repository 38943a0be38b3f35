use std::fmt;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{debug, info, warn};

use crate::error::Error;
use crate::estimate::Estimator;
use crate::format::BinarySize;
use crate::fs::FileSystem;
use crate::sampler::Sampler;
use crate::usage::Usage;

/// Width the root path is padded to in a report line.
pub const ROOT_WIDTH: usize = 40;

pub const DEFAULT_BASES: &[&str] = &["/cluster/project/sachan/", "/cluster/work/sachan/"];

/// The estimate for one user root.
#[derive(Debug, Clone, PartialEq)]
pub struct RootReport {
    pub root: PathBuf,
    /// Average over the root's immediate children.
    pub usage: Usage,
}

impl fmt::Display for RootReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.display().to_string();
        write!(f, "{root:<width$}: {}", self.usage, width = ROOT_WIDTH)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Estimate every immediate child of `root` at depth 1 and average them.
///
/// Returns `None` when the root is not a directory, is hidden, or cannot be
/// listed. A symlink to a directory is scanned through the link. Children
/// without an estimate are left out of the average; a root with no usable
/// children reports zero.
pub fn report_root<F, S>(
    root: &Path,
    estimator: &mut Estimator<F, S>,
    progress_bar: &ProgressBar,
) -> Option<RootReport>
where
    F: FileSystem,
    S: Sampler,
{
    if !estimator.file_system().is_dir(root) || is_hidden(root) {
        debug!("Skipping {}", root.display());
        return None;
    }
    let children = match estimator.file_system().list_children(root) {
        Ok(children) => children,
        Err(error) => {
            warn!("Skipping {}: {}", root.display(), error);
            return None;
        }
    };

    info!("Estimating {} ({} entries)", root.display(), children.len());
    progress_bar.reset();
    progress_bar.set_length(children.len() as u64);
    let message = root.display().to_string();
    progress_bar.set_message(format!("{message:<width$}", width = ROOT_WIDTH));

    let mut known = Vec::with_capacity(children.len());
    for child in &children {
        if let Some(usage) = estimator.estimate(child, 1) {
            known.push(usage);
        }
        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    let usage = Usage::average(known).unwrap_or(Usage::ZERO);
    debug!(
        "{}: {} in {:.1} nodes per entry",
        root.display(),
        BinarySize(usage.size_bytes),
        usage.node_count
    );
    Some(RootReport {
        root: root.to_path_buf(),
        usage,
    })
}

/// The user roots to scan: `<base>/<user>` for each base when a user is
/// given, otherwise every entry of every base, sorted by name.
///
/// Failing to list a base is fatal.
pub fn user_roots<F: FileSystem>(
    fs: &F,
    bases: &[PathBuf],
    user: Option<&str>,
) -> Result<Vec<PathBuf>, Error> {
    let mut roots = Vec::new();
    for base in bases {
        match user {
            Some(user) => roots.push(base.join(user)),
            None => {
                let mut entries = fs.list_children(base).map_err(|source| Error::Enumerate {
                    path: base.clone(),
                    source,
                })?;
                entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
                roots.extend(entries);
            }
        }
    }
    Ok(roots)
}
