use std::path::Path;

use log::{debug, trace};

use crate::error::Error;
use crate::fs::{EntryKind, FileSystem};
use crate::sampler::Sampler;
use crate::usage::Usage;

pub const DEFAULT_BLACKLIST: &[&str] = &["dosdevices/z:/"];

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOptions {
    /// Directories at or above this depth have every child evaluated.
    pub true_cutoff_depth: usize,
    /// Paths deeper than this have no estimate.
    pub max_depth: usize,
    /// Fraction of children skipped in directories below the cutoff.
    pub sample_fraction: f64,
    /// Paths containing any of these substrings have no estimate.
    pub blacklist: Vec<String>,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        Self {
            true_cutoff_depth: 5,
            max_depth: 60,
            sample_fraction: 0.1,
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EstimateOptions {
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.sample_fraction) {
            return Err(Error::InvalidSampleFraction(self.sample_fraction));
        }
        Ok(())
    }

    /// How many of `children` are evaluated exactly at a sampled depth.
    pub fn sample_count(&self, children: usize) -> usize {
        let count = (children as f64 * (1.0 - self.sample_fraction)).floor() as usize;
        count.min(children)
    }

    pub fn is_blacklisted(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.blacklist
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
    }
}

/// Depth-first, partially sampled estimator of directory trees.
pub struct Estimator<F, S> {
    fs: F,
    sampler: S,
    options: EstimateOptions,
}

impl<F: FileSystem, S: Sampler> Estimator<F, S> {
    pub fn new(fs: F, sampler: S, options: EstimateOptions) -> Self {
        Estimator {
            fs,
            sampler,
            options,
        }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn options(&self) -> &EstimateOptions {
        &self.options
    }

    /// Estimate the usage below `path`, found at `depth` from a root.
    ///
    /// `None` means the path could not be assessed: too deep, blacklisted,
    /// unreadable, or unlistable. Callers leave it out of averages instead of
    /// counting it as zero. Symlinks and special files are worth `Usage::ZERO`.
    pub fn estimate(&mut self, path: &Path, depth: usize) -> Option<Usage> {
        if depth > self.options.max_depth {
            debug!("Too deep at {}: {}", depth, path.display());
            return None;
        }
        if self.options.is_blacklisted(path) {
            debug!("Blacklisted: {}", path.display());
            return None;
        }

        match self.fs.classify(path) {
            EntryKind::File => self.estimate_file(path),
            EntryKind::Directory => self.estimate_dir(path, depth),
            EntryKind::Symlink | EntryKind::Other => Some(Usage::ZERO),
        }
    }

    fn estimate_file(&self, path: &Path) -> Option<Usage> {
        if !self.fs.can_read(path) {
            debug!("Unreadable file: {}", path.display());
            return None;
        }
        match self.fs.file_size(path) {
            Ok(len) => Some(Usage::file(len)),
            Err(error) => {
                debug!("Cannot stat {}: {}", path.display(), error);
                None
            }
        }
    }

    fn estimate_dir(&mut self, path: &Path, depth: usize) -> Option<Usage> {
        if !self.fs.can_list(path) || !self.fs.can_read(path) {
            debug!("Unlistable directory: {}", path.display());
            return None;
        }
        let children = match self.fs.list_children(path) {
            Ok(children) => children,
            Err(error) => {
                debug!("Cannot list {}: {}", path.display(), error);
                return None;
            }
        };
        if children.is_empty() {
            return Some(Usage::ZERO);
        }

        let selected = if depth > self.options.true_cutoff_depth {
            let amount = self.options.sample_count(children.len());
            trace!(
                "Sampling {}/{} children of {}",
                amount,
                children.len(),
                path.display()
            );
            let mut picked = self.sampler.sample(children.len(), amount);
            picked.sort_unstable();
            picked
        } else {
            (0..children.len()).collect()
        };

        let known: Vec<Usage> = selected
            .into_iter()
            .filter_map(|index| self.estimate(&children[index], depth + 1))
            .collect();

        // A directory whose whole sample is unknown still counts as known and empty.
        match Usage::average(known) {
            Some(average) => Some(average.scale(children.len() as f64)),
            None => Some(Usage::ZERO),
        }
    }
}
