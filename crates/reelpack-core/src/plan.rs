//! # Packaging plan assembly
//!
//! Combines a selection (a scanned folder, a single file or a batch of
//! paths) with a fresh tuning decision into a [`PackagingPlan`].

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::PackerConfig;
use crate::error::{PackerError, Result};
use crate::scanner::folder::collect_contents;
use crate::tuning::{ResourceProbe, SystemProbe, Tuning};
use crate::types::{MediaFolder, PackagingPlan};

/// Builds packaging plans, probing the host once per plan.
pub struct PlanAssembler<P: ResourceProbe = SystemProbe> {
    config: PackerConfig,
    probe: P,
}

impl PlanAssembler<SystemProbe> {
    /// Creates an assembler that reads the live host, bounded by the
    /// configured probe timeout.
    pub fn new(config: PackerConfig) -> Self {
        let probe = SystemProbe::new(config.probe_timeout());
        Self { config, probe }
    }
}

impl<P: ResourceProbe> PlanAssembler<P> {
    /// Creates an assembler with a custom resource probe.
    pub fn with_probe(config: PackerConfig, probe: P) -> Self {
        Self { config, probe }
    }

    /// Returns the assembler's configuration.
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Returns the resource probe.
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Plans a scanned release folder.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range manual overrides.
    pub fn plan_folder(&self, folder: &MediaFolder) -> Result<PackagingPlan> {
        self.assemble(folder.path.clone(), folder.total_size, folder.files.len())
    }

    /// Plans a single file.
    ///
    /// # Errors
    ///
    /// Returns `PackerError::NotFound` for a missing path,
    /// `PackerError::NotAFile` for anything but a regular file and
    /// `PackerError::Io` when metadata cannot be read.
    pub fn plan_file(&self, path: impl AsRef<Path>) -> Result<PackagingPlan> {
        let path = path.as_ref();
        let meta = metadata(path)?;
        if !meta.is_file() {
            return Err(PackerError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        self.assemble(path.to_path_buf(), meta.len(), 1)
    }

    /// Plans a selection of files and directories as one job.
    ///
    /// The content path is the deepest common ancestor of the selection.
    /// Files count with their own size; directories count with the video
    /// files found anywhere beneath them.
    ///
    /// # Errors
    ///
    /// Returns `PackerError::EmptySelection` for an empty slice, otherwise
    /// the same errors as [`PlanAssembler::plan_file`] for each entry.
    pub fn plan_batch<Q: AsRef<Path>>(&self, paths: &[Q]) -> Result<PackagingPlan> {
        if paths.is_empty() {
            return Err(PackerError::EmptySelection);
        }

        let mut resolved = Vec::with_capacity(paths.len());
        let mut total_size = 0u64;
        let mut file_count = 0usize;

        for path in paths {
            let path = path.as_ref();
            let meta = metadata(path)?;
            if meta.is_dir() {
                let contents = collect_contents(path, &self.config);
                total_size += contents.videos.iter().map(|v| v.size).sum::<u64>();
                file_count += contents.videos.len();
            } else if meta.is_file() {
                total_size += meta.len();
                file_count += 1;
            } else {
                return Err(PackerError::NotAFile {
                    path: path.to_path_buf(),
                });
            }
            resolved.push(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
        }

        self.assemble(common_ancestor(&resolved), total_size, file_count)
    }

    fn assemble(
        &self,
        content_path: PathBuf,
        total_size: u64,
        file_count: usize,
    ) -> Result<PackagingPlan> {
        let tuning = Tuning::select(&self.config.tuning, total_size, &self.probe)?;
        let plan = PackagingPlan::new(
            content_path,
            tuning.chunk_size,
            tuning.worker_count,
            total_size,
            file_count,
            tuning.auto_tuned,
        );
        info!(
            path = %plan.content_path().display(),
            total_size,
            files = file_count,
            chunk_size = tuning.chunk_size,
            workers = tuning.worker_count,
            auto = tuning.auto_tuned,
            "packaging plan ready"
        );
        Ok(plan)
    }
}

fn metadata(path: &Path) -> Result<std::fs::Metadata> {
    std::fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => PackerError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PackerError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Deepest path that is a prefix of every path in `paths`.
fn common_ancestor(paths: &[PathBuf]) -> PathBuf {
    let Some((first, rest)) = paths.split_first() else {
        return PathBuf::new();
    };
    let mut ancestor = first.clone();
    for path in rest {
        while !path.starts_with(&ancestor) {
            if !ancestor.pop() {
                return PathBuf::new();
            }
        }
    }
    ancestor
}
