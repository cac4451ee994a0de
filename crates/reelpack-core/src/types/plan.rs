use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The configuration handed to an external content packager.
///
/// Immutable once assembled: the chunk size is either a power of two in
/// `[256 KiB, 16 MiB]` or `0` (no override, the packager picks), and the
/// worker count is always within `[1, 20]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackagingPlan {
    content_path: PathBuf,
    chunk_size: u64,
    worker_count: usize,
    total_size: u64,
    file_count: usize,
    auto_tuned: bool,
}

impl PackagingPlan {
    pub(crate) fn new(
        content_path: PathBuf,
        chunk_size: u64,
        worker_count: usize,
        total_size: u64,
        file_count: usize,
        auto_tuned: bool,
    ) -> Self {
        Self {
            content_path,
            chunk_size,
            worker_count,
            total_size,
            file_count,
            auto_tuned,
        }
    }

    /// File or folder to package.
    #[must_use]
    pub fn content_path(&self) -> &std::path::Path {
        &self.content_path
    }

    /// Chunk size in bytes, `0` meaning "packager default".
    #[must_use]
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Number of concurrent hashing workers.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Total content size in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Number of video files covered by the plan.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Whether chunk size and worker count came from the adaptive tables.
    #[must_use]
    pub fn is_auto_tuned(&self) -> bool {
        self.auto_tuned
    }

    /// Number of chunks the content divides into, `None` without a chunk size.
    #[must_use]
    pub fn chunk_count(&self) -> Option<u64> {
        if self.chunk_size == 0 {
            return None;
        }
        Some(self.total_size.div_ceil(self.chunk_size))
    }
}

impl fmt::Display for PackagingPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackagingPlan({}", self.content_path.display())?;
        write!(f, ", size={}", self.total_size)?;
        if self.chunk_size == 0 {
            write!(f, ", chunk=default")?;
        } else {
            write!(f, ", chunk={}KiB", self.chunk_size / 1024)?;
        }
        write!(f, ", workers={}", self.worker_count)?;
        write!(f, ")")
    }
}
