//! # Adaptive tuning
//!
//! Chooses the chunk size and worker count for a packaging job. The
//! automatic branch combines the content size with a fresh
//! [`ResourceProfile`]; the manual branch validates the configured
//! overrides and passes them through.

pub mod chunk;
pub mod profile;
pub mod workers;

pub use chunk::{GIB, KIB, MAX_CHUNK_SIZE, MIB, MIN_CHUNK_SIZE, chunk_size_for, is_valid_chunk_size};
pub use profile::{ResourceProbe, ResourceProfile, SystemProbe};
pub use workers::{MAX_WORKERS, MIN_WORKERS, base_workers, worker_count_for};

use serde::{Deserialize, Serialize};

use crate::config::TuningConfig;
use crate::error::{PackerError, Result};

/// The outcome of one tuning decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    /// Chunk size in bytes; `0` leaves the choice to the packager.
    pub chunk_size: u64,
    /// Concurrent hashing workers.
    pub worker_count: usize,
    /// Whether the values came from the adaptive tables.
    pub auto_tuned: bool,
}

impl Tuning {
    /// Adaptive selection for `total_size` bytes on a host described by `profile`.
    #[must_use]
    pub fn auto(total_size: u64, profile: &ResourceProfile) -> Self {
        Self {
            chunk_size: chunk_size_for(total_size),
            worker_count: worker_count_for(profile),
            auto_tuned: true,
        }
    }

    /// Manual selection from explicit overrides.
    ///
    /// A missing chunk size becomes `0`, a missing worker count becomes `1`.
    ///
    /// # Errors
    ///
    /// Returns `PackerError::InvalidChunkSize` or
    /// `PackerError::InvalidWorkerCount` for out-of-range overrides.
    pub fn manual(chunk_size: Option<u64>, worker_count: Option<usize>) -> Result<Self> {
        let chunk_size = match chunk_size {
            None => 0,
            Some(bytes) if is_valid_chunk_size(bytes) => bytes,
            Some(bytes) => return Err(PackerError::InvalidChunkSize(bytes)),
        };
        let worker_count = match worker_count {
            None => MIN_WORKERS,
            Some(n) if (MIN_WORKERS..=MAX_WORKERS).contains(&n) => n,
            Some(n) => return Err(PackerError::InvalidWorkerCount(n)),
        };
        Ok(Self {
            chunk_size,
            worker_count,
            auto_tuned: false,
        })
    }

    /// Picks the branch named by `config`. The probe is only consulted on
    /// the automatic branch.
    ///
    /// # Errors
    ///
    /// Propagates the validation errors of [`Tuning::manual`].
    pub fn select<P>(config: &TuningConfig, total_size: u64, probe: &P) -> Result<Self>
    where
        P: ResourceProbe + ?Sized,
    {
        if config.auto_optimize {
            Ok(Self::auto(total_size, &probe.probe()))
        } else {
            Self::manual(config.chunk_size_override, config.worker_override)
        }
    }
}
