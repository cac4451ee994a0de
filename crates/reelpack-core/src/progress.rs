//! # Progress reporting
//!
//! The callback contract between the caller and an external
//! [`ContentPackager`], plus a wrapper that bounds how often reports are
//! forwarded.

use std::time::{Duration, Instant};

use crate::config::PackerConfig;
use crate::types::PackagingPlan;

/// Progress callback receiving `(completed, total)` in bytes.
pub type ProgressFn = dyn FnMut(u64, u64) + Send;

/// Forwards progress reports at most once per interval.
///
/// The first report and the completing one (`completed >= total`) are
/// always forwarded.
pub struct ThrottledProgress<F> {
    inner: F,
    interval: Duration,
    last: Option<Instant>,
}

impl<F: FnMut(u64, u64)> ThrottledProgress<F> {
    pub fn new(inner: F, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last: None,
        }
    }

    /// Wraps `inner` using the configured progress interval.
    pub fn from_config(inner: F, config: &PackerConfig) -> Self {
        Self::new(inner, config.progress_interval())
    }

    /// Minimum spacing between forwarded reports.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Reports progress; returns `true` if it was forwarded.
    pub fn report(&mut self, completed: u64, total: u64) -> bool {
        let now = Instant::now();
        let due = match self.last {
            None => true,
            Some(last) => completed >= total || now.duration_since(last) >= self.interval,
        };
        if due {
            self.last = Some(now);
            (self.inner)(completed, total);
        }
        due
    }

    /// Unwraps the inner callback.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

/// An external component that hashes and packages content according to a
/// [`PackagingPlan`].
///
/// Implementors own cancellation and report progress through `progress`.
pub trait ContentPackager {
    /// What a finished job produces, e.g. a descriptor path.
    type Output;
    /// Failure type of the packager.
    type Error: std::error::Error + Send + Sync + 'static;

    fn package(
        &self,
        plan: &PackagingPlan,
        progress: &mut ProgressFn,
    ) -> std::result::Result<Self::Output, Self::Error>;
}
