//! Worker-count heuristic driven by a [`ResourceProfile`].

use super::chunk::GIB;
use super::profile::ResourceProfile;

/// Lowest worker count a plan may carry.
pub const MIN_WORKERS: usize = 1;
/// Highest worker count a plan may carry.
pub const MAX_WORKERS: usize = 20;

/// Below this much memory the worker count is capped.
const LOW_MEMORY: u64 = 4 * GIB;
/// At or above this much memory extra workers are added.
const HIGH_MEMORY: u64 = 32 * GIB;

/// Base worker count from the physical core count.
#[must_use]
pub fn base_workers(cores: usize) -> usize {
    match cores {
        c if c >= 32 => (c / 2).min(20),
        c if c >= 16 => (c / 2 + 2).min(16),
        c if c >= 10 => (c + 2).min(12),
        c if c >= 8 => (c + 1).min(8),
        c if c >= 4 => c + 1,
        c => c.max(3),
    }
}

/// Computes the worker count for a profile.
///
/// 1. base value from [`base_workers`];
/// 2. CPU below 50 % adds two; otherwise CPU above 80 % or a load average
///    above 0.8 × cores halves it (never below two);
/// 3. under 4 GiB of memory caps at four, 32 GiB or more adds four
///    (unknown memory is left alone);
/// 4. the result is clamped to `[MIN_WORKERS, MAX_WORKERS]`.
#[must_use]
pub fn worker_count_for(profile: &ResourceProfile) -> usize {
    let cores = profile.physical_cores.max(1);
    let mut workers = base_workers(cores);

    if profile.cpu_usage < 50.0 {
        workers += 2;
    } else if profile.cpu_usage > 80.0 || profile.load_average > 0.8 * cores as f64 {
        workers = (workers / 2).max(2);
    }

    if profile.memory_known() {
        if profile.total_memory < LOW_MEMORY {
            workers = workers.min(4);
        } else if profile.total_memory >= HIGH_MEMORY {
            workers += 4;
        }
    }

    workers.clamp(MIN_WORKERS, MAX_WORKERS)
}
