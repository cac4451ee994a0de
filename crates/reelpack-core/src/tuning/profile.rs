use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sysinfo::System;
use tracing::{debug, warn};

/// Host readings taken right before a plan is computed.
///
/// Every field degrades to a documented default when the platform cannot
/// report it: load average, memory and CPU utilization fall back to `0`,
/// the physical core count falls back to the logical count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceProfile {
    /// Physical CPU cores.
    pub physical_cores: usize,
    /// Logical CPU cores (hardware threads).
    pub logical_cores: usize,
    /// 1-minute load average, `0.0` when unavailable.
    pub load_average: f64,
    /// Total memory in bytes, `0` when unknown.
    pub total_memory: u64,
    /// Available memory in bytes, `0` when unknown.
    pub available_memory: u64,
    /// Instantaneous CPU utilization in percent, `0.0` when unavailable.
    pub cpu_usage: f32,
}

impl ResourceProfile {
    /// Profile with only core counts filled in.
    #[must_use]
    pub fn fallback() -> Self {
        let logical_cores = num_cpus::get().max(1);
        Self {
            physical_cores: physical_or(logical_cores),
            logical_cores,
            load_average: 0.0,
            total_memory: 0,
            available_memory: 0,
            cpu_usage: 0.0,
        }
    }

    /// Returns `true` if total memory could be read.
    #[must_use]
    pub fn memory_known(&self) -> bool {
        self.total_memory > 0
    }
}

fn physical_or(logical: usize) -> usize {
    match num_cpus::get_physical() {
        0 => logical,
        n => n,
    }
}

/// A source of [`ResourceProfile`] readings.
pub trait ResourceProbe: Send + Sync {
    /// Takes a fresh reading. Must not block indefinitely.
    fn probe(&self) -> ResourceProfile;
}

/// A fixed profile probes as itself.
impl ResourceProbe for ResourceProfile {
    fn probe(&self) -> ResourceProfile {
        self.clone()
    }
}

/// Reads the host through `sysinfo` and `num_cpus`.
///
/// The reading runs on a helper thread; if it does not finish within the
/// timeout the fallback profile is returned and the helper is abandoned.
///
/// CPU utilization needs two samples at least
/// [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`] apart (about 200 ms on Linux).
/// The first sample is taken when the probe is created and the sampler is
/// kept between readings, so only a reading taken sooner than that after
/// construction (or after the previous reading) waits for the remainder.
/// Clones share one sampler.
#[derive(Clone)]
pub struct SystemProbe {
    timeout: Duration,
    sampler: Arc<Mutex<Sampler>>,
}

impl SystemProbe {
    /// Creates a probe bounded by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            sampler: Arc::new(Mutex::new(Sampler::new())),
        }
    }

    /// Reading timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl fmt::Debug for SystemProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemProbe")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ResourceProbe for SystemProbe {
    fn probe(&self) -> ResourceProfile {
        let (tx, rx) = mpsc::channel();
        let sampler = Arc::clone(&self.sampler);
        let spawned = thread::Builder::new()
            .name("resource-probe".into())
            .spawn(move || {
                let profile = sampler
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .read();
                let _ = tx.send(profile);
            });

        if let Err(e) = spawned {
            warn!("failed to start resource probe thread: {e}");
            return ResourceProfile::fallback();
        }

        match rx.recv_timeout(self.timeout) {
            Ok(profile) => {
                debug!(
                    physical = profile.physical_cores,
                    logical = profile.logical_cores,
                    load = profile.load_average,
                    memory = profile.total_memory,
                    cpu = profile.cpu_usage,
                    "host resources read"
                );
                profile
            }
            Err(e) => {
                warn!(
                    "resource probe did not finish within {:?} ({e}); using defaults",
                    self.timeout
                );
                ResourceProfile::fallback()
            }
        }
    }
}

/// A `sysinfo` handle plus the time of its last CPU sample.
struct Sampler {
    sys: System,
    last_cpu_sample: Instant,
}

impl Sampler {
    fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        Self {
            sys,
            last_cpu_sample: Instant::now(),
        }
    }

    fn read(&mut self) -> ResourceProfile {
        let since = self.last_cpu_sample.elapsed();
        if since < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
            thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL - since);
        }
        self.sys.refresh_cpu_usage();
        self.last_cpu_sample = Instant::now();
        self.sys.refresh_memory();

        let logical_cores = num_cpus::get().max(1);
        let cpu_usage = self.sys.global_cpu_usage();
        let load_average = System::load_average().one;

        ResourceProfile {
            physical_cores: physical_or(logical_cores),
            logical_cores,
            load_average: if load_average.is_finite() && load_average > 0.0 {
                load_average
            } else {
                0.0
            },
            total_memory: self.sys.total_memory(),
            available_memory: self.sys.available_memory(),
            cpu_usage: if cpu_usage.is_finite() {
                cpu_usage.clamp(0.0, 100.0)
            } else {
                0.0
            },
        }
    }
}
