//! # Configuration
//!
//! Plain structured input for the scanner, the adaptive tuner and the
//! release namer. Nothing here reads from disk; callers hand in a value
//! built in code or decoded from a JSON document.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PackerError, Result};

/// Default video extension allow-list.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    ".mkv", ".mp4", ".avi", ".mov", ".wmv", ".flv", ".webm", ".m4v",
];

/// Default subtitle extensions collected next to video files.
pub const DEFAULT_SUBTITLE_EXTENSIONS: &[&str] =
    &[".srt", ".ass", ".ssa", ".sub", ".vtt", ".idx", ".sup"];

/// Chunk-size and worker-count selection.
///
/// With `auto_optimize` the tier table and the core-count heuristic decide;
/// otherwise the overrides are used verbatim (no chunk size means "let the
/// packager decide", no worker count means one worker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Use the adaptive tables.
    pub auto_optimize: bool,
    /// Chunk size in bytes used when `auto_optimize` is off.
    pub chunk_size_override: Option<u64>,
    /// Worker count used when `auto_optimize` is off.
    pub worker_override: Option<usize>,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            auto_optimize: true,
            chunk_size_override: None,
            worker_override: None,
        }
    }
}

/// Naming templates for the organize step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Season directory template; `{season}` is replaced with the
    /// zero-padded season number.
    pub season_folder: String,
    /// Append ` (year)` to release directory names when known.
    pub include_year: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            season_folder: "Season {season}".into(),
            include_year: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackerConfig {
    /// Video extensions, lowercase with a leading dot.
    pub video_extensions: BTreeSet<String>,
    /// Subtitle extensions, lowercase with a leading dot.
    pub subtitle_extensions: BTreeSet<String>,
    /// Build folders on the rayon pool.
    pub parallel_scan: bool,
    /// Chunk-size / worker-count selection.
    pub tuning: TuningConfig,
    /// Upper bound for one host resource reading, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Minimum interval between forwarded progress reports, in milliseconds.
    pub progress_interval_ms: u64,
    /// Organize-step naming.
    pub naming: NamingConfig,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            video_extensions: normalize_extensions(DEFAULT_VIDEO_EXTENSIONS.iter().copied()),
            subtitle_extensions: normalize_extensions(
                DEFAULT_SUBTITLE_EXTENSIONS.iter().copied(),
            ),
            parallel_scan: true,
            tuning: TuningConfig::default(),
            probe_timeout_ms: 1_000,
            progress_interval_ms: 1_000,
            naming: NamingConfig::default(),
        }
    }
}

impl PackerConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `PackerError::InvalidConfig` if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| PackerError::InvalidConfig(e.to_string()))?;
        config.video_extensions = normalize_extensions(config.video_extensions.iter());
        config.subtitle_extensions = normalize_extensions(config.subtitle_extensions.iter());
        Ok(config)
    }

    /// Replace the video extension allow-list.
    pub fn with_video_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.video_extensions = normalize_extensions(extensions);
        self
    }

    /// Enable or disable parallel folder scanning.
    pub fn with_parallel_scan(mut self, enabled: bool) -> Self {
        self.parallel_scan = enabled;
        self
    }

    /// Enable or disable adaptive tuning.
    pub fn with_auto_optimize(mut self, enabled: bool) -> Self {
        self.tuning.auto_optimize = enabled;
        self
    }

    /// Set the manual chunk size.
    pub fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.tuning.chunk_size_override = Some(bytes);
        self
    }

    /// Set the manual worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.tuning.worker_override = Some(workers);
        self
    }

    /// Set the resource probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Resource probe timeout.
    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Minimum interval between forwarded progress reports.
    #[must_use]
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Returns `true` if `ext` (any case, with or without dot) is a video extension.
    #[must_use]
    pub fn is_video_extension(&self, ext: &str) -> bool {
        self.video_extensions.contains(&normalize_extension(ext))
    }

    /// Returns `true` if `ext` (any case, with or without dot) is a subtitle extension.
    #[must_use]
    pub fn is_subtitle_extension(&self, ext: &str) -> bool {
        self.subtitle_extensions.contains(&normalize_extension(ext))
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

fn normalize_extensions<I, S>(extensions: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|e| normalize_extension(e.as_ref()))
        .filter(|e| e.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extensions() {
        let config = PackerConfig::default();
        assert_eq!(config.video_extensions.len(), 8);
        assert!(config.is_video_extension(".mkv"));
        assert!(config.is_video_extension("MP4"));
        assert!(!config.is_video_extension(".srt"));
        assert!(config.is_subtitle_extension(".ASS"));
    }

    #[test]
    fn builder_methods() {
        let config = PackerConfig::new()
            .with_video_extensions(["MKV", ".ts"])
            .with_parallel_scan(false)
            .with_auto_optimize(false)
            .with_chunk_size(1 << 20)
            .with_workers(4)
            .with_probe_timeout(Duration::from_millis(250));

        assert_eq!(
            config.video_extensions.iter().collect::<Vec<_>>(),
            [".mkv", ".ts"]
        );
        assert!(!config.parallel_scan);
        assert!(!config.tuning.auto_optimize);
        assert_eq!(config.tuning.chunk_size_override, Some(1 << 20));
        assert_eq!(config.tuning.worker_override, Some(4));
        assert_eq!(config.probe_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = PackerConfig::from_json(
            r#"{
                "video_extensions": ["MKV", "mp4"],
                "tuning": { "auto_optimize": false, "worker_override": 3 }
            }"#,
        )
        .unwrap();

        assert!(config.is_video_extension(".mkv"));
        assert!(config.is_video_extension(".mp4"));
        assert!(!config.is_video_extension(".avi"));
        assert!(!config.tuning.auto_optimize);
        assert_eq!(config.tuning.worker_override, Some(3));
        assert_eq!(config.tuning.chunk_size_override, None);
        assert_eq!(config.probe_timeout_ms, 1_000);
        assert_eq!(config.naming, NamingConfig::default());
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = PackerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PackerError::InvalidConfig(_)));
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = PackerConfig::new().with_workers(7);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PackerConfig::from_json(&json).unwrap(), config);
    }
}
