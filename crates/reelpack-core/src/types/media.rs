use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::episode::{EpisodeRecord, SeasonRangeInfo};

/// A video file discovered during a directory walk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Lowercase extension including the leading dot, e.g. `.mkv`.
    pub extension: String,
}

impl VideoFile {
    /// Creates a new `VideoFile`, normalizing the extension from the path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let extension = normalized_extension(&path).unwrap_or_default();
        Self {
            path,
            size,
            extension,
        }
    }

    /// File name component, lossily converted.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Lowercase extension of `path` with a leading dot.
pub(crate) fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Broad content classification of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Episodic content.
    TvShow,
    /// A single feature.
    Movie,
    /// Documentary content.
    Documentary,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TvShow => write!(f, "tv"),
            Self::Movie => write!(f, "movie"),
            Self::Documentary => write!(f, "documentary"),
        }
    }
}

/// A release folder assembled by one scanner pass. Read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFolder {
    /// Directory name.
    pub name: String,
    /// Directory path.
    pub path: PathBuf,
    /// Video files in the folder's subtree, sorted by path.
    pub files: Vec<VideoFile>,
    /// Subtitle files in the folder's subtree, sorted by path.
    pub subtitles: Vec<PathBuf>,
    /// One record per video file.
    pub episodes: Vec<EpisodeRecord>,
    /// Sum of all video file sizes.
    pub total_size: u64,
    /// Per-season continuity information.
    pub seasons: BTreeMap<u32, SeasonRangeInfo>,
    /// Number of distinct seasons with at least one numbered episode.
    pub season_count: usize,
    /// Whether any file carried a parseable episode number.
    pub has_episode_numbers: bool,
    /// Combined continuity string for display.
    pub display: String,
    /// Detected content kind.
    pub kind: MediaKind,
    /// Title parsed from the folder name.
    pub title: Option<String>,
    /// Release year parsed from the folder name.
    pub year: Option<u16>,
}

impl MediaFolder {
    /// Number of video files, numbered or not.
    #[must_use]
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Looks up the video file a record refers to.
    #[must_use]
    pub fn file_of(&self, record: &EpisodeRecord) -> Option<&VideoFile> {
        self.files.iter().find(|f| f.path == record.path)
    }
}

impl fmt::Display for MediaFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({} files, {} bytes)",
            self.name,
            self.kind,
            self.display,
            self.files.len(),
            self.total_size
        )
    }
}
