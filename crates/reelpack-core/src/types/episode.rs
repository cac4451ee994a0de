use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Season assumed when a filename carries no season marker.
pub const DEFAULT_SEASON: u32 = 1;

/// Season/episode numbers parsed out of a single filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeId {
    /// Season number, always `>= 1`.
    pub season: u32,
    /// Episode number, `None` when no rule matched.
    pub episode: Option<u32>,
}

impl Default for EpisodeId {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            episode: None,
        }
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.episode {
            Some(ep) => write!(f, "S{:02}E{ep:02}", self.season),
            None => write!(f, "S{:02}E??", self.season),
        }
    }
}

/// One video file of a release folder together with its parsed numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Path of the [`VideoFile`](super::VideoFile) this record describes.
    pub path: PathBuf,
    /// Season number, `1` when unparsed.
    pub season: u32,
    /// Episode number, absent when no pattern matched.
    pub episode: Option<u32>,
}

impl EpisodeRecord {
    /// Creates a record for `path` from a parsed identifier.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, id: EpisodeId) -> Self {
        Self {
            path: path.into(),
            season: id.season,
            episode: id.episode,
        }
    }
}

/// Continuity information for a single season of a release folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRangeInfo {
    /// Season number.
    pub season: u32,
    /// Sorted, distinct episode numbers observed for this season.
    pub episodes: Vec<u32>,
    /// Contiguous range tokens, e.g. `E01-E03` or `S2 E05`.
    pub ranges: Vec<String>,
    /// Missing-episode tokens strictly between observed episodes.
    pub missing: Vec<String>,
    /// Ranges joined with `", "`, plus a missing suffix when there are gaps.
    pub display: String,
}

impl SeasonRangeInfo {
    /// Returns `true` if the season has no gaps between its first and last episode.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Lowest and highest observed episode numbers.
    #[must_use]
    pub fn span(&self) -> Option<(u32, u32)> {
        Some((*self.episodes.first()?, *self.episodes.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_id_display() {
        let id = EpisodeId {
            season: 2,
            episode: Some(7),
        };
        assert_eq!(id.to_string(), "S02E07");
        assert_eq!(EpisodeId::default().to_string(), "S01E??");
    }

    #[test]
    fn record_copies_parsed_numbers() {
        let rec = EpisodeRecord::new(
            "/media/show/ep03.mkv",
            EpisodeId {
                season: 3,
                episode: Some(3),
            },
        );
        assert_eq!(rec.season, 3);
        assert_eq!(rec.episode, Some(3));
        assert_eq!(rec.path, PathBuf::from("/media/show/ep03.mkv"));
    }

    #[test]
    fn season_span_and_completeness() {
        let info = SeasonRangeInfo {
            season: 1,
            episodes: vec![1, 2, 4],
            ranges: vec!["E01-E02".into(), "E04".into()],
            missing: vec!["E03".into()],
            display: "E01-E02, E04 (缺: E03)".into(),
        };
        assert_eq!(info.span(), Some((1, 4)));
        assert!(!info.is_complete());
    }
}
