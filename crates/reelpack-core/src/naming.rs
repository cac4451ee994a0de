//! # Release naming
//!
//! Computes where each file of a scanned folder would land in an organized
//! library. Nothing is moved or renamed here; the caller performs the file
//! operations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::NamingConfig;
use crate::types::{EpisodeRecord, MediaFolder, MediaKind, VideoFile};

/// Characters that are not allowed in names on common filesystems.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Destination of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeTarget {
    /// Current location.
    pub source: PathBuf,
    /// Destination directory.
    pub directory: PathBuf,
    /// Destination file name.
    pub name: String,
}

impl OrganizeTarget {
    /// Full destination path.
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.name)
    }
}

/// Builds library paths for scanned folders.
#[derive(Debug, Clone, Default)]
pub struct ReleaseNamer {
    config: NamingConfig,
}

impl ReleaseNamer {
    pub fn new(config: NamingConfig) -> Self {
        Self { config }
    }

    /// Release directory name: the title, plus ` (year)` when enabled and
    /// known.
    #[must_use]
    pub fn release_dir(&self, title: &str, year: Option<u16>) -> String {
        let title = sanitize(title);
        match year {
            Some(year) if self.config.include_year => format!("{title} ({year})"),
            _ => title,
        }
    }

    /// Season directory name from the configured template.
    #[must_use]
    pub fn season_dir(&self, season: u32) -> String {
        sanitize(&self.config.season_folder.replace("{season}", &format!("{season:02}")))
    }

    /// Targets for every video file of `folder` below `library_root`.
    ///
    /// TV files go to `<root>/<release>/<season>/` and are renamed to
    /// `<title> - SxxEyy.<ext>` when numbered; everything else keeps its
    /// (sanitized) file name under `<root>/<release>/`.
    #[must_use]
    pub fn targets(&self, folder: &MediaFolder, library_root: &Path) -> Vec<OrganizeTarget> {
        let title = folder.title.as_deref().unwrap_or(&folder.name);
        let release = library_root.join(self.release_dir(title, folder.year));

        folder
            .episodes
            .iter()
            .filter_map(|record| folder.file_of(record).map(|file| (record, file)))
            .map(|(record, file)| match folder.kind {
                MediaKind::TvShow => OrganizeTarget {
                    source: file.path.clone(),
                    directory: release.join(self.season_dir(record.season)),
                    name: episode_name(title, record, file),
                },
                MediaKind::Movie | MediaKind::Documentary => OrganizeTarget {
                    source: file.path.clone(),
                    directory: release.clone(),
                    name: sanitize(&file.file_name()),
                },
            })
            .collect()
    }
}

fn episode_name(title: &str, record: &EpisodeRecord, file: &VideoFile) -> String {
    match record.episode {
        Some(ep) => sanitize(&format!(
            "{title} - S{:02}E{ep:02}{}",
            record.season, file.extension
        )),
        None => sanitize(&file.file_name()),
    }
}

/// Drops forbidden characters and collapses whitespace.
#[must_use]
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EpisodeId;
    use std::collections::BTreeMap;

    fn folder(
        kind: MediaKind,
        title: &str,
        year: Option<u16>,
        files: &[(&str, EpisodeId)],
    ) -> MediaFolder {
        let videos: Vec<VideoFile> = files
            .iter()
            .map(|(name, _)| VideoFile::new(format!("/in/{name}"), 1))
            .collect();
        let episodes = files
            .iter()
            .map(|(name, id)| EpisodeRecord::new(format!("/in/{name}"), *id))
            .collect();
        MediaFolder {
            name: "raw.folder.name".into(),
            path: "/in".into(),
            total_size: videos.len() as u64,
            files: videos,
            subtitles: Vec::new(),
            episodes,
            seasons: BTreeMap::new(),
            season_count: 1,
            has_episode_numbers: true,
            display: String::new(),
            kind,
            title: Some(title.into()),
            year,
        }
    }

    fn ep(season: u32, episode: u32) -> EpisodeId {
        EpisodeId {
            season,
            episode: Some(episode),
        }
    }

    #[test]
    fn sanitize_strips_and_collapses() {
        assert_eq!(sanitize("What If...?  <Part: 1>"), "What If... Part 1");
        assert_eq!(sanitize("AC/DC \\ Live | 1991"), "ACDC Live 1991");
    }

    #[test]
    fn release_dir_with_and_without_year() {
        let namer = ReleaseNamer::default();
        assert_eq!(namer.release_dir("Dune", Some(2021)), "Dune (2021)");
        assert_eq!(namer.release_dir("Dune", None), "Dune");

        let namer = ReleaseNamer::new(NamingConfig {
            include_year: false,
            ..NamingConfig::default()
        });
        assert_eq!(namer.release_dir("Dune", Some(2021)), "Dune");
    }

    #[test]
    fn season_dir_is_zero_padded() {
        let namer = ReleaseNamer::default();
        assert_eq!(namer.season_dir(2), "Season 02");
        assert_eq!(namer.season_dir(12), "Season 12");
    }

    #[test]
    fn tv_targets_go_into_season_dirs() {
        let f = folder(
            MediaKind::TvShow,
            "The Wire",
            Some(2002),
            &[("wire.s01e01.mkv", ep(1, 1)), ("wire.s02e03.mp4", ep(2, 3))],
        );
        let targets = ReleaseNamer::default().targets(&f, Path::new("/lib"));

        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].directory, Path::new("/lib/The Wire (2002)/Season 01"));
        assert_eq!(targets[0].name, "The Wire - S01E01.mkv");
        assert_eq!(
            targets[1].destination(),
            Path::new("/lib/The Wire (2002)/Season 02/The Wire - S02E03.mp4")
        );
        assert_eq!(targets[1].source, Path::new("/in/wire.s02e03.mp4"));
    }

    #[test]
    fn unnumbered_tv_file_keeps_its_name() {
        let f = folder(MediaKind::TvShow, "Show", None, &[("extra.mkv", EpisodeId::default())]);
        let targets = ReleaseNamer::default().targets(&f, Path::new("/lib"));
        assert_eq!(targets[0].directory, Path::new("/lib/Show/Season 01"));
        assert_eq!(targets[0].name, "extra.mkv");
    }

    #[test]
    fn movie_targets_stay_flat() {
        let f = folder(
            MediaKind::Movie,
            "Arrival",
            Some(2016),
            &[("Arrival.2016.1080p.mkv", EpisodeId::default())],
        );
        let targets = ReleaseNamer::default().targets(&f, Path::new("/lib"));
        assert_eq!(targets[0].directory, Path::new("/lib/Arrival (2016)"));
        assert_eq!(targets[0].name, "Arrival.2016.1080p.mkv");
    }
}
