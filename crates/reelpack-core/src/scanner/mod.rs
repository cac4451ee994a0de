//! # Folder scanner
//!
//! Turns a set of root directories into [`MediaFolder`] values. Every
//! immediate subdirectory of a root is a candidate release folder; its
//! whole subtree is searched for video and subtitle files.

mod filter;
pub(crate) mod folder;

pub use filter::SearchFilter;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, info};

use crate::analysis;
use crate::config::PackerConfig;
use crate::error::{PackerError, Result};
use crate::parser::{FilenameParser, ReleaseNameParser};
use crate::types::{EpisodeRecord, MediaFolder, MediaKind, VideoFile};

use folder::{FolderContents, child_dirs, collect_contents};

/// Scans root directories for release folders.
///
/// Holds no state between scans; scanning the same unchanged tree twice
/// yields equal results.
pub struct FolderScanner {
    config: PackerConfig,
    filenames: FilenameParser,
    releases: ReleaseNameParser,
    token_pattern: Regex,
}

impl FolderScanner {
    /// Creates a scanner with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(PackerConfig::default())
    }

    /// Creates a scanner with a custom configuration.
    pub fn with_config(config: PackerConfig) -> Result<Self> {
        Ok(Self {
            config,
            filenames: FilenameParser::new()?,
            releases: ReleaseNameParser::new()?,
            token_pattern: Regex::new(filter::TOKEN_PATTERN)?,
        })
    }

    /// Returns the scanner's configuration.
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Builds a search filter for `term`; `None` when the term is blank.
    pub fn search_filter(&self, term: &str) -> Option<SearchFilter> {
        SearchFilter::new(term, &self.token_pattern)
    }

    /// Scans `roots`, optionally keeping only folders whose name matches
    /// `search`.
    ///
    /// Missing or unreadable roots and subtrees are logged and skipped.
    /// Folders without any video file are left out. The result is sorted
    /// by lowercase name, then by path.
    ///
    /// # Errors
    ///
    /// Returns `PackerError::EmptyRoots` when `roots` is empty.
    pub fn scan<P: AsRef<Path>>(
        &self,
        roots: &[P],
        search: Option<&str>,
    ) -> Result<Vec<MediaFolder>> {
        if roots.is_empty() {
            return Err(PackerError::EmptyRoots);
        }
        let filter = search.and_then(|term| self.search_filter(term));
        debug!(
            roots = roots.len(),
            search = filter.as_ref().map(SearchFilter::term),
            "starting scan"
        );

        let candidates = self.candidates(roots, filter.as_ref());
        let build = |(name, path): &(String, PathBuf)| self.build_folder(name, path);
        let mut folders: Vec<MediaFolder> = if self.config.parallel_scan {
            candidates.par_iter().filter_map(build).collect()
        } else {
            candidates.iter().filter_map(build).collect()
        };

        folders.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.path.cmp(&b.path))
        });

        info!(
            candidates = candidates.len(),
            folders = folders.len(),
            "scan complete"
        );
        Ok(folders)
    }

    /// Builds a single folder; `None` when it holds no video file.
    pub fn scan_folder(&self, path: &Path) -> Option<MediaFolder> {
        let path = canonical(path);
        let name = path.file_name()?.to_string_lossy().into_owned();
        self.build_folder(&name, &path)
    }

    fn candidates<P: AsRef<Path>>(
        &self,
        roots: &[P],
        filter: Option<&SearchFilter>,
    ) -> Vec<(String, PathBuf)> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for root in roots {
            for (name, path) in child_dirs(root.as_ref()) {
                if filter.is_some_and(|f| !f.matches(&name)) {
                    continue;
                }
                let path = canonical(&path);
                if seen.insert(path.clone()) {
                    candidates.push((name, path));
                }
            }
        }
        candidates
    }

    fn build_folder(&self, name: &str, path: &Path) -> Option<MediaFolder> {
        let FolderContents { videos, subtitles } = collect_contents(path, &self.config);
        if videos.is_empty() {
            debug!(folder = %path.display(), "no video files, skipping");
            return None;
        }

        let episodes: Vec<EpisodeRecord> = videos
            .iter()
            .map(|v| EpisodeRecord::new(v.path.clone(), self.filenames.parse(&v.file_name())))
            .collect();
        let report = analysis::analyze(&episodes);
        let kind = self.detect_kind(name, &videos, &episodes);
        let (title, year) = self.releases.title_and_year(name);
        let total_size = videos.iter().map(|v| v.size).sum();

        Some(MediaFolder {
            name: name.to_string(),
            path: path.to_path_buf(),
            files: videos,
            subtitles,
            episodes,
            total_size,
            season_count: report.seasons.len(),
            seasons: report.seasons,
            has_episode_numbers: report.has_episode_numbers,
            display: report.display,
            kind,
            title,
            year,
        })
    }

    /// A folder is a TV show if its name or any file name carries an
    /// episode marker, its name carries a season marker, or more than one
    /// file has an episode number.
    fn detect_kind(
        &self,
        name: &str,
        videos: &[VideoFile],
        episodes: &[EpisodeRecord],
    ) -> MediaKind {
        let numbered = episodes.iter().filter(|e| e.episode.is_some()).count();
        let episodic = self.releases.is_episodic(name)
            || self.releases.has_season_marker(name)
            || numbered > 1
            || videos.iter().any(|v| self.releases.is_episodic(&v.file_name()));

        if episodic {
            MediaKind::TvShow
        } else {
            self.releases.detect_kind(name)
        }
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scanner() -> FolderScanner {
        FolderScanner::new().unwrap()
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn empty_roots_is_an_error() {
        let roots: [&Path; 0] = [];
        assert!(matches!(
            scanner().scan(&roots, None),
            Err(PackerError::EmptyRoots)
        ));
    }

    #[test]
    fn episodic_folder_is_a_tv_show() {
        let root = tempfile::tempdir().unwrap();
        for ep in 1..=3 {
            touch(&root.path().join(format!("Show/Show.S01E{ep:02}.mkv")));
        }

        let folder = scanner().scan_folder(&root.path().join("Show")).unwrap();
        assert_eq!(folder.kind, MediaKind::TvShow);
        assert_eq!(folder.display, "E01-E03");
        assert_eq!(folder.season_count, 1);
        assert_eq!(folder.total_size, 12);
    }

    #[test]
    fn single_feature_is_a_movie() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("Arrival (2016)/Arrival.2016.1080p.x264.mkv"));

        let folder = scanner().scan_folder(&root.path().join("Arrival (2016)")).unwrap();
        assert_eq!(folder.kind, MediaKind::Movie);
        assert_eq!(folder.title.as_deref(), Some("Arrival"));
        assert_eq!(folder.year, Some(2016));
    }

    #[test]
    fn documentary_keyword_is_detected() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("Planet Documentary/planet.mkv"));

        let folder = scanner()
            .scan_folder(&root.path().join("Planet Documentary"))
            .unwrap();
        assert_eq!(folder.kind, MediaKind::Documentary);
    }

    #[test]
    fn season_marker_on_folder_name_is_a_tv_show() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("权力的游戏.S01/第1集.mp4"));

        let folder = scanner()
            .scan_folder(&root.path().join("权力的游戏.S01"))
            .unwrap();
        assert_eq!(folder.kind, MediaKind::TvShow);
        assert_eq!(folder.display, "E01");
    }

    #[test]
    fn sequential_and_parallel_scans_agree() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("b/b.e01.mkv"));
        touch(&root.path().join("A/a.e01.mkv"));
        touch(&root.path().join("c/c.e02.avi"));

        let parallel = scanner().scan(&[root.path()], None).unwrap();
        let config = PackerConfig::default().with_parallel_scan(false);
        let sequential = FolderScanner::with_config(config)
            .unwrap()
            .scan(&[root.path()], None)
            .unwrap();

        assert_eq!(parallel, sequential);
        let names: Vec<&str> = parallel.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["A", "b", "c"]);
    }
}
