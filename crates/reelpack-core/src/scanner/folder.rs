use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::config::PackerConfig;
use crate::types::VideoFile;
use crate::types::media::normalized_extension;

/// Files found under one candidate folder, sorted by path.
#[derive(Debug, Default)]
pub(crate) struct FolderContents {
    pub videos: Vec<VideoFile>,
    pub subtitles: Vec<PathBuf>,
}

/// Walks `root` recursively without following symlinks.
///
/// Entries that cannot be read are logged and skipped.
pub(crate) fn collect_contents(root: &Path, config: &PackerConfig) -> FolderContents {
    let mut contents = FolderContents::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(ext) = normalized_extension(entry.path()) else {
            continue;
        };

        if config.is_video_extension(&ext) {
            match entry.metadata() {
                Ok(meta) => contents
                    .videos
                    .push(VideoFile::new(entry.into_path(), meta.len())),
                Err(e) => warn!("skipping {}: {e}", entry.path().display()),
            }
        } else if config.is_subtitle_extension(&ext) {
            contents.subtitles.push(entry.into_path());
        }
    }

    contents.videos.sort_by(|a, b| a.path.cmp(&b.path));
    contents.subtitles.sort();
    contents
}

/// Immediate child directories of `root`. A missing or unreadable root
/// yields nothing.
pub(crate) fn child_dirs(root: &Path) -> Vec<(String, PathBuf)> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1).follow_links(false) {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => {
                let name = entry.file_name().to_string_lossy().into_owned();
                dirs.push((name, entry.into_path()));
            }
            Ok(_) => {}
            Err(e) => warn!("skipping root {}: {e}", root.display()),
        }
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path, bytes: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![0u8; bytes]).unwrap();
    }

    #[test]
    fn collects_videos_and_subtitles_recursively() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.mkv"), 10);
        touch(&dir.path().join("nested/deeper/a.MP4"), 5);
        touch(&dir.path().join("a.srt"), 1);
        touch(&dir.path().join("notes.txt"), 1);
        touch(&dir.path().join("noext"), 1);

        let contents = collect_contents(dir.path(), &PackerConfig::default());

        let names: Vec<String> = contents.videos.iter().map(VideoFile::file_name).collect();
        assert_eq!(names, ["b.mkv", "a.MP4"]);
        assert_eq!(contents.videos[1].extension, ".mp4");
        assert_eq!(contents.videos[1].size, 5);
        assert_eq!(contents.subtitles.len(), 1);
    }

    #[test]
    fn child_dirs_are_one_level_deep() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Show/Season 1")).unwrap();
        fs::create_dir_all(dir.path().join("Movie")).unwrap();
        touch(&dir.path().join("loose.mkv"), 1);

        let mut names: Vec<String> = child_dirs(dir.path()).into_iter().map(|(n, _)| n).collect();
        names.sort();
        assert_eq!(names, ["Movie", "Show"]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(child_dirs(&dir.path().join("absent")).is_empty());
    }
}
