use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::{EpisodeRecord, SeasonRangeInfo};

/// Label introducing the missing-episode suffix, e.g. ` (缺: E04, E06)`.
pub const MISSING_LABEL: &str = "缺";

/// Unit used when a folder has no numbered episodes, e.g. `12 集`.
pub const EPISODE_UNIT: &str = "集";

/// Continuity report for one release folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeReport {
    /// Per-season ranges, keyed by season number.
    pub seasons: BTreeMap<u32, SeasonRangeInfo>,
    /// Folder-level display string.
    pub display: String,
    /// Whether any record carried an episode number.
    pub has_episode_numbers: bool,
    /// Number of records analyzed, numbered or not.
    pub total_count: usize,
}

impl RangeReport {
    /// Every missing token across all seasons, in season then episode order.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.seasons
            .values()
            .flat_map(|s| s.missing.iter().map(String::as_str))
    }
}

/// Splits sorted, distinct episode numbers into inclusive contiguous runs.
///
/// Input that is not strictly increasing is a caller bug; it trips a debug
/// assertion and never overflows in release builds.
#[must_use]
pub fn contiguous_runs(episodes: &[u32]) -> Vec<(u32, u32)> {
    debug_assert!(
        episodes.windows(2).all(|w| w[0] < w[1]),
        "episodes must be sorted and distinct"
    );
    let mut runs = Vec::new();
    let mut iter = episodes.iter().copied();
    let Some(first) = iter.next() else {
        return runs;
    };

    let (mut start, mut end) = (first, first);
    for ep in iter {
        if end.checked_add(1) == Some(ep) {
            end = ep;
        } else {
            runs.push((start, end));
            start = ep;
            end = ep;
        }
    }
    runs.push((start, end));
    runs
}

/// Builds the continuity info for one season.
///
/// `episodes` must be sorted and distinct (checked in debug builds). With
/// `prefixed` every token is written as `S{season} E..`.
#[must_use]
pub fn season_info(season: u32, episodes: Vec<u32>, prefixed: bool) -> SeasonRangeInfo {
    let prefix = if prefixed {
        format!("S{season} ")
    } else {
        String::new()
    };

    let runs = contiguous_runs(&episodes);
    let mut ranges = Vec::with_capacity(runs.len());
    let mut missing = Vec::new();
    let mut prev_end: Option<u32> = None;

    for (start, end) in runs {
        if let Some(prev) = prev_end {
            missing.extend((prev.saturating_add(1)..start).map(|n| format!("{prefix}E{n:02}")));
        }
        if start == end {
            ranges.push(format!("{prefix}E{start:02}"));
        } else {
            ranges.push(format!("{prefix}E{start:02}-E{end:02}"));
        }
        prev_end = Some(end);
    }

    let display = with_missing_suffix(ranges.join(", "), &missing);
    SeasonRangeInfo {
        season,
        episodes,
        ranges,
        missing,
        display,
    }
}

/// Analyzes the episode records of one folder.
///
/// Records without an episode number are left out of the range math but
/// still count towards `total_count`; duplicate numbers collapse into one.
#[must_use]
pub fn analyze(records: &[EpisodeRecord]) -> RangeReport {
    let total_count = records.len();

    let mut by_season: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
    for record in records {
        if let Some(ep) = record.episode {
            by_season.entry(record.season).or_default().insert(ep);
        }
    }

    if by_season.is_empty() {
        return RangeReport {
            seasons: BTreeMap::new(),
            display: format!("{total_count} {EPISODE_UNIT}"),
            has_episode_numbers: false,
            total_count,
        };
    }

    let prefixed = by_season.len() > 1;
    let seasons: BTreeMap<u32, SeasonRangeInfo> = by_season
        .into_iter()
        .map(|(season, eps)| {
            (
                season,
                season_info(season, eps.into_iter().collect(), prefixed),
            )
        })
        .collect();

    let ranges: Vec<&str> = seasons
        .values()
        .flat_map(|s| s.ranges.iter().map(String::as_str))
        .collect();
    let missing: Vec<&str> = seasons
        .values()
        .flat_map(|s| s.missing.iter().map(String::as_str))
        .collect();

    RangeReport {
        display: with_missing_suffix(ranges.join(", "), &missing),
        seasons,
        has_episode_numbers: true,
        total_count,
    }
}

fn with_missing_suffix<S: AsRef<str>>(mut display: String, missing: &[S]) -> String {
    if !missing.is_empty() {
        let joined = missing
            .iter()
            .map(|m| m.as_ref())
            .collect::<Vec<&str>>()
            .join(", ");
        display.push_str(&format!(" ({MISSING_LABEL}: {joined})"));
    }
    display
}
