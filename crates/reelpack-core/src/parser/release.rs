//! # Release Name Parser
//!
//! Classifies release names (TV / movie / documentary) and pulls a clean
//! title and release year out of folder or file names.

use regex::Regex;

use crate::error::Result;
use crate::types::MediaKind;

/// Keywords that mark a non-episodic name as documentary content.
const DOCUMENTARY_KEYWORDS: &[&str] = &["documentary", "docuseries", "docs"];

/// Heuristic parser for release folder and file names.
#[derive(Debug, Clone)]
pub struct ReleaseNameParser {
    re_tv: Vec<Regex>,
    re_season_marker: Regex,
    re_year_paren: Regex,
    re_year: Regex,
    re_brackets: Regex,
    re_metadata: Regex,
    re_separators: Regex,
}

impl ReleaseNameParser {
    /// Constructs a new `ReleaseNameParser` with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `PackerError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_tv: vec![
                Regex::new(r"(?i)s(\d{1,2})e(\d{1,3})")?,
                Regex::new(r"(?i)\b(\d{1,2})x(\d{1,3})\b")?,
                Regex::new(r"(?i)season\s*(\d{1,2}).*episode\s*(\d{1,3})")?,
            ],
            re_season_marker: Regex::new(
                r"(?i)(?:^|[^a-z0-9])s\d{1,2}(?:[^0-9]|$)|season\s*\d+|第\d+季",
            )?,
            re_year_paren: Regex::new(r"[\(\[]((?:19|20)\d{2})[\)\]]")?,
            re_year: Regex::new(r"(?:^|[^0-9])((?:19|20)\d{2})(?:[^0-9]|$)")?,
            re_brackets: Regex::new(r"\[[^\]]*\]|【[^】]*】")?,
            re_metadata: Regex::new(concat!(
                r"(?i)\bs\d{1,2}(?:e\d{1,3})?\b|\b\d{1,2}x\d{1,3}\b",
                r"|season\s*\d+|episode\s*\d+|\bep?\d{1,3}\b|第\d+[季集话話]",
                r"|\b(?:480|576|720|1080|2160)[pi]\b|\b4k\b",
                r"|\b(?:blu-?ray|bdrip|brrip|web-?dl|web-?rip|hdtv|dvdrip|remux)\b",
                r"|\b(?:x26[45]|h\.?26[45]|hevc|av1|xvid)\b",
            ))?,
            re_separators: Regex::new(r"[._\-]+")?,
        })
    }

    /// Returns `true` if the name carries a season+episode style marker.
    #[must_use]
    pub fn is_episodic(&self, name: &str) -> bool {
        self.re_tv.iter().any(|re| re.is_match(name))
    }

    /// Returns `true` if the name carries a season marker such as `S01`,
    /// `Season 2` or `第3季`.
    #[must_use]
    pub fn has_season_marker(&self, name: &str) -> bool {
        self.re_season_marker.is_match(name)
    }

    /// Classifies a single name.
    #[must_use]
    pub fn detect_kind(&self, name: &str) -> MediaKind {
        if self.is_episodic(name) {
            return MediaKind::TvShow;
        }
        let lower = name.to_lowercase();
        if DOCUMENTARY_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return MediaKind::Documentary;
        }
        MediaKind::Movie
    }

    /// Extracts a display title and release year from a name.
    ///
    /// The title is the text preceding the first metadata token (year,
    /// season/episode marker, resolution, source or codec) with bracketed
    /// group tags removed and separators turned into spaces.
    #[must_use]
    pub fn title_and_year(&self, name: &str) -> (Option<String>, Option<u16>) {
        let mut work = name.to_string();

        let year = self
            .re_year_paren
            .captures(&work)
            .or_else(|| self.re_year.captures(&work))
            .and_then(|c| {
                let m = c.get(1)?;
                Some((m.range(), m.as_str().parse::<u16>().ok()?))
            });
        if let Some((range, _)) = &year {
            work.replace_range(range.clone(), "\x00");
        }

        work = self.re_brackets.replace_all(&work, " ").into_owned();
        work = self.re_metadata.replace_all(&work, "\x00").into_owned();

        let region = work.split('\x00').next().unwrap_or("");
        let cleaned = self
            .re_separators
            .replace_all(region, " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches(|c: char| c == '(' || c == ' ')
            .to_string();

        let title = if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        };
        (title, year.map(|(_, y)| y))
    }
}
