use std::path::Path;

use regex::Regex;
use tracing::trace;

use crate::error::Result;
use crate::types::{DEFAULT_SEASON, EpisodeId};

/// A single labelled extraction step: `(filename) -> Option<u32>`.
///
/// The extracted number is the first capture group of the leftmost match
/// that yields a positive `u32`; zero and overflowing values are skipped.
/// After a rejected candidate the search resumes right after its capture
/// group, so a separator shared with the next candidate is not consumed.
#[derive(Debug, Clone)]
pub struct Rule {
    label: &'static str,
    pattern: Regex,
}

impl Rule {
    fn new(label: &'static str, pattern: &str) -> Result<Self> {
        Ok(Self {
            label,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Short name of the rule, used in trace output.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Applies the rule to an already-lowercased name.
    #[must_use]
    pub fn extract(&self, name: &str) -> Option<u32> {
        let mut start = 0;
        while let Some(caps) = self.pattern.captures_at(name, start) {
            let group = caps.get(1)?;
            if let Some(n) = group.as_str().parse::<u32>().ok().filter(|n| *n > 0) {
                return Some(n);
            }
            start = group.end();
        }
        None
    }
}

/// Season/episode extractor for media filenames.
///
/// Episode rules, in priority order:
/// 1. `e<digits>`
/// 2. `ep<digits>`
/// 3. `第<digits>集` / `第<digits>话`
/// 4. a bare 2–3 digit number between non-digits (low confidence; it also
///    fires on things like `x264`)
///
/// Season rules: `s<digits>`, `season<digits>`, `第<digits>季`, defaulting
/// to season 1. Unparseable names are normal input and never an error.
#[derive(Debug, Clone)]
pub struct FilenameParser {
    episode_rules: Vec<Rule>,
    season_rules: Vec<Rule>,
}

impl FilenameParser {
    /// Constructs a new `FilenameParser` with pre-compiled rules.
    ///
    /// # Errors
    ///
    /// Returns `PackerError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            episode_rules: vec![
                Rule::new("e", r"e([0-9]+)")?,
                Rule::new("ep", r"ep([0-9]+)")?,
                Rule::new("cjk-episode", r"第([0-9]+)[集话話]")?,
                Rule::new("bare-number", r"[^0-9]([0-9]{2,3})(?:[^0-9]|$)")?,
            ],
            season_rules: vec![
                Rule::new("s", r"s([0-9]+)")?,
                Rule::new("season", r"season\s*([0-9]+)")?,
                Rule::new("cjk-season", r"第([0-9]+)季")?,
            ],
        })
    }

    /// Parses season and episode numbers out of a filename.
    #[must_use]
    pub fn parse(&self, filename: &str) -> EpisodeId {
        let name = filename.to_lowercase();
        EpisodeId {
            season: self.season_of(&name),
            episode: self.episode_of(&name),
        }
    }

    /// Parses the file-name component of `path`.
    #[must_use]
    pub fn parse_path(&self, path: &Path) -> EpisodeId {
        match path.file_name() {
            Some(name) => self.parse(&name.to_string_lossy()),
            None => EpisodeId::default(),
        }
    }

    /// Episode rules in the order they are tried.
    #[must_use]
    pub fn episode_rules(&self) -> &[Rule] {
        &self.episode_rules
    }

    /// Season rules in the order they are tried.
    #[must_use]
    pub fn season_rules(&self) -> &[Rule] {
        &self.season_rules
    }

    fn episode_of(&self, name: &str) -> Option<u32> {
        first_match(&self.episode_rules, name)
    }

    fn season_of(&self, name: &str) -> u32 {
        first_match(&self.season_rules, name).unwrap_or(DEFAULT_SEASON)
    }
}

fn first_match(rules: &[Rule], name: &str) -> Option<u32> {
    rules.iter().find_map(|rule| {
        let value = rule.extract(name)?;
        trace!(rule = rule.label(), value, name, "filename rule matched");
        Some(value)
    })
}
