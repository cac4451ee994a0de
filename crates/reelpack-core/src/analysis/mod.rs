pub mod ranges;

pub use ranges::{EPISODE_UNIT, MISSING_LABEL, RangeReport, analyze, contiguous_runs, season_info};
