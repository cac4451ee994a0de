//! # Reelpack Core
//!
//! Scans media release folders, reports episode continuity per season and
//! assembles resource-adaptive packaging plans for an external content
//! packager.
//!
//! ## Quick Start
//!
//! ```rust
//! use reelpack_core::analysis::analyze;
//! use reelpack_core::parser::FilenameParser;
//! use reelpack_core::types::EpisodeRecord;
//!
//! let parser = FilenameParser::new().unwrap();
//! let names = ["Show.S01E01.mkv", "Show.S01E02.mkv", "Show.S01E04.mkv"];
//! let records: Vec<EpisodeRecord> = names
//!     .iter()
//!     .map(|n| EpisodeRecord::new(*n, parser.parse(n)))
//!     .collect();
//!
//! assert_eq!(analyze(&records).display, "E01-E02, E04 (缺: E03)");
//! ```
pub mod analysis;
pub mod config;
pub mod error;
pub mod naming;
pub mod parser;
pub mod plan;
pub mod progress;
pub mod scanner;
pub mod tuning;
pub mod types;

// Re-export primary API
pub use analysis::{RangeReport, analyze};
pub use config::{NamingConfig, PackerConfig, TuningConfig};
pub use error::{PackerError, Result};
pub use naming::{OrganizeTarget, ReleaseNamer};
pub use parser::{FilenameParser, ReleaseNameParser};
pub use plan::PlanAssembler;
pub use progress::{ContentPackager, ProgressFn, ThrottledProgress};
pub use scanner::{FolderScanner, SearchFilter};
pub use tuning::{ResourceProbe, ResourceProfile, SystemProbe, Tuning};
pub use types::{
    EpisodeId, EpisodeRecord, MediaFolder, MediaKind, PackagingPlan, SeasonRangeInfo, VideoFile,
};
