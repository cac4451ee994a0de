pub mod episode;
pub mod media;
pub mod plan;

pub use episode::{DEFAULT_SEASON, EpisodeId, EpisodeRecord, SeasonRangeInfo};
pub use media::{MediaFolder, MediaKind, VideoFile};
pub use plan::PackagingPlan;
