pub mod filename;
pub mod release;

pub use filename::{FilenameParser, Rule};
pub use release::ReleaseNameParser;
