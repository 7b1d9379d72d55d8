pub mod candidate;
pub mod entry_image;
pub mod news;
pub mod options;
pub mod readable;

pub use candidate::{parse_dimension, select_widest, ImageCandidate};
pub use entry_image::{Enclosure, EntryImage};
pub use news::{NewsItem, TrendingTopic};
pub use options::{ResolutionOptions, DEFAULT_IGNORE_IMAGE_IF_CONTAINS};
pub use readable::ReadableContent;
