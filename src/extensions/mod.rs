pub mod enclosure;
pub mod featured;
pub mod html_image;
pub mod media_content;
pub mod registry;
pub mod single_image;
pub mod thumbnails;
pub mod traits;
pub mod trends;
pub mod youtube;

pub use featured::{resolve_featured_image, FeaturedImageResolver};
pub use registry::NamespaceRegistry;
pub use single_image::Priority;
pub use traits::{ImageStage, StageOutcome};
