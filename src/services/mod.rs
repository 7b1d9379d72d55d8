pub mod feed_service;
pub mod fetch_service;
pub mod readable_service;
pub mod traits;

pub use feed_service::FeedService;
pub use fetch_service::FetchService;
pub use readable_service::{extract_readable, ReadableService};
pub use traits::DocumentLoader;
