use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Document errors
    #[error("XML parsing failed: {0}")]
    XmlParse(String),

    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("Unregistered namespace prefix: {0}")]
    UnknownNamespace(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(usize),

    #[error("Entry has no link to fetch")]
    MissingLink,

    #[error("Readable content extraction failed: {0}")]
    Readability(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Output errors
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;
