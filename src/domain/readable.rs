use serde::{Deserialize, Serialize};

/// Main content extracted from an article page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadableContent {
    pub title: Option<String>,
    /// Markup of the main content container, with relative URLs resolved
    pub content_html: String,
    /// Whitespace-collapsed text of the container, scripts and styles removed
    pub text: String,
    /// Absolute `img` sources inside the container, in document order
    pub images: Vec<String>,
}
