use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Featured image resolved for one feed entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryImage {
    pub title: String,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

impl EntryImage {
    pub fn new(title: String) -> Self {
        Self {
            title,
            link: None,
            published: None,
            image: None,
        }
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    pub fn with_published(mut self, published: Option<DateTime<Utc>>) -> Self {
        self.published = published;
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Format: "{title}: {image}" or "{title}: (no image)"
    pub fn format(&self) -> String {
        match &self.image {
            Some(image) => format!("{}: {}", self.title, image),
            None => format!("{}: (no image)", self.title),
        }
    }
}

/// Single external resource attached to an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: Option<String>,
}

impl Enclosure {
    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.contains("image"))
    }
}
