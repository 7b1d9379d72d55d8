use std::collections::BTreeSet;

/// Substrings that mark an inline `<img>` as a tracking pixel. They always
/// apply; caller-supplied values are added on top.
pub const DEFAULT_IGNORE_IMAGE_IF_CONTAINS: &[&str] = &["npr-rss-pixel.png", "/b.gif"];

/// Options for one featured-image resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOptions {
    ignore_image_if_contains: BTreeSet<String>,
}

impl ResolutionOptions {
    pub fn new() -> Self {
        Self {
            ignore_image_if_contains: DEFAULT_IGNORE_IMAGE_IF_CONTAINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Union the given substrings into the ignore set
    pub fn with_ignored<I, S>(mut self, substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_image_if_contains
            .extend(substrings.into_iter().map(Into::into));
        self
    }

    pub fn ignore_image_if_contains(&self) -> &BTreeSet<String> {
        &self.ignore_image_if_contains
    }
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self::new()
    }
}
