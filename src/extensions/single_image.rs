use crate::document::{query_first_text, EntryView, Tag};
use crate::domain::ResolutionOptions;
use crate::extensions::registry::{HT_NAMESPACE_URL, SZN_NAMESPACE_URL};
use crate::extensions::traits::{ImageStage, StageOutcome};

/// One-off image tags checked before media blocks
const HIGH_PRIORITY_TAGS: &[Tag] = &[
    Tag::plain("fullimage"),  // FeedBurner
    Tag::plain("StoryImage"), // FeedBurner
    Tag::namespaced(SZN_NAMESPACE_URL, "bigImage"),
    Tag::namespaced(SZN_NAMESPACE_URL, "image"),
];

/// One-off image tags that tend to be small, checked late
const LOW_PRIORITY_TAGS: &[Tag] = &[
    Tag::plain("StoryImage"),
    Tag::namespaced(HT_NAMESPACE_URL, "picture"), // Google Trends, very low res
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Low,
}

impl Priority {
    pub fn tags(&self) -> &'static [Tag] {
        match self {
            Priority::High => HIGH_PRIORITY_TAGS,
            Priority::Low => LOW_PRIORITY_TAGS,
        }
    }
}

/// First non-empty value among the priority class's tags, in list order
pub fn fetch_single_image<V: EntryView + ?Sized>(entry: &V, priority: Priority) -> Option<String> {
    priority
        .tags()
        .iter()
        .find_map(|tag| query_first_text(entry, tag))
}

pub struct SingleImageStage {
    priority: Priority,
}

impl SingleImageStage {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }
}

impl ImageStage for SingleImageStage {
    fn name(&self) -> &'static str {
        match self.priority {
            Priority::High => "single-image-high",
            Priority::Low => "single-image-low",
        }
    }

    fn resolve(&self, entry: &dyn EntryView, _options: &ResolutionOptions) -> StageOutcome {
        StageOutcome::from_option(fetch_single_image(entry, self.priority))
    }
}
