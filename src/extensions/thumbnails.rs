use crate::document::{EntryView, Tag};
use crate::domain::{parse_dimension, select_widest, ImageCandidate, ResolutionOptions};
use crate::extensions::registry::MEDIA_NAMESPACE_URL;
use crate::extensions::traits::{ImageStage, StageOutcome};

pub const MEDIA_THUMBNAIL: Tag = Tag::namespaced(MEDIA_NAMESPACE_URL, "thumbnail");

/// Every `media:thumbnail` in document order. Empty attributes become
/// absent fields.
pub fn thumbnails<V: EntryView + ?Sized>(entry: &V) -> Vec<ImageCandidate> {
    entry
        .query(&MEDIA_THUMBNAIL)
        .iter()
        .map(|node| {
            ImageCandidate::new(node.attribute("url").unwrap_or_default().to_string())
                .with_width(node.non_empty_attribute("width").and_then(parse_dimension))
                .with_height(node.non_empty_attribute("height").and_then(parse_dimension))
                .with_time(node.non_empty_attribute("time").map(str::to_string))
        })
        .collect()
}

/// Thumbnails are the last structured signal. Once any exist the widest
/// one decides the result, even when its URL turns out to be empty, and the
/// HTML body is never scanned.
pub struct ThumbnailStage;

impl ImageStage for ThumbnailStage {
    fn name(&self) -> &'static str {
        "thumbnail"
    }

    fn resolve(&self, entry: &dyn EntryView, _options: &ResolutionOptions) -> StageOutcome {
        let candidates = thumbnails(entry);
        match select_widest(&candidates) {
            Some(candidate) if !candidate.url.is_empty() => {
                StageOutcome::Found(candidate.url.clone())
            }
            Some(_) => StageOutcome::Stop,
            None => StageOutcome::Continue,
        }
    }
}
