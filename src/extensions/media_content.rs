use crate::document::{EntryView, Tag, TagNode};
use crate::domain::{parse_dimension, select_widest, ImageCandidate, ResolutionOptions};
use crate::extensions::registry::MEDIA_NAMESPACE_URL;
use crate::extensions::traits::{ImageStage, StageOutcome};

/// Matches standalone blocks and those nested in `media:group`
pub const MEDIA_CONTENT: Tag = Tag::namespaced(MEDIA_NAMESPACE_URL, "content");

fn is_image_content(node: &TagNode) -> bool {
    let typed_image = node
        .attribute("type")
        .is_some_and(|mime| mime.contains("image"));
    let image_medium = node.attribute("medium") == Some("image");

    (typed_image || image_medium) && node.non_empty_attribute("url").is_some()
}

/// Image-typed `media:content` blocks in document order
pub fn media_image_candidates<V: EntryView + ?Sized>(entry: &V) -> Vec<ImageCandidate> {
    entry
        .query(&MEDIA_CONTENT)
        .iter()
        .filter(|node| is_image_content(node))
        .map(|node| {
            ImageCandidate::new(node.attribute("url").unwrap_or_default().to_string())
                .with_width(node.attribute("width").and_then(parse_dimension))
                .with_height(node.attribute("height").and_then(parse_dimension))
        })
        .collect()
}

/// URL of the widest image `media:content` block. Blocks that are not
/// images are skipped; if none qualify the stage has nothing to offer.
pub fn fetch_media_image<V: EntryView + ?Sized>(entry: &V) -> Option<String> {
    let candidates = media_image_candidates(entry);
    select_widest(&candidates).map(|candidate| candidate.url.clone())
}

pub struct MediaContentStage;

impl ImageStage for MediaContentStage {
    fn name(&self) -> &'static str {
        "media-content"
    }

    fn resolve(&self, entry: &dyn EntryView, _options: &ResolutionOptions) -> StageOutcome {
        StageOutcome::from_option(fetch_media_image(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MockEntryView;

    fn entry_with(nodes: Vec<TagNode>) -> MockEntryView {
        let mut entry = MockEntryView::new();
        entry
            .expect_query()
            .withf(|tag| *tag == MEDIA_CONTENT)
            .returning(move |_| nodes.clone());
        entry
    }

    fn image(url: &str, width: &str) -> TagNode {
        TagNode::new("")
            .with_attribute("url", url)
            .with_attribute("type", "image/jpeg")
            .with_attribute("width", width)
    }

    #[test]
    fn test_widest_image_wins() {
        let entry = entry_with(vec![
            image("https://cdn.example.com/300.jpg", "300"),
            image("https://cdn.example.com/800.jpg", "800"),
        ]);

        assert_eq!(
            fetch_media_image(&entry).as_deref(),
            Some("https://cdn.example.com/800.jpg")
        );
    }

    #[test]
    fn test_equal_widths_keep_first_seen() {
        let entry = entry_with(vec![
            image("https://cdn.example.com/a.jpg", "640"),
            image("https://cdn.example.com/b.jpg", "640"),
            image("https://cdn.example.com/c.jpg", "320"),
        ]);

        assert_eq!(
            fetch_media_image(&entry).as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn test_missing_width_kept_as_fallback() {
        let entry = entry_with(vec![TagNode::new("")
            .with_attribute("url", "https://cdn.example.com/only.jpg")
            .with_attribute("medium", "image")]);

        assert_eq!(
            fetch_media_image(&entry).as_deref(),
            Some("https://cdn.example.com/only.jpg")
        );
    }

    #[test]
    fn test_non_image_blocks_skipped() {
        let entry = entry_with(vec![
            TagNode::new("")
                .with_attribute("url", "https://cdn.example.com/clip.mp4")
                .with_attribute("type", "video/mp4")
                .with_attribute("width", "1920"),
            image("https://cdn.example.com/poster.jpg", "480"),
        ]);

        assert_eq!(
            fetch_media_image(&entry).as_deref(),
            Some("https://cdn.example.com/poster.jpg")
        );
    }

    #[test]
    fn test_only_unqualified_blocks_yield_nothing() {
        let entry = entry_with(vec![
            TagNode::new("")
                .with_attribute("url", "https://cdn.example.com/episode.mp3")
                .with_attribute("type", "audio/mpeg"),
            TagNode::new("")
                .with_attribute("medium", "image")
                .with_attribute("url", ""),
        ]);

        assert!(fetch_media_image(&entry).is_none());
    }

    #[test]
    fn test_medium_must_match_exactly() {
        let entry = entry_with(vec![TagNode::new("")
            .with_attribute("url", "https://cdn.example.com/x.jpg")
            .with_attribute("medium", "images")]);

        assert!(fetch_media_image(&entry).is_none());
    }

    #[test]
    fn test_candidates_carry_dimensions() {
        let entry = entry_with(vec![image("https://cdn.example.com/a.jpg", "1024px")
            .with_attribute("height", "768")]);

        let candidates = media_image_candidates(&entry);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].width, Some(1024));
        assert_eq!(candidates[0].height, Some(768));
    }
}
