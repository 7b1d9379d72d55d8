use crate::document::{query_first_text, EntryView, Tag};
use crate::domain::ResolutionOptions;
use crate::extensions::registry::YT_NAMESPACE_URL;
use crate::extensions::traits::{ImageStage, StageOutcome};

pub const YT_VIDEO_ID: Tag = Tag::namespaced(YT_NAMESPACE_URL, "videoId");

/// Video ID from `yt:videoId`, present on YouTube channel feeds
pub fn video_id<V: EntryView + ?Sized>(entry: &V) -> Option<String> {
    query_first_text(entry, &YT_VIDEO_ID)
}

/// Thumbnail for a video ID. The URL is not checked for existence.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

pub struct YouTubeStage;

impl ImageStage for YouTubeStage {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn resolve(&self, entry: &dyn EntryView, _options: &ResolutionOptions) -> StageOutcome {
        StageOutcome::from_option(video_id(entry).map(|id| thumbnail_url(&id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MockEntryView, TagNode};

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(
            thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_video_id_found() {
        let mut entry = MockEntryView::new();
        entry
            .expect_query()
            .withf(|tag| *tag == YT_VIDEO_ID)
            .returning(|_| vec![TagNode::new("abc123")]);

        assert_eq!(video_id(&entry).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_stage_continues_without_video_id() {
        let mut entry = MockEntryView::new();
        entry.expect_query().returning(|_| Vec::new());

        let outcome = YouTubeStage.resolve(&entry, &ResolutionOptions::new());
        assert_eq!(outcome, StageOutcome::Continue);
    }
}
