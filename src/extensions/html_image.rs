use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::EntryView;
use crate::domain::ResolutionOptions;
use crate::extensions::traits::{ImageStage, StageOutcome};

static IMG_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<img.+?src=['"]([^'"]+)['"].*?>"#).expect("valid img src pattern")
});

/// Every `<img ... src="...">` URL in the HTML, in document order
pub fn image_sources(html: &str) -> Vec<&str> {
    IMG_SRC
        .captures_iter(html.trim())
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// First inline image whose URL contains none of the ignored substrings
/// (case-insensitive). When every image is ignored there is no result.
pub fn first_inline_image(html: &str, ignore: &BTreeSet<String>) -> Option<String> {
    let sources = image_sources(html);
    if ignore.is_empty() {
        return sources.first().map(|src| src.to_string());
    }

    let ignore: Vec<String> = ignore.iter().map(|s| s.to_lowercase()).collect();
    sources
        .into_iter()
        .find(|src| {
            let lowered = src.to_lowercase();
            !ignore.iter().any(|needle| lowered.contains(needle.as_str()))
        })
        .map(str::to_string)
}

pub struct HtmlImageStage;

impl ImageStage for HtmlImageStage {
    fn name(&self) -> &'static str {
        "html-image"
    }

    fn resolve(&self, entry: &dyn EntryView, options: &ResolutionOptions) -> StageOutcome {
        let content = entry.content().unwrap_or_default();
        StageOutcome::from_option(first_inline_image(
            &content,
            options.ignore_image_if_contains(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MockEntryView;

    fn ignore(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_image_sources_in_order() {
        let html = r#"<p>Intro</p><IMG class="hero" SRC='https://a.example/1.jpg' alt="x"><img src="https://a.example/2.png">"#;

        assert_eq!(
            image_sources(html),
            vec!["https://a.example/1.jpg", "https://a.example/2.png"]
        );
    }

    #[test]
    fn test_no_images() {
        assert!(first_inline_image("<p>No pictures</p>", &ignore(&["x"])).is_none());
        assert!(first_inline_image("", &BTreeSet::new()).is_none());
    }

    #[test]
    fn test_empty_ignore_set_takes_first() {
        let html = r#"<img src="a.png"><img src="b.gif">"#;
        assert_eq!(first_inline_image(html, &BTreeSet::new()).as_deref(), Some("a.png"));
    }

    #[test]
    fn test_ignored_image_skipped() {
        let html = r#"<img src="a.png"><img src="b.gif">"#;
        assert_eq!(
            first_inline_image(html, &ignore(&["a.png"])).as_deref(),
            Some("b.gif")
        );
    }

    #[test]
    fn test_all_ignored_is_none() {
        let html = r#"<img src="a.png"><img src="b.gif">"#;
        assert!(first_inline_image(html, &ignore(&["a.png", "b.gif"])).is_none());
    }

    #[test]
    fn test_ignore_is_case_insensitive() {
        let html = r#"<img src="https://media.npr.org/NPR-RSS-PIXEL.png"><img src="https://media.npr.org/photo.jpg">"#;
        assert_eq!(
            first_inline_image(html, &ignore(&["npr-rss-pixel.png"])).as_deref(),
            Some("https://media.npr.org/photo.jpg")
        );
    }

    #[test]
    fn test_ignore_is_unicode_aware() {
        let html = r#"<img src="https://example.com/ÜBER/pixel.gif"><img src="https://example.com/real.jpg">"#;
        assert_eq!(
            first_inline_image(html, &ignore(&["über/"])).as_deref(),
            Some("https://example.com/real.jpg")
        );
    }

    #[test]
    fn test_stage_applies_default_ignore_list() {
        let mut entry = MockEntryView::new();
        entry.expect_content().returning(|| {
            Some(r#"<img src="https://feeds.example.com/b.gif"><img src="https://feeds.example.com/story.jpg">"#.to_string())
        });

        let outcome = HtmlImageStage.resolve(&entry, &ResolutionOptions::new());
        assert_eq!(
            outcome,
            StageOutcome::Found("https://feeds.example.com/story.jpg".to_string())
        );
    }

    #[test]
    fn test_stage_without_content_continues() {
        let mut entry = MockEntryView::new();
        entry.expect_content().returning(|| None);

        let outcome = HtmlImageStage.resolve(&entry, &ResolutionOptions::new());
        assert_eq!(outcome, StageOutcome::Continue);
    }
}
