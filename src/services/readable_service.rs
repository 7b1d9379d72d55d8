use once_cell::sync::Lazy;
use readabilityrs::{Readability, ReadabilityOptions};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::document::EntryView;
use crate::domain::ReadableContent;
use crate::errors::{FeedError, FeedResult};
use crate::services::traits::DocumentLoader;

static IMAGES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img[src]").expect("valid img selector"));

/// Fetches an entry's article page and pulls out its main content
pub struct ReadableService<L: DocumentLoader> {
    loader: L,
}

impl<L: DocumentLoader> ReadableService<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Readable content of the entry's article. When `html` is not given
    /// the page is fetched from the entry link.
    pub fn readable_content(
        &self,
        entry: &dyn EntryView,
        html: Option<&str>,
    ) -> FeedResult<ReadableContent> {
        let link = entry.link();

        let fetched;
        let html = match html {
            Some(html) => html,
            None => {
                let link = link.as_deref().ok_or(FeedError::MissingLink)?;
                fetched = self.loader.fetch_page(link)?;
                fetched.as_str()
            }
        };

        let base = link.as_deref().and_then(|l| Url::parse(l).ok());
        extract_readable(html, base.as_ref())
    }
}

/// Main article content of a page, found with Readability. Relative links
/// and image sources are resolved against `base` when it is given.
pub fn extract_readable(html: &str, base: Option<&Url>) -> FeedResult<ReadableContent> {
    let readability = Readability::new(
        html,
        base.map(Url::as_str),
        Some(ReadabilityOptions::default()),
    )
    .map_err(|e| FeedError::Readability(e.to_string()))?;

    let article = readability
        .parse()
        .ok_or_else(|| FeedError::Readability("no article content found".to_string()))?;

    let content_html = article.content.unwrap_or_default();
    let fragment = Html::parse_fragment(&content_html);
    let root = fragment.root_element();

    let images = root
        .select(&IMAGES)
        .filter_map(|img| img.value().attr("src"))
        .map(|src| absolutize(src, base))
        .collect();

    tracing::debug!(length = content_html.len(), "Extracted readable content");

    Ok(ReadableContent {
        title: article
            .title
            .map(|title| collapse_whitespace(&title))
            .filter(|title| !title.is_empty()),
        text: visible_text(root),
        content_html,
        images,
    })
}

fn visible_text(container: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in container.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
        });
        if !hidden {
            text.push_str(fragment);
            text.push(' ');
        }
    }

    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn absolutize(value: &str, base: Option<&Url>) -> String {
    match base {
        Some(base) if Url::parse(value).is_err() => base
            .join(value)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| value.to_string()),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MockEntryView;
    use crate::services::traits::MockDocumentLoader;

    const STORY_URL: &str = "https://news.example.com/2024/story.html";

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Harbour Boats Return At First Light</title>
  </head>
  <body>
    <nav><a href="/">Home</a> <a href="/world">World</a></nav>
    <aside>
      <article class="promo"><a href="/other">Read also: unrelated teaser</a></article>
    </aside>
    <div id="story">
      <p>This is the long real body of the story. Fishing boats came back into the harbour
      before sunrise, their holds full after a week at sea, and the quay filled with buyers,
      families and the usual crowd of gulls waiting for whatever fell from the crates.</p>
      <p><img src="images/lead.jpg"> Second real paragraph. The harbour master said the catch
      was the best of the season, and that the weather had held long enough for every boat in
      the fleet to reach the northern grounds and return without damage or delay.</p>
      <p>Third paragraph with more detail about the prices at the morning auction, which rose
      sharply as restaurant buyers competed for the first lots of the day before noon.</p>
    </div>
    <footer>Copyright Example News</footer>
  </body>
</html>"#;

    fn base() -> Url {
        Url::parse(STORY_URL).unwrap()
    }

    #[test]
    fn test_extracts_story_body_not_teaser() {
        let base = base();
        let content = extract_readable(PAGE, Some(&base)).unwrap();

        assert!(content.text.contains("This is the long real body of the story."));
        assert!(content.text.contains("Second real paragraph."));
        assert!(!content.text.contains("Read also: unrelated teaser"));
        assert!(!content.text.contains("Copyright Example News"));
    }

    #[test]
    fn test_title_from_page() {
        let content = extract_readable(PAGE, Some(&base())).unwrap();
        assert_eq!(
            content.title.as_deref(),
            Some("Harbour Boats Return At First Light")
        );
    }

    #[test]
    fn test_images_resolved_against_entry_link() {
        let content = extract_readable(PAGE, Some(&base())).unwrap();
        assert_eq!(
            content.images,
            vec!["https://news.example.com/2024/images/lead.jpg".to_string()]
        );
    }

    #[test]
    fn test_relative_images_kept_without_base() {
        let content = extract_readable(PAGE, None).unwrap();
        assert!(content.images.iter().any(|src| src.ends_with("images/lead.jpg")));
    }

    #[test]
    fn test_uses_given_html_without_fetching() {
        let mut loader = MockDocumentLoader::new();
        loader.expect_fetch_page().never();
        let mut entry = MockEntryView::new();
        entry
            .expect_link()
            .returning(|| Some(STORY_URL.to_string()));

        let service = ReadableService::new(loader);
        let content = service.readable_content(&entry, Some(PAGE)).unwrap();
        assert!(content.text.contains("Third paragraph"));
    }

    #[test]
    fn test_fetches_entry_link() {
        let mut loader = MockDocumentLoader::new();
        loader
            .expect_fetch_page()
            .withf(|url| url == STORY_URL)
            .times(1)
            .returning(|_| Ok(PAGE.to_string()));
        let mut entry = MockEntryView::new();
        entry
            .expect_link()
            .returning(|| Some(STORY_URL.to_string()));

        let service = ReadableService::new(loader);
        let content = service.readable_content(&entry, None).unwrap();
        assert_eq!(content.images.len(), 1);
    }

    #[test]
    fn test_missing_link_is_error() {
        let loader = MockDocumentLoader::new();
        let mut entry = MockEntryView::new();
        entry.expect_link().returning(|| None);

        let service = ReadableService::new(loader);
        let result = service.readable_content(&entry, None);
        assert!(matches!(result, Err(FeedError::MissingLink)));
    }
}
