use crate::document::{query_first_text, EntryNode, EntryView, FeedDocument};
use crate::domain::{EntryImage, ImageCandidate, ResolutionOptions, TrendingTopic};
use crate::errors::FeedResult;
use crate::extensions::{thumbnails, trends, FeaturedImageResolver, NamespaceRegistry};
use crate::services::traits::DocumentLoader;

/// Loads feeds and runs the media extensions over their entries
pub struct FeedService<L: DocumentLoader> {
    loader: L,
    resolver: FeaturedImageResolver,
    registry: NamespaceRegistry,
    options: ResolutionOptions,
}

impl<L: DocumentLoader> FeedService<L> {
    pub fn new(loader: L, registry: NamespaceRegistry, options: ResolutionOptions) -> Self {
        Self {
            loader,
            resolver: FeaturedImageResolver::new(),
            registry,
            options,
        }
    }

    /// Load and parse a feed from a path or URL
    pub fn open(&self, source: &str) -> FeedResult<FeedDocument> {
        let bytes = self.loader.load_feed(source)?;
        FeedDocument::parse(&bytes)
    }

    /// Featured image of every entry, in document order
    pub fn images(&self, document: &FeedDocument) -> Vec<EntryImage> {
        document
            .entries()
            .map(|entry| {
                let image = self.resolver.resolve(&entry, &self.options);
                EntryImage::new(entry_title(&entry))
                    .with_link(entry.link())
                    .with_published(entry.published())
                    .with_image(image)
            })
            .collect()
    }

    /// All `media:thumbnail` candidates per entry
    pub fn thumbnails(&self, document: &FeedDocument) -> Vec<(String, Vec<ImageCandidate>)> {
        document
            .entries()
            .map(|entry| (entry_title(&entry), thumbnails::thumbnails(&entry)))
            .collect()
    }

    /// First text of an arbitrary `prefix:name` tag per entry
    pub fn tag_values(
        &self,
        document: &FeedDocument,
        qualified_name: &str,
    ) -> FeedResult<Vec<(String, Option<String>)>> {
        let tag = self.registry.resolve(qualified_name)?;

        Ok(document
            .entries()
            .map(|entry| (entry_title(&entry), query_first_text(&entry, &tag)))
            .collect())
    }

    /// Trending topics, or an empty list for feeds that are not Trends feeds
    pub fn trends(&self, document: &FeedDocument) -> Vec<TrendingTopic> {
        if !trends::is_trends_feed(document) {
            tracing::debug!("Feed does not declare the Trends namespace");
            return Vec::new();
        }

        document
            .entries()
            .map(|entry| TrendingTopic {
                title: entry_title(&entry),
                approx_traffic: trends::approx_traffic(&entry),
                news_items: trends::news_items(&entry),
            })
            .collect()
    }
}

fn entry_title(entry: &EntryNode<'_>) -> String {
    entry.title().unwrap_or_else(|| "Untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FeedError;
    use crate::services::traits::MockDocumentLoader;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Photo Desk</title>
    <link>https://photos.example.com/</link>
    <description>Pictures</description>
    <item>
      <title>Harbour at dawn</title>
      <link>https://photos.example.com/harbour</link>
      <guid>https://photos.example.com/harbour</guid>
      <media:thumbnail url="https://photos.example.com/harbour-s.jpg" width="150"/>
      <media:thumbnail url="https://photos.example.com/harbour-m.jpg" width="600"/>
    </item>
    <item>
      <guid>https://photos.example.com/untitled</guid>
      <description>No pictures here</description>
    </item>
  </channel>
</rss>"#;

    fn service_with_feed(feed: &'static str) -> FeedService<MockDocumentLoader> {
        let mut loader = MockDocumentLoader::new();
        loader
            .expect_load_feed()
            .returning(move |_| Ok(feed.as_bytes().to_vec()));
        FeedService::new(loader, NamespaceRegistry::new(), ResolutionOptions::new())
    }

    #[test]
    fn test_images() {
        let service = service_with_feed(FEED);
        let document = service.open("photos.xml").unwrap();

        let images = service.images(&document);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].title, "Harbour at dawn");
        assert_eq!(
            images[0].image.as_deref(),
            Some("https://photos.example.com/harbour-m.jpg")
        );
        assert_eq!(
            images[0].link.as_deref(),
            Some("https://photos.example.com/harbour")
        );
        assert_eq!(images[1].title, "Untitled");
        assert_eq!(images[1].image, None);
    }

    #[test]
    fn test_thumbnails() {
        let service = service_with_feed(FEED);
        let document = service.open("photos.xml").unwrap();

        let thumbnails = service.thumbnails(&document);
        assert_eq!(thumbnails[0].1.len(), 2);
        assert!(thumbnails[1].1.is_empty());
    }

    #[test]
    fn test_tag_values() {
        let service = service_with_feed(FEED);
        let document = service.open("photos.xml").unwrap();

        let values = service.tag_values(&document, "guid").unwrap();
        assert_eq!(
            values[1].1.as_deref(),
            Some("https://photos.example.com/untitled")
        );

        let unknown = service.tag_values(&document, "dc:creator");
        assert!(matches!(unknown, Err(FeedError::UnknownNamespace(_))));
    }

    #[test]
    fn test_trends_empty_for_regular_feed() {
        let service = service_with_feed(FEED);
        let document = service.open("photos.xml").unwrap();

        assert!(service.trends(&document).is_empty());
    }

    #[test]
    fn test_open_propagates_loader_error() {
        let mut loader = MockDocumentLoader::new();
        loader.expect_load_feed().returning(|source| {
            Err(FeedError::HttpStatus {
                status: 404,
                url: source.to_string(),
            })
        });
        let service = FeedService::new(loader, NamespaceRegistry::new(), ResolutionOptions::new());

        let result = service.open("https://example.com/missing.xml");
        assert!(matches!(result, Err(FeedError::HttpStatus { status: 404, .. })));
    }
}
