use crate::document::{query_first_text, EntryNode, FeedDocument, Tag};
use crate::domain::NewsItem;
use crate::extensions::registry::{HT_NAMESPACE, HT_NAMESPACE_URL};

pub const HT_NEWS_ITEM: Tag = Tag::namespaced(HT_NAMESPACE_URL, "news_item");
pub const HT_APPROX_TRAFFIC: Tag = Tag::namespaced(HT_NAMESPACE_URL, "approx_traffic");

/// Whether the document declares the Google Trends namespace on its root
pub fn is_trends_feed(document: &FeedDocument) -> bool {
    document.declares_prefix(HT_NAMESPACE)
}

/// Approximate search volume, e.g. `"200,000+"`
pub fn approx_traffic(entry: &EntryNode<'_>) -> Option<String> {
    query_first_text(entry, &HT_APPROX_TRAFFIC)
}

/// Every `ht:news_item` of the entry. Only children in the Trends namespace
/// are read; their text is trimmed.
pub fn news_items(entry: &EntryNode<'_>) -> Vec<NewsItem> {
    entry
        .descendant_elements(&HT_NEWS_ITEM)
        .into_iter()
        .map(|news_item| {
            let mut item = NewsItem::new();
            for (local_name, text) in entry.child_texts(news_item, HT_NAMESPACE_URL) {
                item.insert(local_name, text.trim().to_string());
            }
            item
        })
        .collect()
}
