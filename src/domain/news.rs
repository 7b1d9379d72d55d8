use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One trending search from a Google Trends feed
#[derive(Debug, Clone, Serialize)]
pub struct TrendingTopic {
    pub title: String,
    pub approx_traffic: Option<String>,
    pub news_items: Vec<NewsItem>,
}

/// One `ht:news_item` block from a Google Trends feed. Field names are the
/// child tags' local names (`news_item_title`, `news_item_url`, ...) in
/// document order; a repeated child overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsItem {
    fields: Vec<(String, String)>,
}

impl NewsItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, value: String) {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(field) => field.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for NewsItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_overwrites() {
        let mut item = NewsItem::new();
        item.insert("news_item_title".to_string(), "First".to_string());
        item.insert("news_item_url".to_string(), "https://example.com".to_string());
        item.insert("news_item_title".to_string(), "Second".to_string());

        let names: Vec<&str> = item.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["news_item_title", "news_item_url"]);
        assert_eq!(item.get("news_item_title"), Some("Second"));
    }

    #[test]
    fn test_serializes_as_object() {
        let mut item = NewsItem::new();
        item.insert("news_item_source".to_string(), "Wire".to_string());

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"news_item_source":"Wire"}"#);
    }
}
