use crate::document::Tag;
use crate::errors::{FeedError, FeedResult};

pub const MEDIA_NAMESPACE: &str = "media";
pub const MEDIA_NAMESPACE_URL: &str = "http://search.yahoo.com/mrss/";

pub const YT_NAMESPACE: &str = "yt";
pub const YT_NAMESPACE_URL: &str = "http://www.youtube.com/xml/schemas/2015";

pub const SZN_NAMESPACE: &str = "szn";
pub const SZN_NAMESPACE_URL: &str = "https://www.seznam.cz";

pub const HT_NAMESPACE: &str = "ht";
pub const HT_NAMESPACE_URL: &str = "https://trends.google.com/trends/trendingsearches/daily";

/// Prefix to namespace-URI mapping used to turn `prefix:name` strings into
/// [`Tag`]s. Built once at start-up; the extensions' own tags are constants
/// and do not go through it.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    namespaces: Vec<(String, String)>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            namespaces: Vec::new(),
        };

        registry.register(MEDIA_NAMESPACE, MEDIA_NAMESPACE_URL);
        registry.register(YT_NAMESPACE, YT_NAMESPACE_URL);
        registry.register(SZN_NAMESPACE, SZN_NAMESPACE_URL);
        registry.register(HT_NAMESPACE, HT_NAMESPACE_URL);

        registry
    }

    /// Register a prefix, replacing any earlier URI bound to it
    pub fn register(&mut self, prefix: &str, uri: &str) {
        match self.namespaces.iter_mut().find(|(p, _)| p == prefix) {
            Some(entry) => entry.1 = uri.to_string(),
            None => self.namespaces.push((prefix.to_string(), uri.to_string())),
        }
    }

    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(|(p, _)| p.as_str())
    }

    /// Resolve `prefix:local` (or a bare `local`) into a tag
    pub fn resolve(&self, qualified_name: &str) -> FeedResult<Tag> {
        match qualified_name.split_once(':') {
            Some((prefix, local)) => {
                let uri = self
                    .uri(prefix)
                    .ok_or_else(|| FeedError::UnknownNamespace(prefix.to_string()))?;
                Ok(Tag::owned(Some(uri.to_string()), local.to_string()))
            }
            None => Ok(Tag::owned(None, qualified_name.to_string())),
        }
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
