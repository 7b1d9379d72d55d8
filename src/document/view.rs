use crate::document::tag::Tag;
use crate::domain::Enclosure;

/// Snapshot of one matched element: its attributes and trimmed text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNode {
    attributes: Vec<(String, String)>,
    text: String,
}

impl TagNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            text: text.into(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Attribute value; an attribute present with an empty value reads as
    /// `Some("")`, callers decide whether that counts.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value, with missing and empty treated the same
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|value| !value.is_empty())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Read-only access to a single feed entry's subtree.
#[cfg_attr(test, mockall::automock)]
pub trait EntryView {
    /// Every descendant element matching `tag`, in document order
    fn query(&self, tag: &Tag) -> Vec<TagNode>;

    fn enclosure(&self) -> Option<Enclosure>;

    /// Raw body: HTML for most feeds
    fn content(&self) -> Option<String>;

    fn link(&self) -> Option<String>;
}

/// Text of the first element matching `tag`, if that text is non-empty.
/// Later matches are never consulted.
pub fn query_first_text<V: EntryView + ?Sized>(view: &V, tag: &Tag) -> Option<String> {
    view.query(tag)
        .into_iter()
        .next()
        .map(|node| node.text)
        .filter(|text| !text.is_empty())
}
