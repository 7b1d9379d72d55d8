use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::tag::Tag;
use crate::document::tree::{Element, NodeId, XmlTree};
use crate::document::view::{EntryView, TagNode};
use crate::domain::Enclosure;
use crate::errors::{FeedError, FeedResult};

const ATOM_NAMESPACE_URL: &str = "http://www.w3.org/2005/Atom";
const ATOM_03_NAMESPACE_URL: &str = "http://purl.org/atom/ns#";
const RSS_10_NAMESPACE_URL: &str = "http://purl.org/rss/1.0/";
const RSS_090_NAMESPACE_URL: &str = "http://my.netscape.com/rdf/simple/0.9/";
const CONTENT_NAMESPACE_URL: &str = "http://purl.org/rss/1.0/modules/content/";

const CONTENT_ENCODED: Tag = Tag::namespaced(CONTENT_NAMESPACE_URL, "encoded");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Rss,
    Atom,
}

impl FeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::Rss => "rss",
            FeedType::Atom => "atom",
        }
    }

    fn from_model(feed: &feed_rs::model::Feed) -> Self {
        match feed.feed_type {
            feed_rs::model::FeedType::Atom => FeedType::Atom,
            _ => FeedType::Rss,
        }
    }
}

impl std::fmt::Display for FeedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed RSS/Atom document: the namespace-aware element tree the
/// extensions query, paired with the generic `feed-rs` model.
pub struct FeedDocument {
    tree: XmlTree,
    model: feed_rs::model::Feed,
    entries: Vec<NodeId>,
}

impl FeedDocument {
    pub fn parse(bytes: &[u8]) -> FeedResult<Self> {
        let tree = XmlTree::parse(bytes)?;
        let model =
            feed_rs::parser::parse(bytes).map_err(|e| FeedError::FeedParse(e.to_string()))?;

        let entries = Self::locate_entries(&tree);
        if entries.len() != model.entries.len() {
            tracing::warn!(
                tree_entries = entries.len(),
                model_entries = model.entries.len(),
                "Entry count differs between XML tree and feed model"
            );
        }
        tracing::debug!(entries = entries.len(), "Parsed feed document");

        Ok(Self {
            tree,
            model,
            entries,
        })
    }

    /// `item`/`entry` elements not nested inside another entry, in order
    fn locate_entries(tree: &XmlTree) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending = vec![tree.root()];

        while let Some(id) = pending.pop() {
            if id != tree.root() && Self::is_entry_element(tree, id) {
                found.push(id);
                continue;
            }
            let before = pending.len();
            pending.extend(tree.children(id));
            pending[before..].reverse();
        }

        found
    }

    fn is_entry_element(tree: &XmlTree, id: NodeId) -> bool {
        let element = tree.element(id);
        match element.local_name() {
            "item" => matches!(
                element.namespace(),
                None | Some(RSS_10_NAMESPACE_URL) | Some(RSS_090_NAMESPACE_URL)
            ),
            "entry" => matches!(
                element.namespace(),
                Some(ATOM_NAMESPACE_URL) | Some(ATOM_03_NAMESPACE_URL)
            ),
            _ => false,
        }
    }

    pub fn feed_type(&self) -> FeedType {
        FeedType::from_model(&self.model)
    }

    pub fn title(&self) -> Option<&str> {
        self.model.title.as_ref().map(|t| t.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<EntryNode<'_>> {
        let node = *self.entries.get(index)?;
        Some(EntryNode {
            tree: &self.tree,
            node,
            model: self.model.entries.get(index),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = EntryNode<'_>> + '_ {
        (0..self.entries.len()).filter_map(move |index| self.entry(index))
    }

    /// Whether the root element declares the given namespace prefix
    pub fn declares_prefix(&self, prefix: &str) -> bool {
        let attribute = format!("xmlns:{}", prefix);
        self.tree
            .element(self.tree.root())
            .attribute(&attribute)
            .is_some()
    }
}

/// Borrowed handle to one entry of a [`FeedDocument`]
#[derive(Clone, Copy)]
pub struct EntryNode<'a> {
    tree: &'a XmlTree,
    node: NodeId,
    model: Option<&'a feed_rs::model::Entry>,
}

impl<'a> EntryNode<'a> {
    pub fn title(&self) -> Option<String> {
        self.model
            .and_then(|entry| entry.title.as_ref())
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| self.own_child_text("title"))
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.model.and_then(|entry| entry.published.or(entry.updated))
    }

    /// Matching descendant elements of this entry, in document order
    pub fn descendant_elements(&self, tag: &Tag) -> Vec<NodeId> {
        self.tree.find_descendants(self.node, tag)
    }

    /// `(local name, text)` of each direct child of `node` in `namespace`
    pub fn child_texts(&self, node: NodeId, namespace: &str) -> Vec<(String, String)> {
        self.tree
            .children(node)
            .filter(|&child| self.tree.element(child).namespace() == Some(namespace))
            .map(|child| {
                (
                    self.tree.element(child).local_name().to_string(),
                    self.tree.text_content(child),
                )
            })
            .collect()
    }

    fn is_atom(&self) -> bool {
        matches!(
            self.tree.element(self.node).namespace(),
            Some(ATOM_NAMESPACE_URL) | Some(ATOM_03_NAMESPACE_URL)
        )
    }

    /// Direct child in the entry's own namespace (or no namespace)
    fn own_child(&self, local_name: &str) -> Option<NodeId> {
        let own_namespace = self.tree.element(self.node).namespace();
        self.tree.children(self.node).find(|&child| {
            let element = self.tree.element(child);
            element.local_name() == local_name
                && (element.namespace().is_none() || element.namespace() == own_namespace)
        })
    }

    fn own_child_text(&self, local_name: &str) -> Option<String> {
        self.own_child(local_name)
            .map(|child| self.tree.text_content(child).trim().to_string())
            .filter(|text| !text.is_empty())
    }

    fn atom_links(&self) -> impl Iterator<Item = &'a Element> + 'a {
        let tree = self.tree;
        tree.children(self.node)
            .map(move |child| tree.element(child))
            .filter(|element| {
                element.local_name() == "link"
                    && matches!(
                        element.namespace(),
                        Some(ATOM_NAMESPACE_URL) | Some(ATOM_03_NAMESPACE_URL)
                    )
            })
    }

    fn atom_text_construct(&self, child: NodeId) -> String {
        let element = self.tree.element(child);
        match element.attribute("type") {
            Some("xhtml") => self.tree.inner_xml(child),
            _ => self.tree.text_content(child),
        }
    }
}

impl EntryView for EntryNode<'_> {
    fn query(&self, tag: &Tag) -> Vec<TagNode> {
        self.tree
            .find_descendants(self.node, tag)
            .into_iter()
            .map(|id| {
                let element = self.tree.element(id);
                element.attributes().iter().fold(
                    TagNode::new(self.tree.text_content(id).trim()),
                    |node, (key, value)| node.with_attribute(key.as_str(), value.as_str()),
                )
            })
            .collect()
    }

    fn enclosure(&self) -> Option<Enclosure> {
        if self.is_atom() {
            let link = self
                .atom_links()
                .find(|link| link.attribute("rel") == Some("enclosure"))?;
            return Some(Enclosure {
                url: link.attribute("href").unwrap_or_default().to_string(),
                mime_type: link.attribute("type").map(str::to_string),
            });
        }

        let enclosure = self.tree.element(self.own_child("enclosure")?);
        Some(Enclosure {
            url: enclosure.attribute("url").unwrap_or_default().to_string(),
            mime_type: enclosure.attribute("type").map(str::to_string),
        })
    }

    fn content(&self) -> Option<String> {
        if self.is_atom() {
            return ["content", "summary"]
                .iter()
                .filter_map(|name| self.own_child(name))
                .map(|child| self.atom_text_construct(child))
                .find(|text| !text.trim().is_empty());
        }

        self.tree
            .children(self.node)
            .find(|&child| self.tree.element(child).matches(&CONTENT_ENCODED))
            .map(|child| self.tree.text_content(child))
            .filter(|text| !text.trim().is_empty())
            .or_else(|| {
                self.own_child("description")
                    .map(|child| self.tree.text_content(child))
            })
    }

    fn link(&self) -> Option<String> {
        if self.is_atom() {
            // Only an alternate link points at the article page
            let alternate = self
                .atom_links()
                .find(|link| matches!(link.attribute("rel"), None | Some("alternate")))?;
            return alternate
                .attribute("href")
                .filter(|href| !href.is_empty())
                .map(str::to_string);
        }

        self.own_child_text("link")
    }
}
