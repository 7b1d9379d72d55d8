use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::document::tag::Tag;
use crate::errors::{FeedError, FeedResult};

pub type NodeId = usize;

#[derive(Debug, Clone)]
enum Child {
    Element(NodeId),
    Text(String),
}

/// One element of the parsed document
#[derive(Debug, Clone)]
pub struct Element {
    namespace: Option<String>,
    qualified_name: String,
    local_name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Child>,
}

impl Element {
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Attribute by its qualified name (`url`, `xmlns:media`, ...)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        if self.local_name != tag.local_name() {
            return false;
        }
        match tag.namespace() {
            Some(namespace) => self.namespace.as_deref() == Some(namespace),
            None => self.namespace.is_none() && self.qualified_name == self.local_name,
        }
    }
}

/// Arena-backed XML element tree with resolved namespaces
#[derive(Debug, Clone)]
pub struct XmlTree {
    elements: Vec<Element>,
    root: NodeId,
}

impl XmlTree {
    /// Parse raw document bytes. The character encoding comes from the BOM
    /// or the XML declaration, defaulting to UTF-8.
    pub fn parse(input: &[u8]) -> FeedResult<Self> {
        let mut reader = NsReader::from_reader(input);

        let mut elements: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root = None;

        loop {
            let (resolved, event) = reader
                .read_resolved_event()
                .map_err(|e| FeedError::XmlParse(e.to_string()))?;
            let namespace_uri = match resolved {
                ResolveResult::Bound(Namespace(uri)) => Some(uri.to_vec()),
                _ => None,
            };
            // The declaration may switch the encoding, so read it per event
            let decoder = reader.decoder();
            let namespace = namespace_uri.map(|uri| decode_lossy(decoder, &uri));

            match event {
                Event::Start(e) => {
                    let id = Self::push_element(&mut elements, &stack, namespace, &e, decoder);
                    root.get_or_insert(id);
                    stack.push(id);
                }
                Event::Empty(e) => {
                    let id = Self::push_element(&mut elements, &stack, namespace, &e, decoder);
                    root.get_or_insert(id);
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(e) => {
                    if let Some(&parent) = stack.last() {
                        let text = match e.unescape() {
                            Ok(text) => text.into_owned(),
                            Err(err) => {
                                tracing::warn!(error = %err, "Keeping undecodable text as-is");
                                decode_lossy(decoder, &e)
                            }
                        };
                        elements[parent].children.push(Child::Text(text));
                    }
                }
                Event::CData(e) => {
                    if let Some(&parent) = stack.last() {
                        elements[parent]
                            .children
                            .push(Child::Text(decode_lossy(decoder, &e)));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(FeedError::XmlParse(
                "unexpected end of document inside an open element".to_string(),
            ));
        }

        let root = root.ok_or_else(|| {
            FeedError::XmlParse("document has no root element".to_string())
        })?;

        Ok(Self { elements, root })
    }

    fn push_element(
        elements: &mut Vec<Element>,
        stack: &[NodeId],
        namespace: Option<String>,
        start: &BytesStart<'_>,
        decoder: Decoder,
    ) -> NodeId {
        let mut attributes = Vec::new();
        for attr_result in start.attributes() {
            let attr = match attr_result {
                Ok(attr) => attr,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed attribute");
                    continue;
                }
            };
            let key = decode_lossy(decoder, attr.key.as_ref());
            let value = match attr.decode_and_unescape_value(decoder) {
                Ok(value) => value.into_owned(),
                Err(_) => decode_lossy(decoder, &attr.value),
            };
            attributes.push((key, value));
        }

        let id = elements.len();
        elements.push(Element {
            namespace,
            qualified_name: decode_lossy(decoder, start.name().as_ref()),
            local_name: decode_lossy(decoder, start.local_name().as_ref()),
            attributes,
            children: Vec::new(),
        });

        if let Some(&parent) = stack.last() {
            elements[parent].children.push(Child::Element(id));
        }

        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.elements[id]
    }

    /// Direct element children, in document order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.elements[id].children.iter().filter_map(|child| match child {
            Child::Element(child_id) => Some(*child_id),
            Child::Text(_) => None,
        })
    }

    /// All descendant elements of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self.children(id).collect();
        pending.reverse();

        while let Some(next) = pending.pop() {
            found.push(next);
            let before = pending.len();
            pending.extend(self.children(next));
            pending[before..].reverse();
        }

        found
    }

    pub fn find_descendants(&self, id: NodeId, tag: &Tag) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&node| self.elements[node].matches(tag))
            .collect()
    }

    /// Concatenated text of every descendant text and CDATA node
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut pending: Vec<&Child> = self.elements[id].children.iter().rev().collect();

        while let Some(child) = pending.pop() {
            match child {
                Child::Text(fragment) => text.push_str(fragment),
                Child::Element(child_id) => {
                    pending.extend(self.elements[*child_id].children.iter().rev())
                }
            }
        }

        text
    }

    /// Markup of the element's children, re-serialized
    pub fn inner_xml(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut pending: Vec<Markup<'_>> = self.elements[id]
            .children
            .iter()
            .rev()
            .map(Markup::Child)
            .collect();

        while let Some(step) = pending.pop() {
            match step {
                Markup::Close(name) => {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                Markup::Child(Child::Text(text)) => out.push_str(&escape(text, false)),
                Markup::Child(Child::Element(child_id)) => {
                    let element = &self.elements[*child_id];
                    out.push('<');
                    out.push_str(&element.qualified_name);
                    for (key, value) in &element.attributes {
                        out.push(' ');
                        out.push_str(key);
                        out.push_str("=\"");
                        out.push_str(&escape(value, true));
                        out.push('"');
                    }
                    if element.children.is_empty() {
                        out.push_str("/>");
                        continue;
                    }
                    out.push('>');
                    pending.push(Markup::Close(&element.qualified_name));
                    pending.extend(element.children.iter().rev().map(Markup::Child));
                }
            }
        }

        out
    }
}

/// Pending serialization work for [`XmlTree::inner_xml`]
enum Markup<'a> {
    Child(&'a Child),
    Close(&'a str),
}

fn decode_lossy(decoder: Decoder, bytes: &[u8]) -> String {
    match decoder.decode(bytes) {
        Ok(text) => text.into_owned(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
