use std::borrow::Cow;
use std::fmt;

/// A namespace-qualified element name.
///
/// A tag without a namespace only matches elements that are in no namespace
/// and carry no prefix, the same way an unprefixed XPath name test does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    namespace: Option<Cow<'static, str>>,
    local_name: Cow<'static, str>,
}

impl Tag {
    pub const fn plain(local_name: &'static str) -> Self {
        Self {
            namespace: None,
            local_name: Cow::Borrowed(local_name),
        }
    }

    pub const fn namespaced(namespace: &'static str, local_name: &'static str) -> Self {
        Self {
            namespace: Some(Cow::Borrowed(namespace)),
            local_name: Cow::Borrowed(local_name),
        }
    }

    pub fn owned(namespace: Option<String>, local_name: String) -> Self {
        Self {
            namespace: namespace.map(Cow::Owned),
            local_name: Cow::Owned(local_name),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}
