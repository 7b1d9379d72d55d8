pub mod feed;
pub mod tag;
pub mod tree;
pub mod view;

pub use feed::{EntryNode, FeedDocument, FeedType};
pub use tag::Tag;
pub use tree::{Element, NodeId, XmlTree};
pub use view::{query_first_text, EntryView, TagNode};

#[cfg(test)]
pub use view::MockEntryView;
