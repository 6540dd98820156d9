//! Protodoc - documentation structure and cross-linking for schema trees.
//!
//! Link-index construction and node-to-document-structure mapping for
//! browsable schema documentation. Given the flattened collection of schema
//! nodes known to an application, the crate computes a stable URL for every
//! addressable element and, for any single node, the ordered list of sections
//! its documentation page contains.

pub mod document;
pub mod format;
pub mod link_index;
pub mod overview;

pub use protodoc_core::{name, node};

pub use document::{
    Document, DocumentKind, DocumentSection, SectionAnchor, render_document, render_document_with,
};
pub use format::{ProtoFormatter, SignatureFormatter};
pub use link_index::{LinkIndex, LinkIndexCache, build_link_index};
pub use overview::{ChildSummary, Overview};

use std::sync::Arc;

use log::{debug, info};

use node::SchemaNode;

/// Builder for rendering schema documentation pages.
///
/// Owns the single-slot link index cache, so a host that keeps one
/// `PageBuilder` alive per node collection pays for index construction once
/// and reuses it for every page rendered against the same collection.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use protodoc::PageBuilder;
/// use protodoc::name::FullName;
/// use protodoc::node::{FieldNode, MessageNode, SchemaNode};
///
/// let order = FullName::new(".Order");
/// let message = MessageNode::new(order.clone())
///     .with_field(FieldNode::new(&order, "id", "string", 1));
/// let all: Arc<[SchemaNode]> = Arc::from(vec![SchemaNode::Message(message.clone())]);
///
/// let mut builder = PageBuilder::new();
/// let document = builder.render(&SchemaNode::Message(message), &all);
/// assert_eq!(document.kind.as_str(), "message");
/// assert_eq!(document.sections.len(), 1);
/// ```
pub struct PageBuilder {
    cache: LinkIndexCache,
    formatter: Box<dyn SignatureFormatter>,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    /// Creates a page builder with protobuf-style signature formatting.
    pub fn new() -> Self {
        Self {
            cache: LinkIndexCache::new(),
            formatter: Box::new(ProtoFormatter),
        }
    }

    /// Creates a page builder with a custom [`SignatureFormatter`].
    pub fn with_formatter(formatter: impl SignatureFormatter + 'static) -> Self {
        Self {
            cache: LinkIndexCache::new(),
            formatter: Box::new(formatter),
        }
    }

    /// The link index for `all`, rebuilt only when the collection's identity
    /// changes between calls.
    ///
    /// The host's comment renderer uses this to turn cross-reference mentions
    /// in comment text into hyperlinks.
    pub fn link_index(&mut self, all: &Arc<[SchemaNode]>) -> Arc<LinkIndex> {
        self.cache.get_or_build(all)
    }

    /// Renders the documentation page structure for `node` against the full
    /// node collection `all`.
    pub fn render(&mut self, node: &SchemaNode, all: &Arc<[SchemaNode]>) -> Document {
        info!(node = node.full_name().as_str(); "Rendering documentation page");
        let index = self.cache.get_or_build(all);
        let document = render_document_with(node, &index, self.formatter.as_ref());
        debug!(kind = document.kind.as_str(), sections = document.sections.len(); "Page structure ready");
        document
    }
}
