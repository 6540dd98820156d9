//! Global cross-reference index for schema documentation pages.
//!
//! [`build_link_index`] maps every addressable schema element to the relative
//! URL of its documentation, including in-page anchors for fields, oneofs,
//! enum values, and methods. [`LinkIndexCache`] adds the single-slot
//! memoization a page-serving host needs when it re-renders against an
//! unchanged node collection.
//!
//! # URL contract
//!
//! - top-level element: `/<full name with the leading separator stripped>`
//! - field: `<owner url>#field:<name>`
//! - oneof: `<owner url>#oneof:<name>`
//! - enum value: `<owner url>#value:<name>`
//! - method: `<owner url>#method:<name>`

use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Serialize;

use protodoc_core::node::{EnumNode, MessageNode, SchemaNode, ServiceNode};

/// Mapping from fully-qualified element name (leading separator stripped) to
/// the relative URL of its documentation.
///
/// Iteration order is registration order. Registering a key twice keeps the
/// last URL written; collisions do not occur for well-formed schema trees,
/// and last-write-wins is the resolution policy when they do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkIndex {
    entries: IndexMap<String, String>,
}

impl LinkIndex {
    /// Resolves a fully-qualified element name (no leading separator) to the
    /// URL of its documentation.
    pub fn url_for(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, url)` entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, url)| (key.as_str(), url.as_str()))
    }

    // Last write wins.
    fn register(&mut self, key: impl Into<String>, url: String) {
        self.entries.insert(key.into(), url);
    }
}

/// Builds the link index for a flattened node collection.
///
/// A pure fold over the nodes: no side effects, no mutation of the input.
/// Every element reachable from any node in the input resolves to exactly one
/// URL in the result. Never fails; a name without the leading separator is
/// indexed under its raw spelling.
pub fn build_link_index<'a>(nodes: impl IntoIterator<Item = &'a SchemaNode>) -> LinkIndex {
    let index = nodes.into_iter().fold(LinkIndex::default(), |mut index, node| {
        let key = node.full_name().stripped();
        let base = format!("/{key}");
        index.register(key, base.clone());
        match node {
            SchemaNode::Message(message) => register_message(&mut index, message, &base),
            SchemaNode::Enum(en) => register_enum(&mut index, en, &base),
            SchemaNode::Service(service) => register_service(&mut index, service, &base),
            // Only the base registration for everything else.
            SchemaNode::Namespace(_)
            | SchemaNode::Field(_)
            | SchemaNode::OneOf(_)
            | SchemaNode::Method(_) => {}
        }
        index
    });
    debug!(entries = index.len(); "Link index built");
    index
}

fn register_message(index: &mut LinkIndex, message: &MessageNode, base: &str) {
    for field in &message.fields {
        index.register(
            field.full_name.stripped(),
            format!("{base}#field:{}", field.name),
        );
    }
    for oneof in &message.oneofs {
        index.register(
            oneof.full_name.stripped(),
            format!("{base}#oneof:{}", oneof.name),
        );
    }
}

fn register_enum(index: &mut LinkIndex, en: &EnumNode, base: &str) {
    for name in en.values_by_id.values() {
        index.register(
            format!("{}.{name}", en.full_name.stripped()),
            format!("{base}#value:{name}"),
        );
    }
}

fn register_service(index: &mut LinkIndex, service: &ServiceNode, base: &str) {
    for method in &service.methods {
        index.register(
            method.full_name.stripped(),
            format!("{base}#method:{}", method.name),
        );
    }
}

/// Single-slot memoization for [`build_link_index`].
///
/// Owned by whichever component holds the node collection's lifetime. The
/// slot is keyed by the identity of the `Arc` holding the collection: a
/// repeated call with the same allocation returns the previously computed
/// index, a call with a different allocation recomputes, even when the two
/// collections are structurally equal.
#[derive(Debug, Default)]
pub struct LinkIndexCache {
    slot: Option<(Arc<[SchemaNode]>, Arc<LinkIndex>)>,
}

impl LinkIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `nodes`, rebuilding only when the collection's
    /// identity differs from the previous call.
    pub fn get_or_build(&mut self, nodes: &Arc<[SchemaNode]>) -> Arc<LinkIndex> {
        if let Some((held, index)) = &self.slot {
            if Arc::ptr_eq(held, nodes) {
                trace!("Link index cache hit");
                return Arc::clone(index);
            }
        }
        debug!(nodes = nodes.len(); "Node collection changed, rebuilding link index");
        let index = Arc::new(build_link_index(nodes.iter()));
        self.slot = Some((Arc::clone(nodes), Arc::clone(&index)));
        index
    }
}
