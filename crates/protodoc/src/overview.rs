//! Shape summaries for the page header.
//!
//! Every documentation page opens with a short overview of the node's own
//! shape: how many fields a message declares, how many values an enum has,
//! which children a package contains. The overview never inspects anything
//! beyond the node itself.

use serde::Serialize;

use protodoc_core::node::SchemaNode;

use crate::document::DocumentKind;

/// An immediate child of a package, as shown in the package overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildSummary {
    pub name: String,
    pub kind: DocumentKind,
}

/// Summary of a node's own shape, shown in the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overview {
    Message { fields: usize, oneofs: usize },
    Enum { values: usize },
    Service { methods: usize },
    Package { children: Vec<ChildSummary> },
    /// Nodes without a page-level shape (fields, oneofs, methods).
    Empty,
}

impl Overview {
    /// Builds the overview for a node by inspecting its own shape only.
    pub fn for_node(node: &SchemaNode) -> Self {
        match node {
            SchemaNode::Message(message) => Overview::Message {
                fields: message.fields.len(),
                oneofs: message.oneofs.len(),
            },
            SchemaNode::Enum(en) => Overview::Enum {
                values: en.values_by_id.len(),
            },
            SchemaNode::Service(service) => Overview::Service {
                methods: service.methods.len(),
            },
            SchemaNode::Namespace(namespace) => Overview::Package {
                children: namespace
                    .nested
                    .iter()
                    .map(|child| ChildSummary {
                        name: child.name().to_string(),
                        kind: DocumentKind::of(child),
                    })
                    .collect(),
            },
            SchemaNode::Field(_) | SchemaNode::OneOf(_) | SchemaNode::Method(_) => Overview::Empty,
        }
    }
}
