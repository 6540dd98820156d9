//! Mapping from a schema node to its documentation page structure.
//!
//! [`render_document`] classifies a node into a [`DocumentKind`] and produces
//! the ordered list of [`DocumentSection`]s its page contains: one per field,
//! oneof, enum value, or method. The output is pure data; a page-serving host
//! turns it into markup and hands each section's comment text to its own
//! comment renderer together with the link index.

use std::fmt;

use log::trace;
use serde::Serialize;

use protodoc_core::node::{EnumNode, FieldNode, MessageNode, MethodNode, OneOfNode, SchemaNode, ServiceNode};

use crate::format::{ProtoFormatter, SignatureFormatter};
use crate::link_index::LinkIndex;
use crate::overview::Overview;

/// The page-level classification of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Message,
    Enum,
    Service,
    Package,
    /// Fallback for nodes that have no page of their own (fields, oneofs,
    /// methods). The host decides whether to show a not-found state.
    Unknown,
}

impl DocumentKind {
    /// Classifies a node without building its sections.
    pub fn of(node: &SchemaNode) -> Self {
        match node {
            SchemaNode::Message(_) => DocumentKind::Message,
            SchemaNode::Enum(_) => DocumentKind::Enum,
            SchemaNode::Service(_) => DocumentKind::Service,
            SchemaNode::Namespace(_) => DocumentKind::Package,
            SchemaNode::Field(_) | SchemaNode::OneOf(_) | SchemaNode::Method(_) => {
                DocumentKind::Unknown
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Message => "message",
            DocumentKind::Enum => "enum",
            DocumentKind::Service => "service",
            DocumentKind::Package => "package",
            DocumentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// In-page anchor for a document section.
///
/// Renders as `field:<name>`, `oneof:<name>`, `value:<name>`, or
/// `method:<name>`, matching the fragment the link index appends to the
/// owning node's base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum SectionAnchor {
    Field(String),
    OneOf(String),
    Value(String),
    Method(String),
}

impl fmt::Display for SectionAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionAnchor::Field(name) => write!(f, "field:{name}"),
            SectionAnchor::OneOf(name) => write!(f, "oneof:{name}"),
            SectionAnchor::Value(name) => write!(f, "value:{name}"),
            SectionAnchor::Method(name) => write!(f, "method:{name}"),
        }
    }
}

impl From<SectionAnchor> for String {
    fn from(anchor: SectionAnchor) -> Self {
        anchor.to_string()
    }
}

/// One anchorable block of a documentation page, corresponding to exactly one
/// sub-element of the documented node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSection {
    pub anchor: SectionAnchor,
    pub heading: String,
    /// Comment text attached to the sub-element. Absent means no comment
    /// block at all; it is never coerced to an empty string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Names of the fields a oneof groups; empty for every other section.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected_fields: Vec<String>,
    /// Absolute URL of this section, when the link index knows the element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The complete structure of one documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub kind: DocumentKind,
    /// Display form of the node's fully-qualified name.
    pub name: String,
    pub sections: Vec<DocumentSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub overview: Overview,
}

/// Maps a node to its documentation page structure using the default
/// protobuf-style signature formatting.
///
/// Deterministic: the same node and index always produce the same document.
pub fn render_document(node: &SchemaNode, index: &LinkIndex) -> Document {
    render_document_with(node, index, &ProtoFormatter)
}

/// Maps a node to its documentation page structure with a custom
/// [`SignatureFormatter`].
///
/// Section ordering: for a message, all oneof sections precede all field
/// sections, each group in declaration order; enum value and method sections
/// follow the iteration order of their source collection.
pub fn render_document_with(
    node: &SchemaNode,
    index: &LinkIndex,
    formatter: &dyn SignatureFormatter,
) -> Document {
    let kind = DocumentKind::of(node);
    let sections = match node {
        SchemaNode::Message(message) => message_sections(message, index, formatter),
        SchemaNode::Enum(en) => enum_sections(en, index, formatter),
        SchemaNode::Service(service) => service_sections(service, index, formatter),
        SchemaNode::Namespace(_)
        | SchemaNode::Field(_)
        | SchemaNode::OneOf(_)
        | SchemaNode::Method(_) => Vec::new(),
    };
    trace!(kind = kind.as_str(), sections = sections.len(); "Document structure mapped");

    Document {
        kind,
        name: formatter.full_name(node.full_name()),
        sections,
        filename: node.filename().map(str::to_string),
        comment: node.comment().map(str::to_string),
        overview: Overview::for_node(node),
    }
}

fn message_sections(
    message: &MessageNode,
    index: &LinkIndex,
    formatter: &dyn SignatureFormatter,
) -> Vec<DocumentSection> {
    let oneofs = message
        .oneofs
        .iter()
        .map(|oneof| oneof_section(oneof, index, formatter));
    let fields = message
        .fields
        .iter()
        .map(|field| field_section(field, index, formatter));
    oneofs.chain(fields).collect()
}

fn field_section(
    field: &FieldNode,
    index: &LinkIndex,
    formatter: &dyn SignatureFormatter,
) -> DocumentSection {
    DocumentSection {
        anchor: SectionAnchor::Field(field.name.clone()),
        heading: formatter.field(field),
        comment: field.comment.clone(),
        affected_fields: Vec::new(),
        url: index.url_for(field.full_name.stripped()).map(str::to_string),
    }
}

fn oneof_section(
    oneof: &OneOfNode,
    index: &LinkIndex,
    formatter: &dyn SignatureFormatter,
) -> DocumentSection {
    DocumentSection {
        anchor: SectionAnchor::OneOf(oneof.name.clone()),
        heading: formatter.oneof(oneof),
        comment: oneof.comment.clone(),
        affected_fields: oneof.fields.clone(),
        url: index.url_for(oneof.full_name.stripped()).map(str::to_string),
    }
}

fn enum_sections(
    en: &EnumNode,
    index: &LinkIndex,
    formatter: &dyn SignatureFormatter,
) -> Vec<DocumentSection> {
    en.values_by_id
        .iter()
        .map(|(id, name)| DocumentSection {
            anchor: SectionAnchor::Value(name.clone()),
            heading: formatter.enum_value(name, id),
            comment: en.value_comments.get(name).cloned(),
            affected_fields: Vec::new(),
            url: index
                .url_for(&format!("{}.{name}", en.full_name.stripped()))
                .map(str::to_string),
        })
        .collect()
}

fn service_sections(
    service: &ServiceNode,
    index: &LinkIndex,
    formatter: &dyn SignatureFormatter,
) -> Vec<DocumentSection> {
    service
        .methods
        .iter()
        .map(|method| method_section(method, index, formatter))
        .collect()
}

fn method_section(
    method: &MethodNode,
    index: &LinkIndex,
    formatter: &dyn SignatureFormatter,
) -> DocumentSection {
    DocumentSection {
        anchor: SectionAnchor::Method(method.name.clone()),
        heading: formatter.method(method),
        comment: method.comment.clone(),
        affected_fields: Vec::new(),
        url: index.url_for(method.full_name.stripped()).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use protodoc_core::name::FullName;
    use protodoc_core::node::{Cardinality, NamespaceNode};

    use crate::link_index::build_link_index;

    use super::*;

    fn order_node() -> SchemaNode {
        let order = FullName::new(".Order");
        SchemaNode::Message(
            MessageNode::new(order.clone())
                .with_field(FieldNode::new(&order, "id", "string", 1))
                .with_field(
                    FieldNode::new(&order, "items", "LineItem", 2)
                        .with_cardinality(Cardinality::Repeated)
                        .with_comment("list of line items"),
                )
                .with_oneof(
                    OneOfNode::new(&order, "shipping_method").with_fields(["pickup", "delivery"]),
                ),
        )
    }

    #[test]
    fn test_message_sections_oneofs_precede_fields() {
        let node = order_node();
        let index = build_link_index(std::iter::once(&node));
        let document = render_document(&node, &index);

        assert_eq!(document.kind, DocumentKind::Message);
        assert_eq!(document.name, "Order");
        let anchors: Vec<String> = document
            .sections
            .iter()
            .map(|section| section.anchor.to_string())
            .collect();
        assert_eq!(anchors, vec!["oneof:shipping_method", "field:id", "field:items"]);
    }

    #[test]
    fn test_field_section_content() {
        let node = order_node();
        let index = build_link_index(std::iter::once(&node));
        let document = render_document(&node, &index);

        let id = &document.sections[1];
        assert_eq!(id.heading, "string id = 1");
        // No comment on the schema element means no comment block, not "".
        assert_eq!(id.comment, None);
        assert_eq!(id.url.as_deref(), Some("/Order#field:id"));

        let items = &document.sections[2];
        assert_eq!(items.heading, "repeated LineItem items = 2");
        assert_eq!(items.comment.as_deref(), Some("list of line items"));
        assert_eq!(items.url.as_deref(), Some("/Order#field:items"));
    }

    #[test]
    fn test_oneof_section_carries_affected_fields() {
        let node = order_node();
        let index = build_link_index(std::iter::once(&node));
        let document = render_document(&node, &index);

        let oneof = &document.sections[0];
        assert_eq!(oneof.anchor, SectionAnchor::OneOf("shipping_method".to_string()));
        assert_eq!(oneof.affected_fields, vec!["pickup", "delivery"]);
        assert_eq!(oneof.url.as_deref(), Some("/Order#oneof:shipping_method"));
    }

    #[test]
    fn test_enum_sections_follow_value_order() {
        let node = SchemaNode::Enum(
            EnumNode::new(FullName::new(".Status"))
                .with_value(0, "UNKNOWN")
                .with_value(1, "ACTIVE")
                .with_value_comment("ACTIVE", "in use"),
        );
        let index = build_link_index(std::iter::once(&node));
        let document = render_document(&node, &index);

        assert_eq!(document.kind, DocumentKind::Enum);
        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].anchor, SectionAnchor::Value("UNKNOWN".to_string()));
        assert_eq!(document.sections[0].heading, "UNKNOWN = 0");
        assert_eq!(document.sections[0].comment, None);
        assert_eq!(document.sections[1].anchor, SectionAnchor::Value("ACTIVE".to_string()));
        assert_eq!(document.sections[1].heading, "ACTIVE = 1");
        assert_eq!(document.sections[1].comment.as_deref(), Some("in use"));
        assert_eq!(document.sections[1].url.as_deref(), Some("/Status#value:ACTIVE"));
    }

    #[test]
    fn test_service_sections_follow_declaration_order() {
        let orders = FullName::new(".acme.Orders");
        let node = SchemaNode::Service(
            ServiceNode::new(orders.clone())
                .with_method(
                    MethodNode::new(&orders, "GetOrder", "GetOrderRequest", "Order")
                        .with_comment("Fetch one order."),
                )
                .with_method(
                    MethodNode::new(&orders, "WatchOrders", "WatchRequest", "Order")
                        .with_server_streaming(),
                ),
        );
        let index = build_link_index(std::iter::once(&node));
        let document = render_document(&node, &index);

        assert_eq!(document.kind, DocumentKind::Service);
        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].anchor, SectionAnchor::Method("GetOrder".to_string()));
        assert_eq!(
            document.sections[0].heading,
            "rpc GetOrder (GetOrderRequest) returns (Order)"
        );
        assert_eq!(document.sections[0].comment.as_deref(), Some("Fetch one order."));
        assert_eq!(
            document.sections[1].heading,
            "rpc WatchOrders (WatchRequest) returns (stream Order)"
        );
        assert_eq!(
            document.sections[1].url.as_deref(),
            Some("/acme.Orders#method:WatchOrders")
        );
    }

    #[test]
    fn test_namespace_renders_package_with_no_sections() {
        let pkg = FullName::new(".acme.orders");
        let with_children = SchemaNode::Namespace(
            NamespaceNode::new(pkg.clone())
                .with_nested(SchemaNode::Message(MessageNode::new(pkg.child("Order")))),
        );
        let without_children = SchemaNode::Namespace(NamespaceNode::new(pkg));

        let index = LinkIndex::default();
        for node in [&with_children, &without_children] {
            let document = render_document(node, &index);
            assert_eq!(document.kind, DocumentKind::Package);
            assert!(document.sections.is_empty());
        }
    }

    #[test]
    fn test_standalone_field_is_unknown_kind() {
        let order = FullName::new(".Order");
        let node = SchemaNode::Field(FieldNode::new(&order, "id", "string", 1));
        let document = render_document(&node, &LinkIndex::default());

        assert_eq!(document.kind, DocumentKind::Unknown);
        assert!(document.sections.is_empty());
        assert_eq!(document.name, "Order.id");
    }

    #[test]
    fn test_render_is_deterministic() {
        let node = order_node();
        let index = build_link_index(std::iter::once(&node));
        assert_eq!(render_document(&node, &index), render_document(&node, &index));
    }

    #[test]
    fn test_document_header_fields() {
        let order = FullName::new(".Order");
        let node = SchemaNode::Message(
            MessageNode::new(order)
                .with_comment("An order placed by a customer.")
                .with_filename("acme/orders.proto"),
        );
        let document = render_document(&node, &LinkIndex::default());

        assert_eq!(document.comment.as_deref(), Some("An order placed by a customer."));
        assert_eq!(document.filename.as_deref(), Some("acme/orders.proto"));
        assert_eq!(document.overview, Overview::Message { fields: 0, oneofs: 0 });
    }

    #[test]
    fn test_section_anchor_serializes_as_string() {
        let anchor = SectionAnchor::Field("id".to_string());
        assert_eq!(serde_json::to_string(&anchor).unwrap(), "\"field:id\"");
    }
}
