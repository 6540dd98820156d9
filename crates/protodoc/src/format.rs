//! Signature formatting for documentation headings.
//!
//! Section headings show a source-like signature for the element they
//! document. The [`SignatureFormatter`] trait is the seam between the
//! document structure mapper and the presentation layer; [`ProtoFormatter`]
//! is the default, producing protobuf-style signatures.

use protodoc_core::name::FullName;
use protodoc_core::node::{FieldNode, MethodNode, OneOfNode};

/// Formats the headings shown for documentation sections.
///
/// Hosts embedding the core can substitute their own presentation by passing
/// an implementation to
/// [`render_document_with`](crate::document::render_document_with).
pub trait SignatureFormatter {
    /// Heading for a field section.
    fn field(&self, field: &FieldNode) -> String;

    /// Heading for a oneof section.
    fn oneof(&self, oneof: &OneOfNode) -> String;

    /// Heading for an enum value section. `id` is the numeric id as the
    /// schema tree spells it.
    fn enum_value(&self, name: &str, id: &str) -> String;

    /// Heading for a method section.
    fn method(&self, method: &MethodNode) -> String;

    /// Display form of a fully-qualified name for the page header.
    fn full_name(&self, name: &FullName) -> String;
}

/// Protobuf-style signature formatting.
///
/// # Examples
///
/// ```
/// use protodoc::format::{ProtoFormatter, SignatureFormatter};
/// use protodoc_core::name::FullName;
/// use protodoc_core::node::{Cardinality, FieldNode};
///
/// let order = FullName::new(".Order");
/// let items = FieldNode::new(&order, "items", "LineItem", 2)
///     .with_cardinality(Cardinality::Repeated);
///
/// let formatter = ProtoFormatter;
/// assert_eq!(formatter.field(&items), "repeated LineItem items = 2");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoFormatter;

impl SignatureFormatter for ProtoFormatter {
    fn field(&self, field: &FieldNode) -> String {
        match field.cardinality.keyword() {
            Some(keyword) => format!(
                "{keyword} {} {} = {}",
                field.type_name, field.name, field.id
            ),
            None => format!("{} {} = {}", field.type_name, field.name, field.id),
        }
    }

    fn oneof(&self, oneof: &OneOfNode) -> String {
        format!("oneof {} {{\u{2026}}}", oneof.name)
    }

    fn enum_value(&self, name: &str, id: &str) -> String {
        format!("{name} = {id}")
    }

    fn method(&self, method: &MethodNode) -> String {
        let request = streamed(&method.request_type, method.client_streaming);
        let response = streamed(&method.response_type, method.server_streaming);
        format!("rpc {} ({request}) returns ({response})", method.name)
    }

    fn full_name(&self, name: &FullName) -> String {
        name.stripped().to_string()
    }
}

fn streamed(type_name: &str, streaming: bool) -> String {
    if streaming {
        format!("stream {type_name}")
    } else {
        type_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use protodoc_core::node::Cardinality;

    use super::*;

    #[test]
    fn test_field_signature_without_keyword() {
        let order = FullName::new(".Order");
        let field = FieldNode::new(&order, "id", "string", 1);
        assert_eq!(ProtoFormatter.field(&field), "string id = 1");
    }

    #[test]
    fn test_field_signature_with_cardinality_keyword() {
        let order = FullName::new(".Order");
        let field = FieldNode::new(&order, "tags", "string", 7)
            .with_cardinality(Cardinality::Repeated);
        assert_eq!(ProtoFormatter.field(&field), "repeated string tags = 7");

        let field = FieldNode::new(&order, "note", "string", 8)
            .with_cardinality(Cardinality::Optional);
        assert_eq!(ProtoFormatter.field(&field), "optional string note = 8");
    }

    #[test]
    fn test_oneof_heading_elides_body() {
        let order = FullName::new(".Order");
        let oneof = OneOfNode::new(&order, "shipping_method");
        assert_eq!(ProtoFormatter.oneof(&oneof), "oneof shipping_method {\u{2026}}");
    }

    #[test]
    fn test_enum_value_signature() {
        assert_eq!(ProtoFormatter.enum_value("ACTIVE", "1"), "ACTIVE = 1");
    }

    #[test]
    fn test_method_signature() {
        let service = FullName::new(".acme.Orders");
        let unary = MethodNode::new(&service, "GetOrder", "GetOrderRequest", "Order");
        assert_eq!(
            ProtoFormatter.method(&unary),
            "rpc GetOrder (GetOrderRequest) returns (Order)"
        );

        let streaming = MethodNode::new(&service, "WatchOrders", "WatchRequest", "Order")
            .with_server_streaming();
        assert_eq!(
            ProtoFormatter.method(&streaming),
            "rpc WatchOrders (WatchRequest) returns (stream Order)"
        );
    }

    #[test]
    fn test_full_name_display_strips_separator() {
        assert_eq!(
            ProtoFormatter.full_name(&FullName::new(".acme.Order")),
            "acme.Order"
        );
        // Malformed names pass through unchanged.
        assert_eq!(ProtoFormatter.full_name(&FullName::new("acme.Order")), "acme.Order");
    }
}
