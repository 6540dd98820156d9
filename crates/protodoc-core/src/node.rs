//! The schema definition tree.
//!
//! [`SchemaNode`] is a tagged union over every kind of element the
//! documentation core can address: namespaces, message types, enums,
//! services, fields, oneof groups, and methods. Both the link index builder
//! and the document structure mapper match on it exhaustively, so adding a
//! variant forces every consumer to decide how to handle it.
//!
//! Nodes are owned by an external schema-loading collaborator; this crate
//! never mutates them. All types derive serde so a host application can hand
//! the tree across a process boundary as JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::name::FullName;

/// How many times a field may occur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Plain singular field with no cardinality keyword.
    #[default]
    Singular,
    Optional,
    Required,
    Repeated,
}

impl Cardinality {
    /// The source-level keyword, if the cardinality is spelled out.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Cardinality::Singular => None,
            Cardinality::Optional => Some("optional"),
            Cardinality::Required => Some("required"),
            Cardinality::Repeated => Some("repeated"),
        }
    }
}

/// A single field of a message type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    pub full_name: FullName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Name of the field's value type, as written in the schema source.
    pub type_name: String,
    /// Numeric field id (tag number).
    pub id: u32,
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl FieldNode {
    /// Creates a field nested under `parent`.
    pub fn new(
        parent: &FullName,
        name: impl Into<String>,
        type_name: impl Into<String>,
        id: u32,
    ) -> Self {
        let name = name.into();
        Self {
            full_name: parent.child(&name),
            name,
            comment: None,
            type_name: type_name.into(),
            id,
            cardinality: Cardinality::default(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }
}

/// A oneof group: a set of mutually exclusive fields of a message type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOfNode {
    pub name: String,
    pub full_name: FullName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Names of the fields this group covers, in declaration order.
    pub fields: Vec<String>,
}

impl OneOfNode {
    /// Creates a oneof group nested under `parent`.
    pub fn new(parent: &FullName, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            full_name: parent.child(&name),
            name,
            comment: None,
            fields: Vec::new(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A single method of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub name: String,
    pub full_name: FullName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub request_type: String,
    pub response_type: String,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

impl MethodNode {
    /// Creates a method nested under `parent`.
    pub fn new(
        parent: &FullName,
        name: impl Into<String>,
        request_type: impl Into<String>,
        response_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            full_name: parent.child(&name),
            name,
            comment: None,
            request_type: request_type.into(),
            response_type: response_type.into(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_client_streaming(mut self) -> Self {
        self.client_streaming = true;
        self
    }

    pub fn with_server_streaming(mut self) -> Self {
        self.server_streaming = true;
        self
    }
}

/// A message type: an ordered sequence of fields plus its oneof groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageNode {
    pub full_name: FullName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldNode>,
    #[serde(default)]
    pub oneofs: Vec<OneOfNode>,
}

impl MessageNode {
    pub fn new(full_name: FullName) -> Self {
        Self {
            full_name,
            comment: None,
            filename: None,
            fields: Vec::new(),
            oneofs: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldNode) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_oneof(mut self, oneof: OneOfNode) -> Self {
        self.oneofs.push(oneof);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// An enum type.
///
/// `values_by_id` maps the numeric id, as a string key, to the value name;
/// iteration order is insertion order, which mirrors declaration order when
/// the tree comes from a schema loader. Comments for individual values live
/// in `value_comments`, keyed by value name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumNode {
    pub full_name: FullName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub values_by_id: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub value_comments: IndexMap<String, String>,
}

impl EnumNode {
    pub fn new(full_name: FullName) -> Self {
        Self {
            full_name,
            comment: None,
            filename: None,
            values_by_id: IndexMap::new(),
            value_comments: IndexMap::new(),
        }
    }

    pub fn with_value(mut self, id: i32, name: impl Into<String>) -> Self {
        self.values_by_id.insert(id.to_string(), name.into());
        self
    }

    pub fn with_value_comment(
        mut self,
        name: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        self.value_comments.insert(name.into(), comment.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// A service: an ordered sequence of methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceNode {
    pub full_name: FullName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodNode>,
}

impl ServiceNode {
    pub fn new(full_name: FullName) -> Self {
        Self {
            full_name,
            comment: None,
            filename: None,
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodNode) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// A namespace (package), owning its immediate children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceNode {
    pub full_name: FullName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub nested: Vec<SchemaNode>,
}

impl NamespaceNode {
    pub fn new(full_name: FullName) -> Self {
        Self {
            full_name,
            comment: None,
            filename: None,
            nested: Vec::new(),
        }
    }

    pub fn with_nested(mut self, node: SchemaNode) -> Self {
        self.nested.push(node);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// One element of the schema definition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaNode {
    Namespace(NamespaceNode),
    Message(MessageNode),
    Enum(EnumNode),
    Service(ServiceNode),
    Field(FieldNode),
    OneOf(OneOfNode),
    Method(MethodNode),
}

impl SchemaNode {
    /// The element's fully-qualified name.
    pub fn full_name(&self) -> &FullName {
        match self {
            SchemaNode::Namespace(node) => &node.full_name,
            SchemaNode::Message(node) => &node.full_name,
            SchemaNode::Enum(node) => &node.full_name,
            SchemaNode::Service(node) => &node.full_name,
            SchemaNode::Field(node) => &node.full_name,
            SchemaNode::OneOf(node) => &node.full_name,
            SchemaNode::Method(node) => &node.full_name,
        }
    }

    /// The element's simple (unqualified) name.
    pub fn name(&self) -> &str {
        match self {
            SchemaNode::Field(node) => &node.name,
            SchemaNode::OneOf(node) => &node.name,
            SchemaNode::Method(node) => &node.name,
            _ => self.full_name().simple(),
        }
    }

    /// The freeform comment attached to the element, if any.
    pub fn comment(&self) -> Option<&str> {
        match self {
            SchemaNode::Namespace(node) => node.comment.as_deref(),
            SchemaNode::Message(node) => node.comment.as_deref(),
            SchemaNode::Enum(node) => node.comment.as_deref(),
            SchemaNode::Service(node) => node.comment.as_deref(),
            SchemaNode::Field(node) => node.comment.as_deref(),
            SchemaNode::OneOf(node) => node.comment.as_deref(),
            SchemaNode::Method(node) => node.comment.as_deref(),
        }
    }

    /// The source-location hint, if the loader recorded one. Display-only.
    pub fn filename(&self) -> Option<&str> {
        match self {
            SchemaNode::Namespace(node) => node.filename.as_deref(),
            SchemaNode::Message(node) => node.filename.as_deref(),
            SchemaNode::Enum(node) => node.filename.as_deref(),
            SchemaNode::Service(node) => node.filename.as_deref(),
            SchemaNode::Field(_) | SchemaNode::OneOf(_) | SchemaNode::Method(_) => None,
        }
    }

    /// Visits this node and, for namespaces, every transitively nested node,
    /// in declaration order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SchemaNode)) {
        visit(self);
        if let SchemaNode::Namespace(namespace) = self {
            for child in &namespace.nested {
                child.walk(visit);
            }
        }
    }
}

/// Flattens a namespace tree into the node collection consumed by the link
/// index builder.
pub fn flatten(roots: &[SchemaNode]) -> Vec<SchemaNode> {
    let mut nodes = Vec::new();
    for root in roots {
        root.walk(&mut |node| nodes.push(node.clone()));
    }
    nodes
}
