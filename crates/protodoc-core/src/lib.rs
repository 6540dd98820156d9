//! Protodoc Core Types and Definitions
//!
//! This crate provides the foundational types for the protodoc documentation
//! pipeline. It includes:
//!
//! - **Names**: fully-qualified schema element names ([`name::FullName`])
//! - **Nodes**: the schema definition tree ([`node`] module), a tagged union
//!   over namespaces, message types, enums, services, fields, oneof groups,
//!   and methods
//!
//! Schema nodes are produced by an external schema loader and are read-only
//! to the documentation pipeline in the `protodoc` crate.

pub mod name;
pub mod node;
