//! Fully-qualified schema element names.
//!
//! A [`FullName`] is the dot-separated path identifying a schema element
//! uniquely within the whole definition tree, including a leading `.`
//! separator before the root (e.g. `.acme.orders.Order`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an invalid fully-qualified name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidNameError {
    #[error("fully-qualified name is empty")]
    Empty,
}

/// A fully-qualified schema element name.
///
/// The canonical form carries a leading `.` separator. Names without the
/// leading separator are tolerated everywhere: [`FullName::stripped`] returns
/// such a name unchanged instead of failing, so a malformed name degrades to
/// its raw spelling in URLs and index keys.
///
/// # Examples
///
/// ```
/// use protodoc_core::name::FullName;
///
/// let order = FullName::new(".acme.orders.Order");
/// assert_eq!(order.stripped(), "acme.orders.Order");
/// assert_eq!(order.simple(), "Order");
///
/// let field = order.child("id");
/// assert_eq!(field.stripped(), "acme.orders.Order.id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    /// Creates a `FullName` from a raw name.
    ///
    /// Accepts any string; validation happens only through [`FromStr`].
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw name, leading separator included when present.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name with the leading separator removed.
    ///
    /// A name without a leading separator is returned unchanged.
    pub fn stripped(&self) -> &str {
        self.0.strip_prefix('.').unwrap_or(&self.0)
    }

    /// The last path segment.
    pub fn simple(&self) -> &str {
        self.stripped().rsplit('.').next().unwrap_or("")
    }

    /// Appends a segment, producing the name of a nested element.
    ///
    /// # Examples
    ///
    /// ```
    /// use protodoc_core::name::FullName;
    ///
    /// let status = FullName::new(".Status");
    /// assert_eq!(status.child("ACTIVE").as_str(), ".Status.ACTIVE");
    /// ```
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}.{}", self.0, segment))
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FullName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidNameError::Empty);
        }
        Ok(Self::new(s))
    }
}

impl From<&str> for FullName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripped_removes_leading_separator() {
        let name = FullName::new(".acme.orders.Order");
        assert_eq!(name.stripped(), "acme.orders.Order");
    }

    #[test]
    fn test_stripped_degrades_on_malformed_name() {
        // No leading separator: the raw name is used unmodified.
        let name = FullName::new("acme.Order");
        assert_eq!(name.stripped(), "acme.Order");
    }

    #[test]
    fn test_stripped_on_empty_name() {
        let name = FullName::new("");
        assert_eq!(name.stripped(), "");
    }

    #[test]
    fn test_simple_is_last_segment() {
        assert_eq!(FullName::new(".acme.orders.Order").simple(), "Order");
        assert_eq!(FullName::new(".Order").simple(), "Order");
        assert_eq!(FullName::new("Order").simple(), "Order");
    }

    #[test]
    fn test_child_appends_segment() {
        let order = FullName::new(".Order");
        let field = order.child("id");
        assert_eq!(field.as_str(), ".Order.id");
        assert_eq!(field.stripped(), "Order.id");
        assert_eq!(field.simple(), "id");
    }

    #[test]
    fn test_from_str_rejects_empty() {
        let result: Result<FullName, _> = "".parse();
        assert_eq!(result, Err(InvalidNameError::Empty));

        let result: Result<FullName, _> = ".Order".parse();
        assert_eq!(result, Ok(FullName::new(".Order")));
    }

    #[test]
    fn test_display_keeps_raw_form() {
        let name = FullName::new(".acme.Order");
        assert_eq!(name.to_string(), ".acme.Order");
    }
}
