//! Record descriptors
//!
//! A [`Uri`] names the logical type and origin of a record's payload. The
//! core treats every field as an opaque identifier: no type lookup, no
//! validation of payload contents.

use std::fmt;

/// Descriptor carried alongside every record payload.
///
/// `scheme` identifies the serialization/type namespace (e.g. a generated
/// module path) and `authority` the specific message type within it. The
/// `path` and `query` fields are reserved for extensibility and default to
/// empty. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    /// Serialization/type namespace
    pub scheme: String,

    /// Specific message type within the namespace
    pub authority: String,

    /// Auxiliary path component (empty unless set)
    pub path: String,

    /// Auxiliary query component (empty unless set)
    pub query: String,
}

impl Uri {
    /// Create a descriptor from a scheme and authority
    pub fn new(scheme: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            authority: authority.into(),
            path: String::new(),
            query: String::new(),
        }
    }

    /// Set the auxiliary path component
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the auxiliary query component
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)?;
        if !self.path.is_empty() {
            write!(f, "/{}", self.path)?;
        }
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}
