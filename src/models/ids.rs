// src/models/ids.rs

//! Identifier newtypes.
//!
//! The remote store hands out plain strings for both documents and content
//! units. Wrapping them keeps the two from being mixed up at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a document (a Notion page).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The unit under which the document's top-level units are listed.
    ///
    /// Notion exposes a page's own children through the block-children
    /// endpoint using the page ID, so the conversion is explicit here.
    pub fn as_unit_id(&self) -> UnitId {
        UnitId(self.0.clone())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a content unit (a Notion block).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
