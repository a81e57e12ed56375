// src/source/mod.rs

//! Access to the remote content store.
//!
//! The crawl engine needs exactly two paginated capabilities from the store:
//!
//! - list documents, most recently edited first
//! - list the direct children of a content unit
//!
//! [`ContentSource`] captures those; [`NotionClient`] implements them over
//! HTTP. Transport concerns (auth, headers, status mapping) stay behind the
//! trait.

pub mod notion;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{RawDocument, RawUnit, UnitId};

pub use notion::NotionClient;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing<T> {
    #[serde(rename = "results")]
    pub records: Vec<T>,

    #[serde(default)]
    pub next_cursor: Option<String>,

    #[serde(default)]
    pub has_more: bool,
}

impl<T> Listing<T> {
    /// Cursor for the following page, if the source says there is one.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// A search hit. Searches may mix object kinds; only pages are documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "snake_case")]
pub enum SearchRecord {
    Page(RawDocument),
    Database { id: String },
    #[serde(other)]
    Other,
}

/// Paginated read access to the remote content store.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// One page of documents sorted by edit time, newest first.
    async fn list_recent_documents(&self, cursor: Option<&str>) -> Result<Listing<SearchRecord>>;

    /// One page of the direct children of `parent`, in the store's stable order.
    async fn list_children(&self, parent: &UnitId, cursor: Option<&str>)
    -> Result<Listing<RawUnit>>;
}
