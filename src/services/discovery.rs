// src/services/discovery.rs

//! Document discovery service.
//!
//! Walks the remote search listing, newest edits first, and stops paging as
//! soon as it meets a document edited before the cutoff.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Document, PageFilter, RawDocument, title_from_url};
use crate::services::fetch_all_children;
use crate::source::{ContentSource, SearchRecord};

/// Service for finding the documents edited since a cutoff.
pub struct DocumentDiscovery<'a> {
    source: &'a dyn ContentSource,
    filter: Option<&'a PageFilter>,
}

impl<'a> DocumentDiscovery<'a> {
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self {
            source,
            filter: None,
        }
    }

    /// Skip documents matched by `filter` before their units are fetched.
    pub fn with_filter(mut self, filter: &'a PageFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Return every document with `edited_at >= cutoff`, newest first.
    ///
    /// Each document's top-level units are fetched eagerly. Any source error
    /// aborts discovery; no partial list is returned.
    pub async fn discover(&self, cutoff: DateTime<Utc>) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_number = 0usize;

        loop {
            page_number += 1;
            let listing = self.source.list_recent_documents(cursor.as_deref()).await?;
            let next = listing.continuation().map(str::to_string);

            let mut raw_documents: Vec<RawDocument> = listing
                .records
                .into_iter()
                .filter_map(|record| match record {
                    SearchRecord::Page(raw) => Some(raw),
                    SearchRecord::Database { .. } | SearchRecord::Other => None,
                })
                .collect();

            // Listing is sorted by edit time, so everything after the first
            // stale document (on this page and later ones) is stale too.
            let cutoff_index = raw_documents
                .iter()
                .position(|raw| raw.last_edited_time < cutoff);
            if let Some(index) = cutoff_index {
                raw_documents.truncate(index);
            }

            log::debug!(
                "Search page {}: {} documents in window{}",
                page_number,
                raw_documents.len(),
                if cutoff_index.is_some() {
                    ", reached cutoff"
                } else {
                    ""
                }
            );

            for raw in raw_documents {
                if let Some(document) = self.load_document(raw).await? {
                    documents.push(document);
                }
            }

            match next {
                Some(next) if cutoff_index.is_none() => cursor = Some(next),
                _ => break,
            }
        }

        log::info!(
            "Discovered {} documents edited since {}",
            documents.len(),
            cutoff
        );
        Ok(documents)
    }

    /// Build a document with its top-level units, unless it is filtered out.
    async fn load_document(&self, raw: RawDocument) -> Result<Option<Document>> {
        if let Some(filter) = self.filter {
            if filter.is_excluded(&title_from_url(&raw.url), &raw.url) {
                log::debug!("Skipping excluded page: {}", raw.url);
                return Ok(None);
            }
        }

        let root_units = fetch_all_children(self.source, &raw.id.as_unit_id(), &raw.id).await?;
        let document = Document::from_raw(raw, root_units);
        log::debug!(
            "Loaded page '{}' with {} top-level units",
            document.title,
            document.root_units.len()
        );
        Ok(Some(document))
    }
}
