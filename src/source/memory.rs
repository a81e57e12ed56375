// src/source/memory.rs

//! In-memory content source for tests.
//!
//! Serves canned records with offset cursors, optionally slowed down or
//! failing for chosen units, and records every request it receives.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::{AppError, Result};
use crate::models::{DocumentId, RawDocument, RawUnit, UnitId, UnitKind};
use crate::source::{ContentSource, Listing, SearchRecord};

/// A request the source has served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    Documents(Option<String>),
    Children(UnitId, Option<String>),
}

pub(crate) struct MemorySource {
    documents: Vec<SearchRecord>,
    children: HashMap<UnitId, Vec<RawUnit>>,
    failing: HashSet<UnitId>,
    failing_pages: HashSet<(UnitId, String)>,
    page_size: usize,
    latency: Option<Duration>,
    requests: Mutex<Vec<Request>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            children: HashMap::new(),
            failing: HashSet::new(),
            failing_pages: HashSet::new(),
            page_size: 100,
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Every children request sleeps this long first.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Append a document to the search listing (callers keep newest first).
    pub fn document(mut self, raw: RawDocument) -> Self {
        self.documents.push(SearchRecord::Page(raw));
        self
    }

    pub fn database(mut self, id: &str) -> Self {
        self.documents.push(SearchRecord::Database { id: id.to_string() });
        self
    }

    pub fn children(mut self, parent: &str, units: Vec<RawUnit>) -> Self {
        self.children.insert(UnitId::new(parent), units);
        self
    }

    /// Listing the children of `parent` fails.
    pub fn failing(mut self, parent: &str) -> Self {
        self.failing.insert(UnitId::new(parent));
        self
    }

    /// Only the children page of `parent` starting at `cursor` fails.
    pub fn failing_at(mut self, parent: &str, cursor: &str) -> Self {
        self.failing_pages
            .insert((UnitId::new(parent), cursor.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Parents whose children were requested, one entry per request.
    pub fn child_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::Children(id, _) => Some(id.as_str().to_string()),
                Request::Documents(_) => None,
            })
            .collect()
    }

    pub fn document_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| matches!(r, Request::Documents(_)))
            .count()
    }

    fn page<T: Clone>(&self, records: &[T], cursor: Option<&str>) -> Listing<T> {
        let start = cursor
            .and_then(|c| c.parse::<usize>().ok())
            .unwrap_or(0)
            .min(records.len());
        let end = (start + self.page_size).min(records.len());
        let has_more = end < records.len();
        Listing {
            records: records[start..end].to_vec(),
            next_cursor: has_more.then(|| end.to_string()),
            has_more,
        }
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn list_recent_documents(&self, cursor: Option<&str>) -> Result<Listing<SearchRecord>> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::Documents(cursor.map(str::to_string)));
        Ok(self.page(&self.documents, cursor))
    }

    async fn list_children(
        &self,
        parent: &UnitId,
        cursor: Option<&str>,
    ) -> Result<Listing<RawUnit>> {
        self.requests
            .lock()
            .unwrap()
            .push(Request::Children(parent.clone(), cursor.map(str::to_string)));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let failing_page = cursor.is_some_and(|c| {
            self.failing_pages
                .contains(&(parent.clone(), c.to_string()))
        });
        if failing_page || self.failing.contains(parent) {
            return Err(AppError::Api {
                status: 502,
                code: "service_unavailable".to_string(),
                message: format!("children of {parent} unavailable"),
            });
        }

        let records = self.children.get(parent).map(Vec::as_slice).unwrap_or(&[]);
        Ok(self.page(records, cursor))
    }
}

/// 2024-08-19 at `hour`:00 UTC.
pub(crate) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 19, hour, 0, 0).unwrap()
}

pub(crate) fn raw_document(id: &str, slug: &str, edited: DateTime<Utc>) -> RawDocument {
    RawDocument {
        id: DocumentId::new(id),
        url: format!("https://www.notion.so/{slug}-{id}"),
        created_time: at(0),
        last_edited_time: edited,
    }
}

pub(crate) fn raw_unit(
    id: &str,
    kind: UnitKind,
    edited: DateTime<Utc>,
    has_children: bool,
) -> RawUnit {
    RawUnit {
        id: UnitId::new(id),
        created_time: at(0),
        last_edited_time: edited,
        has_children,
        parent: None,
        kind,
    }
}

/// A paragraph whose text is its own ID.
pub(crate) fn text(id: &str, edited: DateTime<Utc>, has_children: bool) -> RawUnit {
    raw_unit(id, UnitKind::paragraph(id), edited, has_children)
}

/// A unit with no text of its own.
pub(crate) fn blank(id: &str, edited: DateTime<Utc>, has_children: bool) -> RawUnit {
    raw_unit(id, UnitKind::Divider, edited, has_children)
}
