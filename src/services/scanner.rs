// src/services/scanner.rs

//! Edit root scanning.
//!
//! An edit root is a shallowest unit of a document whose own edit time falls
//! inside the window. The scan walks a document breadth-first and only
//! descends through stale units, so untouched subtrees cost no requests
//! beyond the stale ancestors on the way to each edited unit.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::error::Result;
use crate::models::{ContentUnit, Document, VisitedSet};
use crate::services::fetch_all_children;
use crate::source::ContentSource;

/// Default wall-clock budget for scanning one document.
pub const DEFAULT_SCAN_BUDGET: Duration = Duration::from_secs(30);

/// Service for finding the edit roots of a document.
pub struct EditRootScanner<'a> {
    source: &'a dyn ContentSource,
    budget: Duration,
}

impl<'a> EditRootScanner<'a> {
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self {
            source,
            budget: DEFAULT_SCAN_BUDGET,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Find the non-empty edit roots of `document`, in discovery order.
    ///
    /// Stops early, returning what it has, once the budget is spent. A
    /// truncated list is a valid result, not a failure.
    pub async fn scan(
        &self,
        document: &Document,
        cutoff: DateTime<Utc>,
        visited: &mut VisitedSet,
    ) -> Result<Vec<ContentUnit>> {
        let deadline = Instant::now() + self.budget;
        self.scan_until(document, cutoff, deadline, visited).await
    }

    /// Like [`scan`](Self::scan) with an explicit deadline.
    ///
    /// The deadline is checked before each unit is taken off the queue. An
    /// in-flight fetch is never interrupted, so the scan can overrun the
    /// deadline by up to one request.
    pub async fn scan_until(
        &self,
        document: &Document,
        cutoff: DateTime<Utc>,
        deadline: Instant,
        visited: &mut VisitedSet,
    ) -> Result<Vec<ContentUnit>> {
        let mut queue: VecDeque<ContentUnit> = document.root_units.iter().cloned().collect();
        let mut roots = Vec::new();

        while !queue.is_empty() {
            if Instant::now() >= deadline {
                log::debug!(
                    "Aborting edit root scan due to time limit for page: {} ({} units left)",
                    document.title,
                    queue.len()
                );
                break;
            }
            let Some(unit) = queue.pop_front() else {
                break;
            };

            // Cycles and duplicated links in the source would otherwise loop forever.
            if !visited.insert(unit.id()) {
                log::trace!("Already visited unit {}, skipping it", unit.id());
                continue;
            }

            if unit.edited_at() >= cutoff {
                // Its descendants are picked up when the root is expanded.
                if !unit.is_empty() {
                    roots.push(unit);
                }
                continue;
            }

            if unit.has_children() {
                log::trace!("Fetching children of stale unit {}", unit.id());
                let children =
                    fetch_all_children(self.source, unit.id(), unit.document_id()).await?;
                queue.extend(children);
            }
        }

        log::debug!(
            "Found {} edit roots in page {}",
            roots.len(),
            document.title
        );
        Ok(roots)
    }
}
