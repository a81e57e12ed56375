// src/pipeline/crawl.rs

//! Crawl pipeline: discovery, edit root scan, then expansion per page.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{AppError, Result};
use crate::models::{Config, Document, DocumentId, Forest, PageFilter, UnitTree, VisitedSet};
use crate::services::{DocumentDiscovery, EditRootScanner, SubtreeExpander};
use crate::source::ContentSource;

/// One document's share of a crawl.
#[derive(Debug, Clone)]
pub struct CrawledPage {
    pub document_id: DocumentId,
    pub title: String,
    pub url: String,
    pub forest: Forest,
}

/// Counters for a finished crawl.
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub documents_discovered: usize,
    pub documents_with_roots: usize,
    pub edit_roots: usize,
    pub nodes: usize,
    pub elapsed: Duration,
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents discovered, {} with edits, {} edit roots, {} units in {:.2?}",
            self.documents_discovered,
            self.documents_with_roots,
            self.edit_roots,
            self.nodes,
            self.elapsed
        )
    }
}

/// Visited sets for one crawl; scan and expansion never share one.
#[derive(Default)]
struct Traversal {
    scanned: VisitedSet,
    expanded: VisitedSet,
}

/// Runs a whole crawl against a content source.
pub struct Crawler {
    source: Arc<dyn ContentSource>,
    config: Arc<Config>,
    filter: PageFilter,
}

impl Crawler {
    pub fn new(source: Arc<dyn ContentSource>, config: Arc<Config>) -> Self {
        let filter = config.exclusions.compile();
        Self {
            source,
            config,
            filter,
        }
    }

    /// Crawl everything edited in the last `lookback`.
    pub async fn crawl_recent(&self, lookback: TimeDelta) -> Result<Vec<CrawledPage>> {
        let cutoff = Utc::now().checked_sub_signed(lookback).ok_or_else(|| {
            AppError::validation(format!("lookback of {} days is out of range", lookback.num_days()))
        })?;
        self.crawl_pages(cutoff).await
    }

    /// Crawl and flatten every page's forest into one, in discovery order.
    pub async fn crawl(&self, cutoff: DateTime<Utc>) -> Result<Forest> {
        let pages = self.crawl_pages(cutoff).await?;
        Ok(pages.into_iter().flat_map(|page| page.forest).collect())
    }

    /// Crawl documents edited since `cutoff`, keeping those with edit roots.
    pub async fn crawl_pages(&self, cutoff: DateTime<Utc>) -> Result<Vec<CrawledPage>> {
        let started = Instant::now();
        log::info!("Crawling pages edited since {}", cutoff);

        let source = self.source.as_ref();
        let mut discovery = DocumentDiscovery::new(source);
        if !self.filter.is_empty() {
            discovery = discovery.with_filter(&self.filter);
        }
        let documents = discovery.discover(cutoff).await?;

        let scanner = EditRootScanner::new(source)
            .with_budget(Duration::from_secs(self.config.crawl.scan_budget_secs));
        let expander = SubtreeExpander::new(source);

        let mut summary = CrawlSummary {
            documents_discovered: documents.len(),
            ..CrawlSummary::default()
        };
        let mut shared = Traversal::default();
        let mut pages = Vec::new();

        for document in documents {
            let mut fresh = Traversal::default();
            let traversal = if self.config.crawl.share_visited {
                &mut shared
            } else {
                &mut fresh
            };

            let Some(page) = crawl_document(&scanner, &expander, document, cutoff, traversal).await?
            else {
                continue;
            };

            summary.documents_with_roots += 1;
            summary.edit_roots += page.forest.len();
            summary.nodes += page.forest.iter().map(UnitTree::node_count).sum::<usize>();
            pages.push(page);
        }

        summary.elapsed = started.elapsed();
        log::info!("Crawl complete: {}", summary);
        Ok(pages)
    }
}

async fn crawl_document(
    scanner: &EditRootScanner<'_>,
    expander: &SubtreeExpander<'_>,
    document: Document,
    cutoff: DateTime<Utc>,
    traversal: &mut Traversal,
) -> Result<Option<CrawledPage>> {
    let roots = scanner.scan(&document, cutoff, &mut traversal.scanned).await?;
    if roots.is_empty() {
        log::debug!("No edits found in page {}", document.title);
        return Ok(None);
    }

    let forest = expander.expand_all(roots, &mut traversal.expanded).await?;
    if forest.is_empty() {
        log::debug!("All edits in page {} were already collected", document.title);
        return Ok(None);
    }
    log::debug!("Expanded {} edit roots in page {}", forest.len(), document.title);

    Ok(Some(CrawledPage {
        document_id: document.id,
        title: document.title,
        url: document.url,
        forest,
    }))
}
