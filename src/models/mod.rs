// src/models/mod.rs

//! Domain models for the crawl engine.
//!
//! Pure data and pure functions: identifiers, content units, documents,
//! expanded trees and configuration. Nothing here performs I/O apart from
//! reading the configuration file.

mod config;
mod document;
mod ids;
mod tree;
mod unit;

// Re-export all public types
pub use config::{Config, CrawlConfig, ExclusionConfig, NotionConfig, PageFilter};
pub use document::{Document, RawDocument, UNKNOWN_TITLE, title_from_url};
pub use ids::{DocumentId, UnitId};
pub use tree::{Forest, UnitTree, VisitedSet};
pub use unit::{
    CodeBody, ContentUnit, EquationBody, LinkPreviewBody, MediaBody, Parent, RawUnit, RichText,
    TableRowBody, TextBody, ToDoBody, UnitKind, extract_plain_text,
};
