//! Service layer for the crawl engine.
//!
//! This module contains the traversal logic:
//! - Document discovery (`DocumentDiscovery`)
//! - Edit root scanning (`EditRootScanner`)
//! - Subtree expansion (`SubtreeExpander`)
//! - Paginated child retrieval shared by all three (`fetch_all_children`)

mod children;
mod discovery;
mod expander;
mod scanner;

pub use children::fetch_all_children;
pub use discovery::DocumentDiscovery;
pub use expander::SubtreeExpander;
pub use scanner::{DEFAULT_SCAN_BUDGET, EditRootScanner};
