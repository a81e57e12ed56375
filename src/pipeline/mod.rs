//! Pipeline entry points for crawl operations.
//!
//! - `Crawler::crawl_pages`: Discover, scan and expand every recent page
//! - `Crawler::crawl`: The same, flattened into one forest

pub mod crawl;

pub use crawl::{CrawlSummary, CrawledPage, Crawler};
