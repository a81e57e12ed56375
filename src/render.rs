// src/render.rs

//! Flat text rendering of expanded forests.
//!
//! Each node renders through [`ContentUnit::to_markdown`](crate::models::ContentUnit::to_markdown). A node with
//! children is followed by the block separator, an indent of two spaces per
//! level of the node's depth, and its children joined by newlines:
//!
//! ```text
//! - parent<br>- child one
//! - child two
//! ```

use crate::models::UnitTree;
use crate::pipeline::CrawledPage;

/// Block separator understood by the HTML front end.
pub const DEFAULT_BLOCK_SEPARATOR: &str = "<br>";

/// Renders forests into one flat string.
#[derive(Debug, Clone)]
pub struct ForestRenderer {
    block_separator: String,
}

impl Default for ForestRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SEPARATOR)
    }
}

impl ForestRenderer {
    pub fn new(block_separator: impl Into<String>) -> Self {
        Self {
            block_separator: block_separator.into(),
        }
    }

    /// Render top-level trees joined by the block separator.
    pub fn render(&self, forest: &[UnitTree]) -> String {
        forest
            .iter()
            .map(|tree| self.render_tree(tree, 0))
            .collect::<Vec<_>>()
            .join(&self.block_separator)
    }

    fn render_tree(&self, tree: &UnitTree, depth: usize) -> String {
        let line = tree.unit.to_markdown();
        if tree.children.is_empty() {
            return line;
        }

        let children = tree
            .children
            .iter()
            .map(|child| self.render_tree(child, depth + 1))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{line}{}{}{children}",
            self.block_separator,
            "  ".repeat(depth)
        )
    }
}

/// Render crawled pages, each headed by its title, separated by blank lines.
pub fn render_pages(pages: &[CrawledPage], renderer: &ForestRenderer) -> String {
    pages
        .iter()
        .map(|page| format!("Page Title: {}\n{}", page.title, renderer.render(&page.forest)))
        .collect::<Vec<_>>()
        .join("\n\n")
}
