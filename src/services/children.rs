// src/services/children.rs

//! Paginated retrieval of a unit's direct children.

use crate::error::Result;
use crate::models::{ContentUnit, DocumentId, UnitId};
use crate::source::ContentSource;

/// Retrieve every direct child of `parent`, following cursors to the end.
///
/// Children are attributed to `document_id`. A failure on any page discards
/// the pages already read and propagates the error.
pub async fn fetch_all_children(
    source: &dyn ContentSource,
    parent: &UnitId,
    document_id: &DocumentId,
) -> Result<Vec<ContentUnit>> {
    let mut children = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let listing = source.list_children(parent, cursor.as_deref()).await?;
        let next = listing.continuation().map(str::to_string);

        children.extend(
            listing
                .records
                .into_iter()
                .map(|raw| ContentUnit::from_raw(raw, document_id)),
        );

        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(children)
}
