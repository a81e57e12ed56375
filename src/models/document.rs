// src/models/document.rs

//! Documents (Notion pages).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ContentUnit, DocumentId};

/// Title used when the URL slug carries no words.
pub const UNKNOWN_TITLE: &str = "Unknown Page Title";

/// A document exactly as the remote search listing returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: DocumentId,
    #[serde(default)]
    pub url: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
}

/// A container of content units with its top-level units already fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
    pub root_units: Vec<ContentUnit>,
}

impl Document {
    pub fn from_raw(raw: RawDocument, root_units: Vec<ContentUnit>) -> Self {
        Self {
            title: title_from_url(&raw.url),
            id: raw.id,
            url: raw.url,
            created_at: raw.created_time,
            edited_at: raw.last_edited_time,
            root_units,
        }
    }
}

/// Derive a readable title from a page URL.
///
/// `https://www.notion.so/August-19-2024-651d530e07a14f9c97b4084614c5049b`
/// becomes `August 19 2024`: the last path segment is split on `-` and the
/// trailing ID token is dropped. Good enough for the gist of a page name.
pub fn title_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let slug = path.rsplit('/').next().unwrap_or("");

    let parts: Vec<&str> = slug.split('-').collect();
    let title = match parts.split_last() {
        Some((_, words)) => words.join(" "),
        None => String::new(),
    };

    if title.trim().is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        title
    }
}
