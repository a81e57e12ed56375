// src/models/unit.rs

//! Content units (Notion blocks) and their text extraction.
//!
//! A unit arrives from the remote store as a [`RawUnit`]: common metadata plus
//! a `type` tag naming a variant-specific payload, e.g.
//!
//! ```json
//! { "id": "…", "type": "paragraph", "paragraph": { "rich_text": [ … ] }, … }
//! ```
//!
//! [`ContentUnit`] is the immutable in-memory form. Its plain text is derived
//! once, at construction, from the payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DocumentId, UnitId};

/// A span of rich text. Only the plain rendering is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: Some(text.into()),
            href: None,
        }
    }
}

/// Payload of the text-bearing variants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToDoBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBody {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Payload of the media variants; only the caption carries text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaBody {
    #[serde(default)]
    pub caption: Option<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableRowBody {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquationBody {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkPreviewBody {
    #[serde(default)]
    pub url: String,
}

/// The closed set of unit variants, tagged by the record's `type` field.
///
/// Types this crate does not know about deserialize as [`UnitKind::Unsupported`]
/// and render as bare (empty) text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitKind {
    Paragraph {
        #[serde(default)]
        paragraph: TextBody,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        #[serde(default)]
        heading_1: TextBody,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        #[serde(default)]
        heading_2: TextBody,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        #[serde(default)]
        heading_3: TextBody,
    },
    BulletedListItem {
        #[serde(default)]
        bulleted_list_item: TextBody,
    },
    NumberedListItem {
        #[serde(default)]
        numbered_list_item: TextBody,
    },
    ToDo {
        #[serde(default)]
        to_do: ToDoBody,
    },
    Toggle {
        #[serde(default)]
        toggle: TextBody,
    },
    Quote {
        #[serde(default)]
        quote: TextBody,
    },
    Callout {
        #[serde(default)]
        callout: TextBody,
    },
    Code {
        #[serde(default)]
        code: CodeBody,
    },
    Image {
        #[serde(default)]
        image: MediaBody,
    },
    Video {
        #[serde(default)]
        video: MediaBody,
    },
    File {
        #[serde(default)]
        file: MediaBody,
    },
    Pdf {
        #[serde(default)]
        pdf: MediaBody,
    },
    Embed {
        #[serde(default)]
        embed: MediaBody,
    },
    Bookmark {
        #[serde(default)]
        bookmark: MediaBody,
    },
    TableRow {
        #[serde(default)]
        table_row: TableRowBody,
    },
    Equation {
        #[serde(default)]
        equation: EquationBody,
    },
    LinkPreview {
        #[serde(default)]
        link_preview: LinkPreviewBody,
    },
    Divider,
    Breadcrumb,
    TableOfContents,
    ColumnList,
    Column,
    LinkToPage,
    SyncedBlock,
    Template,
    Table,
    #[serde(other)]
    Unsupported,
}

impl UnitKind {
    /// A paragraph holding a single plain span.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            paragraph: TextBody {
                rich_text: vec![RichText::plain(text)],
            },
        }
    }
}

fn join_spans(spans: &[RichText]) -> String {
    spans
        .iter()
        .map(|span| span.plain_text.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive the plain text of a unit from its payload.
///
/// Text-bearing variants join their spans with single spaces, media variants
/// do the same with their caption, table rows separate cells with `" | "`.
/// Structural variants have no text of their own.
pub fn extract_plain_text(kind: &UnitKind) -> String {
    use UnitKind::*;

    match kind {
        Paragraph { paragraph: body }
        | Heading1 { heading_1: body }
        | Heading2 { heading_2: body }
        | Heading3 { heading_3: body }
        | BulletedListItem {
            bulleted_list_item: body,
        }
        | NumberedListItem {
            numbered_list_item: body,
        }
        | Toggle { toggle: body }
        | Quote { quote: body }
        | Callout { callout: body } => join_spans(&body.rich_text),
        ToDo { to_do } => join_spans(&to_do.rich_text),
        Code { code } => join_spans(&code.rich_text),
        Image { image: media }
        | Video { video: media }
        | File { file: media }
        | Pdf { pdf: media }
        | Embed { embed: media }
        | Bookmark { bookmark: media } => media
            .caption
            .as_deref()
            .map(join_spans)
            .unwrap_or_default(),
        TableRow { table_row } => table_row
            .cells
            .iter()
            .map(|cell| join_spans(cell))
            .collect::<Vec<_>>()
            .join(" | "),
        Equation { equation } => equation.expression.clone(),
        LinkPreview { link_preview } => link_preview.url.clone(),
        Divider | Breadcrumb | TableOfContents | ColumnList | Column | LinkToPage
        | SyncedBlock | Template | Table | Unsupported => String::new(),
    }
}

/// What contains a unit. A relation only; the tree owns nothing through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Parent {
    #[serde(rename = "page_id")]
    Document { page_id: DocumentId },
    #[serde(rename = "block_id")]
    Unit { block_id: UnitId },
    #[serde(rename = "database_id")]
    Database { database_id: String },
    #[serde(rename = "workspace")]
    Workspace {
        #[serde(default)]
        workspace: bool,
    },
    #[serde(other)]
    Other,
}

/// A unit exactly as the remote store lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUnit {
    pub id: UnitId,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub parent: Option<Parent>,
    #[serde(flatten)]
    pub kind: UnitKind,
}

/// One node of a document's content graph.
///
/// Immutable once built; `plain_text` is computed by the constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentUnit {
    id: UnitId,
    document_id: DocumentId,
    kind: UnitKind,
    plain_text: String,
    created_at: DateTime<Utc>,
    edited_at: DateTime<Utc>,
    parent: Option<Parent>,
    has_children: bool,
}

impl ContentUnit {
    pub fn new(
        id: UnitId,
        document_id: DocumentId,
        kind: UnitKind,
        created_at: DateTime<Utc>,
        edited_at: DateTime<Utc>,
        parent: Option<Parent>,
        has_children: bool,
    ) -> Self {
        let plain_text = extract_plain_text(&kind);
        Self {
            id,
            document_id,
            kind,
            plain_text,
            created_at,
            edited_at,
            parent,
            has_children,
        }
    }

    /// Build a unit from its wire record, attributing it to `document_id`.
    pub fn from_raw(raw: RawUnit, document_id: &DocumentId) -> Self {
        Self::new(
            raw.id,
            document_id.clone(),
            raw.kind,
            raw.created_time,
            raw.last_edited_time,
            raw.parent,
            raw.has_children,
        )
    }

    pub fn id(&self) -> &UnitId {
        &self.id
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn kind(&self) -> &UnitKind {
        &self.kind
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn edited_at(&self) -> DateTime<Utc> {
        self.edited_at
    }

    pub fn parent(&self) -> Option<&Parent> {
        self.parent.as_ref()
    }

    /// Source hint only; traversal still asks the source for children.
    pub fn has_children(&self) -> bool {
        self.has_children
    }

    /// Render this unit alone as a line of markdown.
    ///
    /// Numbered items always render as `1.`; no counter is kept.
    pub fn to_markdown(&self) -> String {
        let text = &self.plain_text;
        match self.kind {
            UnitKind::Heading1 { .. } => format!("# {text}"),
            UnitKind::Heading2 { .. } => format!("## {text}"),
            UnitKind::Heading3 { .. } => format!("### {text}"),
            UnitKind::BulletedListItem { .. } => format!("- {text}"),
            UnitKind::NumberedListItem { .. } => format!("1. {text}"),
            UnitKind::ToDo { .. } => format!("- [ ] {text}"),
            UnitKind::Toggle { .. } | UnitKind::Quote { .. } => format!("> {text}"),
            _ => text.clone(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plain_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn spans(texts: &[&str]) -> Vec<RichText> {
        texts.iter().map(|t| RichText::plain(*t)).collect()
    }

    fn unit(kind: UnitKind) -> ContentUnit {
        let at = Utc.with_ymd_and_hms(2024, 8, 19, 9, 0, 0).unwrap();
        ContentUnit::new(
            UnitId::new("u1"),
            DocumentId::new("d1"),
            kind,
            at,
            at,
            None,
            false,
        )
    }

    #[test]
    fn test_text_kinds_join_spans_with_spaces() {
        let kind = UnitKind::BulletedListItem {
            bulleted_list_item: TextBody {
                rich_text: spans(&["Call", "Alice"]),
            },
        };
        assert_eq!(extract_plain_text(&kind), "Call Alice");
    }

    #[test]
    fn test_missing_plain_text_counts_as_empty_span() {
        let kind = UnitKind::Paragraph {
            paragraph: TextBody {
                rich_text: vec![RichText::plain("a"), RichText::default(), RichText::plain("b")],
            },
        };
        assert_eq!(extract_plain_text(&kind), "a  b");
    }

    #[test]
    fn test_media_caption() {
        let captioned = UnitKind::Image {
            image: MediaBody {
                caption: Some(spans(&["whiteboard", "photo"])),
            },
        };
        let bare = UnitKind::Pdf {
            pdf: MediaBody { caption: None },
        };
        assert_eq!(extract_plain_text(&captioned), "whiteboard photo");
        assert_eq!(extract_plain_text(&bare), "");
    }

    #[test]
    fn test_table_row_cells() {
        let kind = UnitKind::TableRow {
            table_row: TableRowBody {
                cells: vec![spans(&["Q3", "goals"]), spans(&["done"]), vec![]],
            },
        };
        assert_eq!(extract_plain_text(&kind), "Q3 goals | done | ");
    }

    #[test]
    fn test_literal_fields() {
        let eq = UnitKind::Equation {
            equation: EquationBody {
                expression: "e^{i\\pi} + 1 = 0".to_string(),
            },
        };
        let link = UnitKind::LinkPreview {
            link_preview: LinkPreviewBody {
                url: "https://github.com/rust-lang/rust/pull/1".to_string(),
            },
        };
        assert_eq!(extract_plain_text(&eq), "e^{i\\pi} + 1 = 0");
        assert_eq!(
            extract_plain_text(&link),
            "https://github.com/rust-lang/rust/pull/1"
        );
    }

    #[test]
    fn test_structural_kinds_have_no_text() {
        for kind in [
            UnitKind::Divider,
            UnitKind::ColumnList,
            UnitKind::TableOfContents,
            UnitKind::SyncedBlock,
            UnitKind::Unsupported,
        ] {
            assert!(unit(kind).is_empty());
        }
    }

    #[test]
    fn test_to_markdown() {
        let text = |t: &str| TextBody {
            rich_text: spans(&[t]),
        };
        let cases = vec![
            (UnitKind::Heading1 { heading_1: text("Week") }, "# Week"),
            (UnitKind::Heading2 { heading_2: text("Mon") }, "## Mon"),
            (UnitKind::Heading3 { heading_3: text("AM") }, "### AM"),
            (
                UnitKind::BulletedListItem {
                    bulleted_list_item: text("item"),
                },
                "- item",
            ),
            (
                UnitKind::NumberedListItem {
                    numbered_list_item: text("step"),
                },
                "1. step",
            ),
            (
                UnitKind::ToDo {
                    to_do: ToDoBody {
                        rich_text: spans(&["ship"]),
                        checked: true,
                    },
                },
                "- [ ] ship",
            ),
            (UnitKind::Toggle { toggle: text("more") }, "> more"),
            (UnitKind::Quote { quote: text("said") }, "> said"),
            (UnitKind::Callout { callout: text("note") }, "note"),
            (UnitKind::paragraph("Normal text"), "Normal text"),
        ];

        for (kind, expected) in cases {
            assert_eq!(unit(kind).to_markdown(), expected);
        }
    }

    #[test]
    fn test_deserialize_raw_unit() {
        let json = r#"{
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "parent": { "type": "page_id", "page_id": "59833787-2cf9-4fdf-8782-e53db20768a5" },
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-07-06T19:41:00.000Z",
            "has_children": false,
            "archived": false,
            "type": "heading_2",
            "heading_2": {
                "rich_text": [
                    { "type": "text", "text": { "content": "Lacinato kale" }, "plain_text": "Lacinato kale", "href": null }
                ],
                "color": "default",
                "is_toggleable": false
            }
        }"#;

        let raw: RawUnit = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id.as_str(), "c02fc1d3-db8b-45c5-a222-27595b15aea7");
        assert_eq!(
            raw.parent,
            Some(Parent::Document {
                page_id: DocumentId::new("59833787-2cf9-4fdf-8782-e53db20768a5")
            })
        );

        let unit = ContentUnit::from_raw(raw, &DocumentId::new("59833787"));
        assert_eq!(unit.to_markdown(), "## Lacinato kale");
        assert_eq!(unit.document_id().as_str(), "59833787");
    }

    #[test]
    fn test_unknown_type_falls_back_to_unsupported() {
        let json = r#"{
            "id": "b1",
            "created_time": "2024-01-01T00:00:00Z",
            "last_edited_time": "2024-01-02T00:00:00Z",
            "has_children": true,
            "parent": { "type": "block_id", "block_id": "b0" },
            "type": "child_page",
            "child_page": { "title": "Nested" }
        }"#;

        let raw: RawUnit = serde_json::from_str(json).unwrap();
        assert_eq!(raw.kind, UnitKind::Unsupported);
        assert!(raw.has_children);

        let unit = ContentUnit::from_raw(raw, &DocumentId::new("d"));
        assert!(unit.is_empty());
        assert_eq!(unit.to_markdown(), "");
    }

    #[test]
    fn test_structural_variant_with_payload_object() {
        let json = r#"{
            "id": "b2",
            "created_time": "2024-01-01T00:00:00Z",
            "last_edited_time": "2024-01-01T00:00:00Z",
            "type": "divider",
            "divider": {}
        }"#;

        let raw: RawUnit = serde_json::from_str(json).unwrap();
        assert_eq!(raw.kind, UnitKind::Divider);
        assert!(!raw.has_children);
        assert!(raw.parent.is_none());
    }
}
