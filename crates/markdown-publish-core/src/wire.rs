//! Wire shapes for the destination document service's batch-update call.
//!
//! Requests serialize externally tagged, so each variant renders as the
//! single-key JSON object the service expects, e.g.
//! `{"insertText": {"location": {"index": 1}, "text": "Title"}}`.

use serde::Serialize;

use crate::batch::{InsertText, ParagraphKind, ParagraphStyleRange, TextStyleRange};

/// Vertical spacing applied below a spaced paragraph, in points.
pub const SPACE_BELOW_PT: f64 = 10.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum DocRequest {
    InsertText(InsertTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    UpdateParagraphStyle(UpdateParagraphStyleRequest),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub location: Location,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub range: Range,
    pub text_style: TextStyle,
    /// Field mask naming exactly the style fields being set.
    pub fields: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyleRequest {
    pub range: Range,
    pub paragraph_style: ParagraphStyle,
    pub fields: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: String,
}

pub(crate) fn insert_text(op: &InsertText) -> DocRequest {
    DocRequest::InsertText(InsertTextRequest {
        location: Location { index: op.offset },
        text: op.text.clone(),
    })
}

pub(crate) fn update_text_style(range: &TextStyleRange) -> DocRequest {
    let mut style = TextStyle::default();
    let mut fields = Vec::new();
    if range.bold {
        style.bold = Some(true);
        fields.push("bold");
    }
    if range.italic {
        style.italic = Some(true);
        fields.push("italic");
    }

    DocRequest::UpdateTextStyle(UpdateTextStyleRequest {
        range: Range {
            start_index: range.start,
            end_index: range.end,
        },
        text_style: style,
        fields: fields.join(","),
    })
}

pub(crate) fn update_paragraph_style(range: &ParagraphStyleRange) -> DocRequest {
    let (style, fields) = match range.kind {
        ParagraphKind::Named(named) => (
            ParagraphStyle {
                named_style_type: Some(named.as_str().to_string()),
                space_below: None,
            },
            "namedStyleType",
        ),
        ParagraphKind::SpaceBelow => (
            ParagraphStyle {
                named_style_type: None,
                space_below: Some(Dimension {
                    magnitude: SPACE_BELOW_PT,
                    unit: "PT".to_string(),
                }),
            },
            "spaceBelow",
        ),
    };

    DocRequest::UpdateParagraphStyle(UpdateParagraphStyleRequest {
        range: Range {
            start_index: range.start,
            end_index: range.end,
        },
        paragraph_style: style,
        fields: fields.to_string(),
    })
}
