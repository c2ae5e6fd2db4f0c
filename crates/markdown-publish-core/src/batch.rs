use crate::wire::{self, DocRequest};

/// Insert `text` at `offset` in the document as it exists immediately before
/// this operation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertText {
    pub offset: usize,
    pub text: String,
}

/// Character-level emphasis over a half-open range of final offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyleRange {
    pub start: usize,
    pub end: usize,
    pub bold: bool,
    pub italic: bool,
}

/// Paragraph-level structural style over a half-open range of final offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphStyleRange {
    pub start: usize,
    pub end: usize,
    pub kind: ParagraphKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    Named(NamedStyle),
    /// Fixed vertical spacing below the paragraph. Presentation default, not
    /// user-configurable.
    SpaceBelow,
}

/// Named paragraph style tiers of the destination document model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedStyle {
    Heading1,
    Heading2,
    Heading3,
    NormalText,
}

impl NamedStyle {
    /// Heading levels 1-3 map to the three heading tiers; anything else
    /// degrades to plain body text.
    pub fn for_level(level: u32) -> Self {
        match level {
            1 => Self::Heading1,
            2 => Self::Heading2,
            3 => Self::Heading3,
            _ => Self::NormalText,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading1 => "HEADING_1",
            Self::Heading2 => "HEADING_2",
            Self::Heading3 => "HEADING_3",
            Self::NormalText => "NORMAL_TEXT",
        }
    }
}

/// Deferred style operation, emitted after every text insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOp {
    Text(TextStyleRange),
    Paragraph(ParagraphStyleRange),
}

/// Ordered batch of edit operations for one compilation run.
///
/// The destination applies requests strictly in list order, renumbering its
/// offsets after each insertion. Every insert precedes every style operation,
/// so by the time a style range is evaluated its offsets are final.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationBatch {
    pub inserts: Vec<InsertText>,
    pub styles: Vec<StyleOp>,
}

impl OperationBatch {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.styles.is_empty()
    }

    /// Total number of characters the batch inserts.
    pub fn inserted_chars(&self) -> usize {
        self.inserts
            .iter()
            .map(|op| op.text.chars().count())
            .sum()
    }

    /// Render the batch in submission order as wire requests.
    pub fn to_requests(&self) -> Vec<DocRequest> {
        let mut requests = Vec::with_capacity(self.inserts.len() + self.styles.len());
        requests.extend(self.inserts.iter().map(wire::insert_text));
        requests.extend(self.styles.iter().map(|style| match style {
            StyleOp::Text(range) => wire::update_text_style(range),
            StyleOp::Paragraph(range) => wire::update_paragraph_style(range),
        }));
        requests
    }
}
