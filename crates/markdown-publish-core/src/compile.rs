use crate::batch::{
    InsertText, NamedStyle, OperationBatch, ParagraphKind, ParagraphStyleRange, StyleOp,
    TextStyleRange,
};
use crate::token::{tokenize, Inline, Token};

/// Compile markdown into an ordered operation batch against a document whose
/// content currently ends at `start_offset`.
///
/// `start_offset` is 1 for an empty document. When appending
/// (`start_offset > 1`) the batch opens with a two-newline separator so the
/// new content does not run into the old.
///
/// Compilation cannot fail: unrecognized syntax degrades to literal text in
/// the parse step, and every offset the walk emits is derived from the same
/// monotonic cursor.
pub fn compile(markdown: &str, start_offset: usize) -> OperationBatch {
    let tokens = tokenize(markdown);

    let mut batch = OperationBatch::default();
    let mut cursor = start_offset.max(1);

    if start_offset > 1 {
        batch.inserts.push(InsertText {
            offset: cursor,
            text: "\n\n".to_string(),
        });
        cursor += 2;
    }

    let mut heading_level: Option<u32> = None;

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::HeadingOpen(level) => heading_level = Some(*level),
            Token::HeadingClose => heading_level = None,
            Token::ParagraphOpen | Token::ParagraphClose => {}
            Token::Inline(children) => {
                let paragraph_start = cursor;
                cursor = walk_inline(children, cursor, &mut batch);

                // Close every inline with a newline; the paragraph range ends
                // just before it.
                batch.inserts.push(InsertText {
                    offset: cursor,
                    text: "\n".to_string(),
                });
                let paragraph_end = cursor;
                cursor += 1;

                if paragraph_end > paragraph_start {
                    if let Some(level) = heading_level {
                        batch.styles.push(StyleOp::Paragraph(ParagraphStyleRange {
                            start: paragraph_start,
                            end: paragraph_end,
                            kind: ParagraphKind::Named(NamedStyle::for_level(level)),
                        }));
                    } else if index > 0 && tokens[index - 1] == Token::ParagraphOpen {
                        batch.styles.push(StyleOp::Paragraph(ParagraphStyleRange {
                            start: paragraph_start,
                            end: paragraph_end,
                            kind: ParagraphKind::SpaceBelow,
                        }));
                    }
                }
            }
        }
    }

    batch
}

/// Walk one inline's children, appending insertions and deferred character
/// styles. Returns the advanced cursor.
///
/// Bold and italic are plain booleans scoped to this call, so re-opening an
/// emphasis that is already active is a no-op and every inline starts
/// unstyled.
fn walk_inline(children: &[Inline], mut cursor: usize, batch: &mut OperationBatch) -> usize {
    let mut bold = false;
    let mut italic = false;

    for child in children {
        match child {
            Inline::StrongOpen => bold = true,
            Inline::StrongClose => bold = false,
            Inline::EmOpen => italic = true,
            Inline::EmClose => italic = false,
            Inline::SoftBreak => {
                batch.inserts.push(InsertText {
                    offset: cursor,
                    text: " ".to_string(),
                });
                cursor += 1;
            }
            Inline::Text(content) => {
                if content.is_empty() {
                    continue;
                }
                // The destination addresses characters, not bytes.
                let len = content.chars().count();
                batch.inserts.push(InsertText {
                    offset: cursor,
                    text: content.clone(),
                });
                if bold || italic {
                    batch.styles.push(StyleOp::Text(TextStyleRange {
                        start: cursor,
                        end: cursor + len,
                        bold,
                        italic,
                    }));
                }
                cursor += len;
            }
        }
    }

    cursor
}
