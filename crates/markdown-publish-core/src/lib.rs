//! Markdown-to-edit-request compiler.
//!
//! The destination document model addresses content by linear character
//! offsets and renumbers every offset after each insertion. The compiler
//! therefore works in two phases over a single forward walk: text insertions
//! are emitted immediately with predicted offsets, while character and
//! paragraph styling is deferred and emitted after the final text insertion,
//! by which point every recorded range is already expressed in final
//! coordinates.

mod batch;
mod compile;
mod token;
mod wire;

pub use batch::{
    InsertText, NamedStyle, OperationBatch, ParagraphKind, ParagraphStyleRange, StyleOp,
    TextStyleRange,
};
pub use compile::compile;
pub use token::{tokenize, Inline, Token};
pub use wire::{
    Dimension, DocRequest, InsertTextRequest, Location, ParagraphStyle, Range, TextStyle,
    UpdateParagraphStyleRequest, UpdateTextStyleRequest, SPACE_BELOW_PT,
};
