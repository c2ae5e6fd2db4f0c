//! Blocking adapters for the two external services: the offset-addressed
//! document service the compiled batches are submitted to, and the
//! generative text service that produces the markdown in the first place.
//!
//! The compiler itself never talks to the network; these clients submit what
//! it produces and propagate service rejections unmodified.

mod docs;
mod error;
mod text;

pub use docs::{DocsClient, DocumentHandle};
pub use error::ClientError;
pub use text::TextClient;
