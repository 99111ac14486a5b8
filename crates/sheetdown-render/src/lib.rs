//! # sheetdown-render
//!
//! Turns an annotated [`Table`](sheetdown_core::Table) into text.
//!
//! [`MarkdownRenderer`] is the deterministic baseline. The [`prompt`] module
//! builds the requests for the model-assisted path and cleans up what comes
//! back; callers fall back to [`MarkdownRenderer`] whenever that path fails.

mod markdown;
mod options;
pub mod prompt;

pub use markdown::{MarkdownRenderer, NO_DATA};
pub use options::{LineTerminator, RenderOptions};
