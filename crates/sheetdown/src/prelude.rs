//! Prelude module - common imports for sheetdown users
//!
//! ```rust
//! use sheetdown::prelude::*;
//! ```

pub use crate::{
    // Collaborators
    Anonymous,
    // Model types
    Cell,
    Collaborators,
    CsvGridSource,
    GeminiClient,
    GeminiConfig,
    GoogleConfig,
    GridSource,
    MarkdownRenderer,
    Outcome,
    // Pipeline
    Pipeline,
    PipelineConfig,
    PipelineError,
    ProgressConfig,
    // Progress
    ProgressReporter,
    SheetReference,
    SheetsClient,
    StaticToken,
    Table,
    TextGenerator,
    TokenChain,
    TokenFile,
    TokenProvider,
};
