//! # sheetdown
//!
//! Convert one worksheet of a Google spreadsheet into a Markdown document.
//!
//! The pipeline authenticates, loads the persisted sheet reference, fetches
//! the grid, marks formulas, dropdowns and checkboxes, renders a table
//! (model-assisted when a text generator is configured, deterministic
//! Markdown otherwise), picks a file name and writes the result under
//! `output/`. A console progress reporter tracks every phase.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheetdown::prelude::*;
//!
//! let progress = ProgressReporter::new();
//! let collaborators = Collaborators::new(Anonymous, CsvGridSource::new("export.csv"));
//! let pipeline = Pipeline::new(PipelineConfig::default(), collaborators, &progress);
//!
//! match pipeline.run() {
//!     Ok(Outcome::Written { path, .. }) => println!("saved {}", path.display()),
//!     Ok(Outcome::NoData) => println!("nothing to convert"),
//!     Err(e) => std::process::exit(e.exit_code()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod prelude;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use naming::{normalize_file_name, sanitize_file_name};
pub use output::OutputWriter;
pub use pipeline::{steps, Collaborators, Outcome, Pipeline};

// Re-export the building blocks
pub use sheetdown_core::{
    annotate, annotate_table, AnnotatedCell, Cell, CoreError, Row, SheetReference, Table,
    DEFAULT_METADATA_PATH,
};
pub use sheetdown_progress::{ProgressConfig, ProgressReporter, ProgressState, SimulationConfig};
pub use sheetdown_remote::{
    AccessToken, Anonymous, CsvGridSource, CsvReadOptions, GeminiClient, GeminiConfig,
    GenerationProfile, GenerationRequest, GoogleConfig, GridSource, RemoteError, SheetCatalog,
    SheetInfo, SheetsClient, StaticToken, TextGenerator, TokenChain, TokenFile, TokenProvider,
};
pub use sheetdown_render::{prompt, MarkdownRenderer, RenderOptions, NO_DATA};
