//! Pipeline orchestrator
//!
//! Runs the phases in order against the configured collaborators:
//!
//! 1. authenticate (fatal on failure)
//! 2. load the sheet reference (fatal on failure, before any fetch)
//! 3. fetch the grid (a failure counts as no data)
//! 4. mark special cells
//! 5. render, model-assisted with a deterministic fallback
//! 6. generate a file name, with a fixed fallback
//! 7. write the document
//!
//! Whatever happens, the run ends by waiting for simulated progress.

use std::path::PathBuf;

use sheetdown_core::{annotate_table, AnnotatedCell, Cell, SheetReference, Table};
use sheetdown_progress::ProgressReporter;
use sheetdown_remote::{
    AccessToken, GenerationProfile, GenerationRequest, GridSource, TextGenerator, TokenProvider,
};
use sheetdown_render::prompt::{
    clean_model_table, format_prompt, naming_prompt, FORMAT_SYSTEM_INSTRUCTION,
};
use sheetdown_render::MarkdownRenderer;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::naming::normalize_file_name;
use crate::output::OutputWriter;

/// Console labels of the pipeline phases
pub mod steps {
    pub const AUTHENTICATE: &str = "Authenticating with Google";
    pub const LOAD_METADATA: &str = "Loading spreadsheet metadata";
    pub const FETCH: &str = "Retrieving spreadsheet data";
    pub const ANNOTATE: &str = "Marking special cells";
    pub const RENDER: &str = "Formatting table";
    pub const NAME: &str = "Generating file name";
    pub const SAVE: &str = "Saving output";
}

/// Percentage reported once the grid response has arrived
const RESPONSE_RECEIVED_PERCENT: f64 = 85.0;

/// External services used by a run
pub struct Collaborators {
    pub tokens: Box<dyn TokenProvider>,
    pub grid: Box<dyn GridSource>,
    /// Without a generator, rendering and naming use their fallbacks
    pub generator: Option<Box<dyn TextGenerator>>,
}

impl Collaborators {
    pub fn new<T, G>(tokens: T, grid: G) -> Self
    where
        T: TokenProvider + 'static,
        G: GridSource + 'static,
    {
        Self {
            tokens: Box::new(tokens),
            grid: Box::new(grid),
            generator: None,
        }
    }

    pub fn with_generator<M: TextGenerator + 'static>(mut self, generator: M) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The document was written
    Written {
        path: PathBuf,
        /// The model path failed or was unavailable
        used_fallback_renderer: bool,
        /// No usable name was generated
        used_fallback_name: bool,
    },
    /// The worksheet had no rows; nothing was written
    NoData,
}

/// One spreadsheet-to-Markdown run
pub struct Pipeline<'a> {
    config: PipelineConfig,
    collaborators: Collaborators,
    progress: &'a ProgressReporter,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: PipelineConfig,
        collaborators: Collaborators,
        progress: &'a ProgressReporter,
    ) -> Self {
        Self {
            config,
            collaborators,
            progress,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every phase; simulated progress is always drained on return
    pub fn run(&self) -> Result<Outcome> {
        let result = self.run_phases();
        self.progress.wait_for_simulated_progress();
        match &result {
            Ok(Outcome::Written { path, .. }) => {
                tracing::info!("document saved to {}", path.display())
            }
            Ok(Outcome::NoData) => tracing::info!("no data retrieved; nothing written"),
            Err(e) => tracing::debug!("pipeline aborted: {e}"),
        }
        result
    }

    fn run_phases(&self) -> Result<Outcome> {
        let token = self.authenticate()?;
        let sheet = self.load_sheet_reference()?;

        let Some(grid) = self.fetch_grid(&sheet, &token) else {
            return Ok(Outcome::NoData);
        };

        self.progress.update(steps::ANNOTATE, Some(0.0));
        let annotated = annotate_table(&grid);
        self.progress.complete(steps::ANNOTATE);

        let (document, used_fallback_renderer) = self.render(&annotated);
        let (file_name, used_fallback_name) = self.file_name(&grid);

        self.progress.update(steps::SAVE, Some(0.0));
        let path = match OutputWriter::write(&self.config.output_dir, &file_name, &document) {
            Ok(path) => path,
            Err(e) => {
                self.fail(steps::SAVE);
                return Err(e);
            }
        };
        self.progress.complete(steps::SAVE);

        Ok(Outcome::Written {
            path,
            used_fallback_renderer,
            used_fallback_name,
        })
    }

    fn authenticate(&self) -> Result<AccessToken> {
        self.progress.update(steps::AUTHENTICATE, Some(0.0));
        match self.collaborators.tokens.access_token() {
            Ok(token) => {
                self.progress.complete(steps::AUTHENTICATE);
                Ok(token)
            }
            Err(e) => {
                self.fail(steps::AUTHENTICATE);
                Err(PipelineError::Authentication(e))
            }
        }
    }

    fn load_sheet_reference(&self) -> Result<SheetReference> {
        self.progress.start_simulated_progress(steps::LOAD_METADATA, 0.0, 80.0);
        match SheetReference::load(&self.config.metadata_path) {
            Ok(sheet) => {
                self.progress.complete(steps::LOAD_METADATA);
                tracing::info!(
                    "using sheet '{}' of spreadsheet {}",
                    sheet.sheet_title,
                    sheet.spreadsheet_id
                );
                Ok(sheet)
            }
            Err(e) => {
                self.fail(steps::LOAD_METADATA);
                Err(PipelineError::Metadata(e))
            }
        }
    }

    /// `None` when there is nothing to convert
    fn fetch_grid(&self, sheet: &SheetReference, token: &AccessToken) -> Option<Table<Cell>> {
        self.progress.start_simulated_progress(steps::FETCH, 0.0, 80.0);
        let grid = match self.collaborators.grid.fetch_grid(sheet, token) {
            Ok(grid) => grid,
            Err(e) => {
                self.fail(steps::FETCH);
                self.warn(&format!("could not retrieve spreadsheet data: {e}"));
                return None;
            }
        };

        self.progress.update(steps::FETCH, Some(RESPONSE_RECEIVED_PERCENT));
        self.progress.complete(steps::FETCH);
        tracing::info!(
            "retrieved {} rows ({} columns max)",
            grid.row_count(),
            grid.max_columns()
        );

        if grid.is_empty() {
            None
        } else {
            Some(grid)
        }
    }

    /// Rendered document and whether the deterministic fallback was used
    fn render(&self, table: &Table<AnnotatedCell>) -> (String, bool) {
        let mut fallback_reason = None;
        let formatted = match &self.collaborators.generator {
            Some(generator) => {
                self.progress.start_simulated_progress(steps::RENDER, 10.0, 90.0);
                let request =
                    GenerationRequest::new(format_prompt(table), GenerationProfile::FORMATTING)
                        .with_system_instruction(FORMAT_SYSTEM_INSTRUCTION);
                match generator.generate(&request) {
                    Ok(text) => {
                        let cleaned = clean_model_table(&text);
                        if cleaned.is_none() {
                            fallback_reason = Some("model returned no usable table".to_string());
                        }
                        cleaned
                    }
                    Err(e) => {
                        fallback_reason = Some(format!("model formatting failed: {e}"));
                        None
                    }
                }
            }
            None => {
                self.progress.update(steps::RENDER, Some(0.0));
                None
            }
        };

        let result = match formatted {
            Some(text) => (text, false),
            None => (MarkdownRenderer::new().render(table), true),
        };
        self.progress.complete(steps::RENDER);
        if let Some(reason) = fallback_reason {
            self.warn(&format!("{reason}; using Markdown renderer"));
        }
        result
    }

    /// File name and whether the configured fallback was used
    fn file_name(&self, grid: &Table<Cell>) -> (String, bool) {
        let mut fallback_reason = None;
        let generated = match &self.collaborators.generator {
            Some(generator) => {
                self.progress.start_simulated_progress(steps::NAME, 0.0, 90.0);
                let request = GenerationRequest::new(naming_prompt(grid), GenerationProfile::NAMING);
                match generator.generate(&request) {
                    Ok(raw) => {
                        let name = normalize_file_name(&raw, "md");
                        if name.is_none() {
                            fallback_reason = Some(format!("generated file name {raw:?} is unusable"));
                        }
                        name
                    }
                    Err(e) => {
                        fallback_reason = Some(format!("file name generation failed: {e}"));
                        None
                    }
                }
            }
            None => {
                self.progress.update(steps::NAME, Some(0.0));
                None
            }
        };

        self.progress.complete(steps::NAME);
        if let Some(reason) = fallback_reason {
            self.warn(&format!(
                "{reason}; using '{}'",
                self.config.fallback_file_name
            ));
        }
        match generated {
            Some(name) => (name, false),
            None => (self.config.fallback_file_name.clone(), true),
        }
    }

    /// Log once the console has finished the current bar line
    fn warn(&self, message: &str) {
        self.progress.sync();
        tracing::warn!("{message}");
    }

    /// Close `step` as failed; this also stops its simulation
    fn fail(&self, step: &str) {
        self.progress.complete(&format!("{step} failed"));
    }
}
