//! # sheetdown-remote
//!
//! External collaborators of the sheetdown pipeline, behind small traits:
//!
//! - [`TokenProvider`] - supplies an OAuth2 bearer token ([`StaticToken`], [`TokenFile`], [`TokenChain`])
//! - [`GridSource`] - fetches a worksheet as a [`Table<Cell>`] ([`SheetsClient`], [`CsvGridSource`])
//! - [`SheetCatalog`] - lists the worksheets of a spreadsheet ([`SheetsClient`])
//! - [`TextGenerator`] - single-shot text generation ([`GeminiClient`])
//!
//! Every call is attempted exactly once; there is no retry layer.

pub mod auth;
pub mod csv_source;
pub mod error;
pub mod gemini;
pub mod sheets;

use sheetdown_core::{Cell, SheetReference, Table};

pub use auth::{AccessToken, Anonymous, StaticToken, TokenChain, TokenFile};
pub use csv_source::{CsvGridSource, CsvReadOptions};
pub use error::{RemoteError, Result};
pub use gemini::{GeminiClient, GeminiConfig, GenerationProfile, GenerationRequest};
pub use sheets::{GoogleConfig, SheetInfo, SheetsClient};

/// Supplies the bearer token used for spreadsheet calls
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Result<AccessToken>;
}

/// Fetches one worksheet as a grid of cells
pub trait GridSource: Send + Sync {
    fn fetch_grid(&self, sheet: &SheetReference, token: &AccessToken) -> Result<Table<Cell>>;
}

/// Lists the worksheets of a spreadsheet
pub trait SheetCatalog {
    fn list_sheets(&self, spreadsheet_id: &str, token: &AccessToken) -> Result<Vec<SheetInfo>>;
}

/// Generates text from a prompt
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

impl<T: TokenProvider + ?Sized> TokenProvider for Box<T> {
    fn access_token(&self) -> Result<AccessToken> {
        (**self).access_token()
    }
}

impl<T: GridSource + ?Sized> GridSource for Box<T> {
    fn fetch_grid(&self, sheet: &SheetReference, token: &AccessToken) -> Result<Table<Cell>> {
        (**self).fetch_grid(sheet, token)
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        (**self).generate(request)
    }
}
