//! # sheetdown-progress
//!
//! A console progress reporter for long, indeterminate remote calls.
//!
//! Progress comes from two sources: deterministic [`ProgressReporter::update`]
//! calls made by the pipeline, and a background simulation that trickles the
//! bar forward while a call is in flight. The simulation never reaches 100%;
//! only the foreground decides that a step is done.
//!
//! # Architecture
//!
//! ```text
//! ProgressReporter (foreground, &self API)
//!     ├── mpsc::Sender<Command> ──┐
//!     └── simulation thread ──────┤  (Advance / SimulationFinished)
//!                                 ▼
//!                       console thread: owns ProgressState + writer
//! ```
//!
//! All console writes happen on the console thread, in the order commands
//! were sent. At most one simulation thread exists at a time.
//!
//! # Example
//!
//! ```rust
//! use sheetdown_progress::{ProgressConfig, ProgressReporter};
//!
//! let progress = ProgressReporter::with_writer(std::io::sink(), ProgressConfig::fast());
//! progress.start_simulated_progress("Retrieving spreadsheet data", 0.0, 80.0);
//! // ... blocking remote call ...
//! progress.update("Retrieving spreadsheet data", Some(100.0));
//! progress.wait_for_simulated_progress();
//! assert_eq!(progress.state().percent, 100.0);
//! ```

mod bar;
mod config;
mod console;
mod reporter;
mod simulation;
mod state;

pub use bar::render_bar;
pub use config::{ProgressConfig, SimulationConfig};
pub use reporter::ProgressReporter;
pub use state::ProgressState;

/// Ceiling for simulated progress; 100 is reserved for real completion
pub const MAX_SIMULATED_PERCENT: f64 = 99.0;
