//! Analysis Module
//!
//! The "run analysis on text" feature: submissions are truncated to a
//! 280-character summary, two length metrics form the stored result, and
//! any stored analysis can be listed or exported as a PDF.
//!
//! # Module Structure
//!
//! ```text
//! analysis/
//! ├── mod.rs          - Module exports and documentation
//! ├── db.rs           - Analysis model and database operations
//! ├── handlers.rs     - HTTP handlers (run, list, export)
//! └── pdf.rs          - PDF rendering
//! ```

/// Analysis model and database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

/// PDF rendering
pub mod pdf;

pub use handlers::{analysis_pdf, list_my_analyses, run_analysis};
