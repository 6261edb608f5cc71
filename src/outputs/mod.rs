//! Output generation for the insight report.
//!
//! # Submodules
//!
//! - [`json`]: Writes the report as JSON for downstream consumers
//! - [`markdown`]: Renders the report as a readable Markdown digest
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── weekly-2026-01-31.json
//!
//! markdown_output_dir/
//! └── weekly-2026-01-31.md
//! ```

pub mod json;
pub mod markdown;
