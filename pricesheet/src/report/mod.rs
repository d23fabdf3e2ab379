//! Report rendering and reading.
//!
//! - Table: pipe table markup
//! - Document: the full Markdown report
//! - Reader: parse a rendered report back into rows

pub mod document;
pub mod reader;
pub mod table;

pub use document::{brand_from_path, render_document};
pub use reader::{parse_report, ParsedReport};
pub use table::render_pipe_table;
