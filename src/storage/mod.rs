//! Storage module for persisting mirrored pages
//!
//! Every visited page gets its own directory holding exactly three files:
//! the raw HTML, the aggregated stylesheet text, and the aggregated script
//! text. Writes replace existing files, so persisting the same page twice
//! leaves identical content behind.

mod disk;

pub use disk::{ensure_directory, persist_page, write_assets, write_html};

/// File name of the page's raw HTML
pub const HTML_FILE: &str = "index.html";

/// File name of the aggregated stylesheet text
pub const CSS_FILE: &str = "styles.css";

/// File name of the aggregated script text
pub const JS_FILE: &str = "scripts.js";
