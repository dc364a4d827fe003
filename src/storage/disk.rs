use crate::storage::{CSS_FILE, HTML_FILE, JS_FILE};
use crate::MirrorError;
use std::fs;
use std::path::Path;

/// Creates `directory` and any missing parents
///
/// An existing directory is not an error.
pub fn ensure_directory(directory: &Path) -> Result<(), MirrorError> {
    fs::create_dir_all(directory).map_err(|source| MirrorError::Persistence {
        path: directory.to_path_buf(),
        source,
    })
}

/// Writes the page's raw HTML into `directory`
///
/// The directory must already exist; see [`ensure_directory`].
pub fn write_html(directory: &Path, html: &[u8]) -> Result<(), MirrorError> {
    write_file(directory, HTML_FILE, html)
}

/// Writes the aggregated stylesheet and script bytes into `directory`
pub fn write_assets(directory: &Path, css: &[u8], js: &[u8]) -> Result<(), MirrorError> {
    write_file(directory, CSS_FILE, css)?;
    write_file(directory, JS_FILE, js)
}

/// Persists a complete page: creates the directory and writes all three files
///
/// Page visits call [`ensure_directory`], [`write_html`] and [`write_assets`]
/// separately instead, so the HTML is on disk before the page is parsed.
///
/// # Arguments
///
/// * `directory` - The page's storage directory
/// * `html` - The raw HTML payload
/// * `css` - The aggregated stylesheet bytes
/// * `js` - The aggregated script bytes
///
/// # Returns
///
/// * `Ok(())` - All three files were written
/// * `Err(MirrorError::Persistence)` - Directory creation or a write failed
pub fn persist_page(directory: &Path, html: &[u8], css: &[u8], js: &[u8]) -> Result<(), MirrorError> {
    ensure_directory(directory)?;
    write_html(directory, html)?;
    write_assets(directory, css, js)
}

fn write_file(directory: &Path, name: &str, content: &[u8]) -> Result<(), MirrorError> {
    let path = directory.join(name);
    fs::write(&path, content).map_err(|source| MirrorError::Persistence {
        path: path.clone(),
        source,
    })?;
    tracing::info!("Saved {} ({} bytes)", path.display(), content.len());
    Ok(())
}
