//! Writes the generated page.

use std::fs;
use std::path::Path;

use crate::DocsError;

/// Writes an HTML page to the given path, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`DocsError::Io`] if the directory cannot be created or the file
/// cannot be written.
pub fn write_html(path: &Path, content: &str) -> Result<(), DocsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DocsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| DocsError::Io {
        path: path.to_path_buf(),
        source,
    })
}
