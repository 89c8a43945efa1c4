//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use marksmith_core::{Config, Document, Session};
use tracing::debug;

/// Load a document from disk. `.json` files hold a serialized document;
/// anything else is read as plain text, one paragraph per line.
pub fn load_file(path: &str) -> Result<(Document, Session)> {
    let path = Path::new(path);
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let content = fs::read_to_string(&canonical)
        .with_context(|| format!("Failed to read file: {}", canonical.display()))?;

    let is_json = canonical
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let document = if is_json {
        Document::from_json(&content)
            .with_context(|| format!("Failed to parse document: {}", canonical.display()))?
    } else {
        Document::from_plain_text(&content)
    };

    let filepath = canonical.to_string_lossy().to_string();
    let filename = canonical
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = canonical
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string());

    Ok((document, Session::with_file_info(title, filepath, filename)))
}

/// Default config location: `<config dir>/marksmith/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("marksmith").join("config.toml"))
}

/// Read the config file, falling back to defaults when it does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    Config::from_toml(&content).with_context(|| format!("Invalid config: {}", path.display()))
}
