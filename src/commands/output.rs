use anyhow::{Context, Result};
use colored::*;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Pretty JSON with two-space indentation
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

/// Echo the document to stdout (unless `print` is off) and write it to `path`
pub fn emit_json<T: Serialize>(value: &T, path: &Path, print: bool) -> Result<()> {
    let json = to_pretty_json(value)?;

    if print {
        println!("{}", json);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} ({} bytes)", path.display(), json.len());
    eprintln!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

/// Read a JSON document written by one of the export commands
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
