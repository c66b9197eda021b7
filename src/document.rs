//! Document loading and writing.
//!
//! The transformation core is pure tree-to-tree; this module is the file
//! boundary around it. Both JSON and YAML inputs are parsed through the YAML
//! parser (JSON is valid YAML 1.2), which keeps mapping order so output
//! diffs stay stable. Output preserves the input format. The YAML serializer
//! never emits anchors or aliases, which the consuming generator does not
//! reliably support.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

/// On-disk format of an OpenAPI document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => Err(DocumentError::UnsupportedExtension(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("OpenAPI file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported file format: .{0}. Expected .json, .yaml, or .yml")]
    UnsupportedExtension(String),

    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to serialize document as JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Load an OpenAPI document, reporting the format it arrived in so the
/// writer can preserve it.
pub fn load_document(path: &Path) -> Result<(Value, DocumentFormat), DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let spec: Value = serde_yaml::from_str(&text)?;
    Ok((spec, format))
}

/// Write a document tree back to disk in the given format, creating parent
/// directories as needed.
pub fn write_document(spec: &Value, path: &Path, format: DocumentFormat) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let text = match format {
        DocumentFormat::Json => {
            let mut rendered = serde_json::to_string_pretty(spec)?;
            rendered.push('\n');
            rendered
        }
        DocumentFormat::Yaml => serde_yaml::to_string(spec)?,
    };
    fs::write(path, text)?;
    Ok(())
}
