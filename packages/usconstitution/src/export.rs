//! Flat provision records for downstream consumers.
//!
//! Each record carries every address of a provision so a site generator or
//! search index can consume the document without walking the tree.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::provision::{Node, ProvisionKind};
use crate::types::Constitution;

/// One provision, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionRecord {
    pub kind: ProvisionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc_id: Option<String>,
    pub path: String,
    pub heading: String,
    pub citation: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl ProvisionRecord {
    fn new(node: Node<'_>, path: String, heading: String, citation: String) -> Self {
        Self {
            kind: node.kind(),
            loc_id: node.loc_id(),
            path,
            heading,
            citation,
            name: node.name().to_string(),
            content: node.content().to_string(),
        }
    }
}

/// The whole document as flat records, in tree order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDocument {
    pub name: String,
    pub path_prefix: String,
    pub provisions: Vec<ProvisionRecord>,
}

/// Output format for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

/// Flatten every node of the document.
///
/// Paths use the document's `path_prefix`; headings and citations use the
/// default root labels.
#[must_use]
pub fn records(constitution: &Constitution) -> Vec<ProvisionRecord> {
    constitution
        .tree()
        .zip(constitution.paths())
        .zip(constitution.headings())
        .zip(constitution.citations())
        .map(|(((node, path), heading), citation)| {
            ProvisionRecord::new(node, path, heading, citation)
        })
        .collect()
}

#[must_use]
pub fn document(constitution: &Constitution) -> ExportDocument {
    ExportDocument {
        name: constitution.name.clone(),
        path_prefix: constitution.path_prefix.clone(),
        provisions: records(constitution),
    }
}

/// Serialize an export document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(doc: &ExportDocument, format: ExportFormat) -> Result<String> {
    let mut output = match format {
        ExportFormat::Json => serde_json::to_string_pretty(doc)?,
        ExportFormat::Yaml => serde_yaml_ng::to_string(doc)?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Render the document and write it to `path`.
///
/// Writes to a temporary sibling first and renames it into place.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub fn save(constitution: &Constitution, format: ExportFormat, path: &Path) -> Result<()> {
    let content = render(&document(constitution), format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));
    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Saved export");
    Ok(())
}
