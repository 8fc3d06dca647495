//! Document loading.
//!
//! Loading is a three-step pipeline over a `serde_json::Value`:
//!
//! 1. optionally fold nested clause lists into their parent clause's prose
//!    ([`flatten_nested_clauses`]),
//! 2. write positional fields from list order ([`number_document`]),
//! 3. deserialize and validate ([`Constitution::from_value`]).
//!
//! The full annotated document ships inside the crate and is available
//! through [`load_embedded`].

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::{validate_path_prefix, LoadOptions, MAX_DOCUMENT_SIZE};
use crate::error::{ConstitutionError, Result};
use crate::types::Constitution;

/// The full annotated document.
pub const EMBEDDED_DOCUMENT: &str = include_str!("../data/usconstitution.full.json");

/// Load the embedded document.
///
/// # Errors
///
/// Returns `ConstitutionError::InvalidPrefix` if `options.prefix` ends
/// with `/`.
pub fn load_embedded(options: &LoadOptions) -> Result<Constitution> {
    load_from_str(EMBEDDED_DOCUMENT, options)
}

/// Load a document from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, exceeds
/// [`MAX_DOCUMENT_SIZE`], is not valid JSON, or fails validation.
pub fn load_from_path<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Constitution> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading document from file");

    let size = usize::try_from(fs::metadata(path)?.len()).unwrap_or(usize::MAX);
    if size > MAX_DOCUMENT_SIZE {
        tracing::warn!(size, max = MAX_DOCUMENT_SIZE, "Document exceeds size limit");
        return Err(ConstitutionError::DocumentTooLarge {
            size,
            max: MAX_DOCUMENT_SIZE,
        });
    }

    let json = fs::read_to_string(path)?;
    load_from_str(&json, options)
}

/// Load a document from a JSON string.
///
/// # Errors
///
/// Returns an error if the string exceeds [`MAX_DOCUMENT_SIZE`], is not
/// valid JSON, or fails validation.
pub fn load_from_str(json: &str, options: &LoadOptions) -> Result<Constitution> {
    if json.len() > MAX_DOCUMENT_SIZE {
        tracing::warn!(size = json.len(), max = MAX_DOCUMENT_SIZE, "Document exceeds size limit");
        return Err(ConstitutionError::DocumentTooLarge {
            size: json.len(),
            max: MAX_DOCUMENT_SIZE,
        });
    }

    let value: Value = serde_json::from_str(json)?;
    load_from_value(value, options)
}

/// Load a document from an already-parsed JSON value.
///
/// # Errors
///
/// Returns `ConstitutionError::InvalidPrefix` for a prefix ending in `/` and
/// `ConstitutionError::Schema` if the document does not match the schema.
pub fn load_from_value(mut value: Value, options: &LoadOptions) -> Result<Constitution> {
    validate_path_prefix(&options.prefix)?;

    if options.flatten_clauses {
        flatten_nested_clauses(&mut value)?;
    }
    number_document(&mut value)?;

    if !options.prefix.is_empty() {
        as_record(&mut value, "$")?
            .insert("path_prefix".to_string(), options.prefix.clone().into());
    }

    let constitution = Constitution::from_value(value)?;
    tracing::debug!(
        articles = constitution.articles.len(),
        amendments = constitution.amendments.len(),
        prefix = %constitution.path_prefix,
        "Loaded constitution"
    );
    Ok(constitution)
}

/// Write `index`, `article_number` and `section_number` from list position.
///
/// Existing values are overwritten. Amendment sections receive their
/// amendment's number as `article_number`.
///
/// # Errors
///
/// Returns `ConstitutionError::Schema` if a record or list has the wrong
/// JSON type.
pub fn number_document(doc: &mut Value) -> Result<()> {
    let root = as_record(doc, "$")?;

    if let Some(articles) = list_mut(root, "articles", "$")? {
        for (i, article) in articles.iter_mut().enumerate() {
            let path = format!("articles[{i}]");
            let article_number = ordinal(i);
            let record = as_record(article, &path)?;
            record.insert("index".to_string(), article_number.into());

            if let Some(sections) = list_mut(record, "sections", &path)? {
                for (j, section) in sections.iter_mut().enumerate() {
                    let section_path = format!("{path}.sections[{j}]");
                    let section_number = ordinal(j);
                    let section_record = as_record(section, &section_path)?;
                    section_record.insert("index".to_string(), section_number.into());
                    section_record.insert("article_number".to_string(), article_number.into());
                    number_clauses(
                        section_record,
                        &section_path,
                        article_number,
                        Some(section_number),
                    )?;
                }
            }
            number_clauses(record, &path, article_number, None)?;
        }
    }

    if let Some(amendments) = list_mut(root, "amendments", "$")? {
        for (i, amendment) in amendments.iter_mut().enumerate() {
            let path = format!("amendments[{i}]");
            let amendment_number = ordinal(i);
            let record = as_record(amendment, &path)?;
            record.insert("index".to_string(), amendment_number.into());

            if let Some(sections) = list_mut(record, "sections", &path)? {
                for (j, section) in sections.iter_mut().enumerate() {
                    let section_record = as_record(section, &format!("{path}.sections[{j}]"))?;
                    section_record.remove("amendment_number");
                    section_record.insert("index".to_string(), ordinal(j).into());
                    section_record.insert("article_number".to_string(), amendment_number.into());
                }
            }
        }
    }

    Ok(())
}

fn number_clauses(
    parent: &mut Map<String, Value>,
    path: &str,
    article_number: u32,
    section_number: Option<u32>,
) -> Result<()> {
    let Some(clauses) = list_mut(parent, "clauses", path)? else {
        return Ok(());
    };

    for (k, clause) in clauses.iter_mut().enumerate() {
        let record = as_record(clause, &format!("{path}.clauses[{k}]"))?;
        record.insert("index".to_string(), ordinal(k).into());
        record.insert("article_number".to_string(), article_number.into());
        match section_number {
            Some(section) => record.insert("section_number".to_string(), section.into()),
            None => record.remove("section_number"),
        };
    }
    Ok(())
}

/// Fold clause records nested inside a clause into that clause's content.
///
/// The nested records' text is appended, depth-first, after the clause's
/// own text and the nested list is removed.
///
/// # Errors
///
/// Returns `ConstitutionError::Schema` if a record, list or content field
/// has the wrong JSON type.
pub fn flatten_nested_clauses(doc: &mut Value) -> Result<()> {
    let root = as_record(doc, "$")?;
    let Some(articles) = list_mut(root, "articles", "$")? else {
        return Ok(());
    };

    for (i, article) in articles.iter_mut().enumerate() {
        let path = format!("articles[{i}]");
        let record = as_record(article, &path)?;

        if let Some(sections) = list_mut(record, "sections", &path)? {
            for (j, section) in sections.iter_mut().enumerate() {
                let section_path = format!("{path}.sections[{j}]");
                flatten_clause_list(as_record(section, &section_path)?, &section_path)?;
            }
        }
        flatten_clause_list(record, &path)?;
    }
    Ok(())
}

fn flatten_clause_list(parent: &mut Map<String, Value>, path: &str) -> Result<()> {
    let Some(clauses) = list_mut(parent, "clauses", path)? else {
        return Ok(());
    };

    for (k, clause) in clauses.iter_mut().enumerate() {
        let clause_path = format!("{path}.clauses[{k}]");
        let record = as_record(clause, &clause_path)?;
        if !matches!(record.get("clauses"), Some(Value::Array(nested)) if !nested.is_empty()) {
            continue;
        }

        let text = flattened_text(record, &clause_path)?;
        tracing::debug!(path = %clause_path, "Flattened nested clauses");
        record.remove("clauses");
        record.insert("content".to_string(), text.into());
    }
    Ok(())
}

fn flattened_text(record: &mut Map<String, Value>, path: &str) -> Result<String> {
    let mut parts = vec![content_text(record.get("content"), path)?];
    if let Some(nested) = list_mut(record, "clauses", path)? {
        for (k, child) in nested.iter_mut().enumerate() {
            let child_path = format!("{path}.clauses[{k}]");
            parts.push(flattened_text(as_record(child, &child_path)?, &child_path)?);
        }
    }
    parts.retain(|p| !p.is_empty());
    Ok(parts.join(" "))
}

fn content_text(content: Option<&Value>, path: &str) -> Result<String> {
    match content {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Array(fragments)) => {
            let mut parts = Vec::with_capacity(fragments.len());
            for fragment in fragments {
                match fragment {
                    Value::String(s) => parts.push(s.as_str()),
                    _ => {
                        return Err(ConstitutionError::schema(
                            path,
                            "content fragment is not a string",
                        ))
                    }
                }
            }
            Ok(parts.join(" ").trim().to_string())
        }
        Some(_) => Err(ConstitutionError::schema(path, "content is not a string or list")),
    }
}

fn as_record<'v>(value: &'v mut Value, path: &str) -> Result<&'v mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| ConstitutionError::schema(path, "expected an object"))
}

/// The list under `key`; `None` when absent or `null`.
fn list_mut<'v>(
    record: &'v mut Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'v mut Vec<Value>>> {
    match record.get_mut(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(ConstitutionError::schema(path, format!("'{key}' is not a list"))),
    }
}

fn ordinal(position: usize) -> u32 {
    u32::try_from(position + 1).unwrap_or(u32::MAX)
}
