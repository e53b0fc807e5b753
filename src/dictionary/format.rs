// Dictionary import/export - JSON object and two-field CSV boundaries
//
// Parsing never touches the active store; callers decide whether to load the
// parsed mapping, so a failed import leaves the current dictionary intact.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Error types for dictionary import
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    /// File extension is not .json or .csv
    #[error("Unsupported dictionary format: {0}")]
    UnsupportedFormat(String),
    /// Content does not parse as a JSON object with string values
    #[error("Malformed dictionary: {0}")]
    Malformed(String),
    /// Failed to read the file
    #[error("Failed to read {0}: {1}")]
    Io(String, String),
}

/// Error types for dictionary export
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    /// Failed to serialize the mapping
    #[error("Failed to serialize mapping: {0}")]
    Serialize(String),
    /// Failed to write the file
    #[error("Failed to write {0}: {1}")]
    Io(String, String),
}

/// Parse a JSON document whose root is an object with string values
///
/// Keys and values are taken exactly as given; trimming happens at lookup
/// time, not on load.
pub fn parse_json_mapping(content: &str) -> Result<HashMap<String, String>, ImportError> {
    let root: serde_json::Value =
        serde_json::from_str(content).map_err(|e| ImportError::Malformed(e.to_string()))?;

    let object = match root.as_object() {
        Some(object) => object,
        None => {
            return Err(ImportError::Malformed(
                "root is not an object".to_string(),
            ))
        }
    };

    let mut mapping = HashMap::with_capacity(object.len());
    for (key, value) in object {
        match value.as_str() {
            Some(value) => {
                mapping.insert(key.clone(), value.to_string());
            }
            None => {
                return Err(ImportError::Malformed(format!(
                    "value for key '{}' is not a string",
                    key
                )))
            }
        }
    }
    Ok(mapping)
}

/// Parse CSV content into a mapping
///
/// Each non-blank line is split on its first comma into key and value (so
/// values may contain commas); both fields are trimmed. Lines yielding an
/// empty key or value are skipped rather than rejected, and a later line
/// with a repeated key wins.
pub fn parse_csv_mapping(content: &str) -> HashMap<String, String> {
    let mut mapping = HashMap::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = match line.split_once(',') {
            Some(fields) => fields,
            None => continue,
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        mapping.insert(key.to_string(), value.to_string());
    }
    mapping
}

/// Parse uploaded dictionary content, dispatching on the file name's extension
///
/// The extension check is ASCII case-insensitive, so `.JSON` uploads work.
pub fn import_named(file_name: &str, content: &str) -> Result<HashMap<String, String>, ImportError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => parse_json_mapping(content),
        Some("csv") => Ok(parse_csv_mapping(content)),
        _ => Err(ImportError::UnsupportedFormat(file_name.to_string())),
    }
}

/// Read and parse a dictionary file from disk
pub fn import_file(path: &Path) -> Result<HashMap<String, String>, ImportError> {
    let file_name = path.to_string_lossy().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| ImportError::Io(file_name.clone(), e.to_string()))?;
    import_named(&file_name, &content)
}

/// Serialize entries as pretty-printed JSON, the same shape import accepts
///
/// Entries pass through a sorted map so the output is deterministic across
/// exports of the same mapping.
pub fn export_json(entries: &[(String, String)]) -> Result<String, ExportError> {
    let sorted: BTreeMap<&str, &str> = entries
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    serde_json::to_string_pretty(&sorted).map_err(|e| ExportError::Serialize(e.to_string()))
}

/// Write the exported JSON to a file using atomic write (temp file + rename)
pub fn export_to_file(path: &Path, entries: &[(String, String)]) -> Result<(), ExportError> {
    let content = export_json(entries)?;
    let display = path.to_string_lossy().to_string();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ExportError::Io(display.clone(), e.to_string()))?;
    }

    let temp_path = path.with_extension("tmp");

    // Write to temp file with explicit sync
    {
        let mut file = File::create(&temp_path)
            .map_err(|e| ExportError::Io(display.clone(), e.to_string()))?;
        file.write_all(content.as_bytes())
            .map_err(|e| ExportError::Io(display.clone(), e.to_string()))?;
        file.sync_all()
            .map_err(|e| ExportError::Io(display.clone(), e.to_string()))?;
    } // File closed here

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        ExportError::Io(display, e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
