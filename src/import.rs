// 📂 Cookbook Import - Load a JSON array of raw entries into a cookbook
//
// Every element goes through the same validation as the HTTP entry endpoint.

use crate::entities::Cookbook;
use anyhow::{anyhow, Context as AnyhowContext, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a JSON file holding an array of raw entries
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read cookbook file: {:?}", path.as_ref()))?;

    parse_entries(&content)
}

/// Parse a JSON document holding an array of raw entries
pub fn parse_entries(content: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(content).context("Failed to parse cookbook JSON")?;

    match document {
        Value::Array(entries) => Ok(entries),
        other => Err(anyhow!("Cookbook file must hold a JSON array, found {}", kind_of(&other))),
    }
}

/// Add every entry in order; the first rejection aborts the import.
///
/// Returns how many entries were added.
pub fn import_entries(cookbook: &Cookbook, entries: &[Value]) -> Result<usize> {
    for (index, raw) in entries.iter().enumerate() {
        cookbook
            .add_entry(raw)
            .with_context(|| format!("Entry {} rejected", index))?;
    }

    Ok(entries.len())
}

/// Load a cookbook file into `cookbook`
pub fn import_file<P: AsRef<Path>>(cookbook: &Cookbook, path: P) -> Result<usize> {
    let entries = load_entries(path)?;
    import_entries(cookbook, &entries)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
