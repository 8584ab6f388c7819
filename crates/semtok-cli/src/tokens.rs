//! Token file reading and writing
//!
//! Token files are JSON objects. Leaves are strings, numbers, or objects
//! with a `value` (or `$value`) key; nested objects join their keys with
//! `.`.

use anyhow::{bail, Context, Result};
use semtok_token::{MemoryTokenStore, Token, TokenStore};
use serde_json::{Map, Value};
use std::path::Path;

/// Read and flatten a token file
pub(crate) fn load_store(path: &Path) -> Result<MemoryTokenStore> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let store = parse_store(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(path = %path.display(), tokens = store.len(), "Loaded tokens");
    Ok(store)
}

/// Flatten token JSON text into a store
pub(crate) fn parse_store(text: &str) -> Result<MemoryTokenStore> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(map) = root else {
        bail!("token file must contain a JSON object");
    };

    let mut store = MemoryTokenStore::new();
    flatten_into(&mut store, "", &map)?;
    Ok(store)
}

fn leaf_text(path: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            bail!("unsupported value at {path}")
        }
    }
}

fn flatten_into(store: &mut MemoryTokenStore, prefix: &str, map: &Map<String, Value>) -> Result<()> {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let Value::Object(inner) = value else {
            store.insert(Token::from_raw(path.as_str(), &leaf_text(&path, value)?));
            continue;
        };

        match inner.get("value").or_else(|| inner.get("$value")) {
            Some(raw) => {
                let mut token = Token::from_raw(path.as_str(), &leaf_text(&path, raw)?);
                let description = inner
                    .get("description")
                    .or_else(|| inner.get("$description"))
                    .and_then(Value::as_str);
                if let Some(description) = description {
                    token = token.with_description(description);
                }
                store.insert(token);
            }
            None => flatten_into(store, &path, inner)?,
        }
    }
    Ok(())
}

/// Flat `path -> raw value` JSON of a store
pub(crate) fn store_to_json(store: &dyn TokenStore) -> Value {
    let map: Map<String, Value> = store
        .iter()
        .map(|token| (token.path.clone(), Value::String(token.raw_text())))
        .collect();
    Value::Object(map)
}

/// Write a store as a flat token file
pub(crate) fn save_store(path: &Path, store: &dyn TokenStore) -> Result<()> {
    let text = serde_json::to_string_pretty(&store_to_json(store))?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), tokens = store.len(), "Wrote tokens");
    Ok(())
}
