//! Pretty-printed JSON files written atomically

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Serialize `value` to `path` via a temp file and rename, so readers never
/// observe a half-written document
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read and deserialize a JSON file, `None` when it does not exist
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&raw)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("doc.json");

        write_json_atomic(&path, &json!({"a": 1})).unwrap();

        let back: Value = read_json(&path).unwrap().unwrap();
        assert_eq!(back["a"], 1);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.json");

        write_json_atomic(&path, &json!({"a": 1, "b": 2})).unwrap();
        write_json_atomic(&path, &json!({"a": 3})).unwrap();

        let back: Value = read_json(&path).unwrap().unwrap();
        assert_eq!(back, json!({"a": 3}));
    }

    #[test]
    fn test_read_missing() {
        let temp = TempDir::new().unwrap();
        let missing: Option<Value> = read_json(&temp.path().join("nope.json")).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_read_malformed_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(read_json::<Value>(&path).is_err());
    }
}
