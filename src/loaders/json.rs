//! JSON array footprint files

use crate::types::{CarbontrackError, RawFootprint, Result};
use std::fs;
use std::path::Path;

use super::FootprintFormat;

/// A file holding a single JSON array of footprints
pub struct JsonArrayFormat;

impl FootprintFormat for JsonArrayFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "json")
    }

    fn parse_file(&self, path: &Path) -> Result<Vec<RawFootprint>> {
        let mut bytes = fs::read(path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        simd_json::from_slice(&mut bytes).map_err(|e| CarbontrackError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fp.json");
        fs::write(
            &path,
            r#"[
                {"id": "1", "category": "transport", "co2_emissions": 45.2, "date": "2025-01-08"},
                {"id": 2, "category": "food", "co2_emissions": 12.5, "date": "2025-01-12", "amount_spent": 450}
            ]"#,
        )
        .unwrap();

        let raws = JsonArrayFormat.parse_file(&path).unwrap();
        assert_eq!(raws.len(), 2);
        assert_eq!(raws[1].amount_spent, Some(450.0));
    }

    #[test]
    fn test_parse_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.json");
        fs::write(&path, "\n").unwrap();

        assert!(JsonArrayFormat.parse_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_parse_not_an_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("obj.json");
        fs::write(&path, r#"{"category": "food"}"#).unwrap();

        assert!(matches!(
            JsonArrayFormat.parse_file(&path),
            Err(CarbontrackError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = JsonArrayFormat.parse_file(Path::new("tests/fixtures/nope.json"));
        assert!(matches!(result, Err(CarbontrackError::Io(_))));
    }
}
