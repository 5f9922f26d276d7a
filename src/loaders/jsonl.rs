//! JSONL footprint files (one footprint per line)

use crate::types::{CarbontrackError, RawFootprint, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::FootprintFormat;

pub struct JsonLinesFormat;

impl FootprintFormat for JsonLinesFormat {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "jsonl")
    }

    fn parse_file(&self, path: &Path) -> Result<Vec<RawFootprint>> {
        let reader = BufReader::new(File::open(path)?);
        let mut raws = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            // Convert to mutable bytes for simd-json
            let mut line_bytes = line.into_bytes();
            let raw: RawFootprint = simd_json::from_slice(&mut line_bytes).map_err(|e| {
                CarbontrackError::Parse(format!("line {}: {}", line_no + 1, e))
            })?;
            raws.push(raw);
        }

        Ok(raws)
    }
}
