//! Footprint file loaders (JSON array and JSONL)

mod json;
mod jsonl;

pub use json::JsonArrayFormat;
pub use jsonl::JsonLinesFormat;

use crate::services::Normalizer;
use crate::types::{CarbonMetrics, CarbontrackError, RawFootprint, Record, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A footprint file format
pub trait FootprintFormat: Send + Sync {
    /// Format name (e.g., "jsonl")
    fn name(&self) -> &str;

    /// Whether this format handles `path`
    fn accepts(&self, path: &Path) -> bool;

    /// Parse a single file into raw footprints, in file order
    fn parse_file(&self, path: &Path) -> Result<Vec<RawFootprint>>;
}

/// Loads footprint files matching a path or glob and normalizes them
pub struct FootprintLoader {
    formats: Vec<Box<dyn FootprintFormat>>,
    normalizer: Normalizer,
}

impl FootprintLoader {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            formats: vec![Box::new(JsonLinesFormat), Box::new(JsonArrayFormat)],
            normalizer,
        }
    }

    /// Registered formats, in dispatch order
    pub fn formats(&self) -> &[Box<dyn FootprintFormat>] {
        &self.formats
    }

    /// Format for `path`: JSONL by extension, JSON array otherwise
    fn format_for(&self, path: &Path) -> &dyn FootprintFormat {
        self.formats
            .iter()
            .find(|f| f.accepts(path))
            .map(|f| f.as_ref())
            .unwrap_or(&JsonArrayFormat)
    }

    /// Parse one file with the matching format
    pub fn parse_file(&self, path: &Path) -> Result<Vec<RawFootprint>> {
        let format = self.format_for(path);
        debug!(path = %path.display(), format = format.name(), "parsing footprint file");
        format.parse_file(path)
    }

    /// Expand `pattern` into files, sorted by path.
    /// A directory expands to its `*.json` and `*.jsonl` files.
    pub fn collect_files(pattern: &str) -> Vec<PathBuf> {
        let path = Path::new(pattern);
        let patterns: Vec<String> = if path.is_dir() {
            ["*.json", "*.jsonl"]
                .iter()
                .map(|ext| path.join(ext).to_string_lossy().into_owned())
                .collect()
        } else {
            vec![pattern.to_string()]
        };

        let mut files: Vec<PathBuf> = patterns
            .iter()
            .filter_map(|p| glob::glob(p).ok())
            .flat_map(|paths| paths.filter_map(|e| e.ok()))
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        files.dedup();
        files
    }

    /// Parse and normalize all matching files in parallel.
    ///
    /// Any unreadable file or invalid record fails the whole load; record
    /// errors carry the file and the index within it.
    pub fn load(&self, pattern: &str) -> Result<Vec<Record>> {
        let files = Self::collect_files(pattern);
        if files.is_empty() {
            return Err(CarbontrackError::Parse(format!(
                "no footprint files match '{}'",
                pattern
            )));
        }

        let per_file: Vec<Vec<Record>> = files
            .par_iter()
            .map(|f| {
                self.parse_file(f)
                    .and_then(|raws| self.normalizer.normalize_footprints(&raws))
                    .map_err(|e| e.in_file(f))
            })
            .collect::<Result<_>>()?;

        let records: Vec<Record> = per_file.into_iter().flatten().collect();
        info!(files = files.len(), records = records.len(), "loaded footprints");

        Ok(records)
    }
}

/// Read a monthly `CarbonMetrics` JSON document
pub fn load_carbon_metrics(path: &Path) -> Result<CarbonMetrics> {
    let mut bytes = fs::read(path).map_err(|e| CarbontrackError::Io(e).in_file(path))?;
    let metrics: CarbonMetrics = simd_json::from_slice(&mut bytes)
        .map_err(|e| CarbontrackError::Parse(e.to_string()).in_file(path))?;

    let values = [
        metrics.total_monthly_emissions,
        metrics.target_monthly_emissions,
        metrics.carbon_offset_cost,
        metrics.carbon_neutrality_progress,
        metrics.environmental_impact_score,
    ];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(CarbontrackError::Parse(format!(
            "{}: carbon metrics must be non-negative numbers",
            path.display()
        )));
    }
    debug!(path = %path.display(), "loaded carbon metrics");
    Ok(metrics)
}

impl Default for FootprintLoader {
    fn default() -> Self {
        Self::new(Normalizer::new())
    }
}
