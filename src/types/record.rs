//! Record and derived summary types for emissions aggregation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bucket for records whose category is missing or unrecognized
pub const FALLBACK_CATEGORY: &str = "other";

/// A dated, categorized quantity ready for aggregation.
///
/// Records are produced by the normalizer; every optional input field has
/// already been defaulted, so aggregation never coerces values itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub category: String,
    /// Aggregated quantity (kg CO2 for footprints, currency for transactions)
    pub amount: f64,
    /// Associated quantity, e.g. money spent on the activity
    pub secondary_amount: f64,
    pub occurred_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

impl Record {
    /// Category used as aggregation key; blank labels fall back to "other"
    pub fn category_key(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            FALLBACK_CATEGORY
        } else {
            trimmed
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategorySummary {
    pub total_amount: f64,
    pub count: u64,
    pub total_secondary: f64,
}

impl CategorySummary {
    pub fn add(&mut self, record: &Record) {
        self.total_amount += record.amount;
        self.total_secondary += record.secondary_amount;
        self.count = self.count.saturating_add(1);
    }
}

/// One category's contribution to the overall total
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total_amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increase,
    Decrease,
}

impl TrendDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Increase => "↑",
            Self::Decrease => "↓",
        }
    }
}

/// Period-over-period change between two totals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendResult {
    pub percentage_change: f64,
    pub direction: TrendDirection,
}

/// Ordering applied to record listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent first
    #[default]
    Date,
    /// Largest amount first
    Amount,
    /// Category label, A to Z
    Category,
}
