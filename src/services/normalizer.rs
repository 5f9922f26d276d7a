//! Ingestion boundary: raw footprints and transactions to `Record`s
//!
//! All defaulting happens here. A missing spend becomes 0, a missing or
//! unrecognized category becomes the fallback bucket, and a missing
//! emissions value or date rejects the whole batch.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::types::{
    CarbontrackError, RawFootprint, Record, Result, Transaction, TransactionKind,
    FALLBACK_CATEGORY,
};

/// Footprint categories recognized without configuration
pub const DEFAULT_CATEGORIES: [&str; 6] =
    ["transport", "food", "shopping", "utilities", "travel", "other"];

/// Resolves category labels and converts input shapes into records
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// `None` accepts every non-blank label
    known: Option<HashSet<String>>,
    fallback: String,
}

impl Normalizer {
    /// Normalizer restricted to the default footprint categories
    pub fn new() -> Self {
        Self::with_categories(DEFAULT_CATEGORIES.iter().copied(), FALLBACK_CATEGORY)
    }

    /// Normalizer restricted to `categories`; anything else maps to `fallback`
    pub fn with_categories<I, S>(categories: I, fallback: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fallback = fallback.trim().to_lowercase();
        let mut known: HashSet<String> = categories
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        known.insert(fallback.clone());
        Self {
            known: Some(known),
            fallback,
        }
    }

    /// Normalizer that keeps any non-blank label (transaction categories)
    pub fn open(fallback: &str) -> Self {
        Self {
            known: None,
            fallback: fallback.trim().to_string(),
        }
    }

    /// Map a raw label to its aggregation category.
    ///
    /// Known labels match case-insensitively and come back lowercase.
    pub fn resolve_category(&self, label: Option<&str>) -> String {
        let trimmed = label.map(str::trim).unwrap_or("");
        if trimmed.is_empty() {
            return self.fallback.clone();
        }

        match &self.known {
            None => trimmed.to_string(),
            Some(known) => {
                let lowered = trimmed.to_lowercase();
                if known.contains(&lowered) {
                    lowered
                } else {
                    debug!(category = trimmed, fallback = %self.fallback, "unrecognized category");
                    self.fallback.clone()
                }
            }
        }
    }

    /// Convert one footprint; `index` is its position in the batch
    pub fn footprint_to_record(&self, raw: &RawFootprint, index: usize) -> Result<Record> {
        let amount = raw
            .co2_emissions
            .ok_or_else(|| invalid(index, "missing co2_emissions"))?;
        check_non_negative(amount, index, "co2_emissions")?;

        let date = raw
            .date
            .as_deref()
            .ok_or_else(|| invalid(index, "missing date"))?;
        let occurred_at =
            parse_date(date).ok_or_else(|| invalid(index, &format!("unparseable date '{}'", date)))?;

        let secondary_amount = raw.amount_spent.unwrap_or(0.0);
        check_non_negative(secondary_amount, index, "amount_spent")?;

        Ok(Record {
            category: self.resolve_category(raw.category.as_deref()),
            amount,
            secondary_amount,
            occurred_at,
            activity: raw.activity.clone(),
        })
    }

    /// Convert a batch of footprints; the first invalid entry rejects the batch
    pub fn normalize_footprints(&self, raws: &[RawFootprint]) -> Result<Vec<Record>> {
        raws.iter()
            .enumerate()
            .map(|(index, raw)| self.footprint_to_record(raw, index))
            .collect()
    }

    /// Convert a transaction: amount is the absolute value, the attributed
    /// footprint becomes the secondary amount
    pub fn transaction_to_record(&self, tx: &Transaction, index: usize) -> Result<Record> {
        let amount = tx.amount.abs();
        check_non_negative(amount, index, "amount")?;

        let occurred_at = parse_date(&tx.date)
            .ok_or_else(|| invalid(index, &format!("unparseable date '{}'", tx.date)))?;

        let secondary_amount = tx.carbon_footprint.unwrap_or(0.0);
        check_non_negative(secondary_amount, index, "carbon_footprint")?;

        Ok(Record {
            category: self.resolve_category(Some(&tx.category)),
            amount,
            secondary_amount,
            occurred_at,
            activity: Some(tx.description.clone()),
        })
    }

    /// Convert a batch of transactions with the same policy as footprints
    pub fn normalize_transactions(&self, txs: &[Transaction]) -> Result<Vec<Record>> {
        txs.iter()
            .enumerate()
            .map(|(index, tx)| self.transaction_to_record(tx, index))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Signed amount for storage: expenses negative, income and investment positive
pub fn normalize_transaction_amount(amount: f64, kind: TransactionKind) -> f64 {
    match kind {
        TransactionKind::Expense if amount > 0.0 => -amount,
        TransactionKind::Income | TransactionKind::Investment if amount < 0.0 => amount.abs(),
        _ => amount,
    }
}

fn invalid(index: usize, field: &str) -> CarbontrackError {
    CarbontrackError::InvalidRecord {
        index,
        field: field.to_string(),
        file: None,
    }
}

fn check_non_negative(value: f64, index: usize, field: &str) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(index, &format!("{} must be a non-negative number", field)))
    }
}
