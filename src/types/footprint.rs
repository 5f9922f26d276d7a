//! Carbon footprint input shapes

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier that the dashboard API serves either as a number or a string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A footprint entry as it appears in JSON input, before defaults are filled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawFootprint {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub transaction_id: Option<RecordId>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
    /// kg CO2
    #[serde(default)]
    pub co2_emissions: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount_spent: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    /// km, travel only
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub transport_mode: Option<String>,
}

/// Monthly aggregate metrics shown on the environmental dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CarbonMetrics {
    pub total_monthly_emissions: f64,
    pub target_monthly_emissions: f64,
    #[serde(default)]
    pub emissions_by_category: HashMap<String, f64>,
    #[serde(default)]
    pub carbon_offset_cost: f64,
    /// percentage
    #[serde(default)]
    pub carbon_neutrality_progress: f64,
    /// 1-10 scale
    #[serde(default)]
    pub environmental_impact_score: f64,
}
