//! Derived carbon metrics for the environmental dashboard

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::services::catalog::{display_for, ScoreBand};
use crate::services::Aggregator;
use crate::types::{CarbonMetrics, Record, TrendResult};

/// kg CO2 one tree absorbs per year
const KG_PER_TREE: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReductionPotential {
    /// kg above target (negative when already under target)
    pub excess_kg: f64,
    /// `excess_kg` as a percentage of current emissions
    pub percentage: f64,
}

/// Distance from the monthly target
pub fn reduction_potential(metrics: &CarbonMetrics) -> ReductionPotential {
    let excess_kg = metrics.total_monthly_emissions - metrics.target_monthly_emissions;
    ReductionPotential {
        excess_kg,
        percentage: Aggregator::percentage_of_total(excess_kg, metrics.total_monthly_emissions),
    }
}

/// Trees needed to absorb `total_kg`
pub fn trees_to_offset(total_kg: f64) -> u64 {
    if total_kg > 0.0 {
        (total_kg / KG_PER_TREE).ceil() as u64
    } else {
        0
    }
}

/// Monthly target, offset and score figures from a `CarbonMetrics` document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetProgress {
    pub total_monthly_emissions: f64,
    pub target_monthly_emissions: f64,
    pub reduction: ReductionPotential,
    pub carbon_offset_cost: f64,
    /// percent
    pub carbon_neutrality_progress: f64,
    pub environmental_impact_score: f64,
    pub score_band: ScoreBand,
}

impl TargetProgress {
    pub fn from_metrics(metrics: &CarbonMetrics) -> Self {
        Self {
            total_monthly_emissions: metrics.total_monthly_emissions,
            target_monthly_emissions: metrics.target_monthly_emissions,
            reduction: reduction_potential(metrics),
            carbon_offset_cost: metrics.carbon_offset_cost,
            carbon_neutrality_progress: metrics.carbon_neutrality_progress,
            environmental_impact_score: metrics.environmental_impact_score,
            score_band: ScoreBand::from_score(metrics.environmental_impact_score),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub icon: &'static str,
    pub total_amount: f64,
    pub count: u64,
    pub total_secondary: f64,
    pub percentage: f64,
}

/// Everything the summary view shows for one batch of records
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmissionsReport {
    pub total_emissions: f64,
    pub total_spent: f64,
    pub record_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Largest category first
    pub categories: Vec<CategoryRow>,
    pub previous_period_total: f64,
    /// `None` when the previous period total is zero
    pub trend: Option<TrendResult>,
    pub trees_to_offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetProgress>,
}

impl EmissionsReport {
    pub fn build(records: &[Record], previous_period_total: f64) -> Self {
        let summaries = Aggregator::by_category(records);
        let categories = Aggregator::shares(&summaries)
            .into_iter()
            .map(|share| {
                let summary = &summaries[&share.category];
                CategoryRow {
                    icon: display_for(&share.category).icon,
                    total_amount: share.total_amount,
                    count: summary.count,
                    total_secondary: summary.total_secondary,
                    percentage: share.percentage,
                    category: share.category,
                }
            })
            .collect();

        let total_emissions = Aggregator::total(records);
        let trend = match Aggregator::trend(total_emissions, previous_period_total) {
            Ok(trend) => Some(trend),
            Err(e) => {
                debug!("no trend: {}", e);
                None
            }
        };

        Self {
            total_emissions,
            total_spent: records.iter().map(|r| r.secondary_amount).sum(),
            record_count: records.len(),
            first_date: records.iter().map(|r| r.occurred_at).min(),
            last_date: records.iter().map(|r| r.occurred_at).max(),
            categories,
            previous_period_total,
            trend,
            trees_to_offset: trees_to_offset(total_emissions),
            target: None,
        }
    }

    /// Attach monthly target figures
    pub fn with_target(mut self, metrics: &CarbonMetrics) -> Self {
        self.target = Some(TargetProgress::from_metrics(metrics));
        self
    }
}
