//! `carbontrack dashboard` view model

use chrono::NaiveDate;
use serde::Serialize;

use carbontrack::config::Config;
use carbontrack::services::goals::{
    deadline_label, financial_health_score, goal_progress, overdue_goals, HealthInputs,
    HealthStatus,
};
use carbontrack::services::insights::{generate_insights, metrics_from_transactions, Insight};
use carbontrack::services::normalizer::parse_date;
use carbontrack::services::{Aggregator, Normalizer};
use carbontrack::types::{
    CategoryShare, DashboardPayload, FinancialMetrics, Result, TransactionKind,
};

#[derive(Debug, Serialize)]
pub struct GoalRow {
    pub title: String,
    pub progress: f64,
    pub deadline: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub metrics: FinancialMetrics,
    /// Metrics recomputed from the listed transactions
    pub transaction_metrics: FinancialMetrics,
    pub health_score: f64,
    pub health_status: HealthStatus,
    pub goals: Vec<GoalRow>,
    pub overdue_goals: usize,
    /// Expense transactions by category, largest first
    pub spending: Vec<CategoryShare>,
    /// kg CO2 attributed to transactions
    pub transaction_emissions: f64,
    pub achievements: usize,
    pub insights: Vec<Insight>,
}

impl DashboardView {
    pub fn build(payload: &DashboardPayload, config: &Config, today: NaiveDate) -> Result<Self> {
        let normalizer = Normalizer::open(&config.fallback_category);
        let expenses: Vec<_> = payload
            .transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .cloned()
            .collect();
        let expense_records = normalizer.normalize_transactions(&expenses)?;
        let spending = Aggregator::shares(&Aggregator::by_category(&expense_records));

        let transaction_emissions = payload
            .transactions
            .iter()
            .filter_map(|t| t.carbon_footprint)
            .sum();

        let goals = payload
            .goals
            .iter()
            .map(|g| GoalRow {
                title: g.title.clone(),
                progress: goal_progress(g),
                deadline: parse_date(&g.deadline)
                    .map(|d| deadline_label(d, today))
                    .unwrap_or_else(|| g.deadline.clone()),
            })
            .collect();

        let (health_score, health_status) =
            financial_health_score(&HealthInputs::from_dashboard(&payload.metrics, &payload.goals));

        let insights = generate_insights(
            &payload.transactions,
            &payload.goals,
            &payload.achievements,
            &normalizer,
            today,
        )?;

        Ok(Self {
            metrics: payload.metrics.clone(),
            transaction_metrics: metrics_from_transactions(&payload.transactions),
            health_score,
            health_status,
            goals,
            overdue_goals: overdue_goals(&payload.goals, today).len(),
            spending,
            transaction_emissions,
            achievements: payload.achievements.len(),
            insights,
        })
    }
}
