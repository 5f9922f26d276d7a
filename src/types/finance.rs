//! Personal finance types served by the dashboard API

use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Investment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: RecordId,
    pub description: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// kg CO2 attributed to this transaction
    #[serde(default)]
    pub carbon_footprint: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Savings,
    Investment,
    Debt,
    Income,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialGoal {
    pub id: RecordId,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: String,
    pub category: GoalCategory,
    pub priority: Priority,
    pub status: GoalStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub date_achieved: String,
    pub category: String,
    pub value: f64,
}

/// Scalar account metrics (percentages are 0-100)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FinancialMetrics {
    pub total_assets: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings_rate: f64,
    pub investment_returns: f64,
    pub debt_to_income_ratio: f64,
}

/// Full `/dashboard` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardPayload {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<FinancialGoal>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub metrics: FinancialMetrics,
}
