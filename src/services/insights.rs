//! Transaction-derived account metrics and dashboard insights

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::services::goals::{goal_progress, overdue_goals};
use crate::services::normalizer::{normalize_transaction_amount, parse_date};
use crate::services::{Aggregator, Normalizer};
use crate::types::{
    Achievement, FinancialGoal, FinancialMetrics, Result, Transaction, TransactionKind,
};

/// Days counted as "this month" for spending and achievements
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Recent spending above this is flagged
pub const HIGH_MONTHLY_EXPENSES: f64 = 5000.0;

/// Goal progress (percent) above which a goal counts as almost complete
pub const NEAR_COMPLETE_PERCENT: f64 = 80.0;

/// Account metrics from raw transactions.
///
/// Monthly figures are per-transaction averages of each kind. Debt-to-income
/// and investment returns cannot be derived from transactions and stay 0.
pub fn metrics_from_transactions(transactions: &[Transaction]) -> FinancialMetrics {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut total_investments = 0.0;
    let mut income_count = 0usize;
    let mut expense_count = 0usize;

    for tx in transactions {
        let signed = normalize_transaction_amount(tx.amount, tx.kind);
        match tx.kind {
            TransactionKind::Income => {
                total_income += signed;
                income_count += 1;
            }
            TransactionKind::Expense => {
                total_expenses += signed.abs();
                expense_count += 1;
            }
            TransactionKind::Investment => total_investments += signed.abs(),
        }
    }

    let monthly_income = total_income / income_count.max(1) as f64;
    let monthly_expenses = total_expenses / expense_count.max(1) as f64;

    FinancialMetrics {
        total_assets: total_income - total_expenses + total_investments,
        monthly_income,
        monthly_expenses,
        savings_rate: Aggregator::percentage_of_total(
            monthly_income - monthly_expenses,
            monthly_income,
        ),
        investment_returns: 0.0,
        debt_to_income_ratio: 0.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    NoTransactions,
    HighMonthlyExpenses { total: f64 },
    TopSpendingCategory { category: String, total: f64 },
    OverdueGoals { count: usize },
    GoalsNearlyComplete { count: usize },
    RecentAchievements { count: usize },
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransactions => {
                write!(f, "Start tracking your transactions to get personalized insights.")
            }
            Self::HighMonthlyExpenses { total } => write!(
                f,
                "Your monthly expenses (${:.2}) are higher than average. Consider reviewing your budget.",
                total
            ),
            Self::TopSpendingCategory { category, .. } => {
                write!(f, "Your highest spending category this month is {}.", category)
            }
            Self::OverdueGoals { count } => write!(
                f,
                "You have {} overdue goal{}. Consider reviewing your timeline.",
                count,
                plural(*count)
            ),
            Self::GoalsNearlyComplete { count } => write!(
                f,
                "Great progress! {} of your goals {} almost complete.",
                count,
                if *count == 1 { "is" } else { "are" }
            ),
            Self::RecentAchievements { count } => write!(
                f,
                "Congratulations! You've earned {} achievement{} this month.",
                count,
                plural(*count)
            ),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn is_recent(date: &str, today: NaiveDate) -> bool {
    parse_date(date)
        .map(|d| (today - d).num_days())
        .is_some_and(|days| (0..=RECENT_WINDOW_DAYS).contains(&days))
}

/// Insights over spending, goals and achievements as of `today`.
///
/// Expense categories go through `normalizer`, so blank labels land in its
/// fallback bucket. Entries with unparseable dates are never recent.
pub fn generate_insights(
    transactions: &[Transaction],
    goals: &[FinancialGoal],
    achievements: &[Achievement],
    normalizer: &Normalizer,
    today: NaiveDate,
) -> Result<Vec<Insight>> {
    if transactions.is_empty() {
        return Ok(vec![Insight::NoTransactions]);
    }

    let mut insights = Vec::new();

    let recent_expenses: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && is_recent(&t.date, today))
        .cloned()
        .collect();
    let records = normalizer.normalize_transactions(&recent_expenses)?;

    let total = Aggregator::total(&records);
    if total > HIGH_MONTHLY_EXPENSES {
        insights.push(Insight::HighMonthlyExpenses { total });
    }
    if let Some(top) = Aggregator::shares(&Aggregator::by_category(&records))
        .into_iter()
        .next()
    {
        insights.push(Insight::TopSpendingCategory {
            category: top.category,
            total: top.total_amount,
        });
    }

    let overdue = overdue_goals(goals, today).len();
    if overdue > 0 {
        insights.push(Insight::OverdueGoals { count: overdue });
    }
    let nearly_complete = goals
        .iter()
        .filter(|g| goal_progress(g) > NEAR_COMPLETE_PERCENT)
        .count();
    if nearly_complete > 0 {
        insights.push(Insight::GoalsNearlyComplete {
            count: nearly_complete,
        });
    }

    let recent_achievements = achievements
        .iter()
        .filter(|a| is_recent(&a.date_achieved, today))
        .count();
    if recent_achievements > 0 {
        insights.push(Insight::RecentAchievements {
            count: recent_achievements,
        });
    }

    Ok(insights)
}
