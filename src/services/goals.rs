//! Financial goal progress and health scoring

use chrono::NaiveDate;
use serde::Serialize;

use crate::services::normalizer::parse_date;
use crate::types::{FinancialGoal, FinancialMetrics, GoalCategory, GoalStatus};

/// Progress towards a goal in percent, capped at 100.
///
/// For debt goals `target_amount` is the original balance and
/// `current_amount` what is still owed.
pub fn goal_progress(goal: &FinancialGoal) -> f64 {
    if goal.target_amount <= 0.0 {
        return 0.0;
    }

    let achieved = match goal.category {
        GoalCategory::Debt => goal.target_amount - goal.current_amount.max(0.0),
        _ => goal.current_amount,
    };

    (achieved / goal.target_amount * 100.0).clamp(0.0, 100.0)
}

/// Human-readable time remaining until `deadline`
pub fn deadline_label(deadline: NaiveDate, today: NaiveDate) -> String {
    let days = (deadline - today).num_days();

    match days {
        d if d < 0 => "Overdue".to_string(),
        0 => "Due today".to_string(),
        1 => "1 day left".to_string(),
        d if d < 30 => format!("{} days left", d),
        d if d < 365 => {
            let months = d / 30;
            format!("{} month{} left", months, if months == 1 { "" } else { "s" })
        }
        d => {
            let years = d / 365;
            format!("{} year{} left", years, if years == 1 { "" } else { "s" })
        }
    }
}

/// Share of goals at least 80% complete (0 when there are no goals)
pub fn goal_completion_rate(goals: &[FinancialGoal]) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }
    let near_done = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Completed || goal_progress(g) >= 80.0)
        .count();
    near_done as f64 / goals.len() as f64 * 100.0
}

/// Goals still active after their deadline
pub fn overdue_goals(goals: &[FinancialGoal], today: NaiveDate) -> Vec<&FinancialGoal> {
    goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .filter(|g| parse_date(&g.deadline).is_some_and(|d| d < today))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HealthInputs {
    /// percent
    pub savings_rate: f64,
    /// percent
    pub debt_to_income_ratio: f64,
    pub emergency_fund_months: f64,
    /// percent
    pub investment_return: f64,
    /// percent
    pub goal_completion_rate: f64,
}

impl HealthInputs {
    /// Inputs from dashboard metrics; emergency fund is assets over monthly expenses
    pub fn from_dashboard(metrics: &FinancialMetrics, goals: &[FinancialGoal]) -> Self {
        let emergency_fund_months = if metrics.monthly_expenses > 0.0 {
            metrics.total_assets / metrics.monthly_expenses
        } else {
            0.0
        };
        Self {
            savings_rate: metrics.savings_rate,
            debt_to_income_ratio: metrics.debt_to_income_ratio,
            emergency_fund_months,
            investment_return: metrics.investment_returns,
            goal_completion_rate: goal_completion_rate(goals),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Score out of 10 built from fixed point brackets
pub fn financial_health_score(inputs: &HealthInputs) -> (f64, HealthStatus) {
    let mut score: u32 = 0;

    score += match inputs.savings_rate {
        r if r >= 20.0 => 3,
        r if r >= 10.0 => 2,
        r if r >= 5.0 => 1,
        _ => 0,
    };
    score += match inputs.debt_to_income_ratio {
        r if r <= 10.0 => 2,
        r if r <= 30.0 => 1,
        _ => 0,
    };
    score += match inputs.emergency_fund_months {
        m if m >= 6.0 => 2,
        m if m >= 3.0 => 1,
        _ => 0,
    };
    score += match inputs.investment_return {
        r if r >= 10.0 => 2,
        r if r >= 5.0 => 1,
        _ => 0,
    };
    if inputs.goal_completion_rate >= 80.0 {
        score += 1;
    }

    let score = f64::from(score);
    let status = if score >= 8.0 {
        HealthStatus::Excellent
    } else if score >= 6.0 {
        HealthStatus::Good
    } else if score >= 4.0 {
        HealthStatus::Fair
    } else {
        HealthStatus::NeedsImprovement
    };

    (score, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, RecordId};

    fn goal(category: GoalCategory, target: f64, current: f64) -> FinancialGoal {
        FinancialGoal {
            id: RecordId::Number(1),
            title: "Goal".into(),
            target_amount: target,
            current_amount: current,
            deadline: "2025-12-31".into(),
            category,
            priority: Priority::High,
            status: GoalStatus::Active,
            created_at: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========== goal_progress() ==========

    #[test]
    fn test_goal_progress_savings() {
        let g = goal(GoalCategory::Savings, 50000.0, 32000.0);
        assert!((goal_progress(&g) - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_progress_capped() {
        let g = goal(GoalCategory::Investment, 100.0, 250.0);
        assert_eq!(goal_progress(&g), 100.0);
    }

    #[test]
    fn test_goal_progress_debt_counts_paid_off() {
        let g = goal(GoalCategory::Debt, 5000.0, 1500.0);
        assert!((goal_progress(&g) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_goal_progress_zero_target() {
        let g = goal(GoalCategory::Debt, 0.0, 5000.0);
        assert_eq!(goal_progress(&g), 0.0);
    }

    // ========== deadline_label() ==========

    #[test]
    fn test_deadline_label() {
        let today = date(2025, 1, 1);
        assert_eq!(deadline_label(date(2024, 12, 31), today), "Overdue");
        assert_eq!(deadline_label(today, today), "Due today");
        assert_eq!(deadline_label(date(2025, 1, 2), today), "1 day left");
        assert_eq!(deadline_label(date(2025, 1, 30), today), "29 days left");
        assert_eq!(deadline_label(date(2025, 1, 31), today), "1 month left");
        assert_eq!(deadline_label(date(2025, 6, 30), today), "6 months left");
        assert_eq!(deadline_label(date(2026, 1, 1), today), "1 year left");
        assert_eq!(deadline_label(date(2028, 1, 1), today), "3 years left");
    }

    // ========== completion / overdue ==========

    #[test]
    fn test_goal_completion_rate() {
        let goals = vec![
            goal(GoalCategory::Savings, 100.0, 90.0),
            goal(GoalCategory::Savings, 100.0, 10.0),
        ];
        assert!((goal_completion_rate(&goals) - 50.0).abs() < 1e-9);
        assert_eq!(goal_completion_rate(&[]), 0.0);
    }

    #[test]
    fn test_overdue_goals() {
        let mut paused = goal(GoalCategory::Savings, 100.0, 10.0);
        paused.status = GoalStatus::Paused;
        let goals = vec![goal(GoalCategory::Savings, 100.0, 10.0), paused];

        assert_eq!(overdue_goals(&goals, date(2026, 1, 1)).len(), 1);
        assert!(overdue_goals(&goals, date(2025, 6, 1)).is_empty());
    }

    // ========== financial_health_score() ==========

    #[test]
    fn test_health_score_excellent() {
        let inputs = HealthInputs {
            savings_rate: 27.1,
            debt_to_income_ratio: 8.0,
            emergency_fund_months: 6.0,
            investment_return: 11.8,
            goal_completion_rate: 90.0,
        };
        assert_eq!(
            financial_health_score(&inputs),
            (10.0, HealthStatus::Excellent)
        );
    }

    #[test]
    fn test_health_score_brackets() {
        let inputs = HealthInputs {
            savings_rate: 12.0,          // 2
            debt_to_income_ratio: 15.2,  // 1
            emergency_fund_months: 3.0,  // 1
            investment_return: 4.0,      // 0
            goal_completion_rate: 50.0,  // 0
        };
        assert_eq!(financial_health_score(&inputs), (4.0, HealthStatus::Fair));
    }

    #[test]
    fn test_health_inputs_from_dashboard() {
        let metrics = FinancialMetrics {
            total_assets: 192000.0,
            monthly_income: 8500.0,
            monthly_expenses: 6200.0,
            savings_rate: 27.1,
            investment_returns: 11.8,
            debt_to_income_ratio: 15.2,
        };
        let goals = vec![goal(GoalCategory::Savings, 50000.0, 32000.0)];

        let inputs = HealthInputs::from_dashboard(&metrics, &goals);
        assert!((inputs.emergency_fund_months - 192000.0 / 6200.0).abs() < 1e-9);
        assert_eq!(inputs.goal_completion_rate, 0.0);
        // 3 + 1 + 2 + 2 + 0
        assert_eq!(financial_health_score(&inputs), (8.0, HealthStatus::Excellent));
    }

    #[test]
    fn test_health_inputs_zero_expenses() {
        let inputs = HealthInputs::from_dashboard(&FinancialMetrics::default(), &[]);
        assert_eq!(inputs.emergency_fund_months, 0.0);
    }

    #[test]
    fn test_health_score_needs_improvement() {
        let inputs = HealthInputs {
            debt_to_income_ratio: 45.0,
            ..Default::default()
        };
        let (score, status) = financial_health_score(&inputs);
        assert_eq!(score, 0.0);
        assert_eq!(status.label(), "Needs Improvement");
    }
}
