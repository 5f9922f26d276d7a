//! Plain-text rendering for CLI output

use std::fmt::Write;

use carbontrack::services::catalog::{display_for, title_case, ImpactLevel};
use carbontrack::services::EmissionsReport;
use carbontrack::types::{Record, TrendResult};

use super::dashboard::DashboardView;

pub fn trend(trend: &TrendResult) -> String {
    format!(
        "{} {:.1}% vs previous period",
        trend.direction.arrow(),
        trend.percentage_change
    )
}

pub fn summary(report: &EmissionsReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Total CO₂ emissions: {:.1} kg across {} activities",
        report.total_emissions, report.record_count
    );
    if let (Some(first), Some(last)) = (report.first_date, report.last_date) {
        let _ = writeln!(out, "Period: {} to {}", first, last);
    }
    match &report.trend {
        Some(t) => {
            let _ = writeln!(
                out,
                "Trend: {} (previous {:.1} kg)",
                trend(t),
                report.previous_period_total
            );
        }
        None => {
            let _ = writeln!(out, "Trend: n/a (no previous period total)");
        }
    }
    let _ = writeln!(
        out,
        "Plant {} trees to offset",
        report.trees_to_offset
    );

    if let Some(target) = &report.target {
        let _ = writeln!(
            out,
            "Monthly target: {:.1} of {:.1} kg, reduction potential {:.1} kg ({:.0}%)",
            target.total_monthly_emissions,
            target.target_monthly_emissions,
            target.reduction.excess_kg,
            target.reduction.percentage
        );
        let _ = writeln!(
            out,
            "Environmental score: {:.1}/10 ({}) · offset cost ₹{:.0} · {:.0}% to carbon neutral",
            target.environmental_impact_score,
            target.score_band.label(),
            target.carbon_offset_cost,
            target.carbon_neutrality_progress
        );
    }

    if report.categories.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Emissions by category");
    for row in &report.categories {
        let _ = write!(
            out,
            "  {} {:<12} {:>8.1} kg  {:>3} activities  {:>5.1}% of total",
            row.icon,
            title_case(&row.category),
            row.total_amount,
            row.count,
            row.percentage
        );
        if row.total_secondary > 0.0 {
            let _ = write!(out, "  ₹{:.0} spent", row.total_secondary);
        }
        let _ = writeln!(out);
    }

    out
}

pub fn activities(records: &[Record]) -> String {
    if records.is_empty() {
        return "No activities\n".to_string();
    }

    let mut out = String::new();
    for record in records {
        let impact = ImpactLevel::from_emissions(record.amount);
        let _ = write!(
            out,
            "{}  {} {:<10} {:<28} {:>7.1} kg CO₂  {:<6} impact",
            record.occurred_at.format("%b %-d"),
            display_for(&record.category).icon,
            title_case(&record.category),
            record.activity.as_deref().unwrap_or("-"),
            record.amount,
            impact.label()
        );
        if record.secondary_amount > 0.0 {
            let _ = write!(out, "  ₹{}", record.secondary_amount);
        }
        let _ = writeln!(out);
    }
    out
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let m = &view.metrics;

    let _ = writeln!(out, "Total assets:       ${:.0}", m.total_assets);
    let _ = writeln!(out, "Monthly income:     ${:.0}", m.monthly_income);
    let _ = writeln!(out, "Monthly expenses:   ${:.0}", m.monthly_expenses);
    let _ = writeln!(out, "Savings rate:       {:.1}%", m.savings_rate);
    let _ = writeln!(out, "Investment returns: {:.1}%", m.investment_returns);
    let _ = writeln!(out, "Debt-to-income:     {:.1}%", m.debt_to_income_ratio);
    let _ = writeln!(
        out,
        "Financial health:   {:.0}/10 ({})",
        view.health_score,
        view.health_status.label()
    );

    if !view.goals.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Goals");
        for goal in &view.goals {
            let _ = writeln!(
                out,
                "  {:<28} {:>5.1}%  {}",
                goal.title, goal.progress, goal.deadline
            );
        }
        if view.overdue_goals > 0 {
            let _ = writeln!(out, "  {} overdue", view.overdue_goals);
        }
    }

    if !view.spending.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Spending by category");
        for share in &view.spending {
            let _ = writeln!(
                out,
                "  {:<20} ${:>10.2}  {:>5.1}%",
                share.category, share.total_amount, share.percentage
            );
        }
    }

    let derived = &view.transaction_metrics;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "From transactions: avg income ${:.2} · avg expense ${:.2} · savings rate {:.1}%",
        derived.monthly_income, derived.monthly_expenses, derived.savings_rate
    );
    let _ = writeln!(
        out,
        "Transaction emissions: {:.1} kg CO₂ · {} achievements",
        view.transaction_emissions, view.achievements
    );

    if !view.insights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Insights");
        for insight in &view.insights {
            let _ = writeln!(out, "  • {}", insight);
        }
    }
    out
}
