//! Derived metrics: savings, percent change, category shares and goal
//! progress.
//!
//! The pure computations live here; the [`Engine`](crate::Engine) methods
//! feed them with a user's records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    dates::{Period, dmy},
    goals::{Goal, GoalStatus},
    transactions::Transaction,
};

/// Classify a goal from its amounts; the stored status is never consulted.
pub fn goal_progress_status(total: f64, saved: f64) -> GoalStatus {
    if total <= 0.0 || saved <= 0.0 {
        GoalStatus::NotStarted
    } else if saved < total {
        GoalStatus::InProgress
    } else {
        GoalStatus::Completed
    }
}

/// Percent change from `before` to `after`, relative to `|before|`.
///
/// Both zero gives `Some(0.0)`; only `before` zero is undefined (`None`).
pub fn savings_change(before: f64, after: f64) -> Option<f64> {
    if before == 0.0 && after == 0.0 {
        return Some(0.0);
    }
    if before == 0.0 {
        return None;
    }
    Some((after - before) / before.abs() * 100.0)
}

/// Sum of amounts, optionally limited to a period.
pub(crate) fn total(transactions: &[Transaction], period: Option<Period>) -> f64 {
    transactions
        .iter()
        .filter(|t| period.is_none_or(|p| p.contains(t.date)))
        .map(|t| t.amount)
        .sum()
}

/// Share of each category in the period's expenses, in percent.
pub(crate) fn distribution(expenses: &[Transaction], period: Period) -> BTreeMap<String, f64> {
    let mut per_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut grand_total = 0.0;
    for expense in expenses.iter().filter(|e| period.contains(e.date)) {
        *per_category.entry(expense.category.clone()).or_default() += expense.amount;
        grand_total += expense.amount;
    }

    if grand_total <= 0.0 {
        return BTreeMap::new();
    }
    per_category
        .into_iter()
        .map(|(category, amount)| (category, amount / grand_total * 100.0))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalDetail {
    pub id: String,
    pub name: String,
    pub category: String,
    pub total_amount: f64,
    pub saved_amount: f64,
    pub progress_pct: f64,
    #[serde(with = "dmy")]
    pub end_date: NaiveDate,
    pub status: GoalStatus,
}

impl From<&Goal> for GoalDetail {
    fn from(goal: &Goal) -> Self {
        let progress_pct = if goal.total_amount > 0.0 {
            goal.saved_amount / goal.total_amount * 100.0
        } else {
            0.0
        };
        Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            category: goal.category.clone(),
            total_amount: goal.total_amount,
            saved_amount: goal.saved_amount,
            progress_pct,
            end_date: goal.end_date,
            status: goal_progress_status(goal.total_amount, goal.saved_amount),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsSummary {
    pub total_goals: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    pub details: Vec<GoalDetail>,
}

impl GoalsSummary {
    pub(crate) fn from_goals(goals: &[Goal]) -> Self {
        let mut summary = Self {
            total_goals: goals.len(),
            ..Self::default()
        };
        for goal in goals {
            let detail = GoalDetail::from(goal);
            match detail.status {
                GoalStatus::Completed => summary.completed += 1,
                GoalStatus::InProgress => summary.in_progress += 1,
                GoalStatus::NotStarted => summary.not_started += 1,
            }
            summary.details.push(detail);
        }
        summary
    }
}

/// Read-only snapshot of a user's finances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub month: u32,
    pub year: i32,
    pub prev_month: u32,
    pub prev_year: i32,
    pub total_in_all: f64,
    pub total_out_all: f64,
    pub savings_all: f64,
    pub total_in: f64,
    pub total_out: f64,
    pub savings_current: f64,
    pub savings_prev: f64,
    pub change_pct: Option<f64>,
    pub goals: GoalsSummary,
    pub expenses_distribution: BTreeMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_status_thresholds() {
        assert_eq!(goal_progress_status(1000.0, 0.0), GoalStatus::NotStarted);
        assert_eq!(goal_progress_status(1000.0, 500.0), GoalStatus::InProgress);
        assert_eq!(goal_progress_status(1000.0, 1000.0), GoalStatus::Completed);
        assert_eq!(goal_progress_status(1000.0, 1500.0), GoalStatus::Completed);
        assert_eq!(goal_progress_status(0.0, 50.0), GoalStatus::NotStarted);
        assert_eq!(goal_progress_status(1000.0, -5.0), GoalStatus::NotStarted);
    }

    #[test]
    fn savings_change_zero_handling() {
        assert_eq!(savings_change(0.0, 0.0), Some(0.0));
        assert_eq!(savings_change(0.0, 10.0), None);
        assert_eq!(savings_change(200.0, 0.0), Some(-100.0));
    }

    #[test]
    fn savings_change_is_relative_to_absolute_base() {
        assert_eq!(savings_change(200.0, 300.0), Some(50.0));
        assert_eq!(savings_change(-200.0, 100.0), Some(150.0));
        assert_eq!(savings_change(-200.0, -300.0), Some(-50.0));
    }
}
