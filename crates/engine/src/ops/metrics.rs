use std::collections::BTreeMap;

use crate::{
    dates::Period,
    metrics::{self, DashboardMetrics, GoalsSummary},
    store::CollectionStore,
};

use super::Engine;

impl<S: CollectionStore> Engine<S> {
    /// Incomes minus expenses dated in `month`/`year` (day ignored).
    pub fn monthly_savings(&self, user: &str, month: u32, year: i32) -> f64 {
        self.total_incomes_for_month(user, month, year)
            - self.total_expenses_for_month(user, month, year)
    }

    /// Percent change of savings from (m1, y1) to (m2, y2).
    ///
    /// `None` when the first period saved nothing and the second did.
    pub fn percent_change(&self, user: &str, m1: u32, y1: i32, m2: u32, y2: i32) -> Option<f64> {
        let s1 = self.monthly_savings(user, m1, y1);
        let s2 = self.monthly_savings(user, m2, y2);
        metrics::savings_change(s1, s2)
    }

    /// Percentage of the period's expenses per category.
    pub fn expense_distribution(&self, user: &str, month: u32, year: i32) -> BTreeMap<String, f64> {
        metrics::distribution(&self.expenses_by_user(user), Period::new(month, year))
    }

    pub fn total_incomes_for_month(&self, user: &str, month: u32, year: i32) -> f64 {
        metrics::total(&self.incomes_by_user(user), Some(Period::new(month, year)))
    }

    pub fn total_expenses_for_month(&self, user: &str, month: u32, year: i32) -> f64 {
        metrics::total(&self.expenses_by_user(user), Some(Period::new(month, year)))
    }

    pub fn total_incomes_all_time(&self, user: &str) -> f64 {
        metrics::total(&self.incomes_by_user(user), None)
    }

    pub fn total_expenses_all_time(&self, user: &str) -> f64 {
        metrics::total(&self.expenses_by_user(user), None)
    }

    pub fn goals_summary(&self, user: &str) -> GoalsSummary {
        GoalsSummary::from_goals(&self.goals_by_user(user))
    }

    /// All time totals, this month against the previous one, goals and the
    /// current month's expense distribution.
    pub fn dashboard_metrics(&self, user: &str) -> DashboardMetrics {
        let incomes = self.incomes_by_user(user);
        let expenses = self.expenses_by_user(user);
        let current = Period::of(self.today());
        let previous = current.previous();

        let total_in_all = metrics::total(&incomes, None);
        let total_out_all = metrics::total(&expenses, None);
        let total_in = metrics::total(&incomes, Some(current));
        let total_out = metrics::total(&expenses, Some(current));
        let savings_current = total_in - total_out;
        let savings_prev =
            metrics::total(&incomes, Some(previous)) - metrics::total(&expenses, Some(previous));

        DashboardMetrics {
            month: current.month,
            year: current.year,
            prev_month: previous.month,
            prev_year: previous.year,
            total_in_all,
            total_out_all,
            savings_all: total_in_all - total_out_all,
            total_in,
            total_out,
            savings_current,
            savings_prev,
            change_pct: metrics::savings_change(savings_prev, savings_current),
            goals: self.goals_summary(user),
            expenses_distribution: metrics::distribution(&expenses, current),
        }
    }
}
