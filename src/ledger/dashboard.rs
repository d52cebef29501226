use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{
    aggregate_budget_usage, budget_usage, category_totals, monthly_series, totals, BudgetUsage,
    MonthlyTotal, Totals, TransactionFilter, DEFAULT_WINDOW_MONTHS,
};
use crate::models::{Budget, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub window_months: usize,
    pub anchor: NaiveDate,
    /// Length of the trailing expense breakdown, in days.
    pub breakdown_days: u64,
}

impl DashboardOptions {
    pub fn anchored(anchor: NaiveDate) -> Self {
        Self {
            window_months: DEFAULT_WINDOW_MONTHS,
            anchor,
            breakdown_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub budget_id: String,
    pub category: String,
    pub usage: BudgetUsage,
}

/// Everything the dashboard screen shows, computed in one pass over the
/// current lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub totals: Totals,
    pub monthly: Vec<MonthlyTotal>,
    /// Expenses over the breakdown window, largest first.
    pub expense_breakdown: Vec<(String, Decimal)>,
    pub budgets: Vec<BudgetStatus>,
    pub overall: BudgetUsage,
}

impl Dashboard {
    pub fn build(transactions: &[Transaction], budgets: &[Budget], opts: &DashboardOptions) -> Self {
        let recent_expenses =
            TransactionFilter::expenses().last_days(opts.anchor, opts.breakdown_days);
        let mut expense_breakdown: Vec<(String, Decimal)> =
            category_totals(recent_expenses.apply(transactions))
                .into_iter()
                .collect();
        // Ties keep alphabetical order from the map
        expense_breakdown.sort_by(|a, b| b.1.cmp(&a.1));

        let budgets_status = budgets
            .iter()
            .map(|b| BudgetStatus {
                budget_id: b.id.clone(),
                category: b.category.clone(),
                usage: budget_usage(transactions, b),
            })
            .collect();

        Self {
            totals: totals(transactions),
            monthly: monthly_series(transactions, opts.window_months, opts.anchor),
            expense_breakdown,
            budgets: budgets_status,
            overall: aggregate_budget_usage(transactions, budgets),
        }
    }

    pub fn exceeded_budgets(&self) -> impl Iterator<Item = &BudgetStatus> {
        self.budgets.iter().filter(|s| s.usage.is_exceeded())
    }
}
