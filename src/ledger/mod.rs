//! Pure reducers that turn transaction and budget lists into dashboard
//! summaries. Nothing here filters implicitly, fails, or keeps state.

mod dashboard;
mod filter;

pub use dashboard::{BudgetStatus, Dashboard, DashboardOptions};
pub use filter::TransactionFilter;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Budget, Transaction, TransactionType, YearMonth};

pub const DEFAULT_WINDOW_MONTHS: usize = 6;
/// Longest trailing window `monthly_series` will build (one hundred years).
pub const MAX_WINDOW_MONTHS: usize = 1200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub month: YearMonth,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetUsage {
    pub spent: Decimal,
    pub limit: Decimal,
    /// `spent / limit` as a percentage, capped at 100.
    pub percentage: Decimal,
    pub remaining: Decimal,
    /// Amount spent beyond the limit, uncapped.
    pub overage: Decimal,
}

impl BudgetUsage {
    pub fn from_spent(spent: Decimal, limit: Decimal) -> Self {
        let overage = (spent - limit).max(Decimal::ZERO);
        if limit <= Decimal::ZERO {
            return Self {
                spent,
                limit,
                percentage: Decimal::ZERO,
                remaining: Decimal::ZERO,
                overage,
            };
        }

        // Saturate rather than panic when the ratio leaves Decimal's range.
        let percentage = spent
            .checked_div(limit)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(Decimal::ONE_HUNDRED, |p| p.min(Decimal::ONE_HUNDRED));

        Self {
            spent,
            limit,
            percentage,
            remaining: (limit - spent).max(Decimal::ZERO),
            overage,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.overage > Decimal::ZERO
    }
}

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out = Totals::default();
    for txn in transactions {
        match txn.kind {
            TransactionType::Income => out.total_income += txn.amount,
            TransactionType::Expense => out.total_expense += txn.amount,
        }
    }
    out.balance = out.total_income - out.total_expense;
    out
}

/// Income/expense per calendar month for the `window_months` months ending
/// with `anchor`'s month, oldest first. Empty months are zero-filled and
/// transactions outside the window are ignored. Windows longer than
/// [`MAX_WINDOW_MONTHS`] are clamped to it.
pub fn monthly_series(
    transactions: &[Transaction],
    window_months: usize,
    anchor: NaiveDate,
) -> Vec<MonthlyTotal> {
    let window_months = window_months.min(MAX_WINDOW_MONTHS);
    let mut months = Vec::with_capacity(window_months);
    let mut cursor = YearMonth::of(anchor);
    for _ in 0..window_months {
        months.push(cursor);
        cursor = cursor.pred();
    }
    months.reverse();

    let (Some(&first), Some(&last)) = (months.first(), months.last()) else {
        return Vec::new();
    };

    let mut buckets: HashMap<YearMonth, (Decimal, Decimal)> = HashMap::new();
    for txn in transactions {
        let key = txn.month();
        if key < first || key > last {
            continue;
        }
        let entry = buckets.entry(key).or_default();
        match txn.kind {
            TransactionType::Income => entry.0 += txn.amount,
            TransactionType::Expense => entry.1 += txn.amount,
        }
    }

    months
        .into_iter()
        .map(|month| {
            let (income, expense) = buckets.get(&month).copied().unwrap_or_default();
            MonthlyTotal {
                month,
                income,
                expense,
                net: income - expense,
            }
        })
        .collect()
}

/// Sum of amounts per category label, verbatim and regardless of kind.
pub fn category_totals<'a, I>(transactions: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions {
        *out.entry(txn.category.clone()).or_default() += txn.amount;
    }
    out
}

pub fn budget_spent(transactions: &[Transaction], budget: &Budget) -> Decimal {
    transactions
        .iter()
        .filter(|t| budget.applies_to(t))
        .map(|t| t.amount)
        .sum()
}

pub fn budget_usage(transactions: &[Transaction], budget: &Budget) -> BudgetUsage {
    BudgetUsage::from_spent(budget_spent(transactions, budget), budget.limit_amount)
}

/// Usage across all budgets: each budget's spend summed against the summed
/// limits.
pub fn aggregate_budget_usage(transactions: &[Transaction], budgets: &[Budget]) -> BudgetUsage {
    let (spent, limit) = budgets
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(spent, limit), b| {
            (spent + budget_spent(transactions, b), limit + b.limit_amount)
        });
    BudgetUsage::from_spent(spent, limit)
}
