use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Transaction, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending limit for one category over an inclusive date range.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub limit_amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Budget {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        limit_amount: Decimal,
        period: BudgetPeriod,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        let id = id.into();
        if limit_amount < Decimal::ZERO {
            anyhow::bail!("Budget {id}: limit must not be negative, got {limit_amount}");
        }
        if start_date > end_date {
            anyhow::bail!("Budget {id}: start {start_date} is after end {end_date}");
        }
        Ok(Self {
            id,
            category: category.into(),
            limit_amount,
            period,
            start_date,
            end_date,
        })
    }

    /// Budget covering every day of `month`.
    pub fn monthly(
        id: impl Into<String>,
        category: impl Into<String>,
        limit_amount: Decimal,
        month: YearMonth,
    ) -> Result<Self> {
        let start = month
            .first_day()
            .with_context(|| format!("No calendar days for {month}"))?;
        let end = month
            .last_day()
            .with_context(|| format!("No calendar days for {month}"))?;
        Self::new(id, category, limit_amount, BudgetPeriod::Monthly, start, end)
    }

    /// Budget covering January 1st through December 31st of `year`.
    pub fn yearly(
        id: impl Into<String>,
        category: impl Into<String>,
        limit_amount: Decimal,
        year: i32,
    ) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .with_context(|| format!("Year out of range: {year}"))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .with_context(|| format!("Year out of range: {year}"))?;
        Self::new(id, category, limit_amount, BudgetPeriod::Yearly, start, end)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether `txn` counts toward this budget's spend.
    pub fn applies_to(&self, txn: &Transaction) -> bool {
        txn.is_expense() && txn.category == self.category && self.covers(txn.day())
    }
}
