use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dated money movement. `amount` is always a positive magnitude;
/// the direction lives in `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    /// Free text, matched verbatim. Empty means not yet categorized.
    pub category: String,
    pub date: NaiveDateTime,
    pub kind: TransactionType,
    pub description: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        kind: TransactionType,
        amount: Decimal,
        date: NaiveDateTime,
    ) -> Result<Self> {
        let id = id.into();
        if amount <= Decimal::ZERO {
            anyhow::bail!("Transaction {id}: amount must be positive, got {amount}");
        }
        Ok(Self {
            id,
            amount,
            category: String::new(),
            date,
            kind,
            description: String::new(),
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_categorized(&self) -> bool {
        !self.category.trim().is_empty()
    }

    /// Calendar day the transaction falls on.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}
