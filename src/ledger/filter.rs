use chrono::{Days, NaiveDate};

use crate::models::{Transaction, TransactionType};

/// Caller-side selection applied before handing transactions to a reducer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    /// Inclusive.
    pub from: Option<NaiveDate>,
    /// Inclusive.
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses() -> Self {
        Self::new().kind(TransactionType::Expense)
    }

    pub fn income() -> Self {
        Self::new().kind(TransactionType::Income)
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// The `days` calendar days ending with `anchor`, inclusive.
    /// `days == 0` selects nothing.
    pub fn last_days(self, anchor: NaiveDate, days: u64) -> Self {
        match days.checked_sub(1) {
            // from > to, so nothing matches
            None => self.between(anchor.succ_opt().unwrap_or(NaiveDate::MAX), anchor),
            Some(back) => {
                let from = anchor
                    .checked_sub_days(Days::new(back))
                    .unwrap_or(NaiveDate::MIN);
                self.between(from, anchor)
            }
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        let day = txn.day();
        self.kind.map_or(true, |k| txn.kind == k)
            && self.from.map_or(true, |from| day >= from)
            && self.to.map_or(true, |to| day <= to)
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> impl Iterator<Item = &'a Transaction> {
        let filter = *self;
        transactions.iter().filter(move |t| filter.matches(t))
    }
}
