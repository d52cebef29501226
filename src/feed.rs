//! Observer registration for live ledger updates. The data-access side owns
//! a `LedgerFeed`, replaces its lists when the backing store changes, and
//! subscribers recompute whatever derived views they need.

use crate::models::{Budget, Transaction};

pub type SubscriptionId = u64;

#[derive(Debug, Clone, Copy)]
pub struct LedgerSnapshot<'a> {
    pub transactions: &'a [Transaction],
    pub budgets: &'a [Budget],
}

type Callback = Box<dyn FnMut(LedgerSnapshot<'_>)>;

#[derive(Default)]
pub struct LedgerFeed {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: SubscriptionId,
}

impl LedgerFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> LedgerSnapshot<'_> {
        LedgerSnapshot {
            transactions: &self.transactions,
            budgets: &self.budgets,
        }
    }

    /// Register `callback`. It runs once right away with the current lists,
    /// then after every replacement.
    pub fn subscribe<F>(&mut self, mut callback: F) -> SubscriptionId
    where
        F: FnMut(LedgerSnapshot<'_>) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        callback(self.snapshot());
        self.subscribers.push((id, Box::new(callback)));
        tracing::debug!(id, subscribers = self.subscribers.len(), "ledger feed subscribe");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        before != self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.notify();
    }

    pub fn set_budgets(&mut self, budgets: Vec<Budget>) {
        self.budgets = budgets;
        self.notify();
    }

    fn notify(&mut self) {
        tracing::debug!(
            transactions = self.transactions.len(),
            budgets = self.budgets.len(),
            subscribers = self.subscribers.len(),
            "ledger feed update"
        );
        let snapshot = LedgerSnapshot {
            transactions: &self.transactions,
            budgets: &self.budgets,
        };
        for (_, callback) in self.subscribers.iter_mut() {
            callback(snapshot);
        }
    }
}

impl std::fmt::Debug for LedgerFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerFeed")
            .field("transactions", &self.transactions.len())
            .field("budgets", &self.budgets.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
