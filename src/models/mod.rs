mod budget;
mod month;
mod transaction;

pub use budget::{Budget, BudgetPeriod};
pub use month::YearMonth;
pub use transaction::{Transaction, TransactionType};
