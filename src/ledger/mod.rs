//! Read-only views over the whole ledger: the remaining budget, paginated
//! transaction listings and the latest budget entries.

mod aggregation;
mod listing;

pub use aggregation::remaining_budget;
pub use listing::{LEDGER_PAGE_SIZE, TransactionPage, list_transactions, recent_budget_entries};
