//! Transactions recorded by users against the shared budget.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and managing transactions,
//!   with updates and deletes restricted to the transaction's owner
//! - Route handlers for the transaction pages and API endpoints

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod view_page;

pub use core::{
    Transaction, TransactionBuilder, create_transaction, create_transaction_table,
    map_transaction_row,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use view_page::get_transaction_page;

#[cfg(test)]
pub use core::{count_transactions, delete_owned_transaction, get_transaction};
