//! Money added to the shared budget.
//!
//! Budget entries have no owner: any logged-in user may add, edit or delete them.

mod api;
mod core;
mod form;
mod pages;

pub use api::{
    create_budget_entry_endpoint, delete_budget_entry_endpoint, edit_budget_entry_endpoint,
};
pub use core::{BudgetEntry, create_budget_entry, create_budget_table, map_budget_entry_row};
pub use pages::{get_budget_entry_page, get_create_budget_page, get_edit_budget_page};
