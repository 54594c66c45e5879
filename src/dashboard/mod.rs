//! The home page with the remaining budget and the transaction listings.

mod handlers;
mod tables;

pub use handlers::{get_home_page, get_user_transactions_page};
