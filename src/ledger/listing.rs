//! Paginated transaction listings and the latest budget entries.

use rusqlite::{Connection, TransactionBehavior};

use crate::{
    Error,
    budget::{BudgetEntry, map_budget_entry_row},
    transaction::{Transaction, map_transaction_row},
};

/// How many transactions are shown on each page of a listing.
pub const LEDGER_PAGE_SIZE: u64 = 5;

/// How many budget entries are shown on the home page.
pub const RECENT_BUDGET_ENTRY_LIMIT: u64 = 5;

/// One page of a transaction listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    /// The transactions on this page, newest first.
    pub items: Vec<Transaction>,
    /// Whether there are pages after this one.
    pub has_more: bool,
    /// How many pages there are in total. Zero when there are no transactions.
    pub total_pages: u64,
    /// The page number that was fetched, starting at 1.
    pub page: u64,
}

/// Get page `page` of the transactions, ordered by date and then ID, newest first.
///
/// If `owner` is given, only that user's transactions are listed. Page 0 is
/// treated as page 1, and a page past the end is empty.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_transactions(
    page: u64,
    owner: Option<&str>,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let page = page.max(1);
    let offset = i64::try_from((page - 1).saturating_mul(LEDGER_PAGE_SIZE)).unwrap_or(i64::MAX);

    // Count and select in one read transaction so the page count matches the rows.
    let sql_transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Deferred)?;

    let count: i64 = sql_transaction.query_row(
        "SELECT COUNT(id) FROM \"transaction\" WHERE ?1 IS NULL OR owner_username = ?1",
        [owner],
        |row| row.get(0),
    )?;

    let items = sql_transaction
        .prepare(
            "SELECT id, owner_username, amount, date, description, category, card_name
             FROM \"transaction\"
             WHERE ?1 IS NULL OR owner_username = ?1
             ORDER BY date DESC, id DESC
             LIMIT ?2 OFFSET ?3",
        )?
        .query_map((owner, LEDGER_PAGE_SIZE as i64, offset), map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()?;

    sql_transaction.commit()?;

    let total_pages = count.unsigned_abs().div_ceil(LEDGER_PAGE_SIZE);

    Ok(TransactionPage {
        items,
        has_more: page < total_pages,
        total_pages,
        page,
    })
}

/// The most recent budget entries, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn recent_budget_entries(connection: &Connection) -> Result<Vec<BudgetEntry>, Error> {
    connection
        .prepare(
            "SELECT id, amount_added, added_date FROM budget
             ORDER BY added_date DESC, id DESC
             LIMIT ?1",
        )?
        .query_map([RECENT_BUDGET_ENTRY_LIMIT as i64], map_budget_entry_row)?
        .map(|entry| entry.map_err(Error::from))
        .collect()
}
