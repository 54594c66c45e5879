//! The budget entry model and its database queries.
//!
//! Budget entries are money added to the shared budget. They do not belong to
//! any user, so any logged-in user may change or delete them.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// An amount of money added to the shared budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// The ID of the budget entry.
    pub id: i64,
    /// How much money was added.
    pub amount_added: f64,
    /// When the money was added.
    pub added_date: Date,
}

/// Add `amount_added` to the budget on `added_date`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_budget_entry(
    amount_added: f64,
    added_date: Date,
    connection: &Connection,
) -> Result<BudgetEntry, Error> {
    let entry = connection
        .prepare(
            "INSERT INTO budget (amount_added, added_date) VALUES (?1, ?2)
             RETURNING id, amount_added, added_date",
        )?
        .query_row((amount_added, added_date), map_budget_entry_row)?;

    Ok(entry)
}

/// Retrieve a budget entry by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid budget entry,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_budget_entry(id: i64, connection: &Connection) -> Result<BudgetEntry, Error> {
    let entry = connection
        .prepare("SELECT id, amount_added, added_date FROM budget WHERE id = :id")?
        .query_one(&[(":id", &id)], map_budget_entry_row)?;

    Ok(entry)
}

/// Replace the amount and date of budget entry `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid budget entry,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_budget_entry(
    id: i64,
    amount_added: f64,
    added_date: Date,
    connection: &Connection,
) -> Result<BudgetEntry, Error> {
    let entry = connection
        .prepare(
            "UPDATE budget SET amount_added = ?1, added_date = ?2 WHERE id = ?3
             RETURNING id, amount_added, added_date",
        )?
        .query_row((amount_added, added_date, id), map_budget_entry_row)?;

    Ok(entry)
}

/// Delete budget entry `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid budget entry,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_budget_entry(id: i64, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM budget WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount_added REAL NOT NULL,
                added_date TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_budget_added_date_id ON budget(added_date DESC, id DESC);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [BudgetEntry].
///
/// Expects the columns in the order `id, amount_added, added_date`.
pub fn map_budget_entry_row(row: &Row) -> Result<BudgetEntry, rusqlite::Error> {
    Ok(BudgetEntry {
        id: row.get(0)?,
        amount_added: row.get(1)?,
        added_date: row.get(2)?,
    })
}

#[cfg(test)]
pub fn count_budget_entries(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM budget;", [], |row| row.get(0))
        .map_err(|error| error.into())
}
