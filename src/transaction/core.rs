//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, TransactionBehavior};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// A purchase made by a user, paid for out of the shared budget.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: i64,
    /// The username of the user who recorded the transaction.
    pub owner_username: String,
    /// The amount of money spent.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// What kind of spending this was, e.g. "Groceries".
    pub category: String,
    /// The card the transaction was paid with.
    pub card_name: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: Date, description: &str) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: description.to_owned(),
            category: String::new(),
            card_name: String::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The owner is not part of the builder, it is passed to [create_transaction]
/// by the caller who knows who is logged in.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::transaction::Transaction;
///
/// let builder = Transaction::build(45.99, date!(2025 - 01 - 15), "Weekly shop")
///     .category("Groceries")
///     .card_name("Visa");
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money spent.
    pub amount: f64,
    /// The date when the transaction occurred. Must not be in the future.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
    /// What kind of spending this was.
    pub category: String,
    /// The card the transaction was paid with.
    pub card_name: String,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }

    /// Set the card name for the transaction.
    pub fn card_name(mut self, card_name: &str) -> Self {
        card_name.clone_into(&mut self.card_name);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction owned by `owner_username`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `owner_username` is not a registered user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    owner_username: &str,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (owner_username, amount, date, description, category, card_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, owner_username, amount, date, description, category, card_name",
        )?
        .query_row(
            (
                owner_username,
                builder.amount,
                builder.date,
                builder.description,
                builder.category,
                builder.card_name,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::NotFound,
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: i64, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, owner_username, amount, date, description, category, card_name
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Returns [Error::NotFound] if the transaction does not exist, or
/// [Error::Forbidden] if it belongs to someone other than `actor_username`.
fn check_owner(id: i64, actor_username: &str, connection: &Connection) -> Result<(), Error> {
    let owner_username: String = connection.query_row(
        "SELECT owner_username FROM \"transaction\" WHERE id = ?1",
        [id],
        |row| row.get(0),
    )?;

    if owner_username != actor_username {
        tracing::warn!(
            "{actor_username} tried to change transaction {id}, which is owned by {owner_username}"
        );
        return Err(Error::Forbidden);
    }

    Ok(())
}

/// Replace the details of transaction `id` on behalf of `actor_username`.
///
/// The ownership check and the update run in one database transaction, so
/// nothing is written when the check fails.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - [Error::Forbidden] if `actor_username` does not own the transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_owned_transaction(
    id: i64,
    actor_username: &str,
    builder: &TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    check_owner(id, actor_username, &sql_transaction)?;

    let transaction = sql_transaction
        .prepare(
            "UPDATE \"transaction\"
             SET amount = ?1, date = ?2, description = ?3, category = ?4, card_name = ?5
             WHERE id = ?6
             RETURNING id, owner_username, amount, date, description, category, card_name",
        )?
        .query_row(
            (
                builder.amount,
                builder.date,
                &builder.description,
                &builder.category,
                &builder.card_name,
                id,
            ),
            map_transaction_row,
        )?;

    sql_transaction.commit()?;

    Ok(transaction)
}

/// Delete transaction `id` on behalf of `actor_username`.
///
/// The ownership check and the delete run in one database transaction, so
/// nothing is deleted when the check fails.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - [Error::Forbidden] if `actor_username` does not own the transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_owned_transaction(
    id: i64,
    actor_username: &str,
    connection: &Connection,
) -> Result<(), Error> {
    let sql_transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    check_owner(id, actor_username, &sql_transaction)?;

    sql_transaction.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;
    sql_transaction.commit()?;

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_username TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                card_name TEXT NOT NULL,
                FOREIGN KEY(owner_username) REFERENCES user(username) ON UPDATE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Index used by the paginated listings.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_id ON \"transaction\"(date DESC, id DESC);",
        (),
    )?;
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_owner ON \"transaction\"(owner_username);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order `id, owner_username, amount, date,
/// description, category, card_name`.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        owner_username: row.get(1)?,
        amount: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
        category: row.get(5)?,
        card_name: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
