//! Sums over the whole ledger.

use rusqlite::Connection;

use crate::Error;

/// The total of all budget entries minus the total of all transactions.
///
/// An empty table contributes zero. Both sums are taken in one statement so
/// they see the same snapshot of the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn remaining_budget(connection: &Connection) -> Result<f64, Error> {
    let remaining = connection.query_row(
        "SELECT
            (SELECT COALESCE(SUM(amount_added), 0.0) FROM budget)
            - (SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\")",
        [],
        |row| row.get(0),
    )?;

    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        budget::create_budget_entry,
        test_utils::{create_test_user, get_test_connection},
        transaction::{Transaction, create_transaction},
    };

    use super::remaining_budget;

    fn add_transaction(amount: f64, connection: &rusqlite::Connection) {
        create_transaction(
            "alice",
            Transaction::build(amount, date!(2025 - 10 - 01), "Test")
                .category("Test")
                .card_name("Test"),
            connection,
        )
        .unwrap();
    }

    #[test]
    fn is_zero_for_empty_ledger() {
        let conn = get_test_connection();

        assert_eq!(remaining_budget(&conn), Ok(0.0));
    }

    #[test]
    fn is_budget_total_without_transactions() {
        let conn = get_test_connection();
        create_budget_entry(100.0, date!(2025 - 10 - 01), &conn).unwrap();
        create_budget_entry(50.0, date!(2025 - 10 - 02), &conn).unwrap();

        assert_eq!(remaining_budget(&conn), Ok(150.0));
    }

    #[test]
    fn is_negative_spending_without_budget() {
        let conn = get_test_connection();
        create_test_user("alice", "alice@example.com", &conn);
        add_transaction(30.0, &conn);

        assert_eq!(remaining_budget(&conn), Ok(-30.0));
    }

    #[test]
    fn subtracts_spending_from_budget() {
        let conn = get_test_connection();
        create_test_user("alice", "alice@example.com", &conn);
        create_budget_entry(100.0, date!(2025 - 10 - 01), &conn).unwrap();
        create_budget_entry(50.0, date!(2025 - 10 - 02), &conn).unwrap();
        add_transaction(30.0, &conn);
        add_transaction(20.0, &conn);

        assert_eq!(remaining_budget(&conn), Ok(100.0));
    }

    #[test]
    fn refunds_add_to_remaining_budget() {
        let conn = get_test_connection();
        create_test_user("alice", "alice@example.com", &conn);
        create_budget_entry(10.0, date!(2025 - 10 - 01), &conn).unwrap();
        add_transaction(-5.0, &conn);

        assert_eq!(remaining_budget(&conn), Ok(15.0));
    }
}
