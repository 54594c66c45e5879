//! Defines the endpoint for updating an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, UserID,
    auth::get_user_by_id,
    endpoints::{self, format_endpoint},
    transaction::{core::update_owned_transaction, form::TransactionForm},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    redirect_url: Option<String>,
}

/// A route handler for replacing the details of a transaction owned by the
/// logged-in user.
///
/// Redirects to `redirect_url` if given, otherwise the transaction's page.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<i64>,
    Query(query): Query<RedirectQuery>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = match form.validate() {
        Ok(builder) => builder,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let result = get_user_by_id(user_id, &connection).and_then(|user| {
        update_owned_transaction(transaction_id, user.username.as_ref(), &builder, &connection)
    });

    match result {
        Ok(transaction) => {
            tracing::info!(
                "{} updated transaction {transaction_id}",
                transaction.owner_username
            );
        }
        Err(Error::NotFound) => return Error::UpdateMissingTransaction.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    let redirect_url = query
        .redirect_url
        .filter(|url| url.starts_with('/') && !url.starts_with("//"))
        .unwrap_or_else(|| format_endpoint(endpoints::TRANSACTION_VIEW, transaction_id));

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        User,
        test_utils::{assert_hx_redirect, create_test_user, get_test_connection},
        transaction::{Transaction, create_transaction, form::TransactionForm, get_transaction},
    };

    use super::{EditTransactionState, RedirectQuery, edit_transaction_endpoint};

    fn get_test_state() -> (EditTransactionState, User, User, Transaction) {
        let conn = get_test_connection();
        let alice = create_test_user("alice", "alice@example.com", &conn);
        let bob = create_test_user("bob", "bob@example.com", &conn);
        let transaction = create_transaction(
            "alice",
            Transaction::build(10.0, date!(2025 - 09 - 01), "Books")
                .category("Education")
                .card_name("Visa"),
            &conn,
        )
        .unwrap();

        let state = EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        (state, alice, bob, transaction)
    }

    fn edit_form() -> TransactionForm {
        TransactionForm {
            amount: 15.0,
            date: date!(2025 - 09 - 02),
            description: "More books".to_owned(),
            category: "Education".to_owned(),
            card_name: "Mastercard".to_owned(),
        }
    }

    #[tokio::test]
    async fn owner_can_update_transaction() {
        let (state, alice, _, transaction) = get_test_state();

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(alice.id),
            Path(transaction.id),
            Query(RedirectQuery { redirect_url: None }),
            Form(edit_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/transactions/1");
        let updated = get_transaction(transaction.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.amount, 15.0);
        assert_eq!(updated.description, "More books");
        assert_eq!(updated.card_name, "Mastercard");
        assert_eq!(updated.owner_username, "alice");
    }

    #[tokio::test]
    async fn redirects_to_given_url() {
        let (state, alice, _, transaction) = get_test_state();

        let response = edit_transaction_endpoint(
            State(state),
            Extension(alice.id),
            Path(transaction.id),
            Query(RedirectQuery {
                redirect_url: Some("/home?page=2".to_owned()),
            }),
            Form(edit_form()),
        )
        .await;

        assert_hx_redirect(&response, "/home?page=2");
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_transaction_unchanged() {
        let (state, _, bob, transaction) = get_test_state();

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(bob.id),
            Path(transaction.id),
            Query(RedirectQuery { redirect_url: None }),
            Form(edit_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let stored = get_transaction(transaction.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored, transaction);
    }

    #[tokio::test]
    async fn infinite_amount_is_rejected_and_transaction_unchanged() {
        let (state, alice, _, transaction) = get_test_state();

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(alice.id),
            Path(transaction.id),
            Query(RedirectQuery { redirect_url: None }),
            Form(TransactionForm {
                amount: f64::INFINITY,
                ..edit_form()
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let stored = get_transaction(transaction.id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored, transaction);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let (state, alice, _, _) = get_test_state();

        let response = edit_transaction_endpoint(
            State(state),
            Extension(alice.id),
            Path(99),
            Query(RedirectQuery { redirect_url: None }),
            Form(edit_form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
