//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID,
    auth::get_user_by_id,
    endpoints,
    transaction::{core::create_transaction, form::TransactionForm},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction owned by the logged-in user.
///
/// Redirects to the home page on success, otherwise responds with an error alert.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
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

    let result = get_user_by_id(user_id, &connection)
        .and_then(|user| create_transaction(user.username.as_ref(), builder, &connection));

    match result {
        Ok(transaction) => {
            tracing::info!(
                "{} recorded transaction {}",
                transaction.owner_username,
                transaction.id
            );

            (
                HxRedirect(endpoints::HOME_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use time::{Duration, OffsetDateTime};

    use crate::{
        UserID,
        test_utils::{assert_hx_redirect, create_test_user, get_test_connection},
        endpoints,
        transaction::{
            count_transactions,
            create_endpoint::{CreateTransactionState, create_transaction_endpoint},
            form::TransactionForm,
            get_transaction,
        },
    };

    fn get_test_state() -> (CreateTransactionState, UserID) {
        let conn = get_test_connection();
        let user = create_test_user("alice", "alice@example.com", &conn);
        let state = CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        (state, user.id)
    }

    fn transaction_form(days_from_today: i64, description: &str) -> TransactionForm {
        transaction_form_with_amount(12.3, days_from_today, description)
    }

    fn transaction_form_with_amount(
        amount: f64,
        days_from_today: i64,
        description: &str,
    ) -> TransactionForm {
        TransactionForm {
            amount,
            date: OffsetDateTime::now_utc().date() + Duration::days(days_from_today),
            description: description.to_owned(),
            category: "Food".to_owned(),
            card_name: "Visa".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (state, user_id) = get_test_state();

        let response = create_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            Form(transaction_form(0, "test transaction")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::HOME_VIEW);
        let connection = state.db_connection.lock().unwrap();
        let transaction = get_transaction(1, &connection).unwrap();
        assert_eq!(transaction.amount, 12.3);
        assert_eq!(transaction.description, "test transaction");
        assert_eq!(transaction.owner_username, "alice");
    }

    #[tokio::test]
    async fn accepts_future_date() {
        let (state, user_id) = get_test_state();

        let response = create_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            Form(transaction_form(30, "scheduled payment")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(count_transactions(&state.db_connection.lock().unwrap()), Ok(1));
    }

    #[tokio::test]
    async fn rejects_non_finite_amounts() {
        let (state, user_id) = get_test_state();

        for amount in [f64::INFINITY, f64::NAN, 0.0] {
            let response = create_transaction_endpoint(
                State(state.clone()),
                Extension(user_id),
                Form(transaction_form_with_amount(amount, 0, "bad amount")),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "amount {amount}");
        }

        assert_eq!(count_transactions(&state.db_connection.lock().unwrap()), Ok(0));
    }

    #[tokio::test]
    async fn rejects_blank_description() {
        let (state, user_id) = get_test_state();

        let response = create_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            Form(transaction_form(0, "   ")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(count_transactions(&state.db_connection.lock().unwrap()), Ok(0));
    }
}
