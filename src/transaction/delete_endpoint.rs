//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, UserID, alert::Alert, auth::get_user_by_id,
    transaction::core::delete_owned_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
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

/// A route handler for deleting a transaction owned by the logged-in user.
///
/// Redirects to `redirect_url` when given, e.g. when deleting from the
/// transaction's own page. Otherwise responds with a success alert so that
/// HTMX removes the table row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<i64>,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let result = get_user_by_id(user_id, &connection).and_then(|user| {
        delete_owned_transaction(transaction_id, user.username.as_ref(), &connection)
    });

    match result {
        Ok(()) => tracing::info!("deleted transaction {transaction_id}"),
        Err(Error::NotFound) => return Error::DeleteMissingTransaction.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    }

    match query
        .redirect_url
        .filter(|url| url.starts_with('/') && !url.starts_with("//"))
    {
        Some(redirect_url) => (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response(),
        // The status code has to be 200 OK or HTMX will not delete the table row.
        None => (
            StatusCode::OK,
            Alert::SuccessSimple {
                message: "Transaction deleted".to_owned(),
            }
            .into_html(),
        )
            .into_response(),
    }
}
