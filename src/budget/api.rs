//! The endpoints for adding, updating and deleting budget entries.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    budget::{
        core::{create_budget_entry, delete_budget_entry, update_budget_entry},
        form::BudgetForm,
    },
    endpoints::{self, format_endpoint},
};

/// The state needed to change budget entries.
#[derive(Debug, Clone)]
pub struct BudgetApiState {
    /// The database connection for managing budget entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetApiState {
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

fn local_redirect(redirect_url: Option<String>) -> Option<String> {
    redirect_url.filter(|url| url.starts_with('/') && !url.starts_with("//"))
}

/// A route handler for adding money to the budget.
///
/// Redirects to the home page on success.
pub async fn create_budget_entry_endpoint(
    State(state): State<BudgetApiState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    if let Err(error) = form.validate() {
        tracing::warn!("rejected budget entry with amount {}", form.amount_added);
        return error.into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_budget_entry(form.amount_added, form.added_date, &connection) {
        Ok(entry) => {
            tracing::info!(
                "added {} to the budget as entry {}",
                entry.amount_added,
                entry.id
            );
            (
                HxRedirect(endpoints::HOME_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create budget entry: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler for replacing the amount and date of a budget entry.
///
/// Redirects to `redirect_url` if given, otherwise the entry's page.
pub async fn edit_budget_entry_endpoint(
    State(state): State<BudgetApiState>,
    Path(budget_id): Path<i64>,
    Query(query): Query<RedirectQuery>,
    Form(form): Form<BudgetForm>,
) -> Response {
    if let Err(error) = form.validate() {
        tracing::warn!("rejected budget entry with amount {}", form.amount_added);
        return error.into_alert_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_budget_entry(budget_id, form.amount_added, form.added_date, &connection) {
        Ok(_) => tracing::info!("updated budget entry {budget_id}"),
        Err(Error::NotFound) => return Error::UpdateMissingBudgetEntry.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not update budget entry {budget_id}: {error}");
            return error.into_alert_response();
        }
    }

    let redirect_url = local_redirect(query.redirect_url)
        .unwrap_or_else(|| format_endpoint(endpoints::BUDGET_VIEW, budget_id));

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

/// A route handler for deleting a budget entry.
///
/// Redirects to `redirect_url` when given, otherwise responds with a success
/// alert so that HTMX removes the list item.
pub async fn delete_budget_entry_endpoint(
    State(state): State<BudgetApiState>,
    Path(budget_id): Path<i64>,
    Query(query): Query<RedirectQuery>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_budget_entry(budget_id, &connection) {
        Ok(()) => tracing::info!("deleted budget entry {budget_id}"),
        Err(Error::NotFound) => return Error::DeleteMissingBudgetEntry.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete budget entry {budget_id}: {error}");
            return error.into_alert_response();
        }
    }

    match local_redirect(query.redirect_url) {
        Some(redirect_url) => (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response(),
        None => (
            StatusCode::OK,
            Alert::SuccessSimple {
                message: "Budget entry deleted".to_owned(),
            }
            .into_html(),
        )
            .into_response(),
    }
}
