//! The page that shows the details of a single transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID,
    auth::get_user_by_id,
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, format_currency, link},
    navigation::NavBar,
    transaction::{Transaction, core::get_transaction},
};

/// The state needed for the transaction details page.
#[derive(Debug, Clone)]
pub struct TransactionPageState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn detail_row(label: &str, value: Markup) -> Markup {
    html! {
        div class="flex justify-between py-2 border-b border-gray-200 dark:border-gray-700"
        {
            dt class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            dd class="font-medium" { (value) }
        }
    }
}

fn transaction_view(transaction: &Transaction, is_owner: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTION_VIEW).into_html();
    let owner_url = format_endpoint(
        endpoints::USER_TRANSACTIONS_VIEW,
        &transaction.owner_username,
    );
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format!(
        "{}?redirect_url={}",
        format_endpoint(endpoints::TRANSACTION_API, transaction.id),
        endpoints::HOME_VIEW
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full space-y-4"
            {
                h2 class="text-xl font-bold" { "Transaction #" (transaction.id) }

                dl
                {
                    (detail_row("Amount", html! { (format_currency(transaction.amount)) }))
                    (detail_row("Date", html! { (transaction.date) }))
                    (detail_row("Description", html! { (transaction.description) }))
                    (detail_row("Category", html! { (transaction.category) }))
                    (detail_row("Card", html! { (transaction.card_name) }))
                    (detail_row("Recorded by", link(&owner_url, &transaction.owner_username)))
                }

                @if is_owner {
                    div class="flex gap-4"
                    {
                        a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                        button
                            type="button"
                            hx-delete=(delete_url)
                            hx-confirm="Are you sure you want to delete this transaction?"
                            hx-target-error="#alert-container"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        }
    };

    base("Transaction", &[], &content)
}

/// Renders the details of the transaction with the ID in the URL path.
///
/// The controls for editing and deleting the transaction are only shown to
/// the user who recorded it.
pub async fn get_transaction_page(
    State(state): State<TransactionPageState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<i64>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, &connection).inspect_err(|error| {
        if *error != Error::NotFound {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
        }
    })?;
    let user = get_user_by_id(user_id, &connection)?;
    let is_owner = user.username.as_ref() == transaction.owner_username;

    Ok(transaction_view(&transaction, is_owner).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        test_utils::{
            assert_status_ok, assert_valid_html, create_test_user, get_test_connection,
            parse_html_document,
        },
        transaction::{Transaction, create_transaction},
    };

    use super::{TransactionPageState, get_transaction_page};

    fn get_test_state() -> (TransactionPageState, crate::User, crate::User) {
        let conn = get_test_connection();
        let alice = create_test_user("alice", "alice@example.com", &conn);
        let bob = create_test_user("bob", "bob@example.com", &conn);
        create_transaction(
            "alice",
            Transaction::build(42.5, date!(2025 - 10 - 01), "Groceries run")
                .category("Food")
                .card_name("Visa"),
            &conn,
        )
        .unwrap();

        let state = TransactionPageState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        (state, alice, bob)
    }

    #[tokio::test]
    async fn owner_sees_edit_and_delete() {
        let (state, alice, _) = get_test_state();

        let response = get_transaction_page(State(state), Extension(alice.id), Path(1))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("Groceries run"));
        assert!(text.contains("$42.50"));
        let delete_selector = Selector::parse("button[hx-delete]").unwrap();
        assert_eq!(document.select(&delete_selector).count(), 1);
        let edit_selector = Selector::parse("a[href='/transactions/1/edit']").unwrap();
        assert_eq!(document.select(&edit_selector).count(), 1);
    }

    #[tokio::test]
    async fn other_users_do_not_see_edit_and_delete() {
        let (state, _, bob) = get_test_state();

        let response = get_transaction_page(State(state), Extension(bob.id), Path(1))
            .await
            .unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        let delete_selector = Selector::parse("button[hx-delete]").unwrap();
        assert_eq!(document.select(&delete_selector).count(), 0);
        let edit_selector = Selector::parse("a[href='/transactions/1/edit']").unwrap();
        assert_eq!(document.select(&edit_selector).count(), 0);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let (state, alice, _) = get_test_state();

        let response = get_transaction_page(State(state), Extension(alice.id), Path(999))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
