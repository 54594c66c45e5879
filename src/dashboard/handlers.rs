//! Route handlers for the home page and the per-user transaction listing.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, BudgetEntry, Error, UserID,
    auth::{get_user_by_id, get_user_by_username},
    dashboard::tables::{budget_entry_list, transaction_table},
    endpoints::{self, format_endpoint},
    html::{PAGE_CONTAINER_STYLE, base, format_currency},
    ledger::{TransactionPage, list_transactions, recent_budget_entries, remaining_budget},
    navigation::NavBar,
    pagination::{PageQuery, PaginationConfig, create_pagination_indicators, pagination_nav},
};

/// The state needed for the transaction listing pages.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading the ledger.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how the page links are shown.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

fn remaining_budget_card(remaining: f64) -> Markup {
    let colour = if remaining >= 0.0 {
        "text-green-600 dark:text-green-400"
    } else {
        "text-red-600 dark:text-red-400"
    };

    html! {
        div class="rounded-lg shadow bg-white dark:bg-gray-800 p-4"
        {
            h3 class="text-lg font-semibold mb-2" { "Remaining budget" }
            p id="remaining-budget" class={"text-3xl font-bold " (colour)}
            {
                (format_currency(remaining))
            }
        }
    }
}

fn listing_section(
    heading: &str,
    listing: &TransactionPage,
    current_username: &str,
    pagination_config: &PaginationConfig,
    base_url: &str,
) -> Markup {
    let indicators = create_pagination_indicators(
        listing.page,
        listing.total_pages,
        pagination_config.max_pages,
    );

    html! {
        section class="space-y-4"
        {
            h2 class="text-xl font-bold" { (heading) }

            (transaction_table(&listing.items, current_username))

            (pagination_nav(&indicators, base_url))
        }
    }
}

fn home_view(
    remaining: f64,
    budget_entries: &[BudgetEntry],
    listing_section: Markup,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::HOME_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="grid gap-4 md:grid-cols-2 mb-8"
            {
                (remaining_budget_card(remaining))
                (budget_entry_list(budget_entries))
            }

            (listing_section)
        }
    };

    base("Home", &[], &content)
}

/// Display the remaining budget, the latest budget entries and everyone's
/// transactions, one page at a time.
pub async fn get_home_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<PageQuery>,
) -> Result<Response, Error> {
    let page = query.page.unwrap_or(state.pagination_config.default_page);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_user_by_id(user_id, &connection)?;
    let remaining = remaining_budget(&connection)
        .inspect_err(|error| tracing::error!("could not get remaining budget: {error}"))?;
    let budget_entries = recent_budget_entries(&connection)
        .inspect_err(|error| tracing::error!("could not get recent budget entries: {error}"))?;
    let listing = list_transactions(page, None, &connection)
        .inspect_err(|error| tracing::error!("could not get page {page} of transactions: {error}"))?;

    let section = listing_section(
        "Transactions",
        &listing,
        user.username.as_ref(),
        &state.pagination_config,
        endpoints::HOME_VIEW,
    );

    Ok(home_view(remaining, &budget_entries, section).into_response())
}

/// Display the transactions recorded by the user named in the URL path.
///
/// Responds with the 404 page if there is no user with that name.
pub async fn get_user_transactions_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, Error> {
    let page = query.page.unwrap_or(state.pagination_config.default_page);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let current_user = get_user_by_id(user_id, &connection)?;
    let owner = get_user_by_username(&username, &connection)?;
    let listing = list_transactions(page, Some(owner.username.as_ref()), &connection)
        .inspect_err(|error| {
            tracing::error!("could not get page {page} of {username}'s transactions: {error}")
        })?;

    let base_url = format_endpoint(endpoints::USER_TRANSACTIONS_VIEW, &owner.username);
    let section = listing_section(
        &format!("Transactions by {}", owner.username),
        &listing,
        current_user.username.as_ref(),
        &state.pagination_config,
        &base_url,
    );

    let nav_bar = NavBar::new(endpoints::USER_TRANSACTIONS_VIEW).into_html();
    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE) { (section) }
    };

    Ok(base(&format!("{}'s Transactions", owner.username), &[], &content).into_response())
}
