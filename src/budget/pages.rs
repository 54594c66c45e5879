//! The pages for adding, viewing and editing budget entries.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::Date;

use crate::{
    AppState, Error,
    budget::{
        BudgetEntry,
        core::get_budget_entry,
        form::budget_form_fields,
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base, dollar_input_styles,
        format_currency, submit_button,
    },
    navigation::NavBar,
    timezone::get_local_today,
};

/// The state needed by the budget entry pages.
#[derive(Debug, Clone)]
pub struct BudgetPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for reading budget entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Where and how the budget form is submitted.
enum FormTarget<'a> {
    Create(&'a str),
    Update(&'a str),
}

fn budget_form_view(
    title: &str,
    active_endpoint: &str,
    target: FormTarget<'_>,
    fields: Markup,
    button_text: &str,
) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let (post_url, put_url) = match target {
        FormTarget::Create(url) => (Some(url), None),
        FormTarget::Update(url) => (None, Some(url)),
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=[post_url]
                hx-put=[put_url]
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                hx-disabled-elt="#submit-button"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { (title) }

                (fields)

                (submit_button(button_text))
            }
        }
    };

    base(title, &[dollar_input_styles()], &content)
}

fn budget_entry_view(entry: &BudgetEntry) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGET_VIEW).into_html();
    let edit_url = format_endpoint(endpoints::EDIT_BUDGET_VIEW, entry.id);
    let delete_url = format!(
        "{}?redirect_url={}",
        format_endpoint(endpoints::BUDGET_ENTRY_API, entry.id),
        endpoints::HOME_VIEW
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full space-y-4"
            {
                h2 class="text-xl font-bold" { "Budget Entry #" (entry.id) }

                dl
                {
                    div class="flex justify-between py-2 border-b border-gray-200 dark:border-gray-700"
                    {
                        dt class="text-sm text-gray-500 dark:text-gray-400" { "Amount added" }
                        dd class="font-medium" { (format_currency(entry.amount_added)) }
                    }

                    div class="flex justify-between py-2 border-b border-gray-200 dark:border-gray-700"
                    {
                        dt class="text-sm text-gray-500 dark:text-gray-400" { "Date added" }
                        dd class="font-medium" { (entry.added_date) }
                    }
                }

                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm="Are you sure you want to delete this budget entry?"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    };

    base("Budget Entry", &[], &content)
}

fn today(local_timezone: &str) -> Result<Date, Error> {
    get_local_today(local_timezone)
        .inspect_err(|error| tracing::error!("Could not get today's date: {error}"))
}

/// Renders the page for adding money to the budget.
pub async fn get_create_budget_page(
    State(state): State<BudgetPageState>,
) -> Result<Response, Error> {
    let today = today(&state.local_timezone)?;

    Ok(budget_form_view(
        "Add Budget",
        endpoints::NEW_BUDGET_VIEW,
        FormTarget::Create(endpoints::BUDGET_API),
        budget_form_fields(None, today),
        "Add to Budget",
    )
    .into_response())
}

/// Renders the details of the budget entry with the ID in the URL path.
pub async fn get_budget_entry_page(
    State(state): State<BudgetPageState>,
    Path(budget_id): Path<i64>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entry = get_budget_entry(budget_id, &connection)?;

    Ok(budget_entry_view(&entry).into_response())
}

/// Renders the page for editing a budget entry.
pub async fn get_edit_budget_page(
    State(state): State<BudgetPageState>,
    Path(budget_id): Path<i64>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let entry = get_budget_entry(budget_id, &connection)?;
    let update_url = format_endpoint(endpoints::BUDGET_ENTRY_API, entry.id);

    Ok(budget_form_view(
        "Edit Budget Entry",
        endpoints::EDIT_BUDGET_VIEW,
        FormTarget::Update(&update_url),
        budget_form_fields(Some(entry.amount_added), entry.added_date),
        "Update Budget Entry",
    )
    .into_response())
}
