//! The account page where users change their username and email.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use email_address::EmailAddress;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, UserID, Username,
    alert::Alert,
    auth::{
        get_user_by_email, get_user_by_id, get_user_by_username, parse_email, update_user_profile,
    },
    endpoints,
    html::{FORM_CONTAINER_STYLE, base, email_input, submit_button, username_input},
    navigation::NavBar,
};

/// The state needed for the account page and endpoint.
#[derive(Debug, Clone)]
pub struct ProfileState {
    /// The database connection for reading and updating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProfileState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The account details entered by the user.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
}

#[derive(Default)]
struct ProfileErrors<'a> {
    username: Option<&'a str>,
    email: Option<&'a str>,
}

fn profile_form(form: &ProfileForm, errors: ProfileErrors) -> Markup {
    html! {
        form
            hx-put=(endpoints::ACCOUNT_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Account" }

            (username_input(&form.username, errors.username))
            (email_input(&form.email, errors.email))

            (submit_button("Save Changes"))
        }
    }
}

/// Display the current user's username and email in an editable form.
pub async fn get_account_page(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_by_id(user_id, &connection)?
    };

    let form = ProfileForm {
        username: user.username.to_string(),
        email: user.email.to_string(),
    };
    let nav_bar = NavBar::new(endpoints::ACCOUNT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            (profile_form(&form, ProfileErrors::default()))
        }
    };

    Ok(base("Account", &[], &content).into_response())
}

/// Checks that no other user already has the new username or email.
///
/// Only values that differ from the user's current ones are checked.
fn check_unique(
    current_username: &Username,
    new_username: &Username,
    current_email: &str,
    new_email: &str,
    connection: &Connection,
) -> Result<(), Error> {
    if current_username != new_username {
        match get_user_by_username(new_username.as_ref(), connection) {
            Ok(_) => return Err(Error::DuplicateUsername),
            Err(Error::NotFound) => {}
            Err(error) => return Err(error),
        }
    }

    if current_email != new_email {
        match get_user_by_email(new_email, connection) {
            Ok(_) => return Err(Error::DuplicateEmail),
            Err(Error::NotFound) => {}
            Err(error) => return Err(error),
        }
    }

    Ok(())
}

fn saved_profile_response(username: &Username, email: &EmailAddress) -> Response {
    let saved_form = ProfileForm {
        username: username.to_string(),
        email: email.to_string(),
    };
    let alert = Alert::SuccessSimple {
        message: "Account details saved".to_owned(),
    };

    html! {
        (profile_form(&saved_form, ProfileErrors::default()))
        (alert.into_html())
    }
    .into_response()
}

/// Change the current user's username and email.
///
/// Responds with the updated form and a success alert, or the form with an
/// inline message when a value is invalid or taken.
pub async fn update_account_endpoint(
    State(state): State<ProfileState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let username = match Username::new(&form.username) {
        Ok(username) => username,
        Err(error) => {
            return profile_form(&form, ProfileErrors {
                username: Some(&error.to_string()),
                ..Default::default()
            })
            .into_response();
        }
    };

    let email = match parse_email(&form.email) {
        Ok(email) => email,
        Err(error) => {
            return profile_form(&form, ProfileErrors {
                email: Some(&error.to_string()),
                ..Default::default()
            })
            .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let result = get_user_by_id(user_id, &connection).and_then(|user| {
        check_unique(
            &user.username,
            &username,
            user.email.as_str(),
            email.as_str(),
            &connection,
        )?;
        update_user_profile(user_id, &username, &email, &connection)?;

        Ok(user)
    });

    match result {
        Ok(old_user) if old_user.username != username => {
            tracing::info!("{} changed their username to {username}", old_user.username);
            saved_profile_response(&username, &email)
        }
        Ok(_) => {
            tracing::info!("user {user_id} updated their account details");
            saved_profile_response(&username, &email)
        }
        Err(error @ Error::DuplicateUsername) => profile_form(&form, ProfileErrors {
            username: Some(&error.to_string()),
            ..Default::default()
        })
        .into_response(),
        Err(error @ Error::DuplicateEmail) => profile_form(&form, ProfileErrors {
            email: Some(&error.to_string()),
            ..Default::default()
        })
        .into_response(),
        Err(error) => {
            tracing::error!("could not update account for user {user_id}: {error}");
            error.into_alert_response()
        }
    }
}
