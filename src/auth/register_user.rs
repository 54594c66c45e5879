//! The registration page for creating a new user account.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, PasswordHash, Username, ValidatedPassword,
    auth::{
        cookie::get_token_from_cookies,
        user::{create_user, parse_email},
    },
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, email_input, log_in_register,
        password_input, submit_button, username_input,
    },
};

/// The minimum number of characters the password should have to be considered valid on the client side (server-side validation is done on top of this validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
                autofocus[error_message.is_some()]
            ;

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }

    }
}

/// Inline error messages for the registration form, one per field.
#[derive(Default)]
struct RegistrationErrors<'a> {
    username: Option<&'a str>,
    email: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn registration_form(form: &RegisterForm, errors: RegistrationErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            (username_input(&form.username, errors.username))
            (email_input(&form.email, errors.email))
            (password_input(&form.password, PASSWORD_INPUT_MIN_LENGTH, errors.password))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, errors.confirm_password))

            (submit_button("Create Account"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
///
/// Visitors who already have a valid session are sent to the home page.
pub async fn get_register_page(jar: PrivateCookieJar) -> Response {
    if get_token_from_cookies(&jar).is_ok() {
        return Redirect::to(endpoints::HOME_VIEW).into_response();
    }

    let registration_form = registration_form(&RegisterForm::default(), Default::default());
    let content = log_in_register("Create Account", &registration_form);
    base("Register", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

/// The raw data entered by the user in the registration form.
#[derive(Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Re-render the form with the user's input and `errors`.
///
/// The password fields are cleared so that the browser does not keep a
/// rejected password around.
fn render_form(user_data: &RegisterForm, errors: RegistrationErrors) -> Response {
    let form = RegisterForm {
        username: user_data.username.clone(),
        email: user_data.email.clone(),
        password: String::new(),
        confirm_password: String::new(),
    };

    registration_form(&form, errors).into_response()
}

/// Create a new user and send them to the log-in page.
///
/// Validation problems are reported inline by returning the form with the
/// offending field's error message.
pub async fn register_user(
    State(state): State<RegistrationState>,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let username = match Username::new(&user_data.username) {
        Ok(username) => username,
        Err(error) => {
            return render_form(&user_data, RegistrationErrors {
                username: Some(&error.to_string()),
                ..Default::default()
            });
        }
    };

    let email = match parse_email(&user_data.email) {
        Ok(email) => email,
        Err(error) => {
            return render_form(&user_data, RegistrationErrors {
                email: Some(&error.to_string()),
                ..Default::default()
            });
        }
    };

    let validated_password =
        match ValidatedPassword::new(&user_data.password, &[username.as_ref(), email.as_str()]) {
            Ok(password) => password,
            Err(error) => {
                return render_form(&user_data, RegistrationErrors {
                    password: Some(&error.to_string()),
                    ..Default::default()
                });
            }
        };

    if user_data.password != user_data.confirm_password {
        return render_form(&user_data, RegistrationErrors {
            confirm_password: Some("Passwords do not match"),
            ..Default::default()
        });
    }

    let password_hash = match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(error) => {
            tracing::error!("an error occurred while hashing a password: {error}");

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
            )
                .into_response();
        }
    };

    let result = match state.db_connection.lock() {
        Ok(connection) => create_user(username, email, password_hash, &connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            Err(Error::DatabaseLockError)
        }
    };

    match result {
        Ok(user) => {
            tracing::info!("Registered new user {}", user.username);

            (
                StatusCode::SEE_OTHER,
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
            )
                .into_response()
        }
        Err(error @ Error::DuplicateUsername) => render_form(&user_data, RegistrationErrors {
            username: Some(&error.to_string()),
            ..Default::default()
        }),
        Err(error @ Error::DuplicateEmail) => render_form(&user_data, RegistrationErrors {
            email: Some(&error.to_string()),
            ..Default::default()
        }),
        Err(error) => {
            tracing::error!("An unhandled error occurred while inserting a new user: {error}");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
            )
                .into_response()
        }
    }
}
