//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    internal_server_error::InternalServerError,
    not_found::{ForbiddenError, NotFoundError},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no auth token in the cookie jar")]
    CookieMissing,

    /// The auth token cookie could not be parsed.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not parse the auth token: {0}")]
    InvalidToken(String),

    /// The auth token is past its expiry date time.
    #[error("the auth token has expired")]
    TokenExpired,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The username is too short or too long.
    #[error("username must be between {min} and {max} characters long")]
    InvalidUsername {
        /// The minimum number of characters.
        min: usize,
        /// The maximum number of characters.
        max: usize,
    },

    /// The string is not a valid email address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// Another user already has this username.
    #[error("that username is taken, please choose a different one")]
    DuplicateUsername,

    /// Another user already has this email address.
    #[error("that email is taken, please choose a different one")]
    DuplicateEmail,

    /// A required text field was empty or only whitespace.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// An amount was zero, infinite or not a number.
    #[error("amount must be a non-zero number")]
    InvalidAmount,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The current user tried to change a resource owned by another user.
    #[error("you do not have permission to change this resource")]
    Forbidden,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a budget entry that does not exist
    #[error("tried to delete a budget entry that is not in the database")]
    DeleteMissingBudgetEntry,

    /// Tried to update a budget entry that does not exist
    #[error("tried to update a budget entry that is not in the database")]
    UpdateMissingBudgetEntry,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::Forbidden => ForbiddenError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: "The amount must be a number other than zero.".to_owned(),
                },
            ),
            Error::EmptyField(field) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing details".to_owned(),
                    details: format!("The {field} cannot be empty. Fill it in and try again."),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The requested item could not be found.".to_owned(),
                },
            ),
            Error::Forbidden => (
                StatusCode::FORBIDDEN,
                Alert::Error {
                    message: "Permission denied".to_owned(),
                    details: "Only the user who recorded this transaction can change it."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update transaction".to_owned(),
                    details: "The transaction could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingTransaction => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete transaction".to_owned(),
                    details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingBudgetEntry => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update budget entry".to_owned(),
                    details: "The budget entry could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingBudgetEntry => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete budget entry".to_owned(),
                    details: "The budget entry could not be found. \
                    Try refreshing the page to see if the entry has already been deleted."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

#[cfg(test)]
mod from_sql_error_tests {
    use rusqlite::Connection;

    use crate::Error;

    fn must_create_table(connection: &Connection) {
        connection
            .execute(
                "CREATE TABLE user (id INTEGER PRIMARY KEY, username TEXT UNIQUE, email TEXT UNIQUE)",
                (),
            )
            .expect("could not create test table");
        connection
            .execute(
                "INSERT INTO user (username, email) VALUES ('alice', 'alice@example.com')",
                (),
            )
            .expect("could not insert test row");
    }

    #[test]
    fn maps_duplicate_username() {
        let connection = Connection::open_in_memory().unwrap();
        must_create_table(&connection);

        let error = connection
            .execute(
                "INSERT INTO user (username, email) VALUES ('alice', 'other@example.com')",
                (),
            )
            .unwrap_err();

        assert_eq!(Error::from(error), Error::DuplicateUsername);
    }

    #[test]
    fn maps_duplicate_email() {
        let connection = Connection::open_in_memory().unwrap();
        must_create_table(&connection);

        let error = connection
            .execute(
                "INSERT INTO user (username, email) VALUES ('bob', 'alice@example.com')",
                (),
            )
            .unwrap_err();

        assert_eq!(Error::from(error), Error::DuplicateEmail);
    }

    #[test]
    fn maps_no_rows_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }
}
