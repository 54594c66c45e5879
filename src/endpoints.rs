//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}', use
//! [format_endpoint].

use std::fmt::{Display, Write};

/// The root route which redirects to the home page.
pub const ROOT: &str = "/";
/// The landing page for logged in users with the remaining budget and all transactions.
pub const HOME_VIEW: &str = "/home";
/// The page listing the transactions recorded by one user.
pub const USER_TRANSACTIONS_VIEW: &str = "/users/{username}/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page showing the details of a single transaction.
pub const TRANSACTION_VIEW: &str = "/transactions/{transaction_id}";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The page for adding money to the budget.
pub const NEW_BUDGET_VIEW: &str = "/budget/new";
/// The page showing the details of a single budget entry.
pub const BUDGET_VIEW: &str = "/budget/{budget_id}";
/// The page for editing an existing budget entry.
pub const EDIT_BUDGET_VIEW: &str = "/budget/{budget_id}/edit";
/// The page for changing the current user's username and email.
pub const ACCOUNT_VIEW: &str = "/account";
/// The page to display when a user's credentials are invalid or the user is not logged in.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page for registering a new user.
pub const REGISTER_VIEW: &str = "/register";
/// The page explaining how to reset a forgotten password.
pub const FORGOT_PASSWORD_VIEW: &str = "/forgot_password";
/// The page to display when an unexpected error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The directory containing static files.
pub const STATIC: &str = "/static";

/// I'm a teapot.
pub const COFFEE: &str = "/api/coffee";
/// The route for handling log-in requests.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for logging out and invalidating the session cookie.
pub const LOG_OUT: &str = "/log_out";
/// The route for registering a new user.
pub const USERS: &str = "/api/users";
/// The route for updating the current user's username and email.
pub const ACCOUNT_API: &str = "/api/account";
/// The route for creating transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for updating or deleting a single transaction.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";
/// The route for creating budget entries.
pub const BUDGET_API: &str = "/api/budget";
/// The route for updating or deleting a single budget entry.
pub const BUDGET_ENTRY_API: &str = "/api/budget/{budget_id}";

/// Replace the first parameter in `endpoint_path` with `value`.
///
/// `value` is percent-encoded so that strings such as usernames give a valid URI.
///
/// ```ignore
/// assert_eq!(format_endpoint("/transactions/{transaction_id}", 1), "/transactions/1");
/// ```
pub fn format_endpoint(endpoint_path: &str, value: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| param_start + offset + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        encode_path_segment(&value.to_string()),
        &endpoint_path[param_end..]
    )
}

/// Percent-encode everything except the unreserved characters of RFC 3986.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());

    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }

    encoded
}
