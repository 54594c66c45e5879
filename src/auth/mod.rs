//! User accounts, passwords, session cookies and the pages for logging in and out.

mod cookie;
mod forgot_password;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod redirect;
mod register_user;
mod token;
mod user;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub use forgot_password::get_forgot_password_page;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use password::{PasswordHash, ValidatedPassword};
pub use register_user::{get_register_page, register_user};
pub(crate) use token::Token;
pub use user::{
    User, UserID, Username, create_user, create_user_table, get_user_by_email, get_user_by_id,
    get_user_by_username, parse_email, update_password_by_email, update_user_profile,
};

#[cfg(test)]
pub(crate) use cookie::{COOKIE_TOKEN, set_auth_cookie};
#[cfg(test)]
pub(crate) use middleware::AuthState;
#[cfg(test)]
pub(crate) use user::count_users;
