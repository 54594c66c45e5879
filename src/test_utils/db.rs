use email_address::EmailAddress;
use rusqlite::Connection;

use crate::{
    PasswordHash, User, Username,
    auth::{create_user, parse_email},
    db::initialize,
};

/// The password that matches [TEST_PASSWORD_HASH].
pub(crate) const TEST_PASSWORD: &str = "okon";

/// A bcrypt hash of [TEST_PASSWORD]. Hashing at the default cost in every
/// test would make the test suite crawl.
pub(crate) const TEST_PASSWORD_HASH: &str =
    "$2b$12$Gwf0uvxH3L7JLfo0CC/NCOoijK2vQ/wbgP.LeNup8vj6gg31IiFkm";

#[track_caller]
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

#[track_caller]
pub(crate) fn create_test_user(username: &str, email: &str, connection: &Connection) -> User {
    create_user(
        Username::new_unchecked(username),
        test_email(email),
        PasswordHash::new_unchecked(TEST_PASSWORD_HASH),
        connection,
    )
    .expect("Could not create test user")
}

#[track_caller]
pub(crate) fn test_email(email: &str) -> EmailAddress {
    parse_email(email).expect("Invalid test email")
}
