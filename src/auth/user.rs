//! Code for creating the user table and fetching users from the database.

use std::{fmt::Display, str::FromStr};

use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name a user is known by, between [Username::MIN_LENGTH] and
/// [Username::MAX_LENGTH] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// The fewest characters a username may have.
    pub const MIN_LENGTH: usize = 2;
    /// The most characters a username may have.
    pub const MAX_LENGTH: usize = 20;

    /// Trim and check the length of `raw_username`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidUsername] if the trimmed name is too short or too long.
    pub fn new(raw_username: &str) -> Result<Self, Error> {
        let username = raw_username.trim();
        let length = username.chars().count();

        if (Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            Ok(Self(username.to_owned()))
        } else {
            Err(Error::InvalidUsername {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            })
        }
    }

    /// Wrap a username that was read back from the database.
    pub fn new_unchecked(raw_username: &str) -> Self {
        Self(raw_username.to_owned())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse and check an email address typed in by a user.
///
/// # Errors
///
/// Returns [Error::InvalidEmail] if `raw_email` is not a valid address.
pub fn parse_email(raw_email: &str) -> Result<EmailAddress, Error> {
    let raw_email = raw_email.trim();

    EmailAddress::from_str(raw_email).map_err(|_| Error::InvalidEmail(raw_email.to_owned()))
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's unique display name. Transactions are recorded against it.
    pub username: Username,
    /// The user's unique email address, used to log in.
    pub email: EmailAddress,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let raw_username: String = row.get(1)?;
    let raw_email: String = row.get(2)?;
    let raw_password_hash: String = row.get(3)?;

    Ok(User {
        id: UserID::new(raw_id),
        username: Username::new_unchecked(&raw_username),
        email: EmailAddress::new_unchecked(raw_email),
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
    })
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns [Error::DuplicateUsername] or [Error::DuplicateEmail] if another
/// user already has the username or email, or [Error::SqlError] if some other
/// SQL related error occurred.
pub fn create_user(
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (username, email, password) VALUES (?1, ?2, ?3)",
        (username.as_ref(), email.as_str(), password_hash.as_ref()),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username,
        email,
        password_hash,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, email, password FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], map_user_row)
        .map_err(|error| error.into())
}

/// Get the user that logs in with `email`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user has that email.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, email, password FROM user WHERE email = :email")?
        .query_row(&[(":email", email)], map_user_row)
        .map_err(|error| error.into())
}

/// Get the user called `username`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user has that username.
pub fn get_user_by_username(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, username, email, password FROM user WHERE username = :username")?
        .query_row(&[(":username", username)], map_user_row)
        .map_err(|error| error.into())
}

/// Change the username and email of the user with `user_id`.
///
/// The user's transactions are moved to the new username by the foreign key's
/// `ON UPDATE CASCADE` clause.
///
/// # Errors
///
/// Returns [Error::NotFound] if the user does not exist, or
/// [Error::DuplicateUsername]/[Error::DuplicateEmail] if another user already
/// has the new username or email.
pub fn update_user_profile(
    user_id: UserID,
    username: &Username,
    email: &EmailAddress,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE user SET username = ?1, email = ?2 WHERE id = ?3",
        (username.as_ref(), email.as_str(), user_id.as_i64()),
    )?;

    match rows_affected {
        0 => Err(Error::NotFound),
        _ => Ok(()),
    }
}

/// Set a new password hash for the user that logs in with `email`.
///
/// Returns the number of rows changed.
///
/// # Errors
///
/// Returns [Error::SqlError] if an SQL related error occurred.
pub fn update_password_by_email(
    email: &str,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<usize, Error> {
    connection
        .execute(
            "UPDATE user SET password = ?1 WHERE email = ?2",
            (password_hash.as_ref(), email),
        )
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
#[cfg(test)]
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

#[cfg(test)]
mod username_tests {
    use crate::{Error, Username};

    #[test]
    fn accepts_name_within_limits() {
        assert_eq!(Username::new("al").unwrap().as_ref(), "al");
        assert!(Username::new("abcdefghijklmnopqrst").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(Username::new("  alice ").unwrap().as_ref(), "alice");
    }

    #[test]
    fn rejects_too_short() {
        assert_eq!(
            Username::new(" a "),
            Err(Error::InvalidUsername { min: 2, max: 20 })
        );
    }

    #[test]
    fn rejects_too_long() {
        assert!(matches!(
            Username::new("abcdefghijklmnopqrstu"),
            Err(Error::InvalidUsername { .. })
        ));
    }
}
