//! Reads and writes the private cookie that holds the session [Token].

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::{
    Error,
    auth::{Token, UserID},
};

pub(crate) const COOKIE_TOKEN: &str = "token";
/// How long a session lasts without any activity.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

fn now_local(local_offset: UtcOffset) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset)
}

fn build_token_cookie(token: &Token) -> Result<Cookie<'static>, Error> {
    Ok(Cookie::build((COOKIE_TOKEN, token.to_json()?))
        .expires(token.expires_at)
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(true)
        .build())
}

/// Add a cookie to `jar` that logs in `user_id` for `duration` from now.
///
/// # Errors
///
/// Returns [Error::JSONSerializationError] if the token could not be serialized.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
    local_offset: UtcOffset,
) -> Result<PrivateCookieJar, Error> {
    let token = Token::new(user_id, now_local(local_offset), duration);

    Ok(jar.add(build_token_cookie(&token)?))
}

/// Overwrite the auth cookie with an expired dummy value so that the browser deletes it.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the session token from `jar`.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if there is no auth cookie,
/// - [Error::InvalidToken] if the cookie does not hold a token,
/// - [Error::TokenExpired] if the token has expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let token = Token::from_json(cookie.value_trimmed())?;

    if token.is_expired(OffsetDateTime::now_utc()) {
        return Err(Error::TokenExpired);
    }

    Ok(token)
}

/// Push the expiry of the auth cookie in `jar` out to at least `duration` from now.
///
/// Sessions that already last longer, e.g. "remember me" sessions, keep their expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned. See
/// [get_token_from_cookies] for the possible errors.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
    local_offset: UtcOffset,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar)?;
    let extended_token = Token::new(token.user_id, now_local(local_offset), duration);

    let token = Token {
        user_id: token.user_id,
        expires_at: max(token.expires_at, extended_token.expires_at),
    };

    Ok(jar.add(build_token_cookie(&token)?))
}
