//! Cookie session carrying the signed-in account id
//!
//! The cookie is signed with the key in [`AppState`](crate::database::AppState),
//! so a client can read its account id but cannot forge another one.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";

/// Returns the account id of a verified session, if any.
pub fn account_id(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| !id.is_empty())
}

/// Marks the session as authenticated for `account_id`.
pub fn sign_in(jar: SignedCookieJar, account_id: &str) -> SignedCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, account_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    jar.add(cookie)
}

/// Drops the session cookie.
pub fn sign_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
