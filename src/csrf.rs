use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::error::{AppError, AppResult};

pub const COOKIE_NAME: &str = "topmovies_csrf";
pub const FIELD_NAME: &str = "csrf_token";

/// Token to embed in a form, reusing the one already held in the cookie.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(existing) = jar.get(COOKIE_NAME) {
        let token = existing.value().to_string();
        return (jar, token);
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict);
    (jar.add(cookie), token)
}

pub fn verify(jar: &SignedCookieJar, submitted: &str) -> AppResult<()> {
    match jar.get(COOKIE_NAME) {
        Some(cookie) if !submitted.is_empty() && cookie.value() == submitted => Ok(()),
        _ => Err(AppError::BadRequest(
            "The form has expired or its security token is missing. Reload the page and try again."
                .to_string(),
        )),
    }
}
