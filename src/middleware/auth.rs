use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};

use crate::db::models::User;
use crate::error::ApiError;
use crate::router::TasklistState;

/// Name of the session cookie. Its value is the user id, encrypted and
/// authenticated with the server key, so callers can neither read nor forge
/// it.
pub const SESSION_COOKIE: &str = "session";

/// Session cookie for a logged-in user. No max-age: the session lives until
/// the client discards it (no expiry or logout is defined).
pub fn session_cookie(user_id: i64) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Resolved identity of the calling session.
///
/// Extracting this in a handler is the authentication gate: the request is
/// rejected with 401 before the handler body runs when the session cookie
/// is absent, unreadable, or names a user that no longer exists. Protected
/// handlers must take their identity from here and nowhere else.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<TasklistState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &TasklistState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key());
        let user_id = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse::<i64>().ok())
            .ok_or(ApiError::Unauthorized)?;
        let user = state
            .storage()
            .find_user_by_id(user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        Ok(CurrentUser(user))
    }
}
