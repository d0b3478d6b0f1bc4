use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::middleware::auth::session_cookie;
use crate::router::TasklistState;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// POST /register -> create an account. Does not log the new user in.
pub async fn register(
    State(state): State<TasklistState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError> {
    let cost = state.bcrypt_cost();
    let password = body.password;
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

    state
        .storage()
        .insert_user(&body.username, &password_hash)
        .await?;
    info!(username = %body.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

/// POST /login -> verify credentials and establish the session cookie.
///
/// An unknown username and a wrong password produce the same 401 so the
/// response never confirms whether an account exists.
pub async fn login(
    State(state): State<TasklistState>,
    jar: PrivateCookieJar,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .storage()
        .find_user_by_username(&body.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let user_id = user.id;
    let password = body.password;
    let ok =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &user.password_hash)).await??;
    if !ok {
        return Err(ApiError::InvalidCredentials);
    }

    info!(user_id, "login successful");
    let jar = jar.add(session_cookie(user_id));
    Ok((jar, Json(json!({ "message": "Login successful" }))))
}
