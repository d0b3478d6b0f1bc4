use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::models::TodoItem;
use crate::error::ApiError;
use crate::middleware::auth::CurrentUser;
use crate::router::TasklistState;

#[derive(Debug, Deserialize)]
pub struct CreateTodoBody {
    pub task: Option<String>,
    pub status: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoBody {
    pub task: Option<String>,
    pub status: Option<Value>,
}

/// Loose-typed status input -> bool. Strings are used verbatim, any other
/// value goes through its JSON rendering; the result is ASCII-lowercased
/// and matched exactly (no trimming) against {"true", "1", "yes"}.
/// Everything else, including absence, is false.
fn normalize_status(raw: Option<&Value>) -> bool {
    let token = match raw {
        None | Some(Value::Null) => return false,
        Some(Value::String(s)) => s.to_ascii_lowercase(),
        Some(other) => other.to_string().to_ascii_lowercase(),
    };
    matches!(token.as_str(), "true" | "1" | "yes")
}

/// GET /get_todo -> every todo owned by the caller, id-ascending.
pub async fn list_todos(
    State(state): State<TasklistState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let todos = state.storage().list_todos_by_owner(user.id).await?;
    Ok(Json(todos))
}

/// POST /create_todo -> insert a todo owned by the caller.
pub async fn create_todo(
    State(state): State<TasklistState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<CreateTodoBody>,
) -> Result<impl IntoResponse, ApiError> {
    let task = body
        .task
        .filter(|task| !task.is_empty())
        .ok_or(ApiError::TaskRequired)?;
    let status = normalize_status(body.status.as_ref());

    let todo = state.storage().insert_todo(user.id, &task, status).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /update_todos/{id} -> partial update; omitted fields keep their
/// stored values. An id owned by someone else reads as not found.
pub async fn update_todo(
    State(state): State<TasklistState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTodoBody>,
) -> Result<Json<TodoItem>, ApiError> {
    let current = state
        .storage()
        .find_todo_by_id_and_owner(id, user.id)
        .await?
        .ok_or(ApiError::TodoNotFound)?;

    let task = body.task.unwrap_or(current.task);
    let status = body
        .status
        .as_ref()
        .map(|value| normalize_status(Some(value)))
        .unwrap_or(current.status);

    let updated = state
        .storage()
        .update_todo(id, user.id, &task, status)
        .await?
        .ok_or(ApiError::TodoNotFound)?;
    Ok(Json(updated))
}

/// DELETE /del_todos/{id} -> remove the caller's todo permanently.
pub async fn delete_todo(
    State(state): State<TasklistState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.storage().delete_todo(id, user.id).await?;
    if !deleted {
        return Err(ApiError::TodoNotFound);
    }
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
