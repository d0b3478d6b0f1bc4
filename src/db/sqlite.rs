use crate::db::models::{TodoItem, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::ApiError;
use sqlx::{Pool, Sqlite};

pub type SqlitePool = Pool<Sqlite>;

/// Repository over the relational store. Every todo operation is scoped to
/// an owning user id; there is no unscoped todo access.
#[derive(Clone)]
pub struct TodoStorage {
    pool: SqlitePool,
}

impl TodoStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the tables if they are absent.
    pub async fn init_schema(&self) -> Result<(), ApiError> {
        // sqlx::query takes one statement at a time, so feed the DDL piecewise
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a new user and return the assigned id. A username collision
    /// surfaces as the conflict error instead of a raw database fault.
    pub async fn insert_user(&self, username: &str, password_hash: &str) -> Result<i64, ApiError> {
        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await;
        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(ApiError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// All todos owned by the given user, id-ascending for deterministic
    /// output.
    pub async fn list_todos_by_owner(&self, owner_id: i64) -> Result<Vec<TodoItem>, ApiError> {
        let todos = sqlx::query_as::<_, TodoItem>(
            "SELECT id, task, status FROM todos WHERE user_id = ? ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    pub async fn insert_todo(
        &self,
        owner_id: i64,
        task: &str,
        status: bool,
    ) -> Result<TodoItem, ApiError> {
        let todo = sqlx::query_as::<_, TodoItem>(
            "INSERT INTO todos (task, status, user_id) VALUES (?, ?, ?) RETURNING id, task, status",
        )
        .bind(task)
        .bind(status)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    /// Ownership-scoped lookup: a todo owned by someone else is
    /// indistinguishable from a missing one.
    pub async fn find_todo_by_id_and_owner(
        &self,
        id: i64,
        owner_id: i64,
    ) -> Result<Option<TodoItem>, ApiError> {
        let todo = sqlx::query_as::<_, TodoItem>(
            "SELECT id, task, status FROM todos WHERE id = ? AND user_id = ?",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    /// Write both fields of an owned todo. None when the row is absent or
    /// owned by someone else.
    pub async fn update_todo(
        &self,
        id: i64,
        owner_id: i64,
        task: &str,
        status: bool,
    ) -> Result<Option<TodoItem>, ApiError> {
        let todo = sqlx::query_as::<_, TodoItem>(
            "UPDATE todos SET task = ?, status = ? WHERE id = ? AND user_id = ? RETURNING id, task, status",
        )
        .bind(task)
        .bind(status)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(todo)
    }

    /// Returns true when a row was removed.
    pub async fn delete_todo(&self, id: i64, owner_id: i64) -> Result<bool, ApiError> {
        let done = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
